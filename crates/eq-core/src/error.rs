use thiserror::Error;

pub type EqResult<T> = Result<T, EqError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EqError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: &'static str },

    #[error("Value {value} out of range for {what}")]
    OutOfRange { what: &'static str, value: f64 },
}
