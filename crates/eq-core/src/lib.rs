//! eq-core: shared foundation for eqsweep.
//!
//! Contains:
//! - units (uom SI types, constructors, unit-string parsing)
//! - numeric (finiteness checks, clamped logarithm)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{EqError, EqResult};
pub use numeric::*;
pub use units::*;
