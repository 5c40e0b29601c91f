//! Chemical state snapshots.

use crate::error::EngineResult;
use eq_core::units::{Pressure, Temperature};

/// Composition and conditions of a chemical system.
///
/// `Clone` must produce an independent deep copy.
pub trait ChemicalState: Clone {
    /// Add a quantity of a substance (`unit` is an amount or mass tag).
    fn add(&mut self, substance: &str, amount: f64, unit: &str) -> EngineResult<()>;

    fn temperature(&self) -> Temperature;

    fn pressure(&self) -> Pressure;

    /// Amount of a species in mol (zero when absent).
    fn amount(&self, species: &str) -> f64;
}
