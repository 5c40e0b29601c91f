//! Per-solve equilibrium conditions.

use crate::error::EngineResult;

/// Concrete targets bound to the unknowns of a specification.
///
/// Units are tags understood by the engine; an empty tag selects the engine's
/// native SI unit.
pub trait EquilibriumConditions {
    fn temperature(&mut self, value: f64, unit: &str) -> EngineResult<()>;

    fn pressure(&mut self, value: f64, unit: &str) -> EngineResult<()>;

    fn fugacity(&mut self, species: &str, value: f64, unit: &str) -> EngineResult<()>;

    fn ph(&mut self, value: f64) -> EngineResult<()>;

    /// Set a named input registered with `EquilibriumSpecs::add_input`.
    fn set(&mut self, name: &str, value: f64) -> EngineResult<()>;
}
