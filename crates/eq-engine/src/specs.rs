//! Specification of the unknowns an equilibrium solver determines.

use crate::constraint::EquationConstraint;

/// Mutable specification built incrementally before solving.
///
/// Declaring an unknown is idempotent from the solver's point of view: the set
/// of declared unknowns is what matters, not the order of declaration.
pub trait EquilibriumSpecs {
    /// Temperature becomes an imposed condition.
    fn declare_temperature(&mut self);

    /// Pressure becomes an imposed condition.
    fn declare_pressure(&mut self);

    /// Fugacity of a gaseous species becomes an imposed condition.
    fn declare_fugacity(&mut self, species: &str);

    /// pH becomes an imposed condition.
    fn declare_ph(&mut self);

    /// Register a named scalar input and return its index.
    fn add_input(&mut self, name: &str) -> usize;

    /// Register an equation constraint.
    fn add_constraint(&mut self, constraint: Box<dyn EquationConstraint>);

    /// Allow the solver to exchange `element` with an implicit titrant.
    fn open_to(&mut self, element: &str);

    /// Names of the registered inputs, in index order.
    fn inputs(&self) -> &[String];
}
