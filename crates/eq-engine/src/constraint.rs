//! User-defined equation constraints.

/// Aqueous-phase properties visible to an equation constraint.
pub trait AqueousProps {
    /// Moles of `element` dissolved per kilogram of solvent.
    ///
    /// Elements absent from the aqueous phase report zero.
    fn element_molality(&self, element: &str) -> f64;
}

/// An equation that must evaluate to zero at equilibrium.
///
/// Implementations are plain data: everything the residual needs (input
/// indices, element symbols) is stored on the implementing type and the value
/// is moved into the specification on registration.
pub trait EquationConstraint: Send + Sync {
    /// Identifier of the constraint, unique within a specification.
    fn id(&self) -> &str;

    /// Residual at the current properties, given the values of the named inputs
    /// in registration order.
    fn residual(&self, props: &dyn AqueousProps, inputs: &[f64]) -> f64;
}
