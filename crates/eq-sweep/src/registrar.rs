//! Installation of element-molality equation constraints.
//!
//! Engines natively impose temperature, pressure, fugacity and pH, but not a
//! target for the total dissolved amount of an element. Such a target is added
//! in three steps, parameterized by the element symbol:
//!
//! 1. register a named input carrying the target molality
//! 2. register an equation constraint `target - molality(element) = 0`
//! 3. open the system to the element so the solver may titrate it

use eq_engine::{AqueousProps, EquationConstraint, EquilibriumSpecs};

/// Residual `inputs[input_index] - element_molality(element)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementMolalityConstraint {
    id: String,
    element: String,
    input_index: usize,
}

impl ElementMolalityConstraint {
    pub fn new(element: impl Into<String>, input_index: usize) -> Self {
        let element = element.into();
        Self {
            id: element.clone(),
            element,
            input_index,
        }
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn input_index(&self) -> usize {
        self.input_index
    }
}

impl EquationConstraint for ElementMolalityConstraint {
    fn id(&self) -> &str {
        &self.id
    }

    fn residual(&self, props: &dyn AqueousProps, inputs: &[f64]) -> f64 {
        // An input the engine never supplied leaves the residual undefined.
        let target = inputs.get(self.input_index).copied().unwrap_or(f64::NAN);
        target - props.element_molality(&self.element)
    }
}

/// Add an element-molality target to `specs` and return its input index.
///
/// Nothing is validated here: an element absent from the system only shows up
/// as a failed solve.
pub fn register_element_molality<S: EquilibriumSpecs + ?Sized>(specs: &mut S, element: &str) -> usize {
    let input_index = specs.add_input(element);
    specs.add_constraint(Box::new(ElementMolalityConstraint::new(element, input_index)));
    specs.open_to(element);
    tracing::debug!(element, input_index, "registered element molality constraint");
    input_index
}
