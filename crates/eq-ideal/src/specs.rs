//! Specification for the ideal engine.

use crate::system::IdealSystem;
use eq_engine::{EquationConstraint, EquilibriumSpecs};
use std::fmt;
use std::sync::Arc;

/// Declared unknowns, named inputs, equation constraints and open elements.
#[derive(Clone)]
pub struct IdealSpecs {
    pub(crate) system: IdealSystem,
    pub(crate) temperature: bool,
    pub(crate) pressure: bool,
    pub(crate) ph: bool,
    pub(crate) fugacities: Vec<String>,
    pub(crate) inputs: Vec<String>,
    pub(crate) constraints: Vec<Arc<dyn EquationConstraint>>,
    pub(crate) open_elements: Vec<String>,
}

impl IdealSpecs {
    pub fn new(system: &IdealSystem) -> Self {
        Self {
            system: system.clone(),
            temperature: false,
            pressure: false,
            ph: false,
            fugacities: Vec::new(),
            inputs: Vec::new(),
            constraints: Vec::new(),
            open_elements: Vec::new(),
        }
    }

    pub fn system(&self) -> &IdealSystem {
        &self.system
    }

    pub fn has_temperature(&self) -> bool {
        self.temperature
    }

    pub fn has_pressure(&self) -> bool {
        self.pressure
    }

    pub fn has_ph(&self) -> bool {
        self.ph
    }

    pub fn fugacities(&self) -> &[String] {
        &self.fugacities
    }

    pub fn open_elements(&self) -> &[String] {
        &self.open_elements
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of titrant unknowns the solver will determine.
    pub fn num_unknowns(&self) -> usize {
        usize::from(self.ph) + self.fugacities.len() + self.open_elements.len()
    }
}

impl fmt::Debug for IdealSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constraint_ids: Vec<&str> = self.constraints.iter().map(|c| c.id()).collect();
        f.debug_struct("IdealSpecs")
            .field("temperature", &self.temperature)
            .field("pressure", &self.pressure)
            .field("ph", &self.ph)
            .field("fugacities", &self.fugacities)
            .field("inputs", &self.inputs)
            .field("constraints", &constraint_ids)
            .field("open_elements", &self.open_elements)
            .finish()
    }
}

impl EquilibriumSpecs for IdealSpecs {
    fn declare_temperature(&mut self) {
        self.temperature = true;
    }

    fn declare_pressure(&mut self) {
        self.pressure = true;
    }

    fn declare_fugacity(&mut self, species: &str) {
        if !self.fugacities.iter().any(|s| s == species) {
            self.fugacities.push(species.to_string());
        }
    }

    fn declare_ph(&mut self) {
        self.ph = true;
    }

    fn add_input(&mut self, name: &str) -> usize {
        if let Some(index) = self.inputs.iter().position(|n| n == name) {
            return index;
        }
        self.inputs.push(name.to_string());
        self.inputs.len() - 1
    }

    fn add_constraint(&mut self, constraint: Box<dyn EquationConstraint>) {
        self.constraints.push(Arc::from(constraint));
    }

    fn open_to(&mut self, element: &str) {
        if !self.open_elements.iter().any(|e| e == element) {
            self.open_elements.push(element.to_string());
        }
    }

    fn inputs(&self) -> &[String] {
        &self.inputs
    }
}
