//! Ideal engine factory.

use crate::conditions::IdealConditions;
use crate::newton::NewtonConfig;
use crate::solver::IdealSolver;
use crate::specs::IdealSpecs;
use crate::state::IdealState;
use crate::system::IdealSystem;
use eq_engine::{EngineResult, EquilibriumEngine};

/// Ideal-dilute equilibrium engine.
#[derive(Debug, Clone, Default)]
pub struct IdealEngine {
    config: NewtonConfig,
}

impl IdealEngine {
    pub fn new(config: NewtonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NewtonConfig {
        &self.config
    }
}

impl EquilibriumEngine for IdealEngine {
    type System = IdealSystem;
    type Specs = IdealSpecs;
    type State = IdealState;
    type Conditions = IdealConditions;
    type Solver = IdealSolver;

    fn name(&self) -> &str {
        "ideal-dilute"
    }

    fn specs(&self, system: &IdealSystem) -> IdealSpecs {
        IdealSpecs::new(system)
    }

    fn state(&self, system: &IdealSystem) -> IdealState {
        IdealState::new(system)
    }

    fn conditions(&self, specs: &IdealSpecs) -> IdealConditions {
        IdealConditions::new(specs)
    }

    fn solver(&self, specs: &IdealSpecs) -> EngineResult<IdealSolver> {
        IdealSolver::new(specs, self.config.clone())
    }
}
