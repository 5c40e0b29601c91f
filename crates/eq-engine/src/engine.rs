//! Engine factory and solver traits.

use crate::conditions::EquilibriumConditions;
use crate::error::EngineResult;
use crate::specs::EquilibriumSpecs;
use crate::state::ChemicalState;

/// Outcome of a single equilibrium solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOutcome {
    /// Whether the underlying optimization converged.
    pub succeeded: bool,
    /// Iterations spent.
    pub iterations: usize,
    /// Final residual norm.
    pub residual_norm: f64,
}

impl SolveOutcome {
    pub fn converged(iterations: usize, residual_norm: f64) -> Self {
        Self {
            succeeded: true,
            iterations,
            residual_norm,
        }
    }

    pub fn failed(iterations: usize, residual_norm: f64) -> Self {
        Self {
            succeeded: false,
            iterations,
            residual_norm,
        }
    }
}

/// Solver bound to one specification.
pub trait EquilibriumSolver<S, C> {
    /// Equilibrate `state` in place under `conditions`.
    ///
    /// Non-convergence is reported through the outcome; `Err` is reserved for
    /// engine faults such as missing conditions or malformed systems.
    fn solve(&mut self, state: &mut S, conditions: &C) -> EngineResult<SolveOutcome>;
}

/// Factory for every engine-owned object.
pub trait EquilibriumEngine {
    /// Chemical system definition (species, phases, database).
    type System;
    type Specs: EquilibriumSpecs;
    type State: ChemicalState;
    type Conditions: EquilibriumConditions;
    type Solver: EquilibriumSolver<Self::State, Self::Conditions>;

    /// Get the engine name (for logging).
    fn name(&self) -> &str;

    /// Empty specification for a system.
    fn specs(&self, system: &Self::System) -> Self::Specs;

    /// Default state of a system (no substances).
    fn state(&self, system: &Self::System) -> Self::State;

    /// Conditions object bound to a configured specification.
    fn conditions(&self, specs: &Self::Specs) -> Self::Conditions;

    /// Solver bound to a configured specification.
    fn solver(&self, specs: &Self::Specs) -> EngineResult<Self::Solver>;
}
