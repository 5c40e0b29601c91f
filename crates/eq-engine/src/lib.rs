//! eq-engine: the boundary between eqsweep and a chemical equilibrium engine.
//!
//! Provides:
//! - `EquilibriumEngine`, the factory for every engine-owned object
//! - `EquilibriumSpecs`, the set of unknowns a solver determines
//! - `EquilibriumConditions`, the numeric targets for one solve
//! - `ChemicalState`, a copyable composition + conditions snapshot
//! - `EquilibriumSolver` and its `SolveOutcome`
//! - `EquationConstraint` / `AqueousProps` for user-defined equation constraints
//!
//! # Architecture
//!
//! The sweep controller only talks to these traits, so the numerical engine is
//! isolated from the rest of the workspace. `eq-ideal` provides an ideal-dilute
//! implementation; bindings to a full thermodynamic engine can implement the same
//! traits without touching the controller.

pub mod conditions;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod specs;
pub mod state;

pub use conditions::EquilibriumConditions;
pub use constraint::{AqueousProps, EquationConstraint};
pub use engine::{EquilibriumEngine, EquilibriumSolver, SolveOutcome};
pub use error::{EngineError, EngineResult};
pub use specs::EquilibriumSpecs;
pub use state::ChemicalState;
