//! eq-ideal: ideal-dilute reference engine for eqsweep.
//!
//! Implements the `eq-engine` traits without speciation reactions: every
//! species keeps the amount it was given, except the titrant species that the
//! imposed conditions control. Declared conditions are satisfied by a damped
//! Newton iteration over those titrant amounts:
//!
//! - pH adjusts the amount of `H+`
//! - a gas fugacity adjusts the amount of that gas (ideal mixing, f = x·P)
//! - an element opened with `open_to` is exchanged through the first aqueous
//!   species carrying it, driven by the registered equation constraints
//!
//! # Example
//!
//! ```
//! use eq_engine::{ChemicalState, EquilibriumConditions, EquilibriumEngine, EquilibriumSolver, EquilibriumSpecs};
//! use eq_ideal::{IdealEngine, IdealSystem, Phase, SpeciesDef, SystemDef};
//!
//! let system = IdealSystem::new(SystemDef {
//!     species: vec![
//!         SpeciesDef::new("H2O(aq)", Phase::Solvent, &[("H", 2.0), ("O", 1.0)]),
//!         SpeciesDef::new("H+", Phase::Aqueous, &[("H", 1.0)]),
//!     ],
//! })
//! .unwrap();
//!
//! let engine = IdealEngine::default();
//! let mut specs = engine.specs(&system);
//! specs.declare_ph();
//!
//! let mut state = engine.state(&system);
//! state.add("H2O(aq)", 1.0, "kg").unwrap();
//!
//! let mut conditions = engine.conditions(&specs);
//! conditions.ph(7.0).unwrap();
//!
//! let mut solver = engine.solver(&specs).unwrap();
//! let outcome = solver.solve(&mut state, &conditions).unwrap();
//! assert!(outcome.succeeded);
//! ```

pub mod conditions;
pub mod engine;
pub mod jacobian;
pub mod newton;
pub mod props;
pub mod solver;
pub mod specs;
pub mod state;
pub mod system;

pub use conditions::IdealConditions;
pub use engine::IdealEngine;
pub use newton::{NewtonConfig, NewtonError, NewtonResult};
pub use props::IdealProps;
pub use solver::IdealSolver;
pub use specs::IdealSpecs;
pub use state::IdealState;
pub use system::{IdealSystem, Phase, SpeciesDef, SystemDef};
