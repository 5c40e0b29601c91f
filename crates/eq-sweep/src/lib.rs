//! eq-sweep: parametric chemical-equilibrium sweeps.
//!
//! A [`ConstrainedEquilibration`] accumulates constraints (temperature,
//! pressure, gas fugacity, pH, dissolved-element molality), each with one or
//! more candidate values, then solves the equilibrium state at every
//! combination of those values.
//!
//! - [`ConstraintKind`] is the closed set of supported constraints; each kind
//!   knows how to declare its unknown on a specification and how to set its
//!   value on a conditions object
//! - [`register_element_molality`] installs the equation constraint the
//!   engine has no native support for
//! - [`Grid`] is the row-major Cartesian product of the constraint values,
//!   first-registered axis slowest
//! - [`SweepResults`] holds one state and one [`EquilibriumStatus`] per grid
//!   point, in grid order
//! - [`SweepPlan`] loads a whole sweep from YAML/JSON for the ideal engine
//!
//! # Example
//!
//! ```
//! use eq_ideal::{IdealEngine, IdealSystem, Phase, SpeciesDef, SystemDef};
//! use eq_sweep::{ConstrainedEquilibration, ConstraintKind};
//!
//! let system = IdealSystem::new(SystemDef {
//!     species: vec![
//!         SpeciesDef::new("H2O(aq)", Phase::Solvent, &[("H", 2.0), ("O", 1.0)]),
//!         SpeciesDef::new("H+", Phase::Aqueous, &[("H", 1.0)]),
//!     ],
//! })
//! .unwrap();
//!
//! let mut sweep = ConstrainedEquilibration::new(IdealEngine::default(), &system);
//! sweep.add_constraint(ConstraintKind::Temperature, [300.0, 400.0], "K").unwrap();
//! sweep.add_named_constraint("pH", [5.0, 7.0], "").unwrap();
//! sweep.initialize("H2O(aq)", 1.0, "kg").unwrap();
//!
//! let results = sweep.equilibrate().unwrap();
//! assert_eq!(results.len(), 4);
//! assert_eq!(results.num_failed(), 0);
//! ```

pub mod constraint;
pub mod controller;
pub mod error;
pub mod grid;
pub mod plan;
pub mod progress;
pub mod registrar;
pub mod results;
pub mod values;

pub use constraint::{ConstraintDescriptor, ConstraintKind};
pub use controller::ConstrainedEquilibration;
pub use error::{SweepError, SweepResult};
pub use grid::Grid;
pub use plan::{ConstraintDef, SubstanceDef, SweepPlan, ValuesDef};
pub use progress::SweepProgressEvent;
pub use registrar::{ElementMolalityConstraint, register_element_molality};
pub use results::{EquilibriumStatus, SweepResults, SweepSummary};
pub use values::{Spacing, Values};
