//! Sweep plans: a whole sweep described in YAML or JSON.
//!
//! ```yaml
//! system:
//!   species:
//!     - {name: "H2O(aq)", phase: solvent, elements: {H: 2, O: 1}}
//!     - {name: "H+", phase: aqueous, elements: {H: 1}}
//! initial:
//!   - {substance: "H2O(aq)", amount: 1.0, unit: kg}
//! constraints:
//!   - {name: temperature, values: [300, 350], unit: K}
//!   - {name: pH, values: {start: 4, end: 8, points: 5}}
//! solver:
//!   max_iterations: 50
//! ```
//!
//! Constraints and initial substances are applied in file order, so the file
//! order of `constraints` is the grid-axis order.

use crate::controller::ConstrainedEquilibration;
use crate::error::{SweepError, SweepResult};
use crate::results::SweepResults;
use crate::values::{Spacing, Values};
use eq_ideal::{IdealEngine, IdealState, IdealSystem, NewtonConfig, SystemDef};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Values of one constraint: a scalar, a list, or a generated range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValuesDef {
    Single(f64),
    List(Vec<f64>),
    Range {
        start: f64,
        end: f64,
        points: usize,
        #[serde(default)]
        spacing: Spacing,
    },
}

impl ValuesDef {
    pub fn to_values(&self) -> SweepResult<Values> {
        match self {
            Self::Single(v) => Ok(Values::from(*v)),
            Self::List(vs) => Ok(Values::from(vs.clone())),
            Self::Range {
                start,
                end,
                points,
                spacing,
            } => Values::range(*start, *end, *points, *spacing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDef {
    pub name: String,
    pub values: ValuesDef,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceDef {
    pub substance: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub system: SystemDef,
    #[serde(default)]
    pub initial: Vec<SubstanceDef>,
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
    #[serde(default)]
    pub solver: NewtonConfig,
}

impl SweepPlan {
    pub fn from_yaml_str(text: &str) -> SweepResult<Self> {
        let plan: Self = serde_yaml::from_str(text)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn from_json_str(text: &str) -> SweepResult<Self> {
        let plan: Self = serde_json::from_str(text)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn load_yaml(path: &Path) -> SweepResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn save_yaml(&self, path: &Path) -> SweepResult<()> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Structural checks that need no engine.
    pub fn validate(&self) -> SweepResult<()> {
        if self.system.species.is_empty() {
            return Err(SweepError::Plan {
                what: "system has no species".to_string(),
            });
        }
        if self.solver.max_iterations == 0 {
            return Err(SweepError::Plan {
                what: "solver.max_iterations must be positive".to_string(),
            });
        }
        if !(self.solver.abs_tol > 0.0) {
            return Err(SweepError::Plan {
                what: "solver.abs_tol must be positive".to_string(),
            });
        }
        for (i, c) in self.constraints.iter().enumerate() {
            if c.name.trim().is_empty() {
                return Err(SweepError::Plan {
                    what: format!("constraint #{i} has no name"),
                });
            }
        }
        Ok(())
    }

    /// Build the ideal engine and system, register everything, and sweep.
    pub fn run(&self) -> SweepResult<SweepResults<IdealState>> {
        self.validate()?;
        let system = IdealSystem::new(self.system.clone())?;
        let engine = IdealEngine::new(self.solver.clone());
        let mut sweep = ConstrainedEquilibration::new(engine, &system);

        for c in &self.constraints {
            sweep.add_named_constraint(&c.name, c.values.to_values()?, &c.unit)?;
        }
        for s in &self.initial {
            sweep.initialize(&s.substance, s.amount, &s.unit)?;
        }

        sweep.equilibrate()?;
        sweep.take_results().ok_or_else(|| SweepError::Plan {
            what: "sweep produced no results".to_string(),
        })
    }
}
