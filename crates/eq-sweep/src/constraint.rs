//! Constraint kinds and descriptors.
//!
//! Every supported constraint is a variant of [`ConstraintKind`]. The two
//! engine-facing operations of a constraint are dispatched by exhaustive
//! `match`:
//!
//! - [`ConstraintKind::declare`] marks the unknown on the specification once,
//!   at registration (order-independent)
//! - [`ConstraintKind::apply`] sets the value on the conditions object for each
//!   grid point (registration order defines the grid axes)

use crate::error::{SweepError, SweepResult};
use crate::registrar::register_element_molality;
use eq_core::units::{in_molal, molality_from, molality_scale};
use eq_engine::{EngineResult, EquilibriumConditions, EquilibriumSpecs};
use std::fmt;
use std::str::FromStr;

/// Gas species of the `fO2` shorthand.
pub const O2_GAS: &str = "O2(g)";

/// Closed set of constraints a sweep can impose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Temperature,
    Pressure,
    /// Fugacity of a gaseous species, e.g. `O2(g)`.
    Fugacity { species: String },
    Ph,
    /// Total dissolved molality of an element, e.g. `S`.
    ElementMolality { element: String },
}

impl ConstraintKind {
    /// Oxygen fugacity.
    pub fn fo2() -> Self {
        Self::Fugacity {
            species: O2_GAS.to_string(),
        }
    }

    pub fn element(symbol: impl Into<String>) -> Self {
        Self::ElementMolality {
            element: symbol.into(),
        }
    }

    /// Parse a symbolic constraint name. Matching is case-sensitive.
    ///
    /// - `temperature` or `T`
    /// - `pressure` or `P`
    /// - `pH`
    /// - `f<Formula>`: fugacity of `<Formula>(g)`, e.g. `fO2`, `fCO2`
    /// - any other element symbol: molality of that element, e.g. `S`, `Cl`
    ///
    /// `P` always means pressure; a phosphorus target is built with
    /// [`ConstraintKind::element`].
    pub fn parse(name: &str) -> SweepResult<Self> {
        let trimmed = name.trim();
        let kind = match trimmed {
            "temperature" | "T" => Self::Temperature,
            "pressure" | "P" => Self::Pressure,
            "pH" => Self::Ph,
            t if is_element_symbol(t) => Self::element(t),
            t => match t.strip_prefix('f') {
                Some(formula) if is_gas_formula(formula) => Self::Fugacity {
                    species: format!("{formula}(g)"),
                },
                _ => {
                    return Err(SweepError::UnknownConstraint {
                        name: name.to_string(),
                    });
                }
            },
        };
        Ok(kind)
    }

    /// Canonical name, also used as the axis label.
    pub fn name(&self) -> String {
        match self {
            Self::Temperature => "temperature".to_string(),
            Self::Pressure => "pressure".to_string(),
            Self::Fugacity { species } => {
                format!("f{}", species.strip_suffix("(g)").unwrap_or(species))
            }
            Self::Ph => "pH".to_string(),
            Self::ElementMolality { element } => element.clone(),
        }
    }

    /// Check that `unit` is usable for this kind before anything is declared.
    ///
    /// Native kinds pass their unit through to the engine; element molality is
    /// converted here and only accepts molality units.
    pub fn check_unit(&self, unit: &str) -> SweepResult<()> {
        match self {
            Self::ElementMolality { .. } => {
                molality_scale(unit).map_err(|_| SweepError::InvalidUnit {
                    name: self.name(),
                    unit: unit.to_string(),
                })?;
                Ok(())
            }
            Self::Temperature | Self::Pressure | Self::Fugacity { .. } | Self::Ph => Ok(()),
        }
    }

    /// Declare the unknown this constraint imposes.
    pub fn declare<S: EquilibriumSpecs + ?Sized>(&self, specs: &mut S) {
        match self {
            Self::Temperature => specs.declare_temperature(),
            Self::Pressure => specs.declare_pressure(),
            Self::Fugacity { species } => specs.declare_fugacity(species),
            Self::Ph => specs.declare_ph(),
            Self::ElementMolality { element } => {
                register_element_molality(specs, element);
            }
        }
    }

    /// Set one value of this constraint on a conditions object.
    pub fn apply<C: EquilibriumConditions + ?Sized>(
        &self,
        conditions: &mut C,
        value: f64,
        unit: &str,
    ) -> EngineResult<()> {
        match self {
            Self::Temperature => conditions.temperature(value, unit),
            Self::Pressure => conditions.pressure(value, unit),
            Self::Fugacity { species } => conditions.fugacity(species, value, unit),
            Self::Ph => conditions.ph(value),
            Self::ElementMolality { element } => {
                conditions.set(element, in_molal(molality_from(value, unit)?))
            }
        }
    }
}

impl FromStr for ConstraintKind {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `S`, `Cl`, `Na`: one uppercase ASCII letter, optionally one lowercase.
fn is_element_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), None, _) => a.is_ascii_uppercase(),
        (Some(a), Some(b), None) => a.is_ascii_uppercase() && b.is_ascii_lowercase(),
        _ => false,
    }
}

/// `O2`, `CO2`, `H2S`: starts uppercase, alphanumeric only.
fn is_gas_formula(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_uppercase()) && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// One registered constraint: a kind, its ordered values, and a unit tag.
///
/// Immutable once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDescriptor {
    kind: ConstraintKind,
    values: Vec<f64>,
    unit: String,
}

impl ConstraintDescriptor {
    pub(crate) fn new(kind: ConstraintKind, values: Vec<f64>, unit: impl Into<String>) -> Self {
        Self {
            kind,
            values,
            unit: unit.into(),
        }
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn name(&self) -> String {
        self.kind.name()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Set one grid value of this constraint.
    pub fn apply<C: EquilibriumConditions + ?Sized>(
        &self,
        conditions: &mut C,
        value: f64,
    ) -> EngineResult<()> {
        self.kind.apply(conditions, value, &self.unit)
    }
}
