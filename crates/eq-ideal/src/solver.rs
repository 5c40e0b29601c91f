//! Titration solver for the ideal engine.

use crate::conditions::IdealConditions;
use crate::jacobian::finite_difference_jacobian;
use crate::newton::{NewtonConfig, newton_solve};
use crate::props::IdealProps;
use crate::specs::IdealSpecs;
use crate::state::IdealState;
use crate::system::{IdealSystem, Phase};
use eq_core::safe_ln;
use eq_core::units::in_bar;
use eq_engine::{
    ChemicalState, EngineError, EngineResult, EquationConstraint, EquilibriumSolver, SolveOutcome,
};
use nalgebra::DVector;
use std::f64::consts::LN_10;
use std::sync::Arc;

/// Amount used to seed log-amount unknowns of absent species [mol]
const LOG_SEED_MOL: f64 = 1e-10;

/// One unknown of the titration problem.
#[derive(Debug, Clone, Copy)]
enum Unknown {
    /// ln(amount) of a species controlled by pH or a fugacity.
    LogAmount { species: usize },
    /// Moles of an open element exchanged through its carrier species.
    Titrant { carrier: Option<(usize, f64)> },
}

/// One residual row of the titration problem.
#[derive(Debug, Clone, Copy)]
enum Row {
    Ph { target: f64, h: usize },
    Fugacity { species: usize, target_bar: f64 },
    Equation { index: usize },
}

/// Solver bound to one [`IdealSpecs`].
pub struct IdealSolver {
    system: IdealSystem,
    config: NewtonConfig,
    temperature: bool,
    pressure: bool,
    ph: bool,
    fugacities: Vec<usize>,
    open_elements: Vec<String>,
    input_names: Vec<String>,
    constraints: Vec<Arc<dyn EquationConstraint>>,
}

impl IdealSolver {
    /// Bind a solver to a specification.
    ///
    /// Every equation constraint needs one open element to act on, and every
    /// fugacity target must name a gas species of the system.
    pub fn new(specs: &IdealSpecs, config: NewtonConfig) -> EngineResult<Self> {
        if specs.constraints.len() != specs.open_elements.len() {
            return Err(EngineError::InvalidSystem {
                what: format!(
                    "{} equation constraints but {} open elements",
                    specs.constraints.len(),
                    specs.open_elements.len()
                ),
            });
        }

        let mut fugacities = Vec::with_capacity(specs.fugacities.len());
        for name in &specs.fugacities {
            let index =
                specs
                    .system
                    .species_index(name)
                    .ok_or_else(|| EngineError::UnknownSpecies {
                        name: name.clone(),
                    })?;
            if specs.system.species()[index].phase != Phase::Gas {
                return Err(EngineError::InvalidSystem {
                    what: format!("fugacity target {name} is not a gas species"),
                });
            }
            fugacities.push(index);
        }

        Ok(Self {
            system: specs.system.clone(),
            config,
            temperature: specs.temperature,
            pressure: specs.pressure,
            ph: specs.ph,
            fugacities,
            open_elements: specs.open_elements.clone(),
            input_names: specs.inputs.clone(),
            constraints: specs.constraints.clone(),
        })
    }

    pub fn config(&self) -> &NewtonConfig {
        &self.config
    }

    /// Collect input values, failing on the first one never set.
    fn input_values(&self, conditions: &IdealConditions) -> EngineResult<Vec<f64>> {
        self.input_names
            .iter()
            .zip(&conditions.inputs)
            .map(|(name, value)| {
                value.ok_or_else(|| EngineError::MissingCondition { what: name.clone() })
            })
            .collect()
    }

    /// Build unknowns and residual rows, or `None` when a titrant species is missing.
    fn layout(&self, conditions: &IdealConditions) -> EngineResult<Option<(Vec<Unknown>, Vec<Row>)>> {
        let mut unknowns = Vec::new();
        let mut rows = Vec::new();

        if self.ph {
            let target = conditions
                .ph
                .ok_or_else(|| EngineError::MissingCondition {
                    what: "pH".to_string(),
                })?;
            let Some(h) = self.system.species_index("H+") else {
                tracing::debug!("pH imposed on a system without H+");
                return Ok(None);
            };
            unknowns.push(Unknown::LogAmount { species: h });
            rows.push(Row::Ph { target, h });
        }

        for &species in &self.fugacities {
            let name = &self.system.species()[species].name;
            let target = conditions
                .fugacity_of(name)
                .ok_or_else(|| EngineError::MissingCondition {
                    what: format!("fugacity of {name}"),
                })?;
            unknowns.push(Unknown::LogAmount { species });
            rows.push(Row::Fugacity {
                species,
                target_bar: in_bar(target),
            });
        }

        for element in &self.open_elements {
            unknowns.push(Unknown::Titrant {
                carrier: self.system.carrier_of(element),
            });
        }
        rows.extend((0..self.constraints.len()).map(|index| Row::Equation { index }));

        Ok(Some((unknowns, rows)))
    }
}

/// Species amounts implied by a vector of unknowns.
fn trial_amounts(base: &[f64], unknowns: &[Unknown], x: &DVector<f64>) -> Vec<f64> {
    let mut amounts = base.to_vec();
    for (unknown, &value) in unknowns.iter().zip(x.iter()) {
        match *unknown {
            Unknown::LogAmount { species } => amounts[species] = value.exp(),
            Unknown::Titrant {
                carrier: Some((species, coef)),
            } => amounts[species] += value / coef,
            Unknown::Titrant { carrier: None } => {}
        }
    }
    amounts
}

impl EquilibriumSolver<IdealState, IdealConditions> for IdealSolver {
    fn solve(
        &mut self,
        state: &mut IdealState,
        conditions: &IdealConditions,
    ) -> EngineResult<SolveOutcome> {
        if self.temperature {
            let t = conditions
                .temperature
                .ok_or_else(|| EngineError::MissingCondition {
                    what: "temperature".to_string(),
                })?;
            state.set_temperature(t);
        }
        if self.pressure {
            let p = conditions
                .pressure
                .ok_or_else(|| EngineError::MissingCondition {
                    what: "pressure".to_string(),
                })?;
            state.set_pressure(p);
        }

        let inputs = self.input_values(conditions)?;
        let Some((unknowns, rows)) = self.layout(conditions)? else {
            return Ok(SolveOutcome::failed(0, f64::INFINITY));
        };
        if unknowns.is_empty() {
            return Ok(SolveOutcome::converged(0, 0.0));
        }

        let base = state.amounts().to_vec();
        let pressure = state.pressure();
        let system = &self.system;
        let constraints = &self.constraints;

        let x0 = DVector::from_iterator(
            unknowns.len(),
            unknowns.iter().map(|unknown| match *unknown {
                Unknown::LogAmount { species } => base[species].max(LOG_SEED_MOL).ln(),
                Unknown::Titrant { .. } => 0.0,
            }),
        );

        let residual = |x: &DVector<f64>| -> DVector<f64> {
            let amounts = trial_amounts(&base, &unknowns, x);
            let props = IdealProps::new(system, &amounts, pressure);
            DVector::from_iterator(
                rows.len(),
                rows.iter().map(|row| match *row {
                    Row::Ph { target, h } => {
                        target + safe_ln(props.species_molality(h)) / LN_10
                    }
                    Row::Fugacity {
                        species,
                        target_bar,
                    } => safe_ln(target_bar) - safe_ln(props.fugacity_bar(species)),
                    Row::Equation { index } => constraints[index].residual(&props, &inputs),
                }),
            )
        };
        let epsilon = self.config.fd_epsilon;
        let jacobian = |x: &DVector<f64>| finite_difference_jacobian(x, &residual, epsilon);

        let result = match newton_solve(x0, &residual, jacobian, &self.config) {
            Ok(result) => result,
            Err(err) => {
                tracing::debug!(error = %err, "ideal solve failed");
                return Ok(SolveOutcome::failed(0, f64::INFINITY));
            }
        };

        if !result.converged {
            return Ok(SolveOutcome::failed(result.iterations, result.residual_norm));
        }

        let amounts = trial_amounts(&base, &unknowns, &result.x);
        if amounts.iter().any(|n| *n < 0.0 || !n.is_finite()) {
            tracing::debug!("converged to negative species amounts");
            return Ok(SolveOutcome::failed(result.iterations, result.residual_norm));
        }
        state.set_amounts(amounts);

        Ok(SolveOutcome::converged(result.iterations, result.residual_norm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{SpeciesDef, SystemDef};
    use eq_core::units::in_kelvin;
    use eq_engine::{AqueousProps, EquilibriumConditions, EquilibriumSpecs};

    struct MolalityTarget {
        element: String,
        input: usize,
    }

    impl EquationConstraint for MolalityTarget {
        fn id(&self) -> &str {
            &self.element
        }

        fn residual(&self, props: &dyn AqueousProps, inputs: &[f64]) -> f64 {
            inputs[self.input] - props.element_molality(&self.element)
        }
    }

    fn system(with_inert_gas: bool) -> IdealSystem {
        let mut species = vec![
            SpeciesDef::new("H2O(aq)", Phase::Solvent, &[("H", 2.0), ("O", 1.0)]),
            SpeciesDef::new("H+", Phase::Aqueous, &[("H", 1.0)]),
            SpeciesDef::new("SO4-2", Phase::Aqueous, &[("S", 1.0), ("O", 4.0)]),
            SpeciesDef::new("O2(g)", Phase::Gas, &[("O", 2.0)]),
        ];
        if with_inert_gas {
            species.push(SpeciesDef::new("N2(g)", Phase::Gas, &[("N", 2.0)]));
        }
        IdealSystem::new(SystemDef { species }).unwrap()
    }

    fn state(system: &IdealSystem) -> IdealState {
        let mut state = IdealState::new(system);
        state.add("H2O(aq)", 1.0, "kg").unwrap();
        state
    }

    #[test]
    fn no_unknowns_only_sets_temperature() {
        let system = system(false);
        let mut specs = IdealSpecs::new(&system);
        specs.declare_temperature();

        let mut conditions = IdealConditions::new(&specs);
        conditions.temperature(350.0, "K").unwrap();

        let mut state = state(&system);
        let mut solver = IdealSolver::new(&specs, NewtonConfig::default()).unwrap();
        let outcome = solver.solve(&mut state, &conditions).unwrap();

        assert!(outcome.succeeded);
        assert!((in_kelvin(state.temperature()) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn ph_and_element_molality_together() {
        let system = system(false);
        let mut specs = IdealSpecs::new(&system);
        specs.declare_ph();
        let input = specs.add_input("S");
        specs.add_constraint(Box::new(MolalityTarget {
            element: "S".into(),
            input,
        }));
        specs.open_to("S");

        let mut conditions = IdealConditions::new(&specs);
        conditions.ph(4.0).unwrap();
        conditions.set("S", 0.01).unwrap();

        let mut state = state(&system);
        let mut solver = IdealSolver::new(&specs, NewtonConfig::default()).unwrap();
        let outcome = solver.solve(&mut state, &conditions).unwrap();

        assert!(outcome.succeeded);
        let props = state.props();
        assert!((props.element_molality("S") - 0.01).abs() < 1e-8);
        assert!((props.ph().unwrap() - 4.0).abs() < 1e-8);
    }

    #[test]
    fn fugacity_with_inert_gas_converges() {
        let system = system(true);
        let mut specs = IdealSpecs::new(&system);
        specs.declare_fugacity("O2(g)");

        let mut conditions = IdealConditions::new(&specs);
        conditions.fugacity("O2(g)", 0.2, "bar").unwrap();

        let mut state = state(&system);
        state.add("N2(g)", 1.0, "mol").unwrap();
        let mut solver = IdealSolver::new(&specs, NewtonConfig::default()).unwrap();
        let outcome = solver.solve(&mut state, &conditions).unwrap();

        assert!(outcome.succeeded);
        let o2 = system.species_index("O2(g)").unwrap();
        assert!((state.props().fugacity_bar(o2) - 0.2).abs() < 1e-8);
    }

    #[test]
    fn fugacity_of_pure_gas_cannot_be_reached() {
        // With O2(g) alone, x = 1 and f = P regardless of amount.
        let system = system(false);
        let mut specs = IdealSpecs::new(&system);
        specs.declare_fugacity("O2(g)");

        let mut conditions = IdealConditions::new(&specs);
        conditions.fugacity("O2(g)", 0.2, "bar").unwrap();

        let mut state = state(&system);
        state.add("O2(g)", 1.0, "mol").unwrap();
        let before = state.amount("O2(g)");
        let mut solver = IdealSolver::new(&specs, NewtonConfig::default()).unwrap();
        let outcome = solver.solve(&mut state, &conditions).unwrap();

        assert!(!outcome.succeeded);
        assert_eq!(state.amount("O2(g)"), before);
    }

    #[test]
    fn open_element_without_carrier_fails() {
        let system = system(false);
        let mut specs = IdealSpecs::new(&system);
        let input = specs.add_input("Cl");
        specs.add_constraint(Box::new(MolalityTarget {
            element: "Cl".into(),
            input,
        }));
        specs.open_to("Cl");

        let mut conditions = IdealConditions::new(&specs);
        conditions.set("Cl", 0.1).unwrap();

        let mut state = state(&system);
        let mut solver = IdealSolver::new(&specs, NewtonConfig::default()).unwrap();
        let outcome = solver.solve(&mut state, &conditions).unwrap();
        assert!(!outcome.succeeded);
    }

    #[test]
    fn missing_condition_is_an_error() {
        let system = system(false);
        let mut specs = IdealSpecs::new(&system);
        specs.declare_pressure();

        let conditions = IdealConditions::new(&specs);
        let mut state = state(&system);
        let mut solver = IdealSolver::new(&specs, NewtonConfig::default()).unwrap();
        assert!(matches!(
            solver.solve(&mut state, &conditions),
            Err(EngineError::MissingCondition { .. })
        ));
    }

    #[test]
    fn unbalanced_specs_are_rejected() {
        let system = system(false);
        let mut specs = IdealSpecs::new(&system);
        specs.open_to("S");
        assert!(IdealSolver::new(&specs, NewtonConfig::default()).is_err());

        let mut specs = IdealSpecs::new(&system);
        specs.declare_fugacity("CO2(g)");
        assert!(matches!(
            IdealSolver::new(&specs, NewtonConfig::default()),
            Err(EngineError::UnknownSpecies { .. })
        ));
    }
}
