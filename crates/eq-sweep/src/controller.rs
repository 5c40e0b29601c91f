//! Sweep controller.

use crate::constraint::{ConstraintDescriptor, ConstraintKind};
use crate::error::{SweepError, SweepResult};
use crate::grid::Grid;
use crate::progress::SweepProgressEvent;
use crate::results::{EquilibriumStatus, SweepResults};
use crate::values::Values;
use eq_core::ensure_all_finite;
use eq_engine::{ChemicalState, EquilibriumConditions, EquilibriumEngine, EquilibriumSolver};
use rayon::prelude::*;

/// Equilibrates a chemical system at every combination of constraint values.
///
/// Constraints are registered one at a time; each registration records a grid
/// axis and declares the matching unknown on the engine specification. The
/// initial state is shared by every grid point and each point is solved from
/// its own copy of it.
pub struct ConstrainedEquilibration<'s, E: EquilibriumEngine> {
    engine: E,
    system: &'s E::System,
    specs: E::Specs,
    constraints: Vec<ConstraintDescriptor>,
    grid: Grid,
    initial_state: E::State,
    results: Option<SweepResults<E::State>>,
}

impl<'s, E: EquilibriumEngine> ConstrainedEquilibration<'s, E> {
    pub fn new(engine: E, system: &'s E::System) -> Self {
        let specs = engine.specs(system);
        let initial_state = engine.state(system);
        Self {
            engine,
            system,
            specs,
            constraints: Vec::new(),
            grid: Grid::default(),
            initial_state,
            results: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn system(&self) -> &'s E::System {
        self.system
    }

    pub fn specs(&self) -> &E::Specs {
        &self.specs
    }

    /// Registered constraints, in grid-axis order.
    pub fn constraints(&self) -> &[ConstraintDescriptor] {
        &self.constraints
    }

    pub fn initial_state(&self) -> &E::State {
        &self.initial_state
    }

    /// Results of the last sweep.
    pub fn results(&self) -> Option<&SweepResults<E::State>> {
        self.results.as_ref()
    }

    /// Move the results of the last sweep out of the controller.
    pub fn take_results(&mut self) -> Option<SweepResults<E::State>> {
        self.results.take()
    }

    /// Register a constraint axis and return its values.
    ///
    /// The constraint is validated before anything is recorded: the values
    /// must be finite and non-empty, each kind may be registered once,
    /// element molalities only take molality units, and the grid point count
    /// must stay addressable.
    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        values: impl Into<Values>,
        unit: &str,
    ) -> SweepResult<Vec<f64>> {
        let values = values.into().into_vec();
        let name = kind.name();

        if values.is_empty() {
            return Err(SweepError::EmptyValues { name });
        }
        ensure_all_finite(&values, "constraint value")?;
        if self.constraints.iter().any(|c| c.kind() == &kind) {
            return Err(SweepError::DuplicateConstraint { name });
        }
        kind.check_unit(unit)?;
        self.grid.push_axis(values.clone())?;

        kind.declare(&mut self.specs);
        tracing::debug!(constraint = %name, unit, points = values.len(), "registered constraint");

        self.constraints
            .push(ConstraintDescriptor::new(kind, values.clone(), unit));
        Ok(values)
    }

    /// Register a constraint by symbolic name (`temperature`, `pressure`,
    /// `fO2`, `pH`, an element symbol).
    pub fn add_named_constraint(
        &mut self,
        name: &str,
        values: impl Into<Values>,
        unit: &str,
    ) -> SweepResult<Vec<f64>> {
        let kind = ConstraintKind::parse(name)?;
        self.add_constraint(kind, values, unit)
    }

    /// Add a fixed quantity of a substance to the initial state.
    pub fn initialize(&mut self, substance: &str, amount: f64, unit: &str) -> SweepResult<()> {
        self.initial_state.add(substance, amount, unit)?;
        tracing::debug!(substance, amount, unit, "added to initial state");
        Ok(())
    }

    /// Grid the next sweep will run.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn axis_labels(&self) -> Vec<String> {
        self.constraints.iter().map(ConstraintDescriptor::name).collect()
    }

    /// Solve every grid point in order.
    ///
    /// A point whose solve does not converge is recorded as
    /// [`EquilibriumStatus::Failure`] and the sweep continues. Engine faults
    /// abort the sweep.
    pub fn equilibrate(&mut self) -> SweepResult<&SweepResults<E::State>> {
        self.equilibrate_with_progress(|_| {})
    }

    /// Like [`equilibrate`](Self::equilibrate), calling `on_progress` after
    /// each point.
    pub fn equilibrate_with_progress<F>(
        &mut self,
        mut on_progress: F,
    ) -> SweepResult<&SweepResults<E::State>>
    where
        F: FnMut(&SweepProgressEvent),
    {
        let mut solver = self.engine.solver(&self.specs)?;
        let mut conditions = self.engine.conditions(&self.specs);
        let grid = &self.grid;
        let total = grid.len();

        tracing::info!(
            engine = self.engine.name(),
            axes = grid.dims(),
            points = total,
            "starting equilibrium sweep"
        );

        let mut results = SweepResults::with_capacity(self.axis_labels(), total);
        for (index, point) in grid.iter().enumerate() {
            let (state, status, iterations) = solve_point(
                &self.constraints,
                &self.initial_state,
                &mut solver,
                &mut conditions,
                &point,
            )?;
            log_point(index, &point, status, iterations);

            on_progress(&SweepProgressEvent {
                index,
                total,
                point: point.clone(),
                status,
                iterations,
            });
            results.push(point, state, status);
        }

        tracing::info!(
            succeeded = results.num_successful(),
            failed = results.num_failed(),
            "equilibrium sweep finished"
        );
        Ok(&*self.results.insert(results))
    }

    /// Solve all grid points on the rayon thread pool.
    ///
    /// Each worker owns its solver and conditions; results are collected by
    /// grid index, so the output order equals that of
    /// [`equilibrate`](Self::equilibrate).
    pub fn equilibrate_parallel(&mut self) -> SweepResult<&SweepResults<E::State>>
    where
        E: Sync,
        E::Specs: Sync,
        E::State: Send + Sync,
    {
        let grid = &self.grid;
        let total = grid.len();
        let engine = &self.engine;
        let specs = &self.specs;
        let constraints = &self.constraints;
        let initial_state = &self.initial_state;

        tracing::info!(
            engine = engine.name(),
            axes = grid.dims(),
            points = total,
            "starting parallel equilibrium sweep"
        );

        let solved: Vec<(Vec<f64>, E::State, EquilibriumStatus)> = (0..total)
            .into_par_iter()
            .map_init(
                || (engine.solver(specs), engine.conditions(specs)),
                |(solver, conditions), index| -> SweepResult<(Vec<f64>, E::State, EquilibriumStatus)> {
                    let solver = solver.as_mut().map_err(|err| SweepError::Engine(err.clone()))?;
                    let point = grid.point(index).unwrap_or_default();
                    let (state, status, iterations) =
                        solve_point(constraints, initial_state, solver, conditions, &point)?;
                    log_point(index, &point, status, iterations);
                    Ok((point, state, status))
                },
            )
            .collect::<SweepResult<_>>()?;

        let mut results = SweepResults::with_capacity(self.axis_labels(), total);
        for (point, state, status) in solved {
            results.push(point, state, status);
        }

        tracing::info!(
            succeeded = results.num_successful(),
            failed = results.num_failed(),
            "parallel equilibrium sweep finished"
        );
        Ok(&*self.results.insert(results))
    }
}

/// Solve one grid point from a fresh copy of the initial state.
fn solve_point<St, C, Sv>(
    constraints: &[ConstraintDescriptor],
    initial_state: &St,
    solver: &mut Sv,
    conditions: &mut C,
    point: &[f64],
) -> SweepResult<(St, EquilibriumStatus, usize)>
where
    St: ChemicalState,
    C: EquilibriumConditions,
    Sv: EquilibriumSolver<St, C>,
{
    for (value, descriptor) in point.iter().zip(constraints) {
        descriptor.apply(conditions, *value)?;
    }

    let mut state = initial_state.clone();
    let outcome = solver.solve(&mut state, conditions)?;
    Ok((state, EquilibriumStatus::from_outcome(&outcome), outcome.iterations))
}

fn log_point(index: usize, point: &[f64], status: EquilibriumStatus, iterations: usize) {
    match status {
        EquilibriumStatus::Success => {
            tracing::debug!(index, ?point, iterations, "grid point converged");
        }
        EquilibriumStatus::Failure => {
            tracing::warn!(index, ?point, iterations, "grid point failed to converge");
        }
    }
}
