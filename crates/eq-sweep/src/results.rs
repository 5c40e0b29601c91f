//! Sweep results.

use crate::error::SweepResult;
use eq_engine::SolveOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquilibriumStatus {
    Success,
    Failure,
}

impl EquilibriumStatus {
    pub fn from_outcome(outcome: &SolveOutcome) -> Self {
        if outcome.succeeded {
            Self::Success
        } else {
            Self::Failure
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Successful computation!",
            Self::Failure => "Computation has failed!",
        }
    }
}

impl fmt::Display for EquilibriumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// States and statuses of a sweep, index-aligned with the flattened grid.
#[derive(Debug, Clone)]
pub struct SweepResults<S> {
    axes: Vec<String>,
    points: Vec<Vec<f64>>,
    states: Vec<S>,
    statuses: Vec<EquilibriumStatus>,
}

impl<S> SweepResults<S> {
    pub(crate) fn with_capacity(axes: Vec<String>, capacity: usize) -> Self {
        Self {
            axes,
            points: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
            statuses: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, point: Vec<f64>, state: S, status: EquilibriumStatus) {
        self.points.push(point);
        self.states.push(state);
        self.statuses.push(status);
    }

    /// Axis labels, in registration order.
    pub fn axes(&self) -> &[String] {
        &self.axes
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut [S] {
        &mut self.states
    }

    pub fn statuses(&self) -> &[EquilibriumStatus] {
        &self.statuses
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn num_successful(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_success()).count()
    }

    pub fn num_failed(&self) -> usize {
        self.len() - self.num_successful()
    }

    /// `(point, state, status)` for every grid point.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &S, EquilibriumStatus)> + '_ {
        self.points
            .iter()
            .zip(&self.states)
            .zip(&self.statuses)
            .map(|((point, state), status)| (point.as_slice(), state, *status))
    }

    /// The parallel `(states, statuses)` sequences.
    pub fn into_parts(self) -> (Vec<S>, Vec<EquilibriumStatus>) {
        (self.states, self.statuses)
    }

    /// Engine-independent summary of the sweep.
    pub fn summary(&self) -> SweepSummary {
        SweepSummary {
            axes: self.axes.clone(),
            points: self.points.clone(),
            statuses: self.statuses.clone(),
        }
    }
}

/// Serializable summary of a sweep: axes, points and statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub axes: Vec<String>,
    pub points: Vec<Vec<f64>>,
    pub statuses: Vec<EquilibriumStatus>,
}

impl SweepSummary {
    pub fn to_json(&self) -> SweepResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
