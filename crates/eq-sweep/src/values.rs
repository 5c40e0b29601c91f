//! Candidate values for one constraint axis.
//!
//! A constraint always carries a sequence of values, even when given a single
//! scalar, so every axis of the grid is treated the same way. Ranges can be
//! generated with uniform or logarithmic spacing.

use crate::error::{SweepError, SweepResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spacing of generated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// Ordered values of one constraint axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Values(Vec<f64>);

impl Values {
    /// Generate `num_points` values from `start` to `end` inclusive.
    ///
    /// One point yields `[start]`. Logarithmic spacing requires both bounds to
    /// be positive.
    pub fn range(start: f64, end: f64, num_points: usize, spacing: Spacing) -> SweepResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SweepError::InvalidRange {
                what: format!("bounds must be finite ({start}, {end})"),
            });
        }
        if num_points == 0 {
            return Err(SweepError::InvalidRange {
                what: "range must have at least 1 point".to_string(),
            });
        }
        if num_points == 1 {
            return Ok(Self(vec![start]));
        }

        let mut points: Vec<f64> = match spacing {
            Spacing::Linear => {
                let delta = (end - start) / (num_points - 1) as f64;
                (0..num_points).map(|i| start + i as f64 * delta).collect()
            }
            Spacing::Logarithmic => {
                if start <= 0.0 || end <= 0.0 {
                    return Err(SweepError::InvalidRange {
                        what: format!("logarithmic bounds must be positive ({start}, {end})"),
                    });
                }
                let log_start = start.ln();
                let log_delta = (end.ln() - log_start) / (num_points - 1) as f64;
                (0..num_points)
                    .map(|i| (log_start + i as f64 * log_delta).exp())
                    .collect()
            }
        };

        // Ensure exact endpoints
        points[0] = start;
        points[num_points - 1] = end;
        Ok(Self(points))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<f64> for Values {
    fn from(value: f64) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<f64>> for Values {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for Values {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Values {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}
