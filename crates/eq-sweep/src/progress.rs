//! Progress reporting for sweeps.

use crate::results::EquilibriumStatus;

/// Emitted after each grid point is solved.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepProgressEvent {
    /// Flat grid index of the point just solved
    pub index: usize,
    /// Total number of grid points
    pub total: usize,
    /// Constraint values of the point
    pub point: Vec<f64>,
    pub status: EquilibriumStatus,
    /// Solver iterations spent on the point
    pub iterations: usize,
}

impl SweepProgressEvent {
    pub fn fraction_complete(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.index + 1) as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction() {
        let event = SweepProgressEvent {
            index: 1,
            total: 4,
            point: vec![300.0],
            status: EquilibriumStatus::Success,
            iterations: 2,
        };
        assert!((event.fraction_complete() - 0.5).abs() < 1e-12);
    }
}
