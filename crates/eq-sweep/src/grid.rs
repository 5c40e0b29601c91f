//! Cartesian product of constraint values.

use crate::error::{SweepError, SweepResult};

/// Full grid of value combinations, flattened row-major.
///
/// The first axis varies slowest, matching standard multi-dimensional mesh
/// flattening. A grid with no axes has exactly one point, the empty tuple.
/// The point count must fit in `usize`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axes: Vec<Vec<f64>>,
    len: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            axes: Vec::new(),
            len: 1,
        }
    }
}

impl Grid {
    pub fn new(axes: Vec<Vec<f64>>) -> SweepResult<Self> {
        let mut grid = Self::default();
        for axis in axes {
            grid.push_axis(axis)?;
        }
        Ok(grid)
    }

    /// Append an axis, leaving the grid unchanged if the point count overflows.
    pub fn push_axis(&mut self, values: Vec<f64>) -> SweepResult<()> {
        let len = self
            .len
            .checked_mul(values.len())
            .ok_or(SweepError::GridTooLarge {
                axes: self.axes.len() + 1,
            })?;
        self.axes.push(values);
        self.len = len;
        Ok(())
    }

    pub fn axes(&self) -> &[Vec<f64>] {
        &self.axes
    }

    pub fn dims(&self) -> usize {
        self.axes.len()
    }

    /// Number of points: the product of the axis lengths.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-axis indices of flat index `index`.
    pub fn indices(&self, index: usize) -> Option<Vec<usize>> {
        if index >= self.len {
            return None;
        }
        let mut rest = index;
        let mut indices = vec![0; self.axes.len()];
        for (slot, axis) in indices.iter_mut().zip(&self.axes).rev() {
            *slot = rest % axis.len();
            rest /= axis.len();
        }
        Some(indices)
    }

    /// Values of flat index `index`, one per axis.
    pub fn point(&self, index: usize) -> Option<Vec<f64>> {
        let indices = self.indices(index)?;
        Some(
            indices
                .iter()
                .zip(&self.axes)
                .map(|(&i, axis)| axis[i])
                .collect(),
        )
    }

    /// All points in flat order.
    pub fn iter(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.len).filter_map(move |i| self.point(i))
    }
}
