//! Damped Newton iteration over titrant unknowns.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric failure inside the Newton loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NewtonError {
    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type NewtonOutcome<T> = Result<T, NewtonError>;

/// Newton solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Relative perturbation for finite-difference Jacobians
    pub fd_epsilon: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-10,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
            fd_epsilon: 1e-7,
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Newton solver with backtracking line search.
///
/// Running out of iterations or failing to reduce the residual along the
/// Newton direction returns `converged = false`; a singular Jacobian is a
/// [`NewtonError`].
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> NewtonOutcome<NewtonResult>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
    J: Fn(&DVector<f64>) -> DMatrix<f64>,
{
    let mut x = x0;
    let mut r = residual_fn(&x);
    let mut r_norm = r.norm();

    for iter in 0..config.max_iterations {
        if r_norm <= config.abs_tol {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }

        let jac = jacobian_fn(&x);

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-&r))
            .ok_or_else(|| NewtonError::Numeric {
                what: "Jacobian solve failed".to_string(),
            })?;

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..=config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            let r_new = residual_fn(&x_new);
            let r_new_norm = r_new.norm();
            if r_new_norm < r_norm {
                accepted = Some((x_new, r_new, r_new_norm));
                break;
            }
            alpha *= config.line_search_beta;
        }

        match accepted {
            Some((x_new, r_new, r_new_norm)) => {
                x = x_new;
                r = r_new;
                r_norm = r_new_norm;
            }
            None => {
                return Ok(NewtonResult {
                    x,
                    residual_norm: r_norm,
                    iterations: iter + 1,
                    converged: false,
                });
            }
        }
    }

    Ok(NewtonResult {
        x,
        residual_norm: r_norm,
        iterations: config.max_iterations,
        converged: r_norm <= config.abs_tol,
    })
}
