use crate::EqError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, EqError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EqError::NonFinite { what, value: v })
    }
}

/// Check every value of a slice, reporting the first non-finite one.
pub fn ensure_all_finite(values: &[f64], what: &'static str) -> Result<(), EqError> {
    for &v in values {
        ensure_finite(v, what)?;
    }
    Ok(())
}

/// Natural logarithm clamped away from zero so log-space residuals stay finite.
pub fn safe_ln(v: f64) -> f64 {
    v.max(f64::MIN_POSITIVE).ln()
}
