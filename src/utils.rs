use crate::errors::ChiSquareError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

pub fn fmt_vec_output(v: &[f64]) -> String {
    let mut res = String::new();
    if let Some(last) = v.len().checked_sub(1) {
        if last == 0 {
            return format!("{:.4}", v[0]);
        }
        for n in &v[..last] {
            res.push_str(format!("{:.4}", n).as_str());
            res.push_str(", ");
        }
        res.push_str(format!("{:.4}", &v[last]).as_str());
    }
    res
}

// Validation
/// Check that a significance level lies in (0, 1]. NaN is rejected.
pub fn validate_significance_level(alpha: f64) -> Result<(), ChiSquareError> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(ChiSquareError::InvalidSignificanceLevel(alpha))
    }
}

/// Check that degrees of freedom are a positive integer and convert them.
pub fn validate_degrees_of_freedom(dof: f64) -> Result<usize, ChiSquareError> {
    if dof.is_finite() && dof >= 1.0 && dof.fract() == 0.0 {
        Ok(dof as usize)
    } else {
        Err(ChiSquareError::InvalidDegreesOfFreedom(dof))
    }
}

#[inline]
pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}
