//! Chi-Square Distribution
//!
//! Upper-tail probabilities and critical values of the chi-square
//! distribution, computed from a rational normal approximation and the
//! exact finite series for integer degrees of freedom.
use crate::constants::{
    CONVERGENCE_TOLERANCE, ITERATION_LIMIT, REFINEMENT_DOF_LIMIT, ROUNDING_PRECISION, SERIES_DOF_LIMIT,
    UPPER_TAIL_CUTOFF,
};
use crate::errors::ChiSquareError;
use crate::utils::{precision_round, validate_degrees_of_freedom, validate_significance_level};
use log::{debug, warn};
use std::f64::consts::PI;

/// Upper-tail probability `P(Z > x)` of the standard normal distribution.
///
/// Uses a polynomial approximation near zero and a continued fraction
/// further out. Values beyond 100 standard deviations are reported as 0.
pub fn normal_upper_tail(x: f64) -> f64 {
    let absx = x.abs();
    let mut p = 0.0;

    if absx < 1.9 {
        p = (1.0
            + absx
                * (0.049867347
                    + absx
                        * (0.0211410061
                            + absx * (0.0032776263 + absx * (0.0000380036 + absx * (0.0000488906 + absx * 0.000005383))))))
            .powi(-16)
            / 2.0;
    } else if absx <= 100.0 {
        for i in (1..=18).rev() {
            p = i as f64 / (absx + p);
        }
        p = (-0.5 * absx * absx).exp() / (2.0 * PI).sqrt() / (absx + p);
    }

    if x < 0.0 {
        1.0 - p
    } else {
        p
    }
}

/// Inverse of [`normal_upper_tail`]: the `x` for which `P(Z > x) = p`.
pub fn normal_inverse(p: f64) -> f64 {
    let y = -(4.0 * p * (1.0 - p)).ln();
    let x = (y
        * (1.570796288
            + y * (0.03706987906
                + y * (-0.8364353589E-3
                    + y * (-0.2250947176E-3
                        + y * (0.6841218299E-5
                            + y * (0.5824238515E-5
                                + y * (-0.104527497E-5
                                    + y * (0.8360937017E-7
                                        + y * (-0.3231081277E-8
                                            + y * (0.3657763036E-10 + y * 0.6936233982E-12)))))))))))
        .sqrt();
    if p > 0.5 {
        -x
    } else {
        x
    }
}

/// Upper-tail probability `P(X > x)` for `X ~ χ²(dof)`.
///
/// Above 100 degrees of freedom the Wilson-Hilferty cube root transform is
/// used, otherwise the finite series for odd or even `dof`. NaN gives NaN.
pub fn chi_square_upper_tail(x: f64, dof: usize) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    let n = dof as f64;
    if dof > SERIES_DOF_LIMIT {
        let scale = 2.0 / 9.0 / n;
        return normal_upper_tail(((x / n).powf(1.0 / 3.0) - (1.0 - scale)) / scale.sqrt());
    }
    if x > UPPER_TAIL_CUTOFF {
        return 0.0;
    }

    let (mut p, mut a, start) = if dof % 2 != 0 {
        let a = (2.0 / PI).sqrt() * (-x / 2.0).exp() / x.sqrt();
        (2.0 * normal_upper_tail(x.sqrt()), a, 1)
    } else {
        let a = (-x / 2.0).exp();
        (a, a, 2)
    };
    let mut i = start;
    while i + 2 <= dof {
        a *= x / i as f64;
        p += a;
        i += 2;
    }
    p
}

/// Critical value of the chi-square distribution.
///
/// Returns the `x` with `P(X > x) = alpha` for `X ~ χ²(dof)`.
///
/// * `alpha` - Significance level, in (0, 1].
/// * `dof` - Degrees of freedom, a positive integer.
///
/// ```
/// let x = chisquare::critical_value(0.05, 1.0).unwrap();
/// assert!((x - 3.841).abs() < 1e-3);
/// ```
pub fn critical_value(alpha: f64, dof: f64) -> Result<f64, ChiSquareError> {
    let dof = validate_degrees_of_freedom(dof)?;
    validate_significance_level(alpha)?;
    Ok(solve(alpha, dof))
}

fn solve(alpha: f64, dof: usize) -> f64 {
    if alpha == 1.0 {
        return 0.0;
    }
    match dof {
        1 => normal_inverse(alpha / 2.0).powi(2),
        2 => -2.0 * alpha.ln(),
        _ => {
            let x = wilson_hilferty(alpha, dof);
            if dof <= SERIES_DOF_LIMIT {
                refine(x, alpha, dof)
            } else {
                x
            }
        }
    }
}

/// Cornish-Fisher corrected Wilson-Hilferty starting point.
fn wilson_hilferty(alpha: f64, dof: usize) -> f64 {
    let n = dof as f64;
    let u = normal_inverse(alpha);
    let u2 = u * u;
    let root = (2.0 * n).sqrt();
    let x = n + root * u + 2.0 / 3.0 * (u2 - 1.0) + u * (u2 - 7.0) / 9.0 / root
        - 2.0 / 405.0 / n * (u2 * (3.0 * u2 + 7.0) - 16.0);
    x.max(0.0)
}

// Newton steps against the exact tail with a Stirling estimate of the density.
// The first step always runs, further steps only below REFINEMENT_DOF_LIMIT.
fn refine(mut x: f64, alpha: f64, dof: usize) -> f64 {
    let n = dof as f64;
    for iteration in 0..ITERATION_LIMIT {
        let previous = x;
        let p1 = if x < 0.0 { 1.0 } else { chi_square_upper_tail(x, dof) };
        let z = (((n - 1.0) * (x / n).ln() - (4.0 * PI * x).ln() + n - x - 1.0 / n / 6.0) / 2.0).exp();
        x = precision_round(x + (p1 - alpha) / z, ROUNDING_PRECISION);
        debug!("Refinement iteration {}, x: {}, upper tail: {}", iteration, x, p1);
        let keep_going = dof < REFINEMENT_DOF_LIMIT && (previous - x).abs() > CONVERGENCE_TOLERANCE;
        if !keep_going {
            return x;
        }
    }
    warn!(
        "Critical value refinement reached the iteration limit of {} for alpha {} and {} degrees of freedom.",
        ITERATION_LIMIT, alpha, dof
    );
    x
}
