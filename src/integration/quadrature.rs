//! Fixed-step quadrature
//!
//! The interval is cut into `ceil((right - left) / step)` pieces of width
//! `step`; the last piece is shortened so it ends exactly at `right`. Each
//! piece contributes its trapezoid `(f(x_i) + f(x_{i+1})) / 2 * dx_i`.

use crate::function::BoundedFunction;
use crate::integration::error::IntegrationError;

/// Upper bound on the number of sub-intervals a single call may evaluate
pub const MAX_SEGMENTS: u64 = 1_000_000_000;

/// Integrate `f` over `[left, right]` with a fixed step
pub fn integrate<F>(f: &F, left: f64, right: f64, step: f64) -> Result<f64, IntegrationError>
where
    F: BoundedFunction + ?Sized,
{
    validate_interval(f, left, right)?;
    validate_step(step)?;
    if (right - left) / step > MAX_SEGMENTS as f64 {
        return Err(IntegrationError::invalid(format!(
            "step {:e} is too small for [{}, {}] (more than {} segments)",
            step, left, right, MAX_SEGMENTS
        )));
    }

    let sum = trapezoid_sum(f, left, right, step);
    if !sum.is_finite() {
        return Err(IntegrationError::NonFinite { left, right, step });
    }
    Ok(sum)
}

/// Number of sub-intervals a step of `step` produces on `[left, right]`
pub fn segment_count(left: f64, right: f64, step: f64) -> u64 {
    let count = ((right - left) / step).ceil();
    if count < 1.0 { 1 } else { count as u64 }
}

/// Check bounds ordering, finiteness and domain membership
pub(crate) fn validate_interval<F>(f: &F, left: f64, right: f64) -> Result<(), IntegrationError>
where
    F: BoundedFunction + ?Sized,
{
    if !left.is_finite() || !right.is_finite() {
        return Err(IntegrationError::invalid(format!(
            "bounds must be finite (got [{}, {}])",
            left, right
        )));
    }
    if left >= right {
        return Err(IntegrationError::invalid(format!(
            "left bound {} must be less than right bound {}",
            left, right
        )));
    }
    if !f.contains_interval(left, right) {
        return Err(IntegrationError::Domain {
            left,
            right,
            domain_left: f.left_border(),
            domain_right: f.right_border(),
        });
    }
    Ok(())
}

pub(crate) fn validate_step(step: f64) -> Result<(), IntegrationError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(IntegrationError::invalid(format!(
            "step must be positive and finite (got {})",
            step
        )));
    }
    Ok(())
}

fn trapezoid_sum<F>(f: &F, left: f64, right: f64, step: f64) -> f64
where
    F: BoundedFunction + ?Sized,
{
    let segments = segment_count(left, right, step);

    let mut sum = 0.0;
    let mut x0 = left;
    let mut y0 = f.evaluate(x0);

    for i in 1..=segments {
        // Recompute from `left` instead of accumulating to avoid drift
        let x1 = if i == segments {
            right
        } else {
            (left + i as f64 * step).min(right)
        };
        let y1 = f.evaluate(x1);
        sum += (y0 + y1) * 0.5 * (x1 - x0);
        x0 = x1;
        y0 = y1;
    }

    sum
}
