//! Bounded scalar functions consumed by the integration engine
//!
//! The engine only needs three things from a function: a way to evaluate it
//! and the two borders of the interval it is defined on. Any type that
//! implements [`BoundedFunction`] can be integrated or published as a job.

pub mod basic;

pub use basic::{Exp, FnFunction, Log};

use std::fmt::Debug;

/// A real-valued function of one variable together with its domain
///
/// Implementations must be immutable once constructed: jobs share them
/// between threads through an `Arc` without further locking.
pub trait BoundedFunction: Debug + Send + Sync {
    /// Evaluate the function at `x`
    ///
    /// Only meaningful for `x` in `[left_border(), right_border()]`.
    fn evaluate(&self, x: f64) -> f64;

    /// Left border of the domain (may be `f64::NEG_INFINITY`)
    fn left_border(&self) -> f64;

    /// Right border of the domain (may be `f64::INFINITY`)
    fn right_border(&self) -> f64;

    /// Exact value of the integral over `[left, right]`, if known in closed form
    fn exact_integral(&self, _left: f64, _right: f64) -> Option<f64> {
        None
    }

    /// Short human-readable name used in logs and reports
    fn name(&self) -> String {
        format!("{:?}", self)
    }

    /// Returns true if `[left, right]` lies inside the domain
    fn contains_interval(&self, left: f64, right: f64) -> bool {
        left >= self.left_border() && right <= self.right_border()
    }
}
