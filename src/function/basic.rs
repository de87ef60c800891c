//! Built-in functions: exponential, logarithm and a closure adapter

use crate::function::BoundedFunction;
use std::fmt;
use std::sync::Arc;

/// The exponential function `e^x`, defined on the whole real line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Exp;

impl BoundedFunction for Exp {
    fn evaluate(&self, x: f64) -> f64 {
        x.exp()
    }

    fn left_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn right_border(&self) -> f64 {
        f64::INFINITY
    }

    fn exact_integral(&self, left: f64, right: f64) -> Option<f64> {
        Some(right.exp() - left.exp())
    }

    fn name(&self) -> String {
        "exp".to_string()
    }
}

/// Logarithm with an arbitrary base, defined on `[0, +inf)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Log {
    base: f64,
    ln_base: f64,
}

impl Log {
    /// Create a logarithm with the given base
    ///
    /// Returns `None` when the base is not a valid logarithm base
    /// (non-finite, non-positive, or equal to one).
    pub fn new(base: f64) -> Option<Self> {
        if !base.is_finite() || base <= 0.0 || base == 1.0 {
            return None;
        }
        Some(Self {
            base,
            ln_base: base.ln(),
        })
    }

    /// Natural logarithm
    pub fn natural() -> Self {
        Self {
            base: std::f64::consts::E,
            ln_base: 1.0,
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }
}

impl BoundedFunction for Log {
    fn evaluate(&self, x: f64) -> f64 {
        x.ln() / self.ln_base
    }

    fn left_border(&self) -> f64 {
        0.0
    }

    fn right_border(&self) -> f64 {
        f64::INFINITY
    }

    fn exact_integral(&self, left: f64, right: f64) -> Option<f64> {
        // x ln x - x, with the 0 ln 0 = 0 limit at the left border
        let antiderivative = |x: f64| {
            if x == 0.0 { 0.0 } else { x * x.ln() - x }
        };
        Some((antiderivative(right) - antiderivative(left)) / self.ln_base)
    }

    fn name(&self) -> String {
        format!("log[{:.4}]", self.base)
    }
}

/// Adapter that turns any closure into a [`BoundedFunction`]
#[derive(Clone)]
pub struct FnFunction {
    name: String,
    left_border: f64,
    right_border: f64,
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl FnFunction {
    /// Wrap `f`, declaring it valid on `[left_border, right_border]`
    pub fn new<F>(name: impl Into<String>, left_border: f64, right_border: f64, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            left_border,
            right_border,
            f: Arc::new(f),
        }
    }

    /// Wrap `f`, declaring it valid on the whole real line
    pub fn unbounded<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(name, f64::NEG_INFINITY, f64::INFINITY, f)
    }
}

impl fmt::Debug for FnFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFunction")
            .field("name", &self.name)
            .field("left_border", &self.left_border)
            .field("right_border", &self.right_border)
            .finish()
    }
}

impl BoundedFunction for FnFunction {
    fn evaluate(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    fn left_border(&self) -> f64 {
        self.left_border
    }

    fn right_border(&self) -> f64 {
        self.right_border
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
