//! Inclusive numeric ranges applied on every assignment.

use std::fmt;

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Clamp `value` into the range. NaN lands on `min`.
    #[must_use]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn clamp(self, value: T) -> T {
        if !(value >= self.min) {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns true if `value` lies within the range.
    #[must_use]
    pub fn contains(self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}
