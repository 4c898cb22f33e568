//! Control range arithmetic.
//!
//! A control is a named tunable with an inclusive `[min, max]` range and a
//! step. Validation happens before any hardware access; ranges themselves are
//! derived state owned by the driver and may be recomputed when a driving
//! control changes.

use crate::error::CamError;

/// Legal range of a control value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRange {
    pub min: i64,
    pub max: i64,
    pub step: u32,
    pub default: i64,
}

impl ControlRange {
    pub const fn new(min: i64, max: i64, step: u32, default: i64) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    /// A range holding exactly one value (read-only reporting controls).
    pub const fn single(value: i64) -> Self {
        Self {
            min: value,
            max: value,
            step: 1,
            default: value,
        }
    }

    /// Validate `value` against the range, before touching hardware.
    pub fn validate(&self, control: &'static str, value: i64) -> Result<(), CamError> {
        let aligned = (value - self.min) % i64::from(self.step) == 0;
        if value < self.min || value > self.max || !aligned {
            return Err(CamError::OutOfRange {
                control,
                value,
                min: self.min,
                max: self.max,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Clamp `value` into the range.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}
