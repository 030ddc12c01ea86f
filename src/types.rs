//! Strongly-typed lengths for calibration (zero-cost newtypes).
//!
//! Drawing coordinates are user units (CSS pixels at 96 per inch); reference
//! lengths written into generated code are millimeters. Keeping them as
//! separate types makes a missing unit conversion a type error.

use std::fmt;

use glam::DVec2;

use crate::convert::defaults::MM_PER_PX;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Length in drawing units (px)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    /// Create a Px with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Px, NumericError> {
        check_finite(val).map(Px)
    }

    /// Straight-line distance between two points in drawing units.
    ///
    /// Finite points far enough apart overflow to an infinite distance,
    /// which is rejected.
    #[inline]
    pub fn between(a: DVec2, b: DVec2) -> Result<Px, NumericError> {
        Px::try_new(a.distance(b))
    }

    #[inline]
    pub fn to_mm(self) -> Result<Mm, NumericError> {
        Mm::try_new(self.0 * MM_PER_PX)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

/// Length in millimeters
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Mm(pub f64);

impl Mm {
    /// Create a Mm with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Mm, NumericError> {
        check_finite(val).map(Mm)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Mm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.0)
    }
}
