//! Conversion of path commands into pattern code
//!
//! This module is organized into submodules:
//! - `defaults`: Default settings and fixed constants
//! - `format`: Coordinate formatting
//! - `names`: Identifier sanitizing and point name allocation
//! - `pen`: Pen state between commands
//! - `scaling`: Measurement-driven calibration
//! - `interpret`: The command state machine
//! - `emit`: Text generation for one path
//! - `scope`: Scope assembly
//! - `types`: Output model (points, chain calls, path and part code)

pub mod defaults;
pub mod emit;
pub mod format;
pub mod interpret;
pub mod names;
pub mod pen;
pub mod scaling;
pub mod scope;
pub mod types;

// Re-export commonly used items
pub use format::format_coord;
pub use interpret::convert_path;
pub use names::{allocate, allocate_curve_triple, sanitize};
pub use scaling::{Calibration, ReferenceLabel, ScalingSpec};
pub use scope::{PathElement, Scope, ScopeKind};
pub use types::*;

/// Settings the converter reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Fractional digits kept in coordinates and reference lengths
    pub precision: usize,
    /// Echo each source command as a comment above the code it produced
    pub debug: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            precision: defaults::PRECISION,
            debug: false,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
