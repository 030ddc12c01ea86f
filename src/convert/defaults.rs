//! Default settings and fixed constants for code generation

/// Fractional digits kept in emitted coordinates and reference lengths.
pub const PRECISION: usize = 4;

/// Millimeters per drawing unit (96 user units per inch).
pub const MM_PER_PX: f64 = 25.4 / 96.0;

/// Indentation of chained path calls.
pub const CHAIN_INDENT: &str = "    ";

/// Group/layer label prefix that turns a group into a named part.
pub const PART_LABEL_PREFIX: &str = "part:";

/// Reference path label prefixes.
pub const MEASUREMENT_LABEL: &str = "measurement:";
pub const MEASUREMENT_X_LABEL: &str = "measurement-x:";
pub const MEASUREMENT_Y_LABEL: &str = "measurement-y:";

/// Names of the scopes that are not labeled parts.
pub const DESIGN_SCOPE: &str = "design";
pub const SELECTION_SCOPE: &str = "selection";
