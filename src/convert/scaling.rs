//! Measurement-driven calibration of emitted coordinates.
//!
//! A scope may contain reference paths labeled `measurement: <expr>` (one
//! factor for both axes) or `measurement-x: <expr>` / `measurement-y: <expr>`
//! (one factor per axis). The factor is written into the generated code as
//! `(<expr>) / <reference length in mm>`, so the pattern scales with the
//! wearer's measurements at runtime; only the reference length is computed
//! here.
//!
//! Precedence, when labels disagree:
//! - uniform and per-axis labels in one scope: scaling is disabled for the
//!   whole scope and a diagnostic is reported;
//! - the same axis labeled more than once: the first valid reference in
//!   document order wins, later ones are reported and ignored;
//! - a reference that does not have exactly two endpoints, or has zero
//!   length, contributes nothing.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use enum_dispatch::enum_dispatch;
use glam::DVec2;
use regex_lite::Regex;

use crate::command::PathCommand;
use crate::errors::{ConvertError, DiagnosticSink};
use crate::types::{Mm, Px};

use super::defaults::{MEASUREMENT_LABEL, MEASUREMENT_X_LABEL, MEASUREMENT_Y_LABEL};
use super::format::format_coord;
use super::interpret::endpoints;

static REFERENCE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:measurements|options)\.[A-Za-z_$][A-Za-z0-9_$]*")
        .expect("reference token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Which factor a reference path calibrates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceAxis {
    /// `measurement:` - both axes
    Both,
    /// `measurement-x:`
    X,
    /// `measurement-y:`
    Y,
}

impl ReferenceAxis {
    fn describe(self) -> &'static str {
        match self {
            ReferenceAxis::Both => "both axes",
            ReferenceAxis::X => "the x axis",
            ReferenceAxis::Y => "the y axis",
        }
    }
}

/// A parsed reference label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLabel {
    pub axis: ReferenceAxis,
    /// Trailing label text, kept verbatim for the generated code
    pub expression: String,
}

impl ReferenceLabel {
    /// Recognize a reference label. Anything else, including a prefix with
    /// no expression after it, is not a reference.
    pub fn parse(label: &str) -> Option<ReferenceLabel> {
        let label = label.trim();
        let (axis, rest) = if let Some(rest) = label.strip_prefix(MEASUREMENT_X_LABEL) {
            (ReferenceAxis::X, rest)
        } else if let Some(rest) = label.strip_prefix(MEASUREMENT_Y_LABEL) {
            (ReferenceAxis::Y, rest)
        } else if let Some(rest) = label.strip_prefix(MEASUREMENT_LABEL) {
            (ReferenceAxis::Both, rest)
        } else {
            return None;
        };

        let expression = rest.trim();
        if expression.is_empty() {
            return None;
        }
        Some(ReferenceLabel {
            axis,
            expression: expression.to_string(),
        })
    }
}

/// A reference-labeled path handed to [`ScalingSpec::build`]
#[derive(Debug, Clone, Copy)]
pub struct Reference<'a> {
    pub id: &'a str,
    pub label: &'a ReferenceLabel,
    pub commands: &'a [PathCommand],
}

/// One calibrated factor: `(<measurement>) / <length>`
#[derive(Debug, Clone, PartialEq)]
pub struct AxisReference {
    pub measurement: String,
    pub length: Mm,
    /// Id of the reference path it came from
    pub source: String,
}

impl AxisReference {
    fn assignment(&self, factor: &str, precision: usize) -> String {
        format!(
            "{} = ({}) / {}",
            factor,
            self.measurement,
            format_coord(self.length.raw(), precision)
        )
    }
}

/// Scale factors a scope applies to emitted coordinates
#[enum_dispatch]
pub trait Calibration {
    /// Scale-factor assignments emitted ahead of a path's points.
    fn preamble(&self, element_id: &str, precision: usize) -> Vec<String>;

    /// Name of the factor applied to one axis, if any.
    fn factor(&self, element_id: &str, axis: Axis) -> Option<String>;

    /// Raw measurement expressions, in axis order.
    fn expressions(&self) -> Vec<&str>;

    /// A full point declaration with the factors applied textually.
    fn format_point(&self, name: &str, element_id: &str, position: DVec2, precision: usize) -> String {
        let coord = |value: f64, axis: Axis| {
            let text = format_coord(value, precision);
            match self.factor(element_id, axis) {
                Some(factor) => format!("{} * {}", text, factor),
                None => text,
            }
        };
        format!(
            "points.{} = new Point({}, {})",
            name,
            coord(position.x, Axis::X),
            coord(position.y, Axis::Y)
        )
    }
}

/// No calibration: coordinates are emitted as literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unscaled;

impl Calibration for Unscaled {
    fn preamble(&self, _element_id: &str, _precision: usize) -> Vec<String> {
        Vec::new()
    }

    fn factor(&self, _element_id: &str, _axis: Axis) -> Option<String> {
        None
    }

    fn expressions(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// One factor for both axes
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    pub reference: AxisReference,
}

impl Calibration for Uniform {
    fn preamble(&self, element_id: &str, precision: usize) -> Vec<String> {
        vec![self.reference.assignment(&format!("scaling_{element_id}"), precision)]
    }

    fn factor(&self, element_id: &str, _axis: Axis) -> Option<String> {
        Some(format!("scaling_{element_id}"))
    }

    fn expressions(&self) -> Vec<&str> {
        vec![self.reference.measurement.as_str()]
    }
}

/// Separate factors for x and y; an axis without a reference is unscaled
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Anisotropic {
    pub x: Option<AxisReference>,
    pub y: Option<AxisReference>,
}

impl Anisotropic {
    fn axis(&self, axis: Axis) -> Option<&AxisReference> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }
}

fn axis_factor(element_id: &str, axis: Axis) -> String {
    match axis {
        Axis::X => format!("scaling_{element_id}_x"),
        Axis::Y => format!("scaling_{element_id}_y"),
    }
}

impl Calibration for Anisotropic {
    fn preamble(&self, element_id: &str, precision: usize) -> Vec<String> {
        [Axis::X, Axis::Y]
            .into_iter()
            .filter_map(|axis| {
                self.axis(axis)
                    .map(|r| r.assignment(&axis_factor(element_id, axis), precision))
            })
            .collect()
    }

    fn factor(&self, element_id: &str, axis: Axis) -> Option<String> {
        self.axis(axis).map(|_| axis_factor(element_id, axis))
    }

    fn expressions(&self) -> Vec<&str> {
        [&self.x, &self.y]
            .into_iter()
            .flatten()
            .map(|r| r.measurement.as_str())
            .collect()
    }
}

/// The calibration a scope applies, computed once before its paths convert
#[enum_dispatch(Calibration)]
#[derive(Debug, Clone, PartialEq)]
pub enum ScalingSpec {
    Unscaled,
    Uniform,
    Anisotropic,
}

impl Default for ScalingSpec {
    fn default() -> Self {
        ScalingSpec::Unscaled(Unscaled)
    }
}

impl ScalingSpec {
    /// Build a scope's calibration from its reference paths (document order).
    ///
    /// `precision` is the one the scope's code is written with; reference
    /// lengths are checked at it.
    pub fn build(
        scope: &str,
        references: &[Reference<'_>],
        precision: usize,
        sink: &mut dyn DiagnosticSink,
    ) -> ScalingSpec {
        if references.is_empty() {
            return ScalingSpec::default();
        }

        let uniform_labeled = references.iter().any(|r| r.label.axis == ReferenceAxis::Both);
        let axis_labeled = references.iter().any(|r| r.label.axis != ReferenceAxis::Both);
        if uniform_labeled && axis_labeled {
            crate::log::warn!(scope, "conflicting measurement labels, scaling disabled");
            sink.report(ConvertError::ConflictingScalingModes {
                scope: scope.to_string(),
            });
            return ScalingSpec::default();
        }

        let mut both: Option<AxisReference> = None;
        let mut x: Option<AxisReference> = None;
        let mut y: Option<AxisReference> = None;

        for reference in references {
            let Some(calibrated) = measure(reference, precision, sink) else {
                continue;
            };
            let slot = match reference.label.axis {
                ReferenceAxis::Both => &mut both,
                ReferenceAxis::X => &mut x,
                ReferenceAxis::Y => &mut y,
            };
            match slot {
                Some(kept) => sink.report(ConvertError::DuplicateReference {
                    scope: scope.to_string(),
                    axis: reference.label.axis.describe(),
                    kept: kept.source.clone(),
                    ignored: reference.id.to_string(),
                }),
                None => {
                    crate::log::debug!(
                        scope,
                        reference = reference.id,
                        length = %calibrated.length,
                        "calibrated"
                    );
                    *slot = Some(calibrated);
                }
            }
        }

        match (both, x, y) {
            (Some(reference), _, _) => Uniform { reference }.into(),
            (None, None, None) => ScalingSpec::default(),
            (None, x, y) => Anisotropic { x, y }.into(),
        }
    }

    pub fn is_scaled(&self) -> bool {
        !matches!(self, ScalingSpec::Unscaled(_))
    }

    /// `measurements.*` / `options.*` names used by the scaling expressions.
    pub fn references(&self) -> BTreeSet<String> {
        self.expressions()
            .into_iter()
            .flat_map(|expr| REFERENCE_TOKEN.find_iter(expr).map(|m| m.as_str().to_string()))
            .collect()
    }
}

/// Measure a reference path: the distance between its two endpoints, in mm.
///
/// The length is written into the generated code at `precision` digits, so
/// a reference that rounds to zero there is as unusable as one that is zero.
fn measure(reference: &Reference<'_>, precision: usize, sink: &mut dyn DiagnosticSink) -> Option<AxisReference> {
    let ends = endpoints(reference.commands);
    let [start, end] = ends[..] else {
        sink.report(ConvertError::InvalidReference {
            path: reference.id.to_string(),
            endpoints: ends.len(),
        });
        return None;
    };

    let length = match Px::between(start, end).and_then(Px::to_mm) {
        Ok(length) => length,
        Err(error) => {
            sink.report(ConvertError::NonFiniteReference {
                path: reference.id.to_string(),
                error,
            });
            return None;
        }
    };

    let written = format_coord(length.raw(), precision);
    if written.parse::<f64>().map_or(true, |value| value == 0.0) {
        sink.report(ConvertError::ZeroLengthReference {
            path: reference.id.to_string(),
        });
        return None;
    }

    Some(AxisReference {
        measurement: reference.label.expression.clone(),
        length,
        source: reference.id.to_string(),
    })
}
