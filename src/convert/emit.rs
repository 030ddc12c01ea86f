//! Text generation for one path.
//!
//! Output is FreeSewing-style JavaScript:
//!
//! ```text
//! // Path: front
//! points.front_p1 = new Point(0, 0)
//! points.front_p2 = new Point(10, 0)
//!
//! paths.front = new Path()
//!     .move(points.front_p1)
//!     .line(points.front_p2)
//! ```

use std::fmt::Write;

use crate::command::PathCommand;

use super::defaults::CHAIN_INDENT;
use super::interpret::Emission;
use super::scaling::{Calibration, ScalingSpec};
use super::types::{ChainCall, PathCode, Point};
use super::ConvertOptions;

/// Accumulates the two text blocks of one path as commands are stepped.
pub struct Emitter<'a> {
    path_id: &'a str,
    scaling: &'a ScalingSpec,
    options: &'a ConvertOptions,
    points: String,
    path: String,
    declared: Vec<Point>,
}

impl<'a> Emitter<'a> {
    pub fn new(path_id: &'a str, scaling: &'a ScalingSpec, options: &'a ConvertOptions) -> Self {
        Self {
            path_id,
            scaling,
            options,
            points: format!("// Path: {}\n", path_id),
            path: format!("paths.{} = new Path()", path_id),
            declared: Vec::new(),
        }
    }

    /// True until the first point has been declared.
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Append one command's declarations and chain call.
    pub fn push(&mut self, command: &PathCommand, emission: Emission) {
        let precision = self.options.precision;

        for point in emission.points {
            if self.options.debug {
                let _ = writeln!(self.points, "// {}", command);
            }
            let line = self
                .scaling
                .format_point(&point.name, self.path_id, point.position, precision);
            let _ = writeln!(self.points, "{}", line);
            self.declared.push(point);
        }

        if self.options.debug {
            let _ = write!(self.path, "\n{}// {}", CHAIN_INDENT, command);
        }
        let call = match &emission.call {
            ChainCall::Move(name) => format!(".move(points.{})", name),
            ChainCall::Line(name) => format!(".line(points.{})", name),
            ChainCall::Curve {
                control1,
                control2,
                to,
            } => format!(
                ".curve(points.{}, points.{}, points.{})",
                control1, control2, to
            ),
        };
        let _ = write!(self.path, "\n{}{}", CHAIN_INDENT, call);
    }

    pub fn finish(self) -> PathCode {
        crate::log::debug!(
            path = self.path_id,
            points = self.declared.len(),
            "emitted path"
        );

        let preamble: String = self
            .scaling
            .preamble(self.path_id, self.options.precision)
            .into_iter()
            .map(|line| line + "\n")
            .collect();

        PathCode {
            id: self.path_id.to_string(),
            preamble,
            points: self.points,
            path: self.path,
            declared: self.declared,
        }
    }
}
