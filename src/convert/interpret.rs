//! The path-command state machine.
//!
//! Each command is one [`step`]: it takes the pen state by value and returns
//! the next pen state together with what the command emits. Relative
//! operands are resolved here, so everything downstream only sees absolute
//! coordinates.

use glam::DVec2;

use crate::command::PathCommand;
use crate::errors::{ConvertError, DiagnosticSink};

use super::emit::Emitter;
use super::names::{NameAllocator, sanitize};
use super::pen::PenState;
use super::scaling::ScalingSpec;
use super::types::{ChainCall, PathCode, Point, PointRole};
use super::ConvertOptions;

/// What one command contributes to the output
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// New points, in declaration order
    pub points: Vec<Point>,
    pub call: ChainCall,
}

/// Why a command produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Unsupported(char),
    CloseWithoutStart,
}

impl Skip {
    fn into_diagnostic(self, path: &str, index: usize) -> ConvertError {
        match self {
            Skip::Unsupported(letter) => ConvertError::UnsupportedCommand {
                path: path.to_string(),
                letter,
                index,
            },
            Skip::CloseWithoutStart => ConvertError::CloseWithoutStart {
                path: path.to_string(),
                index,
            },
        }
    }
}

/// Result of one step
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Emitted(Emission),
    Skipped(Skip),
}

fn single_point(pen: PenState, name: String, to: DVec2, call: ChainCall) -> (PenState, Outcome) {
    let next = pen.placed(&name, to);
    let emission = Emission {
        points: vec![Point::endpoint(name, to)],
        call,
    };
    (next, Outcome::Emitted(emission))
}

/// Apply one command to the pen.
///
/// A skipped command leaves the pen state unchanged.
pub fn step(pen: PenState, names: &mut NameAllocator, command: &PathCommand) -> (PenState, Outcome) {
    match command {
        PathCommand::Move { coords, to } => {
            let to = coords.resolve(pen.position, *to);
            let name = names.next_point();
            let call = ChainCall::Move(name.clone());
            single_point(pen, name, to, call)
        }
        PathCommand::Line { coords, to } => {
            let to = coords.resolve(pen.position, *to);
            let name = names.next_point();
            let call = ChainCall::Line(name.clone());
            single_point(pen, name, to, call)
        }
        PathCommand::Horizontal { coords, x } => {
            let to = DVec2::new(coords.resolve_axis(pen.position.x, *x), pen.position.y);
            let name = names.next_point();
            let call = ChainCall::Line(name.clone());
            single_point(pen, name, to, call)
        }
        PathCommand::Vertical { coords, y } => {
            let to = DVec2::new(pen.position.x, coords.resolve_axis(pen.position.y, *y));
            let name = names.next_point();
            let call = ChainCall::Line(name.clone());
            single_point(pen, name, to, call)
        }
        PathCommand::CubicCurve {
            coords,
            control1,
            control2,
            to,
        } => {
            // All three operands are offsets from the same pen position
            let origin = pen.position;
            let control1 = coords.resolve(origin, *control1);
            let control2 = coords.resolve(origin, *control2);
            let to = coords.resolve(origin, *to);

            let curve = names.next_curve();
            let next = pen.placed(&curve.endpoint, to);
            let emission = Emission {
                points: vec![
                    Point {
                        name: curve.control1.clone(),
                        position: control1,
                        role: PointRole::Control1,
                    },
                    Point {
                        name: curve.control2.clone(),
                        position: control2,
                        role: PointRole::Control2,
                    },
                    Point::endpoint(curve.endpoint.clone(), to),
                ],
                call: ChainCall::Curve {
                    control1: curve.control1,
                    control2: curve.control2,
                    to: curve.endpoint,
                },
            };
            (next, Outcome::Emitted(emission))
        }
        PathCommand::Close { .. } => match pen.closed() {
            Ok((next, start)) => {
                let emission = Emission {
                    points: Vec::new(),
                    call: ChainCall::Line(start),
                };
                (next, Outcome::Emitted(emission))
            }
            Err(pen) => (pen, Outcome::Skipped(Skip::CloseWithoutStart)),
        },
        PathCommand::Unsupported { letter, .. } => (pen, Outcome::Skipped(Skip::Unsupported(*letter))),
    }
}

/// Absolute positions of every endpoint a command sequence visits.
///
/// Control points are not included and close commands add nothing; this is
/// what a reference path is measured by.
pub fn endpoints(commands: &[PathCommand]) -> Vec<DVec2> {
    let mut names = NameAllocator::new("reference");
    let mut pen = PenState::new();
    let mut ends = Vec::new();

    for command in commands {
        let (next, outcome) = step(pen, &mut names, command);
        pen = next;
        if let Outcome::Emitted(emission) = outcome {
            ends.extend(
                emission
                    .points
                    .iter()
                    .filter(|p| p.role == PointRole::Endpoint)
                    .map(|p| p.position),
            );
        }
    }
    ends
}

/// Convert one path's commands into point declarations and a path chain.
///
/// Unsupported commands are reported and skipped. A non-finite coordinate,
/// written or resolved, or a path that ends up with no points, fails the
/// whole path.
pub fn convert_path(
    id: &str,
    commands: &[PathCommand],
    scaling: &ScalingSpec,
    options: &ConvertOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<PathCode, ConvertError> {
    let path_id = sanitize(id);
    let mut names = NameAllocator::new(id);
    let mut pen = PenState::new();
    let mut emitter = Emitter::new(&path_id, scaling, options);

    for (index, command) in commands.iter().enumerate() {
        if !command.is_finite() {
            return Err(ConvertError::NonFiniteCoordinate {
                path: path_id,
                index,
                command: command.to_string(),
            });
        }

        let (next, outcome) = step(pen, &mut names, command);
        pen = next;
        match outcome {
            // Finite offsets can still resolve past f64::MAX
            Outcome::Emitted(emission) if emission.points.iter().any(|p| !p.position.is_finite()) => {
                return Err(ConvertError::NonFiniteCoordinate {
                    path: path_id,
                    index,
                    command: command.to_string(),
                });
            }
            Outcome::Emitted(emission) => emitter.push(command, emission),
            Outcome::Skipped(skip) => sink.report(skip.into_diagnostic(&path_id, index)),
        }
    }

    if emitter.is_empty() {
        return Err(ConvertError::EmptyPath { path: path_id });
    }

    crate::log::debug!(path = %path_id, "converted path");
    Ok(emitter.finish())
}
