//! Drawing commands for a single path.
//!
//! These are the decoded form of an SVG `d` attribute: one record per
//! command, with operands exactly as written (relative operands are still
//! offsets at this stage).

use std::fmt;

use glam::DVec2;

/// Whether a command's operands are absolute coordinates or offsets from the pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coords {
    Absolute,
    Relative,
}

impl Coords {
    /// Resolve an operand against the pen position.
    pub fn resolve(self, pen: DVec2, operand: DVec2) -> DVec2 {
        match self {
            Coords::Absolute => operand,
            Coords::Relative => pen + operand,
        }
    }

    /// Resolve a single-axis operand against one pen coordinate.
    pub fn resolve_axis(self, pen: f64, operand: f64) -> f64 {
        match self {
            Coords::Absolute => operand,
            Coords::Relative => pen + operand,
        }
    }

    fn letter(self, upper: char) -> char {
        match self {
            Coords::Absolute => upper,
            Coords::Relative => upper.to_ascii_lowercase(),
        }
    }
}

/// A single path command
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    /// `M x y` / `m dx dy`
    Move { coords: Coords, to: DVec2 },
    /// `L x y` / `l dx dy`
    Line { coords: Coords, to: DVec2 },
    /// `H x` / `h dx`
    Horizontal { coords: Coords, x: f64 },
    /// `V y` / `v dy`
    Vertical { coords: Coords, y: f64 },
    /// `C x1 y1 x2 y2 x y` / `c ...`, all three pairs in the same mode
    CubicCurve {
        coords: Coords,
        control1: DVec2,
        control2: DVec2,
        to: DVec2,
    },
    /// `Z` / `z`; both return to the start point, the mode is only echoed
    Close { coords: Coords },
    /// A command letter outside the drawing grammar (`S`, `Q`, `T`, `A`),
    /// kept so it can be reported instead of silently dropped.
    Unsupported { letter: char, operands: Vec<f64> },
}

impl PathCommand {
    pub fn move_to(x: f64, y: f64) -> Self {
        PathCommand::Move {
            coords: Coords::Absolute,
            to: DVec2::new(x, y),
        }
    }

    pub fn move_by(dx: f64, dy: f64) -> Self {
        PathCommand::Move {
            coords: Coords::Relative,
            to: DVec2::new(dx, dy),
        }
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        PathCommand::Line {
            coords: Coords::Absolute,
            to: DVec2::new(x, y),
        }
    }

    pub fn close() -> Self {
        PathCommand::Close {
            coords: Coords::Absolute,
        }
    }

    pub fn line_by(dx: f64, dy: f64) -> Self {
        PathCommand::Line {
            coords: Coords::Relative,
            to: DVec2::new(dx, dy),
        }
    }

    /// Short name of the command kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PathCommand::Move { .. } => "move",
            PathCommand::Line { .. } => "line",
            PathCommand::Horizontal { .. } => "horizontal",
            PathCommand::Vertical { .. } => "vertical",
            PathCommand::CubicCurve { .. } => "curve",
            PathCommand::Close { .. } => "close",
            PathCommand::Unsupported { .. } => "unsupported",
        }
    }

    /// Source letter as it would appear in path data.
    pub fn letter(&self) -> char {
        match self {
            PathCommand::Move { coords, .. } => coords.letter('M'),
            PathCommand::Line { coords, .. } => coords.letter('L'),
            PathCommand::Horizontal { coords, .. } => coords.letter('H'),
            PathCommand::Vertical { coords, .. } => coords.letter('V'),
            PathCommand::CubicCurve { coords, .. } => coords.letter('C'),
            PathCommand::Close { coords } => coords.letter('Z'),
            PathCommand::Unsupported { letter, .. } => *letter,
        }
    }

    /// Operands in source order.
    pub fn operands(&self) -> Vec<f64> {
        match self {
            PathCommand::Move { to, .. } | PathCommand::Line { to, .. } => vec![to.x, to.y],
            PathCommand::Horizontal { x, .. } => vec![*x],
            PathCommand::Vertical { y, .. } => vec![*y],
            PathCommand::CubicCurve {
                control1,
                control2,
                to,
                ..
            } => vec![control1.x, control1.y, control2.x, control2.y, to.x, to.y],
            PathCommand::Close { .. } => Vec::new(),
            PathCommand::Unsupported { operands, .. } => operands.clone(),
        }
    }

    /// True if every operand is a finite number.
    pub fn is_finite(&self) -> bool {
        self.operands().iter().all(|v| v.is_finite())
    }
}

/// Renders the command as path data, e.g. `c 5 0 10 5 10 10`.
impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for operand in self.operands() {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_resolves_against_pen() {
        let pen = DVec2::new(3.0, 4.0);
        assert_eq!(
            Coords::Relative.resolve(pen, DVec2::new(1.0, -1.0)),
            DVec2::new(4.0, 3.0)
        );
        assert_eq!(
            Coords::Absolute.resolve(pen, DVec2::new(1.0, -1.0)),
            DVec2::new(1.0, -1.0)
        );
    }

    #[test]
    fn display_echoes_source_form() {
        let curve = PathCommand::CubicCurve {
            coords: Coords::Relative,
            control1: DVec2::new(5.0, 0.0),
            control2: DVec2::new(10.0, 5.0),
            to: DVec2::new(10.0, 10.0),
        };
        assert_eq!(curve.to_string(), "c 5 0 10 5 10 10");
        assert_eq!(PathCommand::move_to(1.5, -2.0).to_string(), "M 1.5 -2");
        assert_eq!(PathCommand::close().to_string(), "Z");
        assert_eq!(
            PathCommand::Close {
                coords: Coords::Relative
            }
            .to_string(),
            "z"
        );
        assert_eq!(
            PathCommand::Horizontal {
                coords: Coords::Relative,
                x: 7.0
            }
            .to_string(),
            "h 7"
        );
    }

    #[test]
    fn non_finite_operands_are_detected() {
        assert!(PathCommand::line_to(1.0, 2.0).is_finite());
        assert!(!PathCommand::line_to(f64::NAN, 2.0).is_finite());
        assert!(PathCommand::close().is_finite());
    }
}
