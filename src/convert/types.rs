//! Output model: named points, chain calls and per-path/per-part code

use std::collections::BTreeSet;

use glam::DVec2;

/// What a declared point is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    Endpoint,
    Control1,
    Control2,
}

/// A named point in absolute drawing coordinates (unrounded)
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub name: String,
    pub position: DVec2,
    pub role: PointRole,
}

impl Point {
    pub fn endpoint(name: impl Into<String>, position: DVec2) -> Self {
        Self {
            name: name.into(),
            position,
            role: PointRole::Endpoint,
        }
    }
}

/// One call in a path-construction chain, naming the points it uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainCall {
    Move(String),
    Line(String),
    Curve {
        control1: String,
        control2: String,
        to: String,
    },
}

/// Generated code for one path
#[derive(Debug, Clone, PartialEq)]
pub struct PathCode {
    /// Sanitized path identifier, used as `paths.<id>`
    pub id: String,
    /// Scale-factor assignments (zero to two lines)
    pub preamble: String,
    /// Point declarations
    pub points: String,
    /// The `paths.<id> = new Path()...` chain
    pub path: String,
    /// The declared points, in emission order
    pub declared: Vec<Point>,
}

impl PathCode {
    /// Preamble, point declarations, a blank line, then the chain.
    pub fn render(&self) -> String {
        format!("{}{}\n{}\n", self.preamble, self.points, self.path)
    }
}

/// Generated code for one scope
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Sanitized scope name
    pub name: String,
    /// Converted paths in document order
    pub paths: Vec<PathCode>,
    /// `measurements.*` / `options.*` names the scaling expressions use
    pub references: BTreeSet<String>,
}

impl Part {
    /// Every path's code, concatenated in document order.
    pub fn render(&self) -> String {
        self.paths.iter().map(PathCode::render).collect()
    }

    pub fn path(&self, id: &str) -> Option<&PathCode> {
        self.paths.iter().find(|p| p.id == id)
    }
}
