//! Pen state carried between the commands of one path.

use glam::DVec2;

/// The first point a path establishes. Close commands draw back to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StartRef {
    pub name: String,
    pub position: DVec2,
}

/// Where the pen is, and which named point it sits on.
///
/// A fresh value is created for every path; nothing here outlives it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PenState {
    /// Absolute pen position; relative operands are offsets from here
    pub position: DVec2,
    /// Name of the point under the pen, if any has been placed yet
    pub current: Option<String>,
    /// Start reference, recorded by the first point-producing command
    pub start: Option<StartRef>,
}

impl PenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pen after placing the named point at `position`.
    pub fn placed(self, name: &str, position: DVec2) -> PenState {
        let start = self.start.or_else(|| {
            Some(StartRef {
                name: name.to_string(),
                position,
            })
        });
        PenState {
            position,
            current: Some(name.to_string()),
            start,
        }
    }

    /// Pen after closing the path, with the name of the start point it
    /// returned to. Without a start point the pen is handed back unchanged.
    pub fn closed(self) -> Result<(PenState, String), PenState> {
        let Some(start) = self.start.clone() else {
            return Err(self);
        };
        let name = start.name.clone();
        let next = PenState {
            position: start.position,
            current: Some(name.clone()),
            start: Some(start),
        };
        Ok((next, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin_with_nothing_placed() {
        let pen = PenState::new();
        assert_eq!(pen.position, DVec2::ZERO);
        assert!(pen.current.is_none());
        assert!(pen.start.is_none());
    }

    #[test]
    fn first_placement_becomes_start() {
        let pen = PenState::new()
            .placed("a_p1", DVec2::new(1.0, 2.0))
            .placed("a_p2", DVec2::new(5.0, 2.0));
        assert_eq!(pen.current.as_deref(), Some("a_p2"));
        assert_eq!(
            pen.start,
            Some(StartRef {
                name: "a_p1".into(),
                position: DVec2::new(1.0, 2.0)
            })
        );
    }

    #[test]
    fn close_returns_to_start() {
        let pen = PenState::new()
            .placed("a_p1", DVec2::new(1.0, 2.0))
            .placed("a_p2", DVec2::new(5.0, 2.0))
            .closed()
            .unwrap();
        let (pen, start) = pen;
        assert_eq!(start, "a_p1");
        assert_eq!(pen.position, DVec2::new(1.0, 2.0));
        assert_eq!(pen.current.as_deref(), Some("a_p1"));
    }

    #[test]
    fn close_without_start_hands_pen_back() {
        assert_eq!(PenState::new().closed(), Err(PenState::new()));
    }
}
