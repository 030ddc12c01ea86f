//! Identifier sanitizing and point name allocation

/// Turn an externally supplied id into a bare identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, and a leading digit
/// gets a `_` prefix: `2panel-front` becomes `_2panel_front`.
pub fn sanitize(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 1);
    for c in id.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Name of the point introduced by command number `counter` (1-based).
pub fn allocate(element_id: &str, counter: u32) -> String {
    format!("{}_p{}", sanitize(element_id), counter)
}

/// Names of the three points a curve introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveNames {
    pub endpoint: String,
    pub control1: String,
    pub control2: String,
}

/// Names for a curve: one counter value shared by all three points.
pub fn allocate_curve_triple(element_id: &str, counter: u32) -> CurveNames {
    let base = allocate(element_id, counter);
    CurveNames {
        endpoint: format!("{base}_ep"),
        control1: format!("{base}_cp1"),
        control2: format!("{base}_cp2"),
    }
}

/// Per-path name allocator.
///
/// The counter advances once per point-introducing command, so a curve uses
/// a single number for its three points.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    element_id: String,
    counter: u32,
}

impl NameAllocator {
    pub fn new(element_id: &str) -> Self {
        Self {
            element_id: sanitize(element_id),
            counter: 1,
        }
    }

    /// Name for a command that introduces one point.
    pub fn next_point(&mut self) -> String {
        let name = allocate(&self.element_id, self.counter);
        self.counter += 1;
        name
    }

    /// Names for a curve command.
    pub fn next_curve(&mut self) -> CurveNames {
        let names = allocate_curve_triple(&self.element_id, self.counter);
        self.counter += 1;
        names
    }
}
