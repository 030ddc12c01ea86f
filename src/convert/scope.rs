//! Scope assembly: calibrate once, then convert every path in order.

use crate::command::PathCommand;
use crate::errors::{DiagnosticSink, PathDataError};
use crate::parse::parse_path_data;

use super::defaults::{DESIGN_SCOPE, PART_LABEL_PREFIX, SELECTION_SCOPE};
use super::interpret::convert_path;
use super::names::sanitize;
use super::scaling::{Reference, ReferenceLabel, ScalingSpec};
use super::types::Part;
use super::ConvertOptions;

/// A drawable path as handed over by document traversal
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    /// Stable element id (not yet sanitized)
    pub id: String,
    /// Editor label, if the element has one
    pub label: Option<String>,
    pub commands: Vec<PathCommand>,
}

impl PathElement {
    pub fn new(id: impl Into<String>, commands: Vec<PathCommand>) -> Self {
        Self {
            id: id.into(),
            label: None,
            commands,
        }
    }

    /// Build an element from the raw `d` attribute.
    pub fn from_path_data(id: impl Into<String>, d: &str) -> Result<Self, PathDataError> {
        Ok(Self::new(id, parse_path_data(d)?))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The reference label on this element, if it has a well-formed one.
    pub fn reference_label(&self) -> Option<ReferenceLabel> {
        self.label.as_deref().and_then(ReferenceLabel::parse)
    }
}

/// What a scope covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    /// The whole design
    Design,
    /// A group/layer labeled `part:<name>`
    Part(String),
    /// An explicit selection of elements
    Selection,
}

impl ScopeKind {
    /// Scope for a group or layer label: `part:<name>` names a part, anything
    /// else (including no label, or an empty name) is the design.
    pub fn from_group_label(label: Option<&str>) -> ScopeKind {
        label
            .and_then(|l| l.trim().strip_prefix(PART_LABEL_PREFIX))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| ScopeKind::Part(name.to_string()))
            .unwrap_or(ScopeKind::Design)
    }

    /// Sanitized scope name used in generated code and diagnostics.
    pub fn name(&self) -> String {
        match self {
            ScopeKind::Design => DESIGN_SCOPE.to_string(),
            ScopeKind::Part(name) => sanitize(name),
            ScopeKind::Selection => SELECTION_SCOPE.to_string(),
        }
    }
}

/// An independently converted unit
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Elements in document order
    pub elements: Vec<PathElement>,
}

impl Scope {
    pub fn new(kind: ScopeKind, elements: Vec<PathElement>) -> Self {
        Self { kind, elements }
    }

    /// Convert the scope.
    ///
    /// Reference-labeled elements calibrate the scope and are not emitted.
    /// Every other element is converted with fresh pen state, in order; a
    /// path that fails is reported and left out.
    pub fn assemble(&self, options: &ConvertOptions, sink: &mut dyn DiagnosticSink) -> Part {
        let name = self.kind.name();

        let labeled: Vec<(&PathElement, Option<ReferenceLabel>)> = self
            .elements
            .iter()
            .map(|element| (element, element.reference_label()))
            .collect();

        let references: Vec<Reference<'_>> = labeled
            .iter()
            .filter_map(|(element, label)| {
                label.as_ref().map(|label| Reference {
                    id: &element.id,
                    label,
                    commands: &element.commands,
                })
            })
            .collect();
        let scaling = ScalingSpec::build(&name, &references, options.precision, sink);

        let mut paths = Vec::new();
        for (element, label) in &labeled {
            if label.is_some() {
                continue;
            }
            match convert_path(&element.id, &element.commands, &scaling, options, sink) {
                Ok(code) => paths.push(code),
                Err(err) => {
                    crate::log::warn!(scope = %name, path = %element.id, "skipping path: {}", err);
                    sink.report(err);
                }
            }
        }

        crate::log::debug!(scope = %name, paths = paths.len(), "assembled scope");
        Part {
            references: scaling.references(),
            name,
            paths,
        }
    }
}
