//! Convert drawn SVG paths into FreeSewing-style pattern code.
//!
//! Every path becomes a block of named point declarations plus one chained
//! `new Path()` statement. Paths are grouped into scopes (the design, a
//! `part:` layer, or a selection); a scope may carry `measurement:` reference
//! paths that make every emitted coordinate scale with body measurements.

use pest_derive::Parser;

pub mod command;
pub mod convert;
pub mod errors;
pub mod log;
pub mod parse;
pub mod types;

pub use command::{Coords, PathCommand};
pub use convert::{ConvertOptions, Part, PathCode, PathElement, Scope, ScopeKind};
pub use errors::{ConvertError, DiagnosticSink, LogSink, PathDataError};
pub use parse::parse_path_data;

#[derive(Parser)]
#[grammar = "pathdata.pest"]
pub struct PathDataParser;

/// Convert a single unscaled path given as raw `d` attribute text.
///
/// Skipped commands are logged; a syntax error or a path that produces no
/// code is returned as a diagnostic.
pub fn convert_path_data(id: &str, d: &str, options: &ConvertOptions) -> Result<PathCode, miette::Report> {
    let commands = parse_path_data(d)?;
    let scaling = convert::ScalingSpec::default();
    let code = convert::convert_path(id, &commands, &scaling, options, &mut LogSink)?;
    Ok(code)
}
