//! Error types with rich diagnostics using miette
//!
//! Conversion never aborts a scope: everything the converter finds wrong is
//! reported as a [`ConvertError`] through a caller-owned [`DiagnosticSink`]
//! and the offending command, reference or path is skipped.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Path Data Errors
// ============================================================================

/// Errors that occur while decoding SVG path data
#[derive(Error, Diagnostic, Debug)]
pub enum PathDataError {
    #[error("invalid path data: {message}")]
    #[diagnostic(code(sewpath::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(sewpath::parse::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("wrong operand count for '{letter}': got {got}, expected a multiple of {expected}")]
    #[diagnostic(code(sewpath::parse::operand_count))]
    OperandCount {
        letter: char,
        got: usize,
        expected: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this command")]
        span: SourceSpan,
    },
}

// ============================================================================
// Conversion Diagnostics
// ============================================================================

/// Everything the converter can report while turning paths into code
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("path {path}: unsupported command '{letter}' at index {index}, skipped")]
    #[diagnostic(
        code(sewpath::convert::unsupported_command),
        severity(Warning),
        help("only M, L, H, V, C and Z (and their relative forms) are converted")
    )]
    UnsupportedCommand {
        path: String,
        letter: char,
        index: usize,
    },

    #[error("path {path}: close at index {index} has no start point, skipped")]
    #[diagnostic(code(sewpath::convert::close_without_start), severity(Warning))]
    CloseWithoutStart { path: String, index: usize },

    #[error("path {path}: command '{command}' at index {index} has a non-finite coordinate")]
    #[diagnostic(code(sewpath::convert::non_finite))]
    NonFiniteCoordinate {
        path: String,
        index: usize,
        command: String,
    },

    #[error("path {path}: no points to emit")]
    #[diagnostic(code(sewpath::convert::empty_path))]
    EmptyPath { path: String },

    #[error("scope {scope}: both uniform and per-axis measurement labels present, scaling disabled")]
    #[diagnostic(
        code(sewpath::scaling::conflicting_modes),
        help("use either `measurement:` or `measurement-x:`/`measurement-y:` within one part")
    )]
    ConflictingScalingModes { scope: String },

    #[error("scope {scope}: reference {ignored} for {axis} ignored, {kept} already calibrates it")]
    #[diagnostic(code(sewpath::scaling::duplicate_reference), severity(Warning))]
    DuplicateReference {
        scope: String,
        axis: &'static str,
        kept: String,
        ignored: String,
    },

    #[error("reference path {path} has {endpoints} endpoints, expected exactly 2")]
    #[diagnostic(code(sewpath::scaling::invalid_reference), severity(Warning))]
    InvalidReference { path: String, endpoints: usize },

    #[error("reference path {path} has zero length at the output precision")]
    #[diagnostic(
        code(sewpath::scaling::zero_length_reference),
        severity(Warning),
        help("lengthen the reference path or raise the precision")
    )]
    ZeroLengthReference { path: String },

    #[error("reference path {path} has no usable length")]
    #[diagnostic(code(sewpath::scaling::non_finite_reference), severity(Warning))]
    NonFiniteReference {
        path: String,
        #[source]
        error: NumericError,
    },
}

// ============================================================================
// Diagnostic Sinks
// ============================================================================

/// Receiver for conversion diagnostics, owned by the caller.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: ConvertError);
}

/// Collects every diagnostic in order.
impl DiagnosticSink for Vec<ConvertError> {
    fn report(&mut self, diagnostic: ConvertError) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to the log and otherwise drops them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: ConvertError) {
        match diagnostic.severity() {
            Some(miette::Severity::Warning) | Some(miette::Severity::Advice) => {
                crate::log::warn!("{}", diagnostic);
            }
            _ => {
                crate::log::error!("{}", diagnostic);
            }
        }
    }
}
