//! Parse pest pairs into path commands

use glam::DVec2;
use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::command::{Coords, PathCommand};
use crate::errors::PathDataError;
use crate::{PathDataParser, Rule};

const SOURCE_NAME: &str = "<path data>";

/// Decode the contents of a `d` attribute into path commands.
///
/// Implicit repetition is expanded: `M 0 0 10 10` becomes a move followed by
/// a line, `c` with twelve operands becomes two curves.
pub fn parse_path_data(source: &str) -> Result<Vec<PathCommand>, PathDataError> {
    let pairs = PathDataParser::parse(Rule::path_data, source).map_err(|e| {
        let span: SourceSpan = match e.location {
            InputLocation::Pos(pos) => (pos, 0).into(),
            InputLocation::Span((start, end)) => (start, end - start).into(),
        };
        PathDataError::Syntax {
            message: e.variant.message().into_owned(),
            src: named_source(source),
            span,
        }
    })?;

    let mut commands = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::path_data {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::command {
                    parse_command(source, inner, &mut commands)?;
                }
            }
        }
    }

    crate::log::debug!(count = commands.len(), "decoded path data");
    Ok(commands)
}

fn named_source(source: &str) -> NamedSource<String> {
    NamedSource::new(SOURCE_NAME, source.to_string())
}

fn parse_command(
    source: &str,
    pair: Pair<Rule>,
    out: &mut Vec<PathCommand>,
) -> Result<(), PathDataError> {
    let span = pair.as_span();
    let command_span: SourceSpan = (span.start(), span.end() - span.start()).into();

    let mut letter = None;
    let mut operands = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::letter => letter = inner.as_str().chars().next(),
            Rule::number => operands.push(parse_number(source, inner)?),
            _ => {}
        }
    }
    let Some(letter) = letter else {
        return Err(PathDataError::Syntax {
            message: "expected a command letter".to_string(),
            src: named_source(source),
            span: command_span,
        });
    };

    let coords = if letter.is_ascii_uppercase() {
        Coords::Absolute
    } else {
        Coords::Relative
    };

    let arity = match letter.to_ascii_uppercase() {
        'Z' => 0,
        'H' | 'V' => 1,
        'M' | 'L' | 'T' => 2,
        'S' | 'Q' => 4,
        'C' => 6,
        'A' => 7,
        _ => unreachable!("grammar only admits path command letters"),
    };

    let well_formed = if arity == 0 {
        operands.is_empty()
    } else {
        !operands.is_empty() && operands.len() % arity == 0
    };
    if !well_formed {
        return Err(PathDataError::OperandCount {
            letter,
            got: operands.len(),
            expected: arity,
            src: named_source(source),
            span: command_span,
        });
    }

    if arity == 0 {
        out.push(PathCommand::Close { coords });
        return Ok(());
    }

    for (i, group) in operands.chunks(arity).enumerate() {
        let command = match letter.to_ascii_uppercase() {
            // Pairs after the first move are implicit lines in the same mode
            'M' if i == 0 => PathCommand::Move {
                coords,
                to: DVec2::new(group[0], group[1]),
            },
            'M' | 'L' => PathCommand::Line {
                coords,
                to: DVec2::new(group[0], group[1]),
            },
            'H' => PathCommand::Horizontal { coords, x: group[0] },
            'V' => PathCommand::Vertical { coords, y: group[0] },
            'C' => PathCommand::CubicCurve {
                coords,
                control1: DVec2::new(group[0], group[1]),
                control2: DVec2::new(group[2], group[3]),
                to: DVec2::new(group[4], group[5]),
            },
            _ => PathCommand::Unsupported {
                letter,
                operands: group.to_vec(),
            },
        };
        out.push(command);
    }

    Ok(())
}

fn parse_number(source: &str, pair: Pair<Rule>) -> Result<f64, PathDataError> {
    let text = pair.as_str();
    text.parse::<f64>().map_err(|_| {
        let span = pair.as_span();
        PathDataError::InvalidNumber {
            text: text.to_string(),
            src: named_source(source),
            span: (span.start(), span.end() - span.start()).into(),
        }
    })
}
