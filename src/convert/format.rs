//! Fixed-precision number formatting for generated code

/// Format a coordinate with at most `precision` fractional digits.
///
/// Trailing zeros are trimmed, an empty fraction drops the decimal point and
/// negative zero prints as `0`, so `3.0` becomes `3` and `-0.00001` becomes
/// `0` at precision 4. Formatting the parsed output again gives the same text.
pub fn format_coord(value: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision, value);

    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    if text == "-0" {
        text.remove(0);
    }
    text
}
