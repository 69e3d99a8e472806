//! Length parsing.
//!
//! Permissive by contract: anything that is not a well-formed SVG length
//! becomes `(0.0, Unitless)` rather than an error.

use pest::Parser;
use pest_derive::Parser;

use crate::types::{LengthInput, LengthValue, UnitKind};

#[derive(Parser)]
#[grammar = "values.pest"]
pub(crate) struct ValueParser;

/// Parse a raw SVG length.
///
/// Absent, empty and malformed input all yield `LengthValue::ZERO`.
/// Percentages are normalized to a fraction (`"50%"` is `0.5`); viewport
/// units keep the raw number (`"50vw"` is `50.0`).
pub fn parse_length(value: LengthInput<'_>) -> LengthValue {
    match value {
        LengthInput::Absent => LengthValue::ZERO,
        LengthInput::Number(n) if n.is_finite() => LengthValue::new(n, UnitKind::Unitless),
        LengthInput::Number(n) => {
            crate::log::warn!(value = n, "non-finite length, using 0");
            LengthValue::ZERO
        }
        LengthInput::Text(text) => try_parse_length(text).unwrap_or_else(|| {
            if !text.trim().is_empty() {
                crate::log::debug!(text, "unparseable length, using 0");
            }
            LengthValue::ZERO
        }),
    }
}

/// Parse a length string, returning `None` when it is not a valid length.
///
/// Empty or whitespace-only input is `None` as well; `parse_length` is the
/// entry point that maps both cases to zero.
pub fn try_parse_length(text: &str) -> Option<LengthValue> {
    let pairs = ValueParser::parse(Rule::length, text).ok()?;

    let mut numeric = None;
    let mut unit = UnitKind::Unitless;
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::number => numeric = pair.as_str().parse::<f64>().ok(),
            Rule::unit => unit = UnitKind::from_suffix(pair.as_str())?,
            _ => {}
        }
    }

    let numeric = numeric.filter(|n| n.is_finite())?;
    let numeric = match unit {
        UnitKind::Percent => numeric / 100.0,
        _ => numeric,
    };
    Some(LengthValue::new(numeric, unit))
}
