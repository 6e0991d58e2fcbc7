use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnswerParseError;

/// A normalized disc answer. `y` is positive upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscPoint {
    pub x: f64,
    pub y: f64,
}

impl DiscPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl fmt::Display for DiscPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", format_number(self.x), format_number(self.y))
    }
}

impl FromStr for DiscPoint {
    type Err = AnswerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| AnswerParseError::NotAPoint(s.to_string()))?;
        let x = parse_number(x).ok_or_else(|| AnswerParseError::InvalidNumber(x.to_string()))?;
        let y = parse_number(y).ok_or_else(|| AnswerParseError::InvalidNumber(y.to_string()))?;
        Ok(Self { x, y })
    }
}

/// One question's answer, in whichever encoding its widget produces.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Slider(f64),
    Point(DiscPoint),
    Choice(String),
}

impl AnswerValue {
    /// Serialized form written to the hidden answer field.
    pub fn encode(&self) -> String {
        match self {
            AnswerValue::Slider(value) => format_number(*value),
            AnswerValue::Point(point) => point.to_string(),
            AnswerValue::Choice(id) => id.clone(),
        }
    }

    /// Interprets a stored answer: a number is a slider value, a pair of
    /// numbers is a disc point, anything else is a choice id.
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        if let Some(value) = parse_number(raw) {
            return Some(AnswerValue::Slider(value));
        }
        if raw.contains(',') {
            if let Ok(point) = raw.parse::<DiscPoint>() {
                return Some(AnswerValue::Point(point));
            }
        }
        Some(AnswerValue::Choice(raw.to_string()))
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// The single answer slot of a question form. Every widget overwrites it
/// wholesale.
///
/// Until a widget sets a value the field holds the string the server
/// rendered, byte for byte, and submits it unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerField {
    stored: String,
    current: Option<AnswerValue>,
}

impl AnswerField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the field from the value the server rendered into the page.
    pub fn from_stored(raw: &str) -> Self {
        Self {
            stored: raw.to_string(),
            current: None,
        }
    }

    pub fn set(&mut self, value: AnswerValue) {
        tracing::debug!(answer = %value, "answer updated");
        self.current = Some(value);
    }

    pub fn clear(&mut self) {
        self.stored.clear();
        self.current = None;
    }

    /// The value a widget produced on this page, if any.
    pub fn value(&self) -> Option<&AnswerValue> {
        self.current.as_ref()
    }

    /// The server-rendered answer read as a typed value, for putting widget
    /// handles back where they were.
    pub fn restored(&self) -> Option<AnswerValue> {
        AnswerValue::decode(&self.stored)
    }

    pub fn is_empty(&self) -> bool {
        match &self.current {
            Some(value) => value.encode().is_empty(),
            None => self.stored.is_empty(),
        }
    }

    pub fn encoded(&self) -> String {
        match &self.current {
            Some(value) => value.encode(),
            None => self.stored.clone(),
        }
    }
}

/// Parses a finite decimal, ignoring surrounding whitespace.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Shortest round-trip decimal, with negative zero printed as `0`.
pub(crate) fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_encoding_uses_plain_decimals() {
        let point = DiscPoint::new(0.5, -0.0);
        assert_eq!(point.to_string(), "0.5,0");
        assert_eq!(AnswerValue::Point(DiscPoint::new(-1.0, 1.0)).encode(), "-1,1");
    }

    #[test]
    fn point_parse_rejects_non_points() {
        assert_eq!(
            "notAPoint".parse::<DiscPoint>(),
            Err(AnswerParseError::NotAPoint("notAPoint".to_string()))
        );
        assert_eq!(
            "0.5,abc".parse::<DiscPoint>(),
            Err(AnswerParseError::InvalidNumber("abc".to_string()))
        );
        assert_eq!("-0.5, 0.25".parse::<DiscPoint>(), Ok(DiscPoint::new(-0.5, 0.25)));
    }

    #[test]
    fn decode_picks_encoding_by_shape() {
        assert_eq!(AnswerValue::decode("0.75"), Some(AnswerValue::Slider(0.75)));
        assert_eq!(
            AnswerValue::decode("0.5,-0.5"),
            Some(AnswerValue::Point(DiscPoint::new(0.5, -0.5)))
        );
        assert_eq!(
            AnswerValue::decode("answer-3"),
            Some(AnswerValue::Choice("answer-3".to_string()))
        );
        assert_eq!(
            AnswerValue::decode("a,b"),
            Some(AnswerValue::Choice("a,b".to_string()))
        );
        assert_eq!(AnswerValue::decode(""), None);
    }

    #[test]
    fn field_is_overwritten_wholesale() {
        let mut field = AnswerField::new();
        assert!(field.is_empty());

        field.set(AnswerValue::Slider(0.25));
        field.set(AnswerValue::Choice("b".to_string()));
        assert_eq!(field.encoded(), "b");
        assert!(!field.is_empty());

        field.set(AnswerValue::Choice(String::new()));
        assert!(field.is_empty());
    }

    #[test]
    fn field_from_stored_value() {
        assert!(AnswerField::from_stored("").is_empty());
        assert_eq!(AnswerField::from_stored("0.1,0.2").encoded(), "0.1,0.2");
        assert_eq!(
            AnswerField::from_stored("0.1,0.2").restored(),
            Some(AnswerValue::Point(DiscPoint::new(0.1, 0.2)))
        );
    }

    #[test]
    fn stored_answer_is_submitted_verbatim() {
        for raw in ["007", "1.0", "0.50", " 3 ", "1e2", "0.50,-0.0"] {
            let field = AnswerField::from_stored(raw);
            assert_eq!(field.encoded(), raw);
            assert!(field.value().is_none());
        }
        assert_eq!(
            AnswerField::from_stored("007").restored(),
            Some(AnswerValue::Slider(7.0))
        );
    }

    #[test]
    fn whitespace_stored_answer_still_counts() {
        let field = AnswerField::from_stored("  ");
        assert!(!field.is_empty());
        assert_eq!(field.encoded(), "  ");
        assert_eq!(field.restored(), None);
    }

    #[test]
    fn widget_value_replaces_stored_answer() {
        let mut field = AnswerField::from_stored("007");
        field.set(AnswerValue::Slider(0.5));
        assert_eq!(field.encoded(), "0.5");

        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.restored(), None);
    }
}
