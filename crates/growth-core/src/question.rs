use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::answer::AnswerValue;
use crate::disc::{DiscSelector, HandlePosition};
use crate::slider::SliderTrack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Image,
    Slider,
    Quad,
    Circle,
}

impl QuestionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Image => "image",
            QuestionType::Slider => "slider",
            QuestionType::Quad => "quad",
            QuestionType::Circle => "circle",
        }
    }

    pub const fn uses_disc(self) -> bool {
        matches!(self, QuestionType::Quad | QuestionType::Circle)
    }

    pub const fn uses_choices(self) -> bool {
        matches!(self, QuestionType::Text | QuestionType::Image)
    }

    /// Whether `answer` is in the encoding this question type produces.
    pub fn accepts(self, answer: &AnswerValue) -> bool {
        match answer {
            AnswerValue::Slider(_) => self == QuestionType::Slider,
            AnswerValue::Point(_) => self.uses_disc(),
            AnswerValue::Choice(_) => self.uses_choices(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(QuestionType::Text),
            "image" => Ok(QuestionType::Image),
            "slider" => Ok(QuestionType::Slider),
            "quad" => Ok(QuestionType::Quad),
            "circle" => Ok(QuestionType::Circle),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Where a widget handle goes when the page reloads with a stored answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Restore {
    SliderLeft(f64),
    DiscHandle(HandlePosition),
}

/// Repositions whichever widget matches the stored answer's encoding.
/// Choice answers are restored by the server-rendered `selected` marker.
pub fn restore(
    answer: &AnswerValue,
    slider: Option<&SliderTrack>,
    disc: Option<&DiscSelector>,
) -> Option<Restore> {
    match answer {
        AnswerValue::Slider(value) => slider.map(|t| Restore::SliderLeft(t.position_for(*value))),
        AnswerValue::Point(point) => disc.map(|d| Restore::DiscHandle(d.position_for(*point))),
        AnswerValue::Choice(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::DiscPoint;
    use crate::config::WidgetConfig;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("CIRCLE".parse::<QuestionType>(), Ok(QuestionType::Circle));
        assert_eq!(" slider ".parse::<QuestionType>(), Ok(QuestionType::Slider));
        assert!("matrix".parse::<QuestionType>().is_err());
        assert_eq!(QuestionType::Quad.to_string(), "quad");
    }

    #[test]
    fn each_type_accepts_one_encoding() {
        let point = AnswerValue::Point(DiscPoint::new(0.0, 0.0));
        assert!(QuestionType::Circle.accepts(&point));
        assert!(QuestionType::Quad.accepts(&point));
        assert!(!QuestionType::Slider.accepts(&point));
        assert!(QuestionType::Slider.accepts(&AnswerValue::Slider(0.3)));
        assert!(QuestionType::Image.accepts(&AnswerValue::Choice("x".into())));
    }

    #[test]
    fn restore_targets_matching_widget() {
        let config = WidgetConfig::default();
        let track = SliderTrack::new(546.0, &config);
        let disc = DiscSelector::new(&config);

        assert_eq!(
            restore(&AnswerValue::Slider(0.75), Some(&track), Some(&disc)),
            Some(Restore::SliderLeft(125.0))
        );
        assert_eq!(
            restore(&AnswerValue::Point(DiscPoint::new(0.0, 1.0)), Some(&track), Some(&disc)),
            Some(Restore::DiscHandle(HandlePosition::new(125.0, 0.0)))
        );
        assert_eq!(restore(&AnswerValue::Slider(0.75), None, Some(&disc)), None);
        assert_eq!(restore(&AnswerValue::Choice("a".into()), Some(&track), None), None);
    }
}
