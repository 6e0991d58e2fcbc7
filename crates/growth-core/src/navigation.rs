use crate::answer::AnswerField;
use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Value of the hidden `direction` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Previous => "previous",
            Direction::Next => "next",
        }
    }

    pub const fn requires_answer(self) -> bool {
        matches!(self, Direction::Next)
    }
}

/// Form fields ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub direction: Direction,
    pub answer: String,
}

/// Moving forward needs an answer; moving back never does.
pub fn submit(direction: Direction, answer: &AnswerField) -> Result<Submission, NavigationError> {
    if direction.requires_answer() && answer.is_empty() {
        tracing::debug!(direction = direction.as_str(), "submission blocked: no answer");
        return Err(NavigationError::AnswerRequired);
    }

    Ok(Submission {
        direction,
        answer: answer.encoded(),
    })
}
