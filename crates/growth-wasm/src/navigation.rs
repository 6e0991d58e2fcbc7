use web_sys::{HtmlFormElement, HtmlInputElement};

use growth_core::navigation::{self, Direction};
use growth_core::{AnswerField, Notice};

use crate::dom::{by_id, AnswerSink};
use crate::notice;

/// Sets `#direction` and posts `#questionForm`, unless `next` is missing
/// an answer.
pub fn go(direction: Direction, answer: Option<&AnswerSink>) {
    let field = answer.map(AnswerSink::field).unwrap_or_else(AnswerField::new);

    let submission = match navigation::submit(direction, &field) {
        Ok(submission) => submission,
        Err(err) => {
            notice::show(&Notice::from(err));
            return;
        }
    };

    if let Some(input) = by_id::<HtmlInputElement>("direction") {
        input.set_value(submission.direction.as_str());
    }
    if let Some(input) = by_id::<HtmlInputElement>("answerField") {
        input.set_value(&submission.answer);
    }

    match by_id::<HtmlFormElement>("questionForm") {
        Some(form) => {
            if let Err(err) = form.submit() {
                tracing::error!(error = ?err, "form submission failed");
            }
        }
        None => tracing::warn!("no #questionForm on this page"),
    }
}
