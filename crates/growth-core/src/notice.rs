use std::fmt;

use crate::error::{NavigationError, TransportError};

/// Text shown in the notice box. A new notice replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    AnswerRequired,
    VideoUnavailable,
    UnsupportedFormat,
    LoadFailed(TransportError),
    VideoFinished { title: String },
    ReportFailed(TransportError),
    ChapterComplete,
}

impl From<NavigationError> for Notice {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::AnswerRequired => Notice::AnswerRequired,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AnswerRequired => {
                f.write_str("Please select an answer before moving to the next question")
            }
            Notice::VideoUnavailable => f.write_str(
                "Unable to load the video at this time. Please check your internet connection \
                 and try again later. If the problem persists, please contact us.",
            ),
            Notice::UnsupportedFormat => f.write_str(
                "We could not find a video format that will work with your browser. \
                 Please try another browser or contact us.",
            ),
            Notice::LoadFailed(err) => write!(
                f,
                "Could not load video due to {err}. If the problem persists, please contact us."
            ),
            Notice::VideoFinished { title } => write!(f, "You finished \u{201C}{title}.\u{201D}"),
            Notice::ReportFailed(err) => write!(
                f,
                "Could not record video completion due to {err}. If the problem persists, \
                 please contact us."
            ),
            Notice::ChapterComplete => f.write_str("You've completed this chapter!"),
        }
    }
}
