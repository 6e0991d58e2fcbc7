//! # growth-core - survey page interaction core
//!
//! Pure Rust logic behind the survey/quiz page. Nothing in this crate touches
//! the DOM; `growth-wasm` binds it to the browser.
//!
//! ## Module layout
//!
//! - [`answer`] - answer encodings and the single answer field
//! - [`slider`] - 1-D slider track geometry
//! - [`disc`] - 2-D disc selector geometry (drag clamp, click-to-jump, restore)
//! - [`choice`] - discrete choice selection and image hover assets
//! - [`navigation`] - previous/next submission rules
//! - [`question`] - question types and answer restore on page load
//! - [`manifest`] - video manifest and encoding selection
//! - [`progress`] - chapter completion tracking
//! - [`player`] - video playback and completion flow
//! - [`notice`] - user-visible notices
//! - [`config`] - widget and player constants
//! - [`error`] - error types

// ============================================================================
// Modules
// ============================================================================

pub mod answer;
pub mod choice;
pub mod config;
pub mod disc;
pub mod error;
pub mod manifest;
pub mod navigation;
pub mod notice;
pub mod player;
pub mod progress;
pub mod question;
pub mod slider;

// ============================================================================
// Re-exports
// ============================================================================

pub use answer::{AnswerField, AnswerValue, DiscPoint};
pub use choice::{Choice, ChoiceGroup, HoverChange, Selection};
pub use config::{PageConfig, PlayerConfig, WidgetConfig};
pub use disc::{DiscSelector, HandlePosition};
pub use error::{AnswerParseError, ConfigError, NavigationError, TransportError};
pub use manifest::{VideoManifest, VideoSource};
pub use navigation::{Direction, Submission};
pub use notice::Notice;
pub use player::{PageView, PlaybackEngine, Transition, VideoFlow, VideoPhase, VideoTransport};
pub use progress::{Chapter, ChapterProgress, CompletionOutcome};
pub use question::{QuestionType, Restore};
pub use slider::SliderTrack;
