//! Video chapter player.
//!
//! [`VideoFlow`] drives one video at a time through
//! `Idle -> Fetching -> Ready -> Playing -> Ended -> ReportingCompletion`
//! and talks to the outside world only through the three traits below, so
//! the browser bindings and the tests plug in their own implementations.

mod flow;
mod state;

pub use flow::VideoFlow;
pub use state::{PhaseTransition, PlaybackStateMachine, TransitionError, VideoPhase};

use async_trait::async_trait;

use crate::config::PlayerConfig;
use crate::error::TransportError;
use crate::manifest::VideoManifest;
use crate::notice::Notice;
use crate::progress::ChapterProgress;

/// Server endpoints under `<page>/videos/<id>.json`.
#[async_trait(?Send)]
pub trait VideoTransport {
    /// `Ok(None)` when the server answers `null`.
    async fn fetch_manifest(&self, video_id: &str) -> Result<Option<VideoManifest>, TransportError>;

    async fn report_completion(&self, video_id: &str) -> Result<(), TransportError>;
}

/// The media element.
pub trait PlaybackEngine {
    fn can_play_type(&self, mime_type: &str) -> bool;

    /// Assigns the source, loads it and starts playback.
    fn start(&self, src: &str);

    fn pause(&self);
}

/// Everything on the page the flow updates.
#[async_trait(?Send)]
pub trait PageView {
    fn show_notice(&self, notice: &Notice);

    fn mark_completed(&self, video_id: &str);

    fn render_progress(&self, progress: &ChapterProgress);

    /// Resolves once the last step of the transition has finished.
    async fn run_transition(&self, transition: &Transition);

    /// Leaves for the chapter's `completed` page.
    fn navigate_completed(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Content,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    pub target: Surface,
    pub duration_ms: u32,
}

/// Switch between the page and the full-screen player. `fade_out` and the
/// background animation start together; `fade_in` starts when the
/// background animation ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub fade_out: Fade,
    pub background: String,
    pub background_ms: u32,
    pub fade_in: Fade,
}

impl Transition {
    pub fn enter_player(config: &PlayerConfig) -> Self {
        Self {
            fade_out: Fade {
                target: Surface::Content,
                duration_ms: config.content_fade_ms,
            },
            background: config.player_background.clone(),
            background_ms: config.background_fade_ms,
            fade_in: Fade {
                target: Surface::Player,
                duration_ms: config.player_fade_ms,
            },
        }
    }

    pub fn exit_player(config: &PlayerConfig) -> Self {
        Self {
            fade_out: Fade {
                target: Surface::Player,
                duration_ms: config.content_fade_ms,
            },
            background: config.page_background.clone(),
            background_ms: config.background_fade_ms,
            fade_in: Fade {
                target: Surface::Content,
                duration_ms: config.player_fade_ms,
            },
        }
    }

    /// Time until the transition has settled.
    pub fn total_ms(&self) -> u32 {
        self.fade_out.duration_ms.max(self.background_ms) + self.fade_in.duration_ms
    }
}
