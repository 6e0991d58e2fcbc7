use std::cell::RefCell;

use crate::config::PlayerConfig;
use crate::manifest::VideoManifest;
use crate::notice::Notice;
use crate::progress::{Chapter, ChapterProgress, CompletionOutcome};

use super::state::{PhaseTransition, PlaybackStateMachine, VideoPhase};
use super::{PageView, PlaybackEngine, Transition, VideoTransport};

/// Playback and completion flow for one chapter page.
///
/// Methods take `&self` and never hold a `RefCell` borrow across an
/// `.await`, so the flow can be shared through an `Rc` between event
/// handlers on the browser's single thread.
pub struct VideoFlow<T, P, V> {
    transport: T,
    engine: P,
    view: V,
    config: PlayerConfig,
    chapter: RefCell<Chapter>,
    state: RefCell<PlaybackStateMachine>,
    current: RefCell<Option<VideoManifest>>,
}

impl<T, P, V> VideoFlow<T, P, V>
where
    T: VideoTransport,
    P: PlaybackEngine,
    V: PageView,
{
    pub fn new(transport: T, engine: P, view: V, chapter: Chapter, config: PlayerConfig) -> Self {
        Self {
            transport,
            engine,
            view,
            config,
            chapter: RefCell::new(chapter),
            state: RefCell::new(PlaybackStateMachine::new()),
            current: RefCell::new(None),
        }
    }

    pub fn phase(&self) -> VideoPhase {
        self.state.borrow().phase()
    }

    pub fn history(&self) -> Vec<PhaseTransition> {
        self.state.borrow().history().to_vec()
    }

    pub fn progress(&self) -> ChapterProgress {
        self.chapter.borrow().progress()
    }

    pub fn current_video(&self) -> Option<VideoManifest> {
        self.current.borrow().clone()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn engine(&self) -> &P {
        &self.engine
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn advance(&self, phase: VideoPhase, video_id: &str) -> bool {
        match self.state.borrow_mut().transition_to(phase, video_id) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(video_id, error = %err, "ignoring video event");
                false
            }
        }
    }

    /// Fetches the manifest for `video_id` and starts playback with the
    /// first supported encoding. Failures end in a notice and `Idle`, or
    /// back in `Playing` when another video is still on screen.
    pub async fn play(&self, video_id: &str) -> VideoPhase {
        if !self.advance(VideoPhase::Fetching, video_id) {
            return self.phase();
        }

        let manifest = match self.transport.fetch_manifest(video_id).await {
            Ok(Some(manifest)) => manifest,
            Ok(None) => {
                tracing::warn!(video_id, "server returned no manifest");
                return self.fail_fetch(video_id, Notice::VideoUnavailable);
            }
            Err(err) => {
                tracing::warn!(video_id, error = %err, "manifest request failed");
                return self.fail_fetch(video_id, Notice::LoadFailed(err));
            }
        };

        self.advance(VideoPhase::Ready, video_id);

        let src = match manifest.select_source(|t| self.engine.can_play_type(t)) {
            Some(source) => source.src.clone(),
            None => {
                tracing::warn!(
                    video_id,
                    candidates = manifest.urls.len(),
                    "no playable encoding"
                );
                self.view.show_notice(&Notice::UnsupportedFormat);
                self.advance(self.resting_phase(), video_id);
                return self.phase();
            }
        };

        tracing::info!(video_id, %src, "starting playback");
        self.engine.start(&src);
        *self.current.borrow_mut() = Some(manifest);
        self.advance(VideoPhase::Playing, video_id);

        self.view
            .run_transition(&Transition::enter_player(&self.config))
            .await;

        self.phase()
    }

    fn fail_fetch(&self, video_id: &str, notice: Notice) -> VideoPhase {
        self.advance(VideoPhase::FetchFailed, video_id);
        self.view.show_notice(&notice);
        self.advance(self.resting_phase(), video_id);
        self.phase()
    }

    /// Where a refused request leaves the flow: a video that was already
    /// playing keeps playing and still owns the next `ended` signal.
    fn resting_phase(&self) -> VideoPhase {
        if self.current.borrow().is_some() {
            VideoPhase::Playing
        } else {
            VideoPhase::Idle
        }
    }

    /// Handles the player's end-of-stream signal. Returns `None` when no
    /// video is playing.
    ///
    /// Local completion is applied before the server is told; a failed
    /// report only produces a notice.
    pub async fn on_ended(&self) -> Option<CompletionOutcome> {
        let manifest = self.current.borrow().clone()?;
        let video_id = manifest.id.as_str();

        if !self.advance(VideoPhase::Ended, video_id) {
            return None;
        }

        self.view.show_notice(&Notice::VideoFinished {
            title: manifest.title.clone(),
        });
        self.view.mark_completed(video_id);

        let outcome = self.chapter.borrow_mut().mark_completed(video_id);
        tracing::info!(
            video_id,
            completed = outcome.after.completed,
            total = outcome.after.total,
            percent = outcome.after.percent(),
            "video completed"
        );
        self.view.render_progress(&outcome.after);

        self.engine.pause();
        self.advance(VideoPhase::ReportingCompletion, video_id);

        let exit = Transition::exit_player(&self.config);
        let ((), report) = futures::join!(
            self.view.run_transition(&exit),
            self.transport.report_completion(video_id)
        );

        match report {
            Ok(()) => {
                self.advance(VideoPhase::Completed, video_id);
            }
            Err(err) => {
                tracing::warn!(video_id, error = %err, "completion report failed");
                self.view.show_notice(&Notice::ReportFailed(err));
                self.advance(VideoPhase::ReportFailed, video_id);
            }
        }

        *self.current.borrow_mut() = None;

        if outcome.finished_chapter() {
            tracing::info!("chapter complete");
            self.view.show_notice(&Notice::ChapterComplete);
            self.view.navigate_completed();
        }

        Some(outcome)
    }
}
