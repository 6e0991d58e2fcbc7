//! Video playback and completion flow against in-memory collaborators.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use futures::executor::block_on;

use growth_core::player::Surface;
use growth_core::{
    Chapter, ChapterProgress, Notice, PageView, PlaybackEngine, PlayerConfig, Transition,
    TransportError, VideoFlow, VideoManifest, VideoPhase, VideoSource, VideoTransport,
};

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct FakeTransport {
    manifests: HashMap<String, Result<Option<VideoManifest>, TransportError>>,
    report_error: Option<TransportError>,
    reported: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl VideoTransport for FakeTransport {
    async fn fetch_manifest(&self, video_id: &str) -> Result<Option<VideoManifest>, TransportError> {
        self.manifests
            .get(video_id)
            .cloned()
            .unwrap_or(Err(TransportError::Status(404)))
    }

    async fn report_completion(&self, video_id: &str) -> Result<(), TransportError> {
        self.reported.borrow_mut().push(video_id.to_string());
        match &self.report_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

struct FakeEngine {
    supported: Vec<&'static str>,
    started: RefCell<Vec<String>>,
    paused: RefCell<u32>,
}

impl FakeEngine {
    fn supporting(supported: Vec<&'static str>) -> Self {
        Self {
            supported,
            started: RefCell::new(Vec::new()),
            paused: RefCell::new(0),
        }
    }
}

impl PlaybackEngine for FakeEngine {
    fn can_play_type(&self, mime_type: &str) -> bool {
        self.supported.contains(&mime_type)
    }

    fn start(&self, src: &str) {
        self.started.borrow_mut().push(src.to_string());
    }

    fn pause(&self) {
        *self.paused.borrow_mut() += 1;
    }
}

#[derive(Default)]
struct FakeView {
    notices: RefCell<Vec<String>>,
    completed: RefCell<Vec<String>>,
    progress: RefCell<Vec<String>>,
    transitions: RefCell<Vec<Transition>>,
    navigations: RefCell<u32>,
}

#[async_trait(?Send)]
impl PageView for FakeView {
    fn show_notice(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.to_string());
    }

    fn mark_completed(&self, video_id: &str) {
        self.completed.borrow_mut().push(video_id.to_string());
    }

    fn render_progress(&self, progress: &ChapterProgress) {
        self.progress.borrow_mut().push(progress.label());
    }

    async fn run_transition(&self, transition: &Transition) {
        self.transitions.borrow_mut().push(transition.clone());
    }

    fn navigate_completed(&self) {
        *self.navigations.borrow_mut() += 1;
    }
}

fn manifest(id: &str, types: &[&str]) -> VideoManifest {
    VideoManifest {
        id: id.to_string(),
        title: format!("Video {id}"),
        urls: types
            .iter()
            .enumerate()
            .map(|(i, t)| VideoSource {
                mime_type: t.to_string(),
                src: format!("/media/{id}-{i}"),
            })
            .collect(),
    }
}

fn flow_with(
    transport: FakeTransport,
    chapter: Chapter,
) -> VideoFlow<FakeTransport, FakeEngine, FakeView> {
    VideoFlow::new(
        transport,
        FakeEngine::supporting(vec!["video/mp4"]),
        FakeView::default(),
        chapter,
        PlayerConfig::default(),
    )
}

fn transport_serving(manifests: Vec<VideoManifest>) -> FakeTransport {
    FakeTransport {
        manifests: manifests
            .into_iter()
            .map(|m| (m.id.clone(), Ok(Some(m))))
            .collect(),
        ..Default::default()
    }
}

// ============================================================================
// Playback
// ============================================================================

#[test]
fn unsupported_manifest_is_refused_with_notice() {
    let transport = transport_serving(vec![manifest("v1", &["video/x-unsupported"])]);
    let flow = flow_with(transport, Chapter::new([("v1", false)]));

    let phase = block_on(flow.play("v1"));

    assert_eq!(phase, VideoPhase::Idle);
    assert!(flow.engine().started.borrow().is_empty());
    assert!(flow.view().transitions.borrow().is_empty());
    assert_eq!(
        flow.view().notices.borrow().as_slice(),
        [Notice::UnsupportedFormat.to_string()]
    );
}

#[test]
fn supported_manifest_starts_playback_and_enters_player() {
    let transport = transport_serving(vec![manifest("v1", &["video/webm", "video/mp4"])]);
    let flow = flow_with(transport, Chapter::new([("v1", false)]));

    let phase = block_on(flow.play("v1"));

    assert_eq!(phase, VideoPhase::Playing);
    assert_eq!(flow.engine().started.borrow().as_slice(), ["/media/v1-1"]);
    let transitions = flow.view().transitions.borrow();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].fade_in.target, Surface::Player);
    assert!(flow.view().notices.borrow().is_empty());
}

#[test]
fn null_manifest_returns_to_idle() {
    let mut transport = FakeTransport::default();
    transport.manifests.insert("v1".to_string(), Ok(None));
    let flow = flow_with(transport, Chapter::new([("v1", false)]));

    assert_eq!(block_on(flow.play("v1")), VideoPhase::Idle);
    assert_eq!(
        flow.view().notices.borrow().as_slice(),
        [Notice::VideoUnavailable.to_string()]
    );
    let phases: Vec<_> = flow.history().iter().map(|t| t.to).collect();
    assert_eq!(
        phases,
        vec![VideoPhase::Fetching, VideoPhase::FetchFailed, VideoPhase::Idle]
    );
}

#[test]
fn transport_failure_is_reported_without_retry() {
    let flow = flow_with(FakeTransport::default(), Chapter::new([("v1", false)]));

    assert_eq!(block_on(flow.play("v1")), VideoPhase::Idle);
    let notices = flow.view().notices.borrow();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("Could not load video due to HTTP 404."));
}

#[test]
fn ended_without_playing_video_is_ignored() {
    let flow = flow_with(FakeTransport::default(), Chapter::new([("v1", false)]));
    assert!(block_on(flow.on_ended()).is_none());
    assert!(flow.view().notices.borrow().is_empty());
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn completion_updates_progress_and_reports() {
    let transport = transport_serving(vec![manifest("v1", &["video/mp4"])]);
    let flow = flow_with(transport, Chapter::new([("v1", false), ("v2", false), ("v3", true)]));

    block_on(flow.play("v1"));
    let outcome = block_on(flow.on_ended()).unwrap();

    assert!(outcome.newly_completed());
    assert!(!outcome.finished_chapter());
    assert_eq!(flow.phase(), VideoPhase::Completed);
    assert_eq!(flow.view().completed.borrow().as_slice(), ["v1"]);
    assert_eq!(flow.view().progress.borrow().as_slice(), ["66%"]);
    assert_eq!(*flow.engine().paused.borrow(), 1);
    assert_eq!(flow.view().notices.borrow().as_slice(), ["You finished \u{201C}Video v1.\u{201D}"]);
    assert_eq!(*flow.view().navigations.borrow(), 0);
    assert!(flow.current_video().is_none());

    let transitions = flow.view().transitions.borrow();
    assert_eq!(transitions.last().unwrap().fade_in.target, Surface::Content);
}

#[test]
fn last_video_completes_chapter_and_navigates() {
    let transport = transport_serving(vec![manifest("v2", &["video/mp4"])]);
    let flow = flow_with(transport, Chapter::new([("v1", true), ("v2", false)]));

    block_on(flow.play("v2"));
    let outcome = block_on(flow.on_ended()).unwrap();

    assert!(outcome.finished_chapter());
    assert_eq!(*flow.view().navigations.borrow(), 1);
    assert_eq!(
        flow.view().notices.borrow().last().unwrap(),
        &Notice::ChapterComplete.to_string()
    );
}

#[test]
fn rewatching_completed_video_does_not_recount() {
    let transport = transport_serving(vec![manifest("v2", &["video/mp4"])]);
    let flow = flow_with(transport, Chapter::new([("v1", true), ("v2", false)]));

    block_on(flow.play("v2"));
    block_on(flow.on_ended());
    block_on(flow.play("v2"));
    let outcome = block_on(flow.on_ended()).unwrap();

    assert!(!outcome.newly_completed());
    assert!(!outcome.finished_chapter());
    assert_eq!(flow.progress(), ChapterProgress { completed: 2, total: 2 });
    assert_eq!(*flow.view().navigations.borrow(), 1);
}

#[test]
fn duplicate_ended_signal_is_ignored() {
    let transport = transport_serving(vec![manifest("v1", &["video/mp4"])]);
    let flow = flow_with(transport, Chapter::new([("v1", false)]));

    block_on(flow.play("v1"));
    assert!(block_on(flow.on_ended()).is_some());
    assert!(block_on(flow.on_ended()).is_none());
    assert_eq!(flow.view().completed.borrow().len(), 1);
}

#[test]
fn failed_report_keeps_local_completion() {
    let mut transport = transport_serving(vec![manifest("v1", &["video/mp4"])]);
    transport.report_error = Some(TransportError::Network("error".to_string()));
    let flow = flow_with(transport, Chapter::new([("v1", false), ("v2", false)]));

    block_on(flow.play("v1"));
    block_on(flow.on_ended());

    assert_eq!(flow.phase(), VideoPhase::ReportFailed);
    assert_eq!(flow.progress().completed, 1);
    let notices = flow.view().notices.borrow();
    assert!(notices
        .last()
        .unwrap()
        .starts_with("Could not record video completion due to error."));
}

// ============================================================================
// Switching videos
// ============================================================================

#[test]
fn failed_switch_keeps_playing_video_completable() {
    let transport = transport_serving(vec![manifest("v1", &["video/mp4"])]);
    let flow = flow_with(transport, Chapter::new([("v1", false), ("v2", false)]));

    block_on(flow.play("v1"));
    assert_eq!(block_on(flow.play("v2")), VideoPhase::Playing);
    assert_eq!(flow.current_video().unwrap().id, "v1");

    let outcome = block_on(flow.on_ended()).unwrap();

    assert!(outcome.newly_completed());
    assert_eq!(flow.progress(), ChapterProgress { completed: 1, total: 2 });
    assert_eq!(flow.view().completed.borrow().as_slice(), ["v1"]);
    assert_eq!(flow.transport().reported.borrow().as_slice(), ["v1"]);
    assert_eq!(flow.phase(), VideoPhase::Completed);
}

#[test]
fn unsupported_switch_keeps_playing_video() {
    let transport = transport_serving(vec![
        manifest("v1", &["video/mp4"]),
        manifest("v2", &["video/x-unsupported"]),
    ]);
    let flow = flow_with(transport, Chapter::new([("v1", false), ("v2", false)]));

    block_on(flow.play("v1"));
    assert_eq!(block_on(flow.play("v2")), VideoPhase::Playing);
    assert_eq!(flow.engine().started.borrow().as_slice(), ["/media/v1-0"]);

    assert!(block_on(flow.on_ended()).is_some());
    assert_eq!(flow.view().completed.borrow().as_slice(), ["v1"]);
}

#[test]
fn successful_switch_hands_ended_to_new_video() {
    let transport = transport_serving(vec![
        manifest("v1", &["video/mp4"]),
        manifest("v2", &["video/mp4"]),
    ]);
    let flow = flow_with(transport, Chapter::new([("v1", false), ("v2", false)]));

    block_on(flow.play("v1"));
    block_on(flow.play("v2"));
    block_on(flow.on_ended());

    assert_eq!(flow.view().completed.borrow().as_slice(), ["v2"]);
    assert_eq!(flow.progress().completed, 1);
}
