//! Browser implementations of the video flow collaborators.

use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlVideoElement};

use growth_core::player::Surface;
use growth_core::{
    Chapter, ChapterProgress, Notice, PageView, PlaybackEngine, Transition, TransportError,
    VideoFlow, VideoManifest, VideoTransport,
};

use crate::animation::{animate_background, fade_in, fade_out};
use crate::dom::{self, query, query_all, set_style};
use crate::notice;

pub type DomFlow = VideoFlow<HttpTransport, HtmlPlayer, DomView>;

fn transport_error(err: gloo_net::Error) -> TransportError {
    match err {
        gloo_net::Error::SerdeError(err) => TransportError::Decode(err.to_string()),
        other => TransportError::Network(other.to_string()),
    }
}

/// Page URL without query or fragment; video endpoints hang off it.
fn page_url() -> Option<String> {
    let location = dom::window()?.location();
    let origin = location.origin().ok()?;
    let path = location.pathname().ok()?;
    Some(endpoint_base(&origin, &path))
}

fn endpoint_base(origin: &str, path: &str) -> String {
    format!("{origin}{}", path.trim_end_matches('/'))
}

pub struct HttpTransport {
    base: String,
}

impl HttpTransport {
    pub fn new(base: String) -> Self {
        Self { base }
    }

    fn video_url(&self, video_id: &str) -> String {
        format!("{}/videos/{video_id}.json", self.base)
    }
}

#[async_trait(?Send)]
impl VideoTransport for HttpTransport {
    async fn fetch_manifest(&self, video_id: &str) -> Result<Option<VideoManifest>, TransportError> {
        let response = Request::get(&self.video_url(video_id))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport_error)?;
        if !response.ok() {
            return Err(TransportError::Status(response.status()));
        }
        response
            .json::<Option<VideoManifest>>()
            .await
            .map_err(transport_error)
    }

    async fn report_completion(&self, video_id: &str) -> Result<(), TransportError> {
        let response = Request::post(&self.video_url(video_id))
            .header(
                "Content-Type",
                "application/x-www-form-urlencoded; charset=UTF-8",
            )
            .body("completed=true")
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        if !response.ok() {
            return Err(TransportError::Status(response.status()));
        }
        Ok(())
    }
}

pub struct HtmlPlayer {
    video: HtmlVideoElement,
}

impl PlaybackEngine for HtmlPlayer {
    fn can_play_type(&self, mime_type: &str) -> bool {
        !self.video.can_play_type(mime_type).is_empty()
    }

    fn start(&self, src: &str) {
        self.video.set_src(src);
        self.video.load();
        if let Err(err) = self.video.play() {
            tracing::warn!(error = ?err, "play() rejected");
        }
    }

    fn pause(&self) {
        let _ = self.video.pause();
    }
}

pub struct DomView {
    content: HtmlElement,
    player: HtmlElement,
    body: HtmlElement,
    base: String,
}

impl DomView {
    fn surface(&self, surface: Surface) -> &HtmlElement {
        match surface {
            Surface::Content => &self.content,
            Surface::Player => &self.player,
        }
    }
}

#[async_trait(?Send)]
impl PageView for DomView {
    fn show_notice(&self, notice: &Notice) {
        notice::show(notice);
    }

    fn mark_completed(&self, video_id: &str) {
        if let Some(element) = dom::by_id::<Element>(video_id) {
            let _ = element.class_list().add_1("completed");
        }
    }

    fn render_progress(&self, progress: &ChapterProgress) {
        let percent = progress.label();
        if let Some(bar) = query("#chapterprogress .progress") {
            set_style(&bar, "width", &percent);
        }
        if let Some(label) = query("#chapterprogress .progresslabel") {
            set_style(&label, "left", &percent);
            label.set_text_content(Some(&percent));
        }
    }

    async fn run_transition(&self, transition: &Transition) {
        futures::join!(
            fade_out(
                self.surface(transition.fade_out.target),
                transition.fade_out.duration_ms
            ),
            animate_background(&self.body, &transition.background, transition.background_ms)
        );
        fade_in(
            self.surface(transition.fade_in.target),
            transition.fade_in.duration_ms,
        )
        .await;
    }

    fn navigate_completed(&self) {
        if let Some(window) = dom::window() {
            let _ = window.location().set_href(&format!("{}/completed", self.base));
        }
    }
}

/// Videos listed under `#videos`; an article counts as watched when it or
/// anything inside it carries `.completed`.
fn chapter_from_page() -> Chapter {
    Chapter::new(query_all("#videos article").into_iter().map(|article| {
        let completed = dom::has_class(&article, "completed")
            || article.query_selector(".completed").ok().flatten().is_some();
        let id = article_video_id(article.id(), || {
            article
                .query_selector("[id]")
                .ok()
                .flatten()
                .map(|e| e.id())
        });
        (id, completed)
    }))
}

/// The article's own id, else the first descendant carrying one.
fn article_video_id(own: String, nested: impl FnOnce() -> Option<String>) -> String {
    if own.is_empty() {
        nested().unwrap_or_default()
    } else {
        own
    }
}

/// Wires the flow when the page has a `#videoplayer video` element.
pub fn build(config: growth_core::PlayerConfig) -> Option<DomFlow> {
    let video = query("#videoplayer video")?.dyn_into::<HtmlVideoElement>().ok()?;
    let document = dom::document()?;
    let base = page_url()?;

    let view = DomView {
        content: query("#content")?,
        player: query("#videoplayer")?,
        body: document.body()?,
        base: base.clone(),
    };
    let chapter = chapter_from_page();
    tracing::debug!(
        videos = chapter.progress().total,
        completed = chapter.progress().completed,
        "chapter loaded"
    );

    Some(VideoFlow::new(
        HttpTransport::new(base),
        HtmlPlayer { video },
        view,
        chapter,
        config,
    ))
}

/// The `<video>` element the flow plays into, for the `ended` listener.
pub fn video_element(flow: &DomFlow) -> &HtmlVideoElement {
    &flow.engine().video
}
