mod animation;
mod choices;
mod dom;
mod drag;
mod navigation;
mod notice;
mod video;
mod widgets;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use growth_core::navigation::Direction;
use growth_core::ChapterProgress;

use crate::dom::AnswerSink;
use crate::video::DomFlow;

struct Page {
    answer: Option<Rc<AnswerSink>>,
    flow: Option<Rc<DomFlow>>,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn with_page<R>(f: impl FnOnce(&Page) -> R) -> Option<R> {
    PAGE.with(|page| page.borrow().as_ref().map(f))
}

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let _ = tracing_wasm::try_set_as_global_default();

    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| setup()).forget();
    } else {
        setup();
    }
}

fn setup() {
    let config = dom::load_config();
    let answer = AnswerSink::attach().map(Rc::new);
    let mut listeners = Vec::new();

    let kind = dom::question_type();
    if let Some(answer) = &answer {
        listeners.extend(widgets::bind_sliders(config.widgets, answer));
        listeners.extend(widgets::bind_discs(config.widgets, answer));
        widgets::restore_previous(&config.widgets, kind, answer);
    }
    listeners.extend(choices::bind_image_hover());

    let flow = video::build(config.player.clone()).map(Rc::new);
    if let Some(flow) = &flow {
        let on_end = flow.clone();
        listeners.push(EventListener::new(
            video::video_element(flow),
            "ended",
            move |_| {
                let flow = on_end.clone();
                spawn_local(async move {
                    flow.on_ended().await;
                });
            },
        ));
    }

    if let Some(hero) = dom::by_id::<Element>("herovideo") {
        let _ = hero.remove_attribute("controls");
    }
    if let Some(banner) = dom::by_id::<web_sys::HtmlElement>("banner") {
        spawn_local(async move { animation::slide_down(&banner).await });
    }

    tracing::debug!(
        question = kind.map(|k| k.as_str()),
        answer = answer.is_some(),
        video = flow.is_some(),
        listeners = listeners.len(),
        "page ready"
    );

    PAGE.with(|page| {
        *page.borrow_mut() = Some(Page {
            answer,
            flow,
            _listeners: listeners,
        })
    });
}

// ============================================================================
// Page entry points
// ============================================================================

#[wasm_bindgen(js_name = selectAnswer)]
pub fn select_answer(element: Element) {
    let answer = with_page(|page| page.answer.clone()).flatten();
    choices::select(&element, answer.as_deref());
}

#[wasm_bindgen(js_name = previousQuestion)]
pub fn previous_question() {
    let answer = with_page(|page| page.answer.clone()).flatten();
    navigation::go(Direction::Previous, answer.as_deref());
}

#[wasm_bindgen(js_name = nextQuestion)]
pub fn next_question() {
    let answer = with_page(|page| page.answer.clone()).flatten();
    navigation::go(Direction::Next, answer.as_deref());
}

#[wasm_bindgen(js_name = playVideo)]
pub fn play_video(video_id: String) {
    let Some(flow) = with_page(|page| page.flow.clone()).flatten() else {
        tracing::warn!(%video_id, "no video player on this page");
        return;
    };
    spawn_local(async move {
        flow.play(&video_id).await;
    });
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageSnapshot {
    answer: Option<String>,
    video_phase: Option<&'static str>,
    progress: Option<ChapterProgress>,
}

/// Current answer, video phase and chapter progress, for page scripts.
#[wasm_bindgen(js_name = pageState)]
pub fn page_state() -> Result<JsValue, JsValue> {
    let snapshot = with_page(|page| PageSnapshot {
        answer: page.answer.as_ref().map(|a| a.field().encoded()),
        video_phase: page.flow.as_ref().map(|f| f.phase().as_str()),
        progress: page.flow.as_ref().map(|f| f.progress()),
    })
    .unwrap_or(PageSnapshot {
        answer: None,
        video_phase: None,
        progress: None,
    });
    serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
}
