use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, Node};

use growth_core::question::{self, Restore};
use growth_core::{DiscSelector, HandlePosition, QuestionType, SliderTrack, WidgetConfig};

use crate::dom::{computed_px, query, query_all, set_px, AnswerSink};
use crate::drag::{make_draggable, Axis};

fn track_of(handle: &HtmlElement, config: &WidgetConfig) -> SliderTrack {
    let width = handle
        .parent_element()
        .map(|parent| computed_px(&parent, "width"))
        .unwrap_or(0.0);
    SliderTrack::new(width, config)
}

pub fn bind_sliders(config: WidgetConfig, answer: &Rc<AnswerSink>) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    for handle in query_all(".slider") {
        let constrain = {
            let handle = handle.clone();
            move |pos: HandlePosition| {
                let track = track_of(&handle, &config);
                HandlePosition::new(track.clamp(pos.left), pos.top)
            }
        };
        let on_stop = {
            let handle = handle.clone();
            let answer = answer.clone();
            move |pos: HandlePosition| {
                let track = track_of(&handle, &config);
                answer.set(track.answer_at(pos.left));
            }
        };
        listeners.extend(make_draggable(&handle, Axis::X, constrain, on_stop));
    }
    listeners
}

pub fn bind_discs(config: WidgetConfig, answer: &Rc<AnswerSink>) -> Vec<EventListener> {
    let disc = DiscSelector::new(&config);
    let mut listeners = Vec::new();

    for quad in query_all(".quad") {
        let Some(selector) = quad
            .query_selector(".selector")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        let on_stop = {
            let answer = answer.clone();
            move |pos: HandlePosition| answer.set(disc.answer_at(pos))
        };
        listeners.extend(make_draggable(
            &selector,
            Axis::Both,
            move |pos| disc.constrain(pos),
            on_stop,
        ));

        let answer = answer.clone();
        let area = quad.clone();
        listeners.push(EventListener::new(&quad, "mousedown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            // Presses on the handle start a drag instead.
            let on_handle = event
                .target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .map(|node| selector.contains(Some(&node)))
                .unwrap_or(false);
            if on_handle {
                return;
            }

            let rect = area.get_bounding_client_rect();
            let offset_x = event.client_x() as f64 - rect.left();
            let offset_y = event.client_y() as f64 - rect.top();
            if let Some(pos) = disc.jump_to(offset_x, offset_y) {
                set_px(&selector, "left", pos.left);
                set_px(&selector, "top", pos.top);
                answer.set(disc.answer_at(pos));
            }
        }));
    }

    listeners
}

/// Puts the slider or disc handle back where the stored answer says.
pub fn restore_previous(config: &WidgetConfig, kind: Option<QuestionType>, answer: &AnswerSink) {
    let Some(stored) = answer.stored() else {
        return;
    };
    if let Some(kind) = kind {
        if !kind.accepts(&stored) {
            tracing::warn!(
                question = %kind,
                answer = %stored.encode(),
                "stored answer does not fit question"
            );
            return;
        }
    }

    let track = query(".sliderQuestion .sliderbar")
        .map(|bar| SliderTrack::new(computed_px(&bar, "width"), config));
    let disc = DiscSelector::new(config);

    match question::restore(&stored, track.as_ref(), Some(&disc)) {
        Some(Restore::SliderLeft(left)) => {
            if let Some(handle) = query(".sliderQuestion .slider") {
                set_px(&handle, "left", left);
            }
        }
        Some(Restore::DiscHandle(pos)) => {
            let handle = query(".quadQuestion .selector")
                .or_else(|| query(".circleQuestion .selector"));
            if let Some(handle) = handle {
                set_px(&handle, "left", pos.left);
                set_px(&handle, "top", pos.top);
            }
        }
        None => {}
    }
}
