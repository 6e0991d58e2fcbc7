use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlImageElement};

use growth_core::{Choice, ChoiceGroup, HoverChange, Selection};

use crate::dom::{has_class, query_all, siblings_of, AnswerSink};

const SELECTED: &str = "selected";

fn choice_of(element: &Element) -> Choice {
    let image = element
        .dyn_ref::<HtmlImageElement>()
        .map(|img| img.src());
    Choice {
        id: element.id(),
        image,
        selected: has_class(element, SELECTED),
    }
}

/// The clicked element and its siblings, read from the DOM.
fn group_around(element: &Element) -> (ChoiceGroup, Vec<Element>) {
    let elements = siblings_of(element);
    let group = ChoiceGroup::new(elements.iter().map(choice_of).collect());
    (group, elements)
}

fn apply_asset(elements: &[Element], change: &HoverChange) {
    let target = elements
        .iter()
        .find(|e| e.id() == change.id)
        .and_then(|e| e.dyn_ref::<HtmlImageElement>());
    if let Some(img) = target {
        img.set_src(&change.src);
    }
}

fn apply_selection(elements: &[Element], selection: &Selection) {
    for change in &selection.restored {
        apply_asset(elements, change);
    }
    for element in elements {
        let id = element.id();
        if selection.deselected.contains(&id) {
            let _ = element.class_list().remove_1(SELECTED);
        } else if id == selection.selected {
            let _ = element.class_list().add_1(SELECTED);
        }
    }
}

pub fn select(element: &Element, answer: Option<&AnswerSink>) {
    let id = element.id();
    if id.is_empty() {
        tracing::warn!("choice element has no id");
        return;
    }
    let (mut group, elements) = group_around(element);
    let Some(selection) = group.select(&id) else {
        return;
    };
    apply_selection(&elements, &selection);
    if let Some(answer) = answer {
        answer.set(selection.answer);
    }
}

fn on_hover(entering: bool) -> impl Fn(&Event) {
    move |event: &Event| {
        let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let (mut group, elements) = group_around(&element);
        let id = element.id();
        let change = if entering {
            group.pointer_enter(&id)
        } else {
            group.pointer_leave(&id)
        };
        if let Some(change) = change {
            apply_asset(&elements, &change);
        }
    }
}

pub fn bind_image_hover() -> Vec<EventListener> {
    query_all(".imageQuestion img.answer")
        .into_iter()
        .flat_map(|img| {
            [
                EventListener::new(&img, "mouseenter", on_hover(true)),
                EventListener::new(&img, "mouseleave", on_hover(false)),
            ]
        })
        .collect()
}
