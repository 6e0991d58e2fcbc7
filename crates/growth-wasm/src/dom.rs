use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use growth_core::{AnswerField, AnswerValue, PageConfig, QuestionType};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn query(selector: &str) -> Option<HtmlElement> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Some(document) = document() else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Element children of `element`'s parent, `element` included.
pub fn siblings_of(element: &Element) -> Vec<Element> {
    let Some(parent) = element.parent_element() else {
        return vec![element.clone()];
    };
    let children = parent.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .collect()
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Used pixel value of a CSS property; `auto` and friends read as 0.
pub fn computed_px(element: &Element, property: &str) -> f64 {
    window()
        .and_then(|w| w.get_computed_style(element).ok().flatten())
        .and_then(|style| style.get_property_value(property).ok())
        .map(|value| parse_px(&value))
        .unwrap_or(0.0)
}

fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn set_px(element: &HtmlElement, property: &str, value: f64) {
    let _ = element.style().set_property(property, &format!("{value}px"));
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// Overrides from `<script id="growth-config" type="application/json">`.
pub fn load_config() -> PageConfig {
    let Some(raw) = by_id::<Element>("growth-config").and_then(|e| e.text_content()) else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring page config");
            PageConfig::default()
        }
    }
}

/// `data-question-type` on `#questionForm`, else inferred from the
/// question wrapper classes.
pub fn question_type() -> Option<QuestionType> {
    if let Some(form) = by_id::<Element>("questionForm") {
        if let Some(raw) = form.get_attribute("data-question-type") {
            match raw.parse::<QuestionType>() {
                Ok(kind) => return Some(kind),
                Err(err) => tracing::warn!(%err, "bad data-question-type"),
            }
        }
    }
    [
        (".sliderQuestion", QuestionType::Slider),
        (".quadQuestion", QuestionType::Quad),
        (".circleQuestion", QuestionType::Circle),
        (".imageQuestion", QuestionType::Image),
        (".textQuestion", QuestionType::Text),
    ]
    .into_iter()
    .find(|(selector, _)| query(selector).is_some())
    .map(|(_, kind)| kind)
}

/// Typed answer state mirrored into the hidden `#answerField` input.
pub struct AnswerSink {
    field: std::cell::RefCell<AnswerField>,
    input: HtmlInputElement,
}

impl AnswerSink {
    pub fn attach() -> Option<Self> {
        let input = by_id::<HtmlInputElement>("answerField")?;
        Some(Self {
            field: std::cell::RefCell::new(AnswerField::from_stored(&input.value())),
            input,
        })
    }

    pub fn set(&self, value: AnswerValue) {
        self.input.set_value(&value.encode());
        self.field.borrow_mut().set(value);
    }

    /// Typed reading of the server-rendered answer, for widget restore.
    pub fn stored(&self) -> Option<AnswerValue> {
        self.field.borrow().restored()
    }

    pub fn field(&self) -> AnswerField {
        self.field.borrow().clone()
    }
}
