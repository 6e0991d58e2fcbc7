//! CSS-transition based fades and slides, awaited with timers.

use gloo_timers::future::TimeoutFuture;
use web_sys::HtmlElement;

use crate::dom::set_style;

pub async fn fade_out(element: &HtmlElement, duration_ms: u32) {
    set_style(element, "transition", &format!("opacity {duration_ms}ms linear"));
    set_style(element, "opacity", "0");
    TimeoutFuture::new(duration_ms).await;
    set_style(element, "display", "none");
    let _ = element.style().remove_property("transition");
    let _ = element.style().remove_property("opacity");
}

pub async fn fade_in(element: &HtmlElement, duration_ms: u32) {
    set_style(element, "opacity", "0");
    set_style(element, "display", "block");
    // Flush the starting opacity before the transition is attached.
    let _ = element.offset_width();
    set_style(element, "transition", &format!("opacity {duration_ms}ms linear"));
    set_style(element, "opacity", "1");
    TimeoutFuture::new(duration_ms).await;
    let _ = element.style().remove_property("transition");
}

pub async fn animate_background(element: &HtmlElement, color: &str, duration_ms: u32) {
    set_style(
        element,
        "transition",
        &format!("background-color {duration_ms}ms linear"),
    );
    set_style(element, "background-color", color);
    TimeoutFuture::new(duration_ms).await;
    let _ = element.style().remove_property("transition");
}

const SLIDE_MS: u32 = 400;

/// No-op when the element is already showing.
pub async fn slide_down(element: &HtmlElement) {
    if element.offset_height() > 0 {
        return;
    }
    set_style(element, "overflow", "hidden");
    set_style(element, "max-height", "0px");
    set_style(element, "display", "block");
    let height = element.scroll_height();
    let _ = element.offset_height();
    set_style(element, "transition", &format!("max-height {SLIDE_MS}ms ease"));
    set_style(element, "max-height", &format!("{height}px"));
    TimeoutFuture::new(SLIDE_MS).await;
    for property in ["transition", "max-height", "overflow"] {
        let _ = element.style().remove_property(property);
    }
}
