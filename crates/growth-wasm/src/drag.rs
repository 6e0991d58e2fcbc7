//! Pointer dragging for widget handles.

use std::cell::Cell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, PointerEvent};

use growth_core::HandlePosition;

use crate::dom::{computed_px, set_px};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Both,
}

#[derive(Debug, Clone, Copy)]
struct Grab {
    pointer_x: f64,
    pointer_y: f64,
    origin: HandlePosition,
    last: HandlePosition,
}

/// Makes `handle` draggable. `constrain` runs on every move and decides
/// where the handle actually goes; `on_stop` receives the final position.
pub fn make_draggable<C, S>(
    handle: &HtmlElement,
    axis: Axis,
    constrain: C,
    on_stop: S,
) -> Vec<EventListener>
where
    C: Fn(HandlePosition) -> HandlePosition + 'static,
    S: Fn(HandlePosition) + 'static,
{
    let grab: Rc<Cell<Option<Grab>>> = Rc::new(Cell::new(None));

    let down = {
        let grab = grab.clone();
        let handle = handle.clone();
        EventListener::new_with_options(
            &handle.clone(),
            "pointerdown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                event.prevent_default();
                let _ = handle.set_pointer_capture(event.pointer_id());
                let _ = handle.style().set_property("cursor", "pointer");
                let origin = HandlePosition::new(
                    computed_px(&handle, "left"),
                    computed_px(&handle, "top"),
                );
                grab.set(Some(Grab {
                    pointer_x: event.client_x() as f64,
                    pointer_y: event.client_y() as f64,
                    origin,
                    last: origin,
                }));
            },
        )
    };

    let moved = {
        let grab = grab.clone();
        let handle = handle.clone();
        EventListener::new(&handle.clone(), "pointermove", move |event: &Event| {
            let (Some(event), Some(mut state)) = (event.dyn_ref::<PointerEvent>(), grab.get())
            else {
                return;
            };
            let dx = event.client_x() as f64 - state.pointer_x;
            let dy = match axis {
                Axis::X => 0.0,
                Axis::Both => event.client_y() as f64 - state.pointer_y,
            };
            let pos = constrain(HandlePosition::new(
                state.origin.left + dx,
                state.origin.top + dy,
            ));
            set_px(&handle, "left", pos.left);
            if axis == Axis::Both {
                set_px(&handle, "top", pos.top);
            }
            state.last = pos;
            grab.set(Some(state));
        })
    };

    let on_stop = Rc::new(on_stop);
    let release = |name: &'static str| {
        let grab = grab.clone();
        let on_stop = on_stop.clone();
        EventListener::new(handle, name, move |_event: &Event| {
            if let Some(state) = grab.take() {
                on_stop(state.last);
            }
        })
    };

    vec![down, moved, release("pointerup"), release("pointercancel")]
}
