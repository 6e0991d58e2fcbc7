use wasm_bindgen_futures::spawn_local;

use growth_core::Notice;

use crate::animation::slide_down;
use crate::dom::query;

/// Replaces the notice box text and slides it into view.
pub fn show(notice: &Notice) {
    let message = notice.to_string();
    tracing::info!(%message, "notice");

    let Some(target) = query("#noticebox p span") else {
        web_sys::console::warn_1(&message.into());
        return;
    };
    target.set_text_content(Some(&message));

    if let Some(noticebox) = query("#noticebox") {
        spawn_local(async move { slide_down(&noticebox).await });
    }
}
