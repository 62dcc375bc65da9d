use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// One-shot `setTimeout`. Returns the browser handle, or `None` when the
/// timer could not be started.
pub(crate) fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    match win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    ) {
        Ok(tid) => Some(tid),
        Err(e) => {
            tracing::warn!(target: "note.host", error = ?e, "set_timeout_failed");
            None
        }
    }
}

pub(crate) fn clear_timeout(tid: i32) {
    if let Some(win) = web_sys::window() {
        win.clear_timeout_with_handle(tid);
    }
}
