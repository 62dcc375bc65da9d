mod app;
mod components;
mod config;
mod error;
mod i18n;
mod logging;
mod models;
mod note;
mod pages;
mod render;
mod storage;
mod util;

pub use crate::components::AccountNote;
pub use crate::config::NoteConfig;
pub use crate::error::{NoteError, NoteResult};
pub use crate::i18n::{t, Locale, MessageKey};
pub use crate::models::{Profile, ProfileId};
pub use crate::note::{
    Command, Commands, NoteDisplay, NoteEditor, SaveIndicator, TimerKind, TimerToken,
};
pub use crate::render::{emojify, escape_html, NoteRenderer};

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = NoteConfig::load();
    logging::init(config.log_level());
    tracing::info!(target: "note.host", locale = %config.locale(), "mounting");

    mount_to_body(move || view! { <App config=config /> });
}
