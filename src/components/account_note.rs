use crate::config::NoteConfig;
use crate::i18n::{t, MessageKey};
use crate::models::{Profile, ProfileId};
use crate::note::{Command, Commands, NoteDisplay, NoteEditor, SaveIndicator, TimerKind, TimerToken};
use crate::render::{escape_html, NoteRenderer};
use crate::util::{clear_timeout, set_timeout};
use icons::Check;
use leptos::html;
use leptos::prelude::*;
use std::collections::HashMap;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const MIN_ROWS: usize = 2;
const MAX_ROWS: usize = 20;
/// Characters per visual row assumed before the text area is laid out.
const WRAP_COLUMNS: usize = 40;

/// Text area height that fits the note without scrolling (up to a cap),
/// counting soft-wrapped rows as well as line breaks.
///
/// Only an estimate for the first paint; once the user types, the height is
/// measured from `scrollHeight` (see [`fit_to_content`]).
pub(crate) fn autosize_rows(text: &str) -> usize {
    let rows: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(WRAP_COLUMNS).max(1))
        .sum();
    rows.clamp(MIN_ROWS, MAX_ROWS)
}

/// Grow (or shrink) the text area to its content height.
fn fit_to_content(el: &web_sys::HtmlElement) {
    let style = el.style();
    // Collapse first, otherwise `scrollHeight` never drops below the current height.
    if let Err(e) = style.set_property("height", "auto") {
        tracing::warn!(target: "note.host", error = ?e, "autosize_failed");
        return;
    }
    let height = format!("{}px", el.scroll_height());
    if let Err(e) = style.set_property("height", &height) {
        tracing::warn!(target: "note.host", error = ?e, "autosize_failed");
    }
}

/// Last inputs seen by the component: the profile and its stored note.
pub(crate) type NoteInputs = (Option<ProfileId>, Option<String>);

/// How a change of the component's inputs reaches the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Another profile: flush the old draft, then start over.
    Subject,
    /// Same profile, new stored value.
    Canonical,
    Unchanged,
}

impl Transition {
    pub(crate) fn classify(
        prev: Option<&NoteInputs>,
        id: &Option<ProfileId>,
        value: &Option<String>,
    ) -> Self {
        match prev {
            Some((prev_id, _)) if prev_id != id => Self::Subject,
            Some((_, prev_value)) if prev_value == value => Self::Unchanged,
            // First run included: the value may have moved since mount.
            _ => Self::Canonical,
        }
    }

    pub(crate) fn apply(self, editor: &mut NoteEditor, value: Option<String>) -> Commands {
        match self {
            Self::Subject => editor.subject_changed(value),
            Self::Canonical => editor.canonical_changed(value),
            Self::Unchanged => vec![],
        }
    }
}

/// Pairs a save with the profile its draft was written for.
///
/// `subject` must still be the previous profile while a switch is being
/// applied, so the flushed draft does not end up on the new one.
pub(crate) fn tag_save(subject: Option<ProfileId>, value: String) -> Option<(ProfileId, String)> {
    subject.map(|id| (id, value))
}

/// Runs state machine commands against the browser.
///
/// Every field is an arena handle, so the host is `Copy` and can be moved
/// into event handlers and timer callbacks freely.
#[derive(Clone, Copy)]
struct NoteHost {
    editor: RwSignal<NoteEditor>,
    indicator: RwSignal<SaveIndicator>,
    /// Browser timeout handle per armed timer.
    timers: StoredValue<HashMap<TimerKind, i32>>,
    textarea: NodeRef<html::Textarea>,
    /// Profile the editor's draft belongs to. Lags the `profile` prop until a
    /// subject switch has flushed the old draft.
    subject: StoredValue<Option<ProfileId>>,
    on_save: Callback<(ProfileId, String)>,
}

impl NoteHost {
    fn dispatch(&self, f: impl FnOnce(&mut NoteEditor) -> Commands) {
        let Some(out) = self.editor.try_update(f) else {
            return;
        };
        self.run(out);
        self.sync_indicator();
    }

    fn dispatch_indicator(&self, f: impl FnOnce(&mut SaveIndicator) -> Commands) {
        if let Some(out) = self.indicator.try_update(f) {
            self.run(out);
        }
    }

    fn sync_indicator(&self) {
        let Some(visible) = self.editor.try_with_untracked(NoteEditor::show_acknowledged) else {
            return;
        };
        if self.indicator.try_with_untracked(SaveIndicator::is_visible) != Some(visible) {
            self.dispatch_indicator(|i| i.set_visible(visible));
        }
    }

    fn run(&self, out: Commands) {
        for cmd in out {
            match cmd {
                Command::Save(value) => {
                    let Some(save) = tag_save(self.subject.try_get_value().flatten(), value) else {
                        tracing::warn!(target: "note.host", "save_without_subject");
                        continue;
                    };
                    if self.on_save.try_run(save).is_none() {
                        tracing::warn!(target: "note.host", "save_callback_gone");
                    }
                }
                Command::Focus => {
                    // The text area is still hidden until the next render pass.
                    let textarea = self.textarea;
                    set_timeout(0, move || {
                        if let Some(el) = textarea.get_untracked() {
                            fit_to_content(&el);
                            if let Err(e) = el.focus() {
                                tracing::warn!(target: "note.host", error = ?e, "focus_failed");
                            }
                        }
                    });
                }
                Command::Blur => {
                    if let Some(el) = self.textarea.get_untracked() {
                        if let Err(e) = el.blur() {
                            tracing::warn!(target: "note.host", error = ?e, "blur_failed");
                        }
                    }
                }
                Command::Schedule { timer, delay_ms } => {
                    let host = *self;
                    if let Some(tid) = set_timeout(delay_ms, move || host.timer_fired(timer)) {
                        self.timers.update_value(|m| {
                            if let Some(old) = m.insert(timer.kind, tid) {
                                clear_timeout(old);
                            }
                        });
                    }
                }
                Command::Cancel(timer) => {
                    self.timers.try_update_value(|m| {
                        if let Some(tid) = m.remove(&timer.kind) {
                            clear_timeout(tid);
                        }
                    });
                }
            }
        }
    }

    fn timer_fired(&self, timer: TimerToken) {
        if self
            .timers
            .try_update_value(|m| m.remove(&timer.kind))
            .is_none()
        {
            // Component already gone.
            return;
        }

        match timer.kind {
            TimerKind::AckClear => self.dispatch(|e| e.timer_fired(timer)),
            TimerKind::Unmount => self.dispatch_indicator(|i| i.timer_fired(timer)),
        }
    }

    fn teardown(&self) {
        self.dispatch(NoteEditor::teardown);
        self.dispatch_indicator(SaveIndicator::teardown);
        self.timers.try_update_value(|m| {
            for (_, tid) in m.drain() {
                clear_timeout(tid);
            }
        });
    }
}

/// The transient "Saved" acknowledgment next to the label.
///
/// The container always takes its slot so screen readers see one stable
/// live region; only the text inside comes and goes.
#[component]
fn InlineAlert(indicator: RwSignal<SaveIndicator>, text: &'static str, fade_ms: u32) -> impl IntoView {
    let style = move || {
        format!(
            "opacity: {}; transition: opacity {fade_ms}ms ease-in-out",
            indicator.with(SaveIndicator::opacity)
        )
    };

    view! {
        <span
            aria-live="polite"
            role="status"
            class="inline-alert inline-flex items-center gap-1 text-xs font-normal text-muted-foreground"
            style=style
        >
            <Show when=move || indicator.with(SaveIndicator::is_mounted) fallback=|| ().into_view()>
                <Check class="size-3" />
                {text}
            </Show>
        </span>
    }
}

/// Personal note about `profile`, shown inline on the profile header.
///
/// `value` is the stored note (`None` until loaded). Saves go out through
/// `on_save` together with the profile they belong to, which is not always
/// the current one: switching profiles flushes the previous draft. The owner
/// is expected to feed the stored result back in via `value`.
#[component]
pub fn AccountNote(
    #[prop(into)] profile: Signal<Option<Profile>>,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] on_save: Callback<(ProfileId, String)>,
) -> impl IntoView {
    let config = use_context::<NoteConfig>().unwrap_or_default();
    let locale = config.locale();
    let placeholder = t(locale, MessageKey::Placeholder);
    let renderer = NoteRenderer::new(config.emoji_base_url.clone());

    let host = NoteHost {
        editor: RwSignal::new(NoteEditor::mount(value.get_untracked(), &config)),
        indicator: RwSignal::new(SaveIndicator::new(config.unmount_delay_ms)),
        timers: StoredValue::new(HashMap::new()),
        textarea: NodeRef::new(),
        subject: StoredValue::new(profile.with_untracked(|p| p.as_ref().map(|p| p.id.clone()))),
        on_save,
    };
    let editor = host.editor;

    Effect::new(move |prev: Option<NoteInputs>| {
        let id = profile.with(|p| p.as_ref().map(|p| p.id.clone()));
        let v = value.get();

        let transition = Transition::classify(prev.as_ref(), &id, &v);
        if transition == Transition::Subject {
            tracing::debug!(target: "note.host", from = ?prev.as_ref().map(|p| &p.0), to = ?id, "subject_changed");
        }
        if transition != Transition::Unchanged {
            host.dispatch(|e| transition.apply(e, v.clone()));
        }
        // Only now: a flush above still saves under the previous profile.
        host.subject.set_value(id.clone());

        (id, v)
    });

    on_cleanup(move || host.teardown());

    let field_id = move || {
        profile.with(|p| {
            p.as_ref()
                .map(|p| format!("account-note-{}", p.id))
                .unwrap_or_default()
        })
    };
    let editing = move || editor.with(NoteEditor::is_editing);

    let on_input = move |ev: web_sys::Event| {
        let Some(area) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        else {
            return;
        };
        host.dispatch(|e| e.input(area.value()));
        fit_to_content(&area);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" if ev.ctrl_key() || ev.meta_key() => {
            ev.prevent_default();
            host.dispatch(NoteEditor::confirm);
        }
        "Escape" => {
            ev.prevent_default();
            host.dispatch(NoteEditor::cancel);
        }
        _ => {}
    };

    let shown = Memo::new(move |_| editor.with(|e| e.display(|raw| renderer.render(raw), placeholder)));

    let textarea_class = tw_merge!(
        "account__header__account-note__content max-h-96 w-full resize-none overflow-y-auto rounded-md border border-input bg-transparent px-3 py-2 text-sm shadow-xs outline-none",
        "focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50",
        "disabled:cursor-not-allowed disabled:opacity-50"
    );

    view! {
        <Show when=move || profile.with(Option::is_some) fallback=|| ().into_view()>
            <div class="account__header__account-note flex flex-col gap-1.5">
                <label
                    r#for=field_id
                    class="flex items-center gap-2 text-xs font-medium uppercase tracking-wide text-muted-foreground"
                >
                    {t(locale, MessageKey::NoteHeader)}
                    " "
                    <InlineAlert
                        indicator=host.indicator
                        text=t(locale, MessageKey::Saved)
                        fade_ms=config.unmount_delay_ms
                    />
                </label>

                <textarea
                    id=field_id
                    node_ref=host.textarea
                    class=textarea_class.clone()
                    placeholder=placeholder
                    rows=move || editor.with(|e| autosize_rows(e.field_value()).to_string())
                    disabled=move || editor.with(NoteEditor::is_disabled)
                    prop:value=move || editor.with(|e| e.field_value().to_string())
                    style:display=move || if editing() { "block" } else { "none" }
                    on:input=on_input
                    on:keydown=on_keydown
                    on:blur=move |_| host.dispatch(NoteEditor::blur)
                ></textarea>

                <div
                    class="account__header__account-note__show cursor-text whitespace-normal break-words rounded-md px-3 py-2 text-sm hover:bg-accent"
                    class:text-muted-foreground=move || matches!(shown.get(), NoteDisplay::Placeholder(_))
                    style:display=move || if editing() { "none" } else { "block" }
                    on:click=move |_| host.dispatch(NoteEditor::request_edit)
                    inner_html=move || match shown.get() {
                        NoteDisplay::Rendered(markup) => markup,
                        NoteDisplay::Placeholder(text) => escape_html(&text),
                    }
                ></div>
            </div>
        </Show>
    }
}
