use super::command::{Command, Commands, TimerKind, TimerSlot, TimerToken};
use crate::config::NoteConfig;

/// What the view element should show while the text area is hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteDisplay {
    /// Rendered markup of a non-empty draft.
    Rendered(String),
    /// Localized hint shown for an empty or missing note.
    Placeholder(String),
}

/// Whether a save should also pulse the "Saved" acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ack {
    Pulse,
    Silent,
}

/// Local state of the note widget for one subject (profile).
///
/// `canonical` is owned by the caller and only ever replaced through
/// [`NoteEditor::subject_changed`] and [`NoteEditor::canonical_changed`].
/// Everything else is local working state.
#[derive(Clone, Debug)]
pub struct NoteEditor {
    canonical: Option<String>,
    draft: Option<String>,
    editing: bool,
    save_pending: bool,
    show_acknowledged: bool,
    ack_clear: TimerSlot,
    ack_clear_ms: u32,
}

impl NoteEditor {
    pub fn mount(canonical: Option<String>, config: &NoteConfig) -> Self {
        Self {
            draft: canonical.clone(),
            canonical,
            editing: false,
            save_pending: false,
            show_acknowledged: false,
            ack_clear: TimerSlot::new(TimerKind::AckClear),
            ack_clear_ms: config.ack_clear_ms,
        }
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_save_pending(&self) -> bool {
        self.save_pending
    }

    pub fn show_acknowledged(&self) -> bool {
        self.show_acknowledged
    }

    /// The text area cannot be used until both values are known.
    pub fn is_disabled(&self) -> bool {
        self.canonical.is_none() || self.draft.is_none()
    }

    pub fn is_dirty(&self) -> bool {
        match (&self.canonical, &self.draft) {
            (Some(canonical), Some(draft)) => !self.save_pending && draft != canonical,
            _ => false,
        }
    }

    /// Raw text for the text area.
    pub fn field_value(&self) -> &str {
        self.draft.as_deref().unwrap_or_default()
    }

    /// Content of the view element, given the text transform and the
    /// localized placeholder.
    pub fn display(&self, render: impl Fn(&str) -> String, placeholder: &str) -> NoteDisplay {
        match self.draft.as_deref() {
            Some(draft) if !draft.is_empty() => NoteDisplay::Rendered(render(draft)),
            _ => NoteDisplay::Placeholder(placeholder.to_string()),
        }
    }

    /// The owner now shows a different profile.
    ///
    /// A dirty draft belongs to the previous subject, so it is flushed
    /// before anything is overwritten.
    pub fn subject_changed(&mut self, canonical: Option<String>) -> Commands {
        let mut out = vec![];

        if self.is_dirty() {
            tracing::debug!(target: "note.editor", "flush_on_subject_change");
            self.save(Ack::Silent, &mut out);
        }

        self.ack_clear.disarm(&mut out);
        self.show_acknowledged = false;

        self.draft = canonical.clone();
        self.canonical = canonical;
        self.editing = false;
        self.save_pending = false;

        out
    }

    /// The owner reconciled the note of the same profile from elsewhere.
    ///
    /// The text area closes: whatever was open was either just saved (and
    /// is now echoed back) or has been replaced by the owner's value.
    pub fn canonical_changed(&mut self, canonical: Option<String>) -> Commands {
        if canonical == self.canonical {
            return vec![];
        }

        // The save we issued came back: nothing is in flight anymore.
        if canonical.is_some() && canonical == self.draft {
            self.save_pending = false;
        }

        tracing::trace!(target: "note.editor", loaded = canonical.is_some(), "canonical_changed");
        self.draft = canonical.clone();
        self.canonical = canonical;
        self.editing = false;

        vec![]
    }

    /// Switch to the text area (e.g. the rendered note was clicked).
    pub fn request_edit(&mut self) -> Commands {
        if self.is_disabled() {
            tracing::trace!(target: "note.editor", "edit_ignored_while_disabled");
            return vec![];
        }

        self.editing = true;
        vec![Command::Focus]
    }

    pub fn input(&mut self, text: impl Into<String>) -> Commands {
        if self.is_disabled() {
            return vec![];
        }

        self.draft = Some(text.into());
        self.save_pending = false;
        vec![]
    }

    /// Keyboard confirm (Ctrl/Cmd+Enter).
    pub fn confirm(&mut self) -> Commands {
        let mut out = vec![];
        if self.is_dirty() {
            self.save(Ack::Pulse, &mut out);
        }
        out.push(Command::Blur);
        out
    }

    /// Keyboard cancel (Escape): throw the local edits away.
    pub fn cancel(&mut self) -> Commands {
        self.draft = self.canonical.clone();
        vec![Command::Blur]
    }

    pub fn blur(&mut self) -> Commands {
        let mut out = vec![];
        if self.is_dirty() {
            self.save(Ack::Pulse, &mut out);
        }
        self.editing = false;
        out
    }

    /// The widget goes away; nothing is left to show an acknowledgment in.
    pub fn teardown(&mut self) -> Commands {
        let mut out = vec![];
        if self.is_dirty() {
            tracing::debug!(target: "note.editor", "flush_on_teardown");
            self.save(Ack::Silent, &mut out);
        }
        self.ack_clear.disarm(&mut out);
        out
    }

    pub fn timer_fired(&mut self, timer: TimerToken) -> Commands {
        if self.ack_clear.take_if_armed(timer) {
            self.show_acknowledged = false;
        } else {
            tracing::trace!(target: "note.editor", generation = timer.generation, "stale_timer_ignored");
        }
        vec![]
    }

    fn save(&mut self, ack: Ack, out: &mut Commands) {
        let Some(value) = self.draft.clone() else {
            return;
        };

        tracing::debug!(target: "note.editor", len = value.len(), ack = ?ack, "save");
        out.push(Command::Save(value));
        self.save_pending = true;

        if ack == Ack::Pulse {
            self.show_acknowledged = true;
            self.ack_clear.arm(self.ack_clear_ms, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::testing::saves;

    fn loaded(value: &str) -> NoteEditor {
        NoteEditor::mount(Some(value.to_string()), &NoteConfig::default())
    }

    #[test]
    fn test_mount_copies_canonical_into_draft() {
        let e = loaded("hi");
        assert_eq!(e.draft(), Some("hi"));
        assert!(!e.is_editing());
        assert!(!e.is_dirty());
    }

    #[test]
    fn test_save_when_clean_is_noop() {
        let mut e = loaded("same");
        assert!(saves(&e.confirm()).is_empty());
        assert!(saves(&e.blur()).is_empty());
        assert!(!e.show_acknowledged());
    }

    #[test]
    fn test_typing_back_to_canonical_is_not_dirty() {
        let mut e = loaded("a");
        e.input("b");
        e.input("a");
        assert!(!e.is_dirty());
        assert!(saves(&e.confirm()).is_empty());
    }

    #[test]
    fn test_dirty_whenever_values_differ_and_nothing_pending() {
        for (canonical, draft) in [("", "x"), ("x", ""), ("a", "b"), ("note", "note ")] {
            let mut e = loaded(canonical);
            e.input(draft);
            assert!(e.is_dirty(), "{canonical:?} -> {draft:?}");
        }
    }

    #[test]
    fn test_confirm_saves_once_and_blur_does_not_repeat() {
        let mut e = loaded("");
        e.request_edit();
        e.input("hello");

        let out = e.confirm();
        assert_eq!(saves(&out), vec!["hello"]);
        assert_eq!(out.last(), Some(&Command::Blur));
        assert!(e.is_save_pending());
        assert!(e.show_acknowledged());

        assert!(saves(&e.blur()).is_empty());
        assert!(!e.is_editing());
    }

    #[test]
    fn test_blur_while_dirty_saves_with_ack() {
        let mut e = loaded("old");
        e.request_edit();
        e.input("new");

        let out = e.blur();
        assert_eq!(saves(&out), vec!["new"]);
        assert!(e.show_acknowledged());
        assert!(!e.is_editing());
    }

    #[test]
    fn test_typing_after_save_makes_dirty_again() {
        let mut e = loaded("");
        e.input("one");
        e.confirm();
        assert!(!e.is_dirty());

        e.input("two");
        assert!(e.is_dirty());
        assert_eq!(saves(&e.blur()), vec!["two"]);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut e = loaded("keep");
        e.request_edit();
        e.input("throw away");

        let out = e.cancel();
        assert_eq!(out, vec![Command::Blur]);
        assert_eq!(e.draft(), Some("keep"));

        assert!(saves(&e.blur()).is_empty());
    }

    #[test]
    fn test_subject_change_flushes_silently() {
        let mut e = loaded("a");
        e.request_edit();
        e.input("edited");

        let out = e.subject_changed(Some("other".to_string()));
        assert_eq!(saves(&out), vec!["edited"]);
        assert!(!out.iter().any(|c| matches!(c, Command::Schedule { .. })));
        assert!(!e.show_acknowledged());
        assert_eq!(e.draft(), Some("other"));
        assert!(!e.is_editing());
        assert!(!e.is_save_pending());
    }

    #[test]
    fn test_subject_change_when_clean_does_not_save() {
        let mut e = loaded("a");
        e.request_edit();
        let out = e.subject_changed(None);
        assert!(saves(&out).is_empty());
        assert!(e.is_disabled());
    }

    #[test]
    fn test_subject_change_drops_running_pulse() {
        let mut e = loaded("");
        e.input("x");
        e.confirm();
        assert!(e.show_acknowledged());

        let out = e.subject_changed(Some(String::new()));
        assert!(out.iter().any(|c| matches!(c, Command::Cancel(_))));
        assert!(!e.show_acknowledged());
    }

    #[test]
    fn test_canonical_echo_clears_pending() {
        let mut e = loaded("");
        e.input("saved text");
        e.confirm();
        assert!(e.is_save_pending());

        e.canonical_changed(Some("saved text".to_string()));
        assert!(!e.is_save_pending());
        assert!(!e.is_dirty());
    }

    #[test]
    fn test_canonical_change_replaces_draft() {
        let mut e = loaded("v1");
        e.canonical_changed(Some("v2".to_string()));
        assert_eq!(e.draft(), Some("v2"));
        assert_eq!(e.canonical(), Some("v2"));
    }

    #[test]
    fn test_canonical_change_closes_open_text_area() {
        let mut e = loaded("v1");
        e.request_edit();
        e.input("half typed");
        assert!(e.is_editing());

        let out = e.canonical_changed(Some("v2".to_string()));
        assert!(out.is_empty());
        assert!(!e.is_editing());
        assert_eq!(e.field_value(), "v2");
        assert!(!e.is_dirty());
    }

    #[test]
    fn test_same_canonical_keeps_text_area_open() {
        let mut e = loaded("v1");
        e.request_edit();
        e.input("typing");

        assert!(e.canonical_changed(Some("v1".to_string())).is_empty());
        assert!(e.is_editing());
        assert_eq!(e.draft(), Some("typing"));
    }

    #[test]
    fn test_unloaded_is_disabled_and_never_dirty() {
        let mut e = NoteEditor::mount(None, &NoteConfig::default());
        assert!(e.is_disabled());
        assert!(e.request_edit().is_empty());
        e.input("ignored");
        assert!(!e.is_dirty());
        assert!(saves(&e.confirm()).is_empty());
        assert!(saves(&e.teardown()).is_empty());
        assert_eq!(e.field_value(), "");
    }

    #[test]
    fn test_load_enables_editing() {
        let mut e = NoteEditor::mount(None, &NoteConfig::default());
        e.canonical_changed(Some("loaded".to_string()));
        assert!(!e.is_disabled());
        assert_eq!(e.request_edit(), vec![Command::Focus]);
        assert!(e.is_editing());
    }

    #[test]
    fn test_teardown_flushes_silently() {
        let mut e = loaded("a");
        e.input("b");
        let out = e.teardown();
        assert_eq!(out, vec![Command::Save("b".to_string())]);
        assert!(!e.show_acknowledged());
    }

    #[test]
    fn test_display_uses_placeholder_for_empty_note() {
        let e = loaded("");
        assert_eq!(
            e.display(|s| s.to_uppercase(), "Click to add a note"),
            NoteDisplay::Placeholder("Click to add a note".to_string())
        );

        let e = loaded("hey");
        assert_eq!(
            e.display(|s| s.to_uppercase(), "Click to add a note"),
            NoteDisplay::Rendered("HEY".to_string())
        );
    }
}
