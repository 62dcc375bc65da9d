//! Test-only host: runs commands against a virtual clock, the way the
//! browser host runs them against `setTimeout` and the text area.

use super::command::{Command, Commands, TimerKind, TimerToken};
use super::{NoteEditor, SaveIndicator};
use crate::config::NoteConfig;

pub(crate) fn saves(out: &Commands) -> Vec<&str> {
    out.iter()
        .filter_map(|c| match c {
            Command::Save(v) => Some(v.as_str()),
            _ => None,
        })
        .collect()
}

pub(crate) struct Harness {
    pub editor: NoteEditor,
    pub indicator: SaveIndicator,
    pub saved: Vec<String>,
    pub focused: bool,
    /// Timeline of `indicator.is_mounted()`, one entry per change.
    pub mounted_log: Vec<(u64, bool)>,
    now: u64,
    timers: Vec<(u64, TimerToken)>,
}

impl Harness {
    pub fn new(canonical: Option<&str>) -> Self {
        let config = NoteConfig::default();
        Self {
            editor: NoteEditor::mount(canonical.map(str::to_string), &config),
            indicator: SaveIndicator::new(config.unmount_delay_ms),
            saved: vec![],
            focused: false,
            mounted_log: vec![],
            now: 0,
            timers: vec![],
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Run one editor transition and everything it triggers.
    pub fn editor(&mut self, f: impl FnOnce(&mut NoteEditor) -> Commands) {
        let out = f(&mut self.editor);
        self.run(out);
    }

    pub fn advance(&mut self, ms: u64) {
        let until = self.now + ms;
        loop {
            self.timers.sort_by_key(|(due, _)| *due);
            match self.timers.first() {
                Some((due, _)) if *due <= until => {
                    let (due, timer) = self.timers.remove(0);
                    self.now = due;
                    let out = match timer.kind {
                        TimerKind::AckClear => self.editor.timer_fired(timer),
                        TimerKind::Unmount => self.indicator.timer_fired(timer),
                    };
                    self.run(out);
                }
                _ => break,
            }
        }
        self.now = until;
    }

    fn run(&mut self, out: Commands) {
        for cmd in out {
            match cmd {
                Command::Save(v) => self.saved.push(v),
                Command::Focus => self.focused = true,
                Command::Blur => {
                    // Blurring a focused element dispatches its blur handler.
                    if self.focused {
                        self.focused = false;
                        let out = self.editor.blur();
                        self.run(out);
                    }
                }
                Command::Schedule { timer, delay_ms } => {
                    self.timers.push((self.now + u64::from(delay_ms), timer));
                }
                Command::Cancel(timer) => self.timers.retain(|(_, t)| *t != timer),
            }
        }
        self.sync_indicator();
    }

    fn sync_indicator(&mut self) {
        let visible = self.editor.show_acknowledged();
        let out = self.indicator.set_visible(visible);
        for cmd in out {
            match cmd {
                Command::Schedule { timer, delay_ms } => {
                    self.timers.push((self.now + u64::from(delay_ms), timer));
                }
                Command::Cancel(timer) => self.timers.retain(|(_, t)| *t != timer),
                _ => {}
            }
        }

        let mounted = self.indicator.is_mounted();
        if self.mounted_log.last().map_or(false, |(_, m)| *m) != mounted {
            self.mounted_log.push((self.now, mounted));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_save_pulses_and_clears_on_its_own() {
        let mut h = Harness::new(Some(""));
        h.editor(|e| e.request_edit());
        h.editor(|e| e.input("hello"));
        h.editor(|e| e.confirm());

        assert_eq!(h.saved, vec!["hello"]);
        assert!(!h.focused);
        assert!(!h.editor.is_editing());
        assert!(h.editor.show_acknowledged());
        assert!(h.indicator.is_mounted());

        h.advance(1999);
        assert!(h.editor.show_acknowledged());

        h.advance(1);
        assert!(!h.editor.show_acknowledged());
        assert!(h.indicator.is_mounted());

        h.advance(200);
        assert!(!h.indicator.is_mounted());
        assert_eq!(h.mounted_log, vec![(0, true), (2200, false)]);
        assert_eq!(h.saved.len(), 1);
        assert_eq!(h.pending_timers(), 0);
    }

    #[test]
    fn test_resave_during_fade_does_not_flicker() {
        let mut h = Harness::new(Some(""));
        h.editor(|e| e.input("one"));
        h.editor(|e| e.confirm());

        h.advance(2000);
        assert!(!h.indicator.is_visible());

        h.advance(100);
        h.editor(|e| e.input("two"));
        h.editor(|e| e.blur());
        assert!(h.indicator.is_visible());

        h.advance(150);
        assert!(h.indicator.is_mounted());
        assert_eq!(h.mounted_log, vec![(0, true)]);
        assert_eq!(h.saved, vec!["one", "two"]);
    }

    #[test]
    fn test_second_save_restarts_ack_timer() {
        let mut h = Harness::new(Some(""));
        h.editor(|e| e.input("a"));
        h.editor(|e| e.confirm());
        h.advance(1500);
        h.editor(|e| e.input("ab"));
        h.editor(|e| e.confirm());

        h.advance(1000);
        assert!(h.editor.show_acknowledged());
        h.advance(1000);
        assert!(!h.editor.show_acknowledged());
        assert_eq!(h.now(), 3500);
    }

    #[test]
    fn test_escape_then_blur_saves_nothing() {
        let mut h = Harness::new(Some("stay"));
        h.editor(|e| e.request_edit());
        h.editor(|e| e.input("gone"));
        h.editor(|e| e.cancel());

        assert!(h.saved.is_empty());
        assert_eq!(h.editor.draft(), Some("stay"));
        assert!(!h.editor.is_editing());
        assert!(!h.indicator.is_mounted());
    }

    #[test]
    fn test_subject_switch_flushes_once_without_pulse() {
        let mut h = Harness::new(Some("first"));
        h.editor(|e| e.request_edit());
        h.editor(|e| e.input("first, edited"));
        h.editor(|e| e.subject_changed(Some("second".to_string())));

        assert_eq!(h.saved, vec!["first, edited"]);
        assert!(!h.indicator.is_mounted());
        assert_eq!(h.pending_timers(), 0);
    }

    #[test]
    fn test_rapid_subject_switching_keeps_each_edit() {
        let mut h = Harness::new(Some("a"));
        h.editor(|e| e.input("a2"));
        h.editor(|e| e.subject_changed(Some("b".to_string())));
        h.editor(|e| e.input("b2"));
        h.editor(|e| e.subject_changed(Some("c".to_string())));
        h.editor(|e| e.subject_changed(Some("d".to_string())));

        assert_eq!(h.saved, vec!["a2", "b2"]);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut h = Harness::new(Some(""));
        h.editor(|e| e.input("x"));
        h.editor(|e| e.confirm());
        assert_eq!(h.pending_timers(), 1);

        h.editor(|e| e.teardown());
        let out = h.indicator.teardown();
        assert!(out.is_empty());
        assert_eq!(h.pending_timers(), 0);
        assert_eq!(h.saved, vec!["x"]);
    }
}
