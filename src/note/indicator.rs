use super::command::{Commands, TimerKind, TimerSlot, TimerToken};

/// Visibility lifecycle of the transient "Saved" text.
///
/// `visible` drives the container's opacity and follows the caller exactly.
/// `mounted` decides whether the text node exists: it appears together with
/// `visible`, but only disappears once the fade-out delay has passed.
#[derive(Clone, Debug)]
pub struct SaveIndicator {
    visible: bool,
    mounted: bool,
    unmount: TimerSlot,
    unmount_delay_ms: u32,
}

impl SaveIndicator {
    pub fn new(unmount_delay_ms: u32) -> Self {
        Self {
            visible: false,
            mounted: false,
            unmount: TimerSlot::new(TimerKind::Unmount),
            unmount_delay_ms,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn opacity(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn set_visible(&mut self, visible: bool) -> Commands {
        let mut out = vec![];
        if visible == self.visible {
            return out;
        }
        self.visible = visible;

        if visible {
            // Shown again before the fade finished: keep the text.
            self.unmount.disarm(&mut out);
            self.mounted = true;
        } else {
            self.unmount.arm(self.unmount_delay_ms, &mut out);
        }
        out
    }

    pub fn timer_fired(&mut self, timer: TimerToken) -> Commands {
        if self.unmount.take_if_armed(timer) && !self.visible {
            self.mounted = false;
        } else {
            tracing::trace!(target: "note.indicator", generation = timer.generation, "stale_timer_ignored");
        }
        vec![]
    }

    pub fn teardown(&mut self) -> Commands {
        let mut out = vec![];
        self.unmount.disarm(&mut out);
        out
    }
}
