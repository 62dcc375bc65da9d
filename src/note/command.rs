/// Which one-shot timer a command refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Clears the editor's acknowledgment pulse.
    AckClear,
    /// Removes the indicator's text after the fade-out.
    Unmount,
}

/// Identifies one scheduling of a timer.
///
/// Every schedule gets a fresh generation, so a firing that carries an older
/// token than the one currently armed is recognized as superseded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Side effects requested by a state machine transition.
///
/// The machines never touch the DOM or the clock; the host runs these in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Hand the value to the owner's save callback.
    Save(String),
    /// Give input focus to the text area.
    Focus,
    /// Take input focus away from the text area.
    Blur,
    /// Start a one-shot timer; fire `timer_fired(timer)` after `delay_ms`.
    Schedule { timer: TimerToken, delay_ms: u32 },
    /// Drop the pending timer with this token.
    Cancel(TimerToken),
}

pub type Commands = Vec<Command>;

/// Hands out increasing timer generations for one kind of timer, and
/// remembers which one is currently armed.
#[derive(Clone, Debug)]
pub(crate) struct TimerSlot {
    kind: TimerKind,
    next_generation: u64,
    armed: Option<TimerToken>,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            next_generation: 1,
            armed: None,
        }
    }

    /// Arm a new timer, cancelling the previous one if it is still pending.
    pub fn arm(&mut self, delay_ms: u32, out: &mut Commands) -> TimerToken {
        self.disarm(out);

        let timer = TimerToken {
            kind: self.kind,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.armed = Some(timer);
        out.push(Command::Schedule { timer, delay_ms });
        timer
    }

    pub fn disarm(&mut self, out: &mut Commands) {
        if let Some(prev) = self.armed.take() {
            out.push(Command::Cancel(prev));
        }
    }

    /// Consume a firing. Returns false when the token is stale.
    pub fn take_if_armed(&mut self, token: TimerToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
