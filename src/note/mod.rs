//! The note widget's two state machines.
//!
//! [`NoteEditor`] owns view/edit mode, the draft and the save decision.
//! [`SaveIndicator`] owns the "Saved" text's mount lifecycle. Neither touches
//! the DOM or the clock: transitions return [`Command`]s for the host to run.

mod command;
mod editor;
mod indicator;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{Command, Commands, TimerKind, TimerToken};
pub use editor::{NoteDisplay, NoteEditor};
pub use indicator::SaveIndicator;
