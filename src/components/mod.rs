pub mod account_note;
pub mod ui;

pub use account_note::AccountNote;
