pub mod profile_card;
pub mod spinner;

// Re-export component symbols so callers can `use crate::components::ui::ProfileCard` etc.
pub use profile_card::*;
pub use spinner::*;
