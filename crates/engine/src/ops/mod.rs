//! User-driven edits on the allocation entries.
//!
//! Each operation changes one member's entry and then re-flows the automatic
//! shares, so the entries are settled again when it returns.

mod manual;
mod participants;

pub use manual::{reset_manual, set_manual};
pub use participants::toggle;
