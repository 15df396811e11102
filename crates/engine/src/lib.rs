//! Split allocation engine.
//!
//! Given an expense total and the members of a group, the engine keeps a
//! per-member share assignment that always reconstitutes the total to the
//! cent. Shares are either automatic (even split of what is left) or pinned
//! by the user, and the automatic ones re-flow on every change of total,
//! participants or pins.
//!
//! The building blocks are plain functions over an ordered slice of
//! [`AllocationEntry`]: [`redistribute`], [`toggle`], [`set_manual`],
//! [`reset_manual`], [`import_from_record`], [`validate`] and
//! [`build_splits`]. [`AllocationSession`] ties them to one editing form and
//! handles its submission through an [`ExpenseGateway`].
//!
//! ```rust
//! use engine::{AllocationEntry, MoneyCents, redistribute};
//!
//! let mut entries: Vec<AllocationEntry> = (1..=3)
//!     .map(|id| AllocationEntry::new(id, format!("member {id}")))
//!     .collect();
//! redistribute(&mut entries, MoneyCents::new(10_00));
//!
//! let shares: Vec<i64> = entries.iter().map(|e| e.amount.cents()).collect();
//! assert_eq!(shares, vec![333, 333, 334]);
//! ```

pub use api_types::{
    expense::{ExpenseCreate, ExpenseUpdate, ExpenseView, SplitRecord},
    group::Member,
};
pub use entry::{AllocationEntry, allocated_total, manual_total};
pub use error::{EngineError, GatewayError, SplitIssue};
pub use gateway::{ExpenseGateway, SubmitOutcome, SubmitRequest};
pub use import::{EVEN_SPLIT_TOLERANCE, import_from_record};
pub use money::MoneyCents;
pub use ops::{reset_manual, set_manual, toggle};
pub use payload::{build_expense, build_splits};
pub use redistribute::redistribute;
pub use session::{AllocationSession, PendingSubmission, SessionMode};
pub use validate::validate;

mod entry;
mod error;
mod gateway;
mod import;
mod money;
mod ops;
mod payload;
mod redistribute;
mod session;
mod util;
mod validate;

type ResultEngine<T> = Result<T, EngineError>;
