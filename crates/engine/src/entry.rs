//! The module contains [`AllocationEntry`], one member's slot in a split.

use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// Per-member allocation state.
///
/// Entries live in an ordered slice that follows the group's member order;
/// that order decides which entry absorbs rounding remainders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub member_id: i64,
    pub name: String,
    /// Whether the member takes part in the expense.
    pub selected: bool,
    /// Pinned by the user: excluded from automatic redistribution.
    pub manual: bool,
    pub amount: MoneyCents,
}

impl AllocationEntry {
    /// A selected, automatic entry with no amount yet.
    pub fn new(member_id: i64, name: impl Into<String>) -> Self {
        Self {
            member_id,
            name: name.into(),
            selected: true,
            manual: false,
            amount: MoneyCents::ZERO,
        }
    }

    /// Selected and not pinned: receives an automatic share.
    pub fn is_auto(&self) -> bool {
        self.selected && !self.manual
    }

    /// Selected and pinned.
    pub fn is_pinned(&self) -> bool {
        self.selected && self.manual
    }

    /// Drops out of the split: no amount, no pin.
    pub(crate) fn clear(&mut self) {
        self.amount = MoneyCents::ZERO;
        self.manual = false;
    }
}

impl From<&api_types::group::Member> for AllocationEntry {
    fn from(member: &api_types::group::Member) -> Self {
        Self::new(member.id, member.name.clone())
    }
}

/// Sum of the amounts of the selected entries.
pub fn allocated_total(entries: &[AllocationEntry]) -> MoneyCents {
    entries
        .iter()
        .filter(|e| e.selected)
        .map(|e| e.amount)
        .sum()
}

/// Sum of the amounts of the selected, pinned entries.
pub fn manual_total(entries: &[AllocationEntry]) -> MoneyCents {
    entries
        .iter()
        .filter(|e| e.is_pinned())
        .map(|e| e.amount)
        .sum()
}
