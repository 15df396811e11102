//! Internal helpers shared by the allocation operations.
//!
//! These utilities are **not** part of the public API. They centralize the
//! remainder rule and member lookup so every call site behaves the same way.

use crate::{AllocationEntry, EngineError, MoneyCents, ResultEngine};

/// Adds `diff` to the last amount yielded by `amounts`, clamping at zero.
///
/// This is the single remainder rule of the engine: leftover cents always
/// land on the last eligible slot in member order. Returns the adjusted
/// amount, or `None` when there is no slot to adjust.
pub(crate) fn apply_remainder_to_last<'a, I>(mut amounts: I, diff: MoneyCents) -> Option<MoneyCents>
where
    I: DoubleEndedIterator<Item = &'a mut MoneyCents>,
{
    let last = amounts.next_back()?;
    *last = (*last + diff).non_negative();
    Some(*last)
}

/// Position of `member_id` in the ordered entries.
pub(crate) fn entry_index(entries: &[AllocationEntry], member_id: i64) -> ResultEngine<usize> {
    entries
        .iter()
        .position(|e| e.member_id == member_id)
        .ok_or(EngineError::UnknownMember(member_id))
}
