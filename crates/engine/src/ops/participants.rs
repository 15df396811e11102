use crate::{AllocationEntry, MoneyCents, ResultEngine, redistribute, util::entry_index};

/// Flips whether `member_id` takes part in the split.
///
/// Either way the entry (re)starts as an automatic entry with no amount:
/// leaving drops any pin, joining puts the member back in the automatic pool.
/// Returns the new selection state.
pub fn toggle(
    entries: &mut [AllocationEntry],
    member_id: i64,
    total: MoneyCents,
) -> ResultEngine<bool> {
    let idx = entry_index(entries, member_id)?;
    let entry = &mut entries[idx];
    entry.selected = !entry.selected;
    entry.clear();
    let selected = entry.selected;

    redistribute(entries, total);
    Ok(selected)
}
