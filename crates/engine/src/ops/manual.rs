use crate::{AllocationEntry, MoneyCents, ResultEngine, redistribute, util::entry_index};

/// Pins `member_id` to the amount typed in `raw`.
///
/// Input that is not a non-negative amount counts as zero. With a `total`,
/// the pin is capped so that all pins together never exceed it; without
/// one there is nothing to cap against. Unselected members are left as they
/// are. Returns the amount the entry ends up pinned to.
pub fn set_manual(
    entries: &mut [AllocationEntry],
    member_id: i64,
    raw: &str,
    total: Option<MoneyCents>,
) -> ResultEngine<MoneyCents> {
    let idx = entry_index(entries, member_id)?;

    if entries[idx].selected {
        let candidate = MoneyCents::parse_lenient(raw);
        let pinned = match total {
            Some(total) => {
                let others: MoneyCents = entries
                    .iter()
                    .filter(|e| e.member_id != member_id && e.is_pinned())
                    .map(|e| e.amount)
                    .sum();
                candidate.min((total - others).non_negative())
            }
            None => candidate,
        };
        let entry = &mut entries[idx];
        entry.amount = pinned;
        entry.manual = true;
    }

    redistribute(entries, total.unwrap_or(MoneyCents::ZERO));
    Ok(entries[idx].amount)
}

/// Unpins `member_id`; its share is recomputed with the automatic ones.
pub fn reset_manual(
    entries: &mut [AllocationEntry],
    member_id: i64,
    total: MoneyCents,
) -> ResultEngine<()> {
    let idx = entry_index(entries, member_id)?;
    entries[idx].manual = false;
    redistribute(entries, total);
    Ok(())
}
