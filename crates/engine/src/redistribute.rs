//! Automatic re-flow of the unpinned shares.

use crate::{
    AllocationEntry, MoneyCents,
    entry::manual_total,
    util::apply_remainder_to_last,
};

/// Recomputes every automatic share so that the selected entries add up to
/// `total`.
///
/// - unselected entries are cleared (no amount, no pin);
/// - pinned entries keep their amount;
/// - what the pins leave over is divided among the automatic entries, each
///   share rounded to the cent, and the signed rounding difference goes to
///   the last of them in member order (never below zero).
///
/// A negative `total` counts as zero. When the pins alone exceed the total,
/// nothing is left to re-flow into, or the last share would go negative,
/// the mismatch stays visible for the validator instead of being hidden here.
pub fn redistribute(entries: &mut [AllocationEntry], total: MoneyCents) {
    let total = total.non_negative();

    for entry in entries.iter_mut().filter(|e| !e.selected) {
        entry.clear();
    }

    let remaining = (total - manual_total(entries)).non_negative();
    let auto_count = entries.iter().filter(|e| e.is_auto()).count();
    let Some(share) = remaining.div_round(auto_count) else {
        return;
    };

    for entry in entries.iter_mut().filter(|e| e.is_auto()) {
        entry.amount = share;
    }
    let diff = remaining - share * auto_count;
    if !diff.is_zero() {
        apply_remainder_to_last(
            entries
                .iter_mut()
                .filter(|e| e.is_auto())
                .map(|e| &mut e.amount),
            diff,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: i64) -> Vec<AllocationEntry> {
        (1..=n)
            .map(|id| AllocationEntry::new(id, format!("m{id}")))
            .collect()
    }

    fn amounts(entries: &[AllocationEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.amount.cents()).collect()
    }

    #[test]
    fn remainder_lands_on_last_auto_entry() {
        let mut e = entries(3);
        redistribute(&mut e, MoneyCents::new(1000));
        assert_eq!(amounts(&e), vec![333, 333, 334]);
    }

    #[test]
    fn pinned_share_is_kept_and_rest_is_split() {
        let mut e = entries(3);
        e[0].manual = true;
        e[0].amount = MoneyCents::new(400);
        redistribute(&mut e, MoneyCents::new(1000));
        assert_eq!(amounts(&e), vec![400, 300, 300]);
    }

    #[test]
    fn remainder_skips_trailing_pinned_entry() {
        let mut e = entries(3);
        e[2].manual = true;
        e[2].amount = MoneyCents::new(1);
        redistribute(&mut e, MoneyCents::new(1000));
        assert_eq!(amounts(&e), vec![500, 499, 1]);
    }

    #[test]
    fn shares_round_to_nearest_and_last_absorbs_the_difference() {
        let mut e = entries(4);
        redistribute(&mut e, MoneyCents::new(1003));
        assert_eq!(amounts(&e), vec![251, 251, 251, 250]);

        let mut e = entries(6);
        redistribute(&mut e, MoneyCents::new(1000));
        assert_eq!(amounts(&e), vec![167, 167, 167, 167, 167, 165]);

        let mut e = entries(3);
        redistribute(&mut e, MoneyCents::new(5));
        assert_eq!(amounts(&e), vec![2, 2, 1]);
    }

    #[test]
    fn negative_difference_is_clamped_on_the_last_share() {
        let mut e = entries(8);
        redistribute(&mut e, MoneyCents::new(5));
        assert_eq!(amounts(&e), vec![1, 1, 1, 1, 1, 1, 1, 0]);
    }

    #[test]
    fn unselected_entries_are_cleared() {
        let mut e = entries(3);
        e[1].selected = false;
        e[1].manual = true;
        e[1].amount = MoneyCents::new(700);
        redistribute(&mut e, MoneyCents::new(1000));
        assert_eq!(amounts(&e), vec![500, 0, 500]);
        assert!(!e[1].manual);
    }

    #[test]
    fn negative_total_counts_as_zero() {
        let mut e = entries(2);
        e[0].amount = MoneyCents::new(50);
        redistribute(&mut e, MoneyCents::new(-100));
        assert_eq!(amounts(&e), vec![0, 0]);
    }

    #[test]
    fn all_pinned_leaves_remainder_unassigned() {
        let mut e = entries(2);
        for entry in &mut e {
            entry.manual = true;
            entry.amount = MoneyCents::new(200);
        }
        redistribute(&mut e, MoneyCents::new(1000));
        assert_eq!(amounts(&e), vec![200, 200]);
    }

    #[test]
    fn over_pinned_total_zeroes_auto_entries() {
        let mut e = entries(3);
        e[0].manual = true;
        e[0].amount = MoneyCents::new(1200);
        redistribute(&mut e, MoneyCents::new(1000));
        assert_eq!(amounts(&e), vec![1200, 0, 0]);
    }
}
