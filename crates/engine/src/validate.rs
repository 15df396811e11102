use crate::{
    AllocationEntry, MoneyCents, SplitIssue,
    entry::{allocated_total, manual_total},
};

/// Current problem with the allocation, if any.
///
/// Nothing is reported until a positive total is entered. Checks run in
/// priority order: pins over the total, empty selection, then any cent of
/// difference between the selected shares and the total.
pub fn validate(entries: &[AllocationEntry], total: Option<MoneyCents>) -> Option<SplitIssue> {
    let total = total.filter(|t| t.is_positive())?;

    if manual_total(entries) > total {
        return Some(SplitIssue::ManualExceedsTotal);
    }
    if !entries.iter().any(|e| e.selected) {
        return Some(SplitIssue::NoParticipants);
    }
    if allocated_total(entries) != total {
        return Some(SplitIssue::Unbalanced);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redistribute;

    fn entries(n: i64) -> Vec<AllocationEntry> {
        (1..=n)
            .map(|id| AllocationEntry::new(id, format!("m{id}")))
            .collect()
    }

    #[test]
    fn settled_allocation_has_no_issue() {
        let total = MoneyCents::new(1000);
        let mut e = entries(3);
        redistribute(&mut e, total);
        assert_eq!(validate(&e, Some(total)), None);
    }

    #[test]
    fn missing_or_zero_total_clears_issues() {
        let mut e = entries(1);
        e[0].selected = false;
        assert_eq!(validate(&e, None), None);
        assert_eq!(validate(&e, Some(MoneyCents::ZERO)), None);
    }

    #[test]
    fn over_pinned_wins_over_other_issues() {
        let mut e = entries(2);
        e[0].manual = true;
        e[0].amount = MoneyCents::new(1500);
        assert_eq!(
            validate(&e, Some(MoneyCents::new(1000))),
            Some(SplitIssue::ManualExceedsTotal)
        );
    }

    #[test]
    fn empty_selection_is_reported() {
        let mut e = entries(2);
        for entry in &mut e {
            entry.selected = false;
        }
        assert_eq!(
            validate(&e, Some(MoneyCents::new(1000))),
            Some(SplitIssue::NoParticipants)
        );
    }

    #[test]
    fn one_cent_short_is_unbalanced() {
        let mut e = entries(2);
        for entry in &mut e {
            entry.manual = true;
        }
        e[0].amount = MoneyCents::new(500);
        e[1].amount = MoneyCents::new(499);
        assert_eq!(
            validate(&e, Some(MoneyCents::new(1000))),
            Some(SplitIssue::Unbalanced)
        );
    }
}
