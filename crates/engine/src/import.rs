//! Rebuilds allocation entries from a stored expense (edit flow).
//!
//! Stored splits only keep the final amounts, not which of them were pinned.
//! The import therefore guesses: a split where every share sits next to the
//! even share was an automatic split, anything else is imported fully pinned.

use std::collections::HashMap;

use api_types::{expense::SplitRecord, group::Member};

use crate::{AllocationEntry, MoneyCents};

/// Deviation from the even share at which a record stops reading as "even".
///
/// The bound is exclusive: a share exactly two cents away is read as pinned.
pub const EVEN_SPLIT_TOLERANCE: MoneyCents = MoneyCents::new(2);

/// Builds one entry per member, in member order, from stored split records.
///
/// Members without a record are unselected. Records for users outside
/// `members` still count toward the even-split check but produce no entry.
/// When a user appears twice, the last record wins.
pub fn import_from_record(members: &[Member], splits: &[SplitRecord]) -> Vec<AllocationEntry> {
    let mut by_user: HashMap<i64, MoneyCents> = HashMap::with_capacity(splits.len());
    for split in splits {
        by_user.insert(split.user.id, MoneyCents::new(split.amount_minor));
    }

    let even = is_even_split(by_user.values().copied());

    members
        .iter()
        .map(|member| {
            let mut entry = AllocationEntry::from(member);
            match by_user.get(&member.id) {
                Some(amount) => {
                    entry.amount = *amount;
                    entry.manual = !even;
                }
                None => {
                    entry.selected = false;
                }
            }
            entry
        })
        .collect()
}

/// `true` when every amount is within [`EVEN_SPLIT_TOLERANCE`] of the
/// rounded even share of their sum. An empty split is not even.
fn is_even_split<I>(mut amounts: I) -> bool
where
    I: Iterator<Item = MoneyCents> + Clone,
{
    let count = amounts.clone().count();
    let total: MoneyCents = amounts.clone().sum();
    let Some(even_share) = total.div_round(count) else {
        return false;
    };
    amounts.all(|amount| amount.abs_diff(even_share) < EVEN_SPLIT_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64) -> Member {
        Member {
            id,
            name: format!("m{id}"),
        }
    }

    fn split(id: i64, amount_minor: i64) -> SplitRecord {
        SplitRecord {
            user: member(id),
            amount_minor,
        }
    }

    #[test]
    fn even_split_imports_as_automatic() {
        let members = vec![member(1), member(2)];
        let entries = import_from_record(&members, &[split(1, 500), split(2, 500)]);
        assert!(entries.iter().all(|e| e.selected && !e.manual));
        assert_eq!(entries[0].amount, MoneyCents::new(500));
    }

    #[test]
    fn uneven_split_imports_fully_pinned() {
        let members = vec![member(1), member(2)];
        let entries = import_from_record(&members, &[split(1, 700), split(2, 300)]);
        assert!(entries.iter().all(|e| e.selected && e.manual));
        assert_eq!(entries[0].amount, MoneyCents::new(700));
        assert_eq!(entries[1].amount, MoneyCents::new(300));
    }

    #[test]
    fn rounding_remainder_still_counts_as_even() {
        let members = vec![member(1), member(2), member(3)];
        let entries = import_from_record(&members, &[split(1, 333), split(2, 333), split(3, 334)]);
        assert!(entries.iter().all(|e| !e.manual));
    }

    #[test]
    fn two_cent_deviation_is_not_even() {
        let members = vec![member(1), member(2)];
        let entries = import_from_record(&members, &[split(1, 502), split(2, 498)]);
        assert!(entries.iter().all(|e| e.manual));
    }

    #[test]
    fn absent_members_are_unselected() {
        let members = vec![member(1), member(2), member(3)];
        let entries = import_from_record(&members, &[split(3, 400), split(1, 400)]);
        assert!(entries[0].selected);
        assert!(!entries[1].selected);
        assert!(!entries[1].manual);
        assert_eq!(entries[1].amount, MoneyCents::ZERO);
        assert!(entries[2].selected);
        let order: Vec<i64> = entries.iter().map(|e| e.member_id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_records_keep_the_last() {
        let members = vec![member(1), member(2)];
        let entries = import_from_record(&members, &[split(1, 100), split(2, 500), split(1, 500)]);
        assert_eq!(entries[0].amount, MoneyCents::new(500));
        assert!(!entries[0].manual);
    }

    #[test]
    fn empty_record_selects_nobody() {
        let members = vec![member(1)];
        let entries = import_from_record(&members, &[]);
        assert!(!entries[0].selected);
    }
}
