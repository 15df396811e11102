//! Turns settled entries into the request body sent to the expense store.

use api_types::{
    expense::{ExpenseCreate, SplitRecord},
    group::Member,
};

use crate::{AllocationEntry, MoneyCents, SplitIssue, util::apply_remainder_to_last, validate};

/// Split records for the selected entries, in member order.
///
/// Whatever difference remains between `total` and the shares is put on the
/// last record, so the records add up to `total` even if the entries drifted
/// away from it. The last record never goes below zero: when the other
/// shares alone exceed `total` the records keep the overshoot.
/// [`build_expense`] never gets there, it refuses unbalanced entries first.
pub fn build_splits(entries: &[AllocationEntry], total: MoneyCents) -> Vec<SplitRecord> {
    let mut shares: Vec<(&AllocationEntry, MoneyCents)> = entries
        .iter()
        .filter(|e| e.selected)
        .map(|e| (e, e.amount))
        .collect();

    let diff = total - shares.iter().map(|(_, amount)| *amount).sum::<MoneyCents>();
    if !diff.is_zero() {
        apply_remainder_to_last(shares.iter_mut().map(|(_, amount)| amount), diff);
    }

    shares
        .into_iter()
        .map(|(entry, amount)| SplitRecord {
            user: Member {
                id: entry.member_id,
                name: entry.name.clone(),
            },
            amount_minor: amount.cents(),
        })
        .collect()
}

/// Checks the whole form and builds the create body.
///
/// The payer falls back to the first selected participant when none was
/// chosen.
pub fn build_expense(
    entries: &[AllocationEntry],
    total: Option<MoneyCents>,
    description: &str,
    paid_by: Option<i64>,
    photo_url: Option<String>,
) -> Result<ExpenseCreate, SplitIssue> {
    let description = description.trim();
    if description.is_empty() {
        return Err(SplitIssue::MissingDescription);
    }
    let total = total
        .filter(|t| t.is_positive())
        .ok_or(SplitIssue::InvalidTotal)?;
    let first_selected = entries
        .iter()
        .find(|e| e.selected)
        .ok_or(SplitIssue::NoParticipants)?;
    if let Some(issue) = validate(entries, Some(total)) {
        return Err(issue);
    }

    Ok(ExpenseCreate {
        description: description.to_string(),
        amount_minor: total.cents(),
        paid_by_id: paid_by.unwrap_or(first_selected.member_id),
        photo_url,
        splits: build_splits(entries, total),
    })
}
