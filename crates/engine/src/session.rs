//! The allocation session: state behind one "add/edit expense" form.
//!
//! A session owns the ordered entries for the group members together with
//! the rest of the form (total, description, payer). Every edit is applied
//! synchronously and leaves the entries settled and validated. The only
//! asynchronous step is the submission, split in three so the caller never
//! holds the session across the network call:
//!
//! 1. [`AllocationSession::begin_submit`] checks the form, builds the request
//!    and locks the session;
//! 2. [`PendingSubmission::send`] talks to the [`ExpenseGateway`];
//! 3. [`AllocationSession::finish`] applies the outcome.
//!
//! Dropping or closing the session cancels a pending submission.

use api_types::{
    expense::{ExpenseUpdate, ExpenseView},
    group::Member,
};
use tokio::sync::watch;

use crate::{
    AllocationEntry, EngineError, ExpenseGateway, GatewayError, MoneyCents, ResultEngine,
    SplitIssue, SubmitOutcome, SubmitRequest, import_from_record, ops, payload::build_expense,
    redistribute, validate,
};

/// Whether the form creates a new expense or edits a stored one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Edit { expense_id: i64 },
}

#[derive(Debug)]
pub struct AllocationSession {
    group_id: i64,
    members: Vec<Member>,
    entries: Vec<AllocationEntry>,
    total: Option<MoneyCents>,
    description: String,
    paid_by: Option<i64>,
    photo_url: Option<String>,
    mode: SessionMode,
    issue: Option<SplitIssue>,
    last_error: Option<String>,
    in_flight: bool,
    closed: bool,
    teardown: watch::Sender<bool>,
}

impl AllocationSession {
    /// A blank form: everybody takes part, nothing is pinned.
    pub fn create(group_id: i64, members: Vec<Member>, current_user: Option<i64>) -> Self {
        let entries = members.iter().map(AllocationEntry::from).collect();
        let paid_by = default_payer(&members, current_user);
        tracing::debug!(group_id, members = members.len(), "new expense session");
        Self::with_state(group_id, members, entries, SessionMode::Create, paid_by)
    }

    /// A form pre-filled from a stored expense.
    pub fn edit(
        group_id: i64,
        members: Vec<Member>,
        expense: &ExpenseView,
        current_user: Option<i64>,
    ) -> Self {
        let entries = import_from_record(&members, &expense.splits);
        let paid_by = expense
            .paid_by
            .as_ref()
            .map(|payer| payer.id)
            .or_else(|| default_payer(&members, current_user));
        tracing::debug!(
            group_id,
            expense_id = expense.id,
            splits = expense.splits.len(),
            "edit expense session"
        );

        let mut session = Self::with_state(
            group_id,
            members,
            entries,
            SessionMode::Edit {
                expense_id: expense.id,
            },
            paid_by,
        );
        session.description = expense.description.clone().unwrap_or_default();
        session.photo_url = expense.photo_url.clone();
        session.total = Some(MoneyCents::new(expense.amount_minor));
        session.settle();
        session
    }

    fn with_state(
        group_id: i64,
        members: Vec<Member>,
        entries: Vec<AllocationEntry>,
        mode: SessionMode,
        paid_by: Option<i64>,
    ) -> Self {
        let (teardown, _) = watch::channel(false);
        Self {
            group_id,
            members,
            entries,
            total: None,
            description: String::new(),
            paid_by,
            photo_url: None,
            mode,
            issue: None,
            last_error: None,
            in_flight: false,
            closed: false,
            teardown,
        }
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Entries in member order.
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn total(&self) -> Option<MoneyCents> {
        self.total
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn paid_by(&self) -> Option<i64> {
        self.paid_by
    }

    /// The validation problem to show next to the form, if any.
    pub fn issue(&self) -> Option<SplitIssue> {
        self.issue
    }

    /// Message of the last failed submission or rejected submit attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_total(&mut self, total: Option<MoneyCents>) -> ResultEngine<()> {
        self.ensure_editable()?;
        self.total = total;
        tracing::debug!(group_id = self.group_id, total = ?total, "total changed");
        self.settle();
        Ok(())
    }

    /// Sets the total from user input; unreadable input clears it.
    pub fn set_total_input(&mut self, raw: &str) -> ResultEngine<Option<MoneyCents>> {
        let total = raw.parse::<MoneyCents>().ok();
        self.set_total(total)?;
        Ok(total)
    }

    pub fn set_description(&mut self, description: &str) -> ResultEngine<()> {
        self.ensure_editable()?;
        self.description = description.to_string();
        Ok(())
    }

    pub fn set_paid_by(&mut self, member_id: i64) -> ResultEngine<()> {
        self.ensure_editable()?;
        if !self.members.iter().any(|m| m.id == member_id) {
            return Err(EngineError::UnknownMember(member_id));
        }
        self.paid_by = Some(member_id);
        Ok(())
    }

    /// Adds or removes a participant. Returns whether it is now selected.
    pub fn toggle(&mut self, member_id: i64) -> ResultEngine<bool> {
        self.ensure_editable()?;
        let total = self.redistribution_total();
        let selected = ops::toggle(&mut self.entries, member_id, total)?;
        tracing::debug!(group_id = self.group_id, member_id, selected, "participant toggled");
        self.refresh_issue();
        Ok(selected)
    }

    /// Pins a participant's share. Returns the amount actually pinned.
    pub fn set_manual(&mut self, member_id: i64, raw: &str) -> ResultEngine<MoneyCents> {
        self.ensure_editable()?;
        let pinned = ops::set_manual(&mut self.entries, member_id, raw, self.total)?;
        tracing::debug!(group_id = self.group_id, member_id, %pinned, "share pinned");
        self.refresh_issue();
        Ok(pinned)
    }

    pub fn reset_manual(&mut self, member_id: i64) -> ResultEngine<()> {
        self.ensure_editable()?;
        let total = self.redistribution_total();
        ops::reset_manual(&mut self.entries, member_id, total)?;
        tracing::debug!(group_id = self.group_id, member_id, "share unpinned");
        self.refresh_issue();
        Ok(())
    }

    /// Checks the form and locks the session for submission.
    ///
    /// On a rejected form the message is kept in [`Self::last_error`] and the
    /// session stays editable.
    pub fn begin_submit(&mut self) -> ResultEngine<PendingSubmission> {
        self.ensure_editable()?;

        let photo_url = match self.mode {
            SessionMode::Create => None,
            SessionMode::Edit { .. } => self.photo_url.clone(),
        };
        let expense = build_expense(
            &self.entries,
            self.total,
            &self.description,
            self.paid_by,
            photo_url,
        )
        .inspect_err(|issue| {
            tracing::warn!(group_id = self.group_id, %issue, "submission rejected");
            self.last_error = Some(issue.to_string());
        })?;

        let request = match self.mode {
            SessionMode::Create => SubmitRequest::Create(expense),
            SessionMode::Edit { expense_id } => SubmitRequest::Update(ExpenseUpdate {
                id: expense_id,
                expense,
            }),
        };

        self.in_flight = true;
        self.last_error = None;
        tracing::info!(
            group_id = self.group_id,
            amount = request.expense().amount_minor,
            splits = request.expense().splits.len(),
            "submitting expense"
        );

        Ok(PendingSubmission {
            group_id: self.group_id,
            request,
            teardown: self.teardown.subscribe(),
        })
    }

    /// Applies the outcome of a submission.
    ///
    /// On success the entries are discarded and the session is closed. On
    /// failure the entries are kept as they were so the user can retry.
    pub fn finish(&mut self, outcome: SubmitOutcome) -> ResultEngine<ExpenseView> {
        self.in_flight = false;
        match outcome {
            SubmitOutcome::Stored(view) => {
                tracing::info!(group_id = self.group_id, expense_id = view.id, "expense stored");
                self.close();
                Ok(view)
            }
            SubmitOutcome::Failed(err) => {
                tracing::warn!(group_id = self.group_id, error = %err, "expense submission failed");
                self.last_error = Some(failure_message(self.mode, &err));
                Err(err.into())
            }
            SubmitOutcome::Cancelled => Err(EngineError::SessionClosed),
        }
    }

    /// Runs the whole submission against `gateway`.
    pub async fn submit<G: ExpenseGateway>(&mut self, gateway: &G) -> ResultEngine<ExpenseView> {
        let pending = self.begin_submit()?;
        let outcome = pending.send(gateway).await;
        self.finish(outcome)
    }

    /// Ends the session; a pending submission is cancelled.
    pub fn close(&mut self) {
        self.closed = true;
        self.entries.clear();
        self.issue = None;
        self.teardown.send_replace(true);
    }

    fn ensure_editable(&self) -> ResultEngine<()> {
        if self.closed {
            return Err(EngineError::SessionClosed);
        }
        if self.in_flight {
            return Err(EngineError::SubmissionInFlight);
        }
        Ok(())
    }

    fn redistribution_total(&self) -> MoneyCents {
        self.total.unwrap_or(MoneyCents::ZERO)
    }

    fn settle(&mut self) {
        let total = self.redistribution_total();
        redistribute(&mut self.entries, total);
        self.refresh_issue();
    }

    fn refresh_issue(&mut self) {
        self.issue = validate(&self.entries, self.total);
    }
}

impl Drop for AllocationSession {
    fn drop(&mut self) {
        self.teardown.send_replace(true);
    }
}

/// A locked, built request waiting to be sent.
#[derive(Debug)]
pub struct PendingSubmission {
    group_id: i64,
    request: SubmitRequest,
    teardown: watch::Receiver<bool>,
}

impl PendingSubmission {
    pub fn request(&self) -> &SubmitRequest {
        &self.request
    }

    /// Sends the request, unless the session is torn down first.
    pub async fn send<G: ExpenseGateway>(self, gateway: &G) -> SubmitOutcome {
        let Self {
            group_id,
            request,
            mut teardown,
        } = self;

        let call = async move {
            match request {
                SubmitRequest::Create(expense) => gateway.create_expense(group_id, expense).await,
                SubmitRequest::Update(update) => gateway.update_expense(group_id, update).await,
            }
        };

        let torn_down = async move {
            loop {
                if *teardown.borrow_and_update() {
                    break;
                }
                if teardown.changed().await.is_err() {
                    break;
                }
            }
        };

        tokio::select! {
            biased;
            _ = torn_down => {
                tracing::debug!(group_id, "submission cancelled by session teardown");
                SubmitOutcome::Cancelled
            }
            result = call => SubmitOutcome::from(result),
        }
    }
}

fn default_payer(members: &[Member], current_user: Option<i64>) -> Option<i64> {
    current_user
        .filter(|id| members.iter().any(|m| m.id == *id))
        .or_else(|| members.first().map(|m| m.id))
}

fn failure_message(mode: SessionMode, err: &GatewayError) -> String {
    let message = err.to_string();
    if !message.trim().is_empty() {
        return message;
    }
    match mode {
        SessionMode::Create => "Failed to create expense.".to_string(),
        SessionMode::Edit { .. } => "Failed to update expense.".to_string(),
    }
}
