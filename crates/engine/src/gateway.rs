//! The expense store as seen from the allocation engine.
//!
//! Transport, authentication and retries belong to the implementor; the
//! engine only needs the two calls below.

use std::future::Future;

use api_types::expense::{ExpenseCreate, ExpenseUpdate, ExpenseView};

use crate::GatewayError;

/// Create/update calls against the stored expenses of a group.
pub trait ExpenseGateway {
    fn create_expense(
        &self,
        group_id: i64,
        expense: ExpenseCreate,
    ) -> impl Future<Output = Result<ExpenseView, GatewayError>> + Send;

    fn update_expense(
        &self,
        group_id: i64,
        update: ExpenseUpdate,
    ) -> impl Future<Output = Result<ExpenseView, GatewayError>> + Send;
}

/// Body of a pending submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(ExpenseCreate),
    Update(ExpenseUpdate),
}

impl SubmitRequest {
    /// The expense body, whichever the mode.
    pub fn expense(&self) -> &ExpenseCreate {
        match self {
            Self::Create(expense) => expense,
            Self::Update(update) => &update.expense,
        }
    }
}

/// How a submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Stored(ExpenseView),
    Failed(GatewayError),
    /// The editing session went away before the store answered.
    Cancelled,
}

impl From<Result<ExpenseView, GatewayError>> for SubmitOutcome {
    fn from(result: Result<ExpenseView, GatewayError>) -> Self {
        match result {
            Ok(view) => Self::Stored(view),
            Err(err) => Self::Failed(err),
        }
    }
}
