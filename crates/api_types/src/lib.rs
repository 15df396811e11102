use serde::{Deserialize, Serialize};

pub mod group {
    use super::*;

    /// A group member as exposed by the group collaborator.
    ///
    /// The same shape is embedded in split records (`user`) and in stored
    /// expenses (`paid_by`, `created_by`).
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Member {
        pub id: i64,
        pub name: String,
    }
}

pub mod expense {
    use super::*;
    use crate::group::Member;

    /// One participant's share of an expense.
    ///
    /// Only participants are listed: a member without a record did not take
    /// part in the expense.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SplitRecord {
        pub user: Member,
        pub amount_minor: i64,
    }

    /// Request body for creating an expense.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseCreate {
        pub description: String,
        /// Must be > 0 and equal to the sum of `splits`.
        pub amount_minor: i64,
        pub paid_by_id: i64,
        pub photo_url: Option<String>,
        pub splits: Vec<SplitRecord>,
    }

    /// Request body for editing an expense: the full replacement body plus
    /// the id of the stored expense.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub id: i64,
        pub expense: ExpenseCreate,
    }

    /// A stored expense, as returned by create/update and consumed by the
    /// edit flow.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i64,
        pub description: Option<String>,
        pub amount_minor: i64,
        pub paid_by: Option<Member>,
        pub created_by: Option<Member>,
        pub photo_url: Option<String>,
        #[serde(default)]
        pub splits: Vec<SplitRecord>,
    }
}
