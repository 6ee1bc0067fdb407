use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monetary input as sent by clients.
///
/// Clients may send a JSON number (`12.5`) or a decimal string (`"12,50"`);
/// both are converted to cents by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

pub mod group {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GroupNew {
        #[serde(default)]
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Group {
        pub id: i64,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod member {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MemberNew {
        #[serde(default)]
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Member {
        pub id: i64,
        pub group_id: i64,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod expense {
    use super::*;

    fn default_equal_split() -> bool {
        true
    }

    /// One explicit share in an expense request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitNew {
        pub member_id: i64,
        pub share: Amount,
    }

    /// Request body for creating an expense.
    ///
    /// `equal_split` defaults to `true`; when `false`, `splits` carries the
    /// explicit shares.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        #[serde(default)]
        pub title: String,
        pub amount: Option<Amount>,
        pub payer_id: Option<i64>,
        #[serde(default = "default_equal_split")]
        pub equal_split: bool,
        #[serde(default)]
        pub splits: Vec<SplitNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Split {
        pub id: i64,
        pub expense_id: i64,
        pub member_id: i64,
        pub member_name: Option<String>,
        pub share: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        pub group_id: i64,
        pub title: String,
        pub amount: f64,
        pub payer_id: i64,
        pub payer_name: Option<String>,
        pub created_at: DateTime<Utc>,
        pub splits: Vec<Split>,
    }
}

pub mod balance {
    use super::*;

    /// A member with their net balance: positive means the group owes them,
    /// negative means they owe the group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberBalance {
        #[serde(flatten)]
        pub member: member::Member,
        pub balance: f64,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
