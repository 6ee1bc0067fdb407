//! Command structs for engine write operations.

use crate::{MoneyCents, Share, SplitMode};

/// Create an expense and its splits.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub group_id: i64,
    pub title: String,
    pub amount: MoneyCents,
    pub payer_id: i64,
    pub split: SplitMode,
}

impl ExpenseCmd {
    /// An expense split equally across every member of the group.
    #[must_use]
    pub fn new(group_id: i64, amount: MoneyCents, payer_id: i64) -> Self {
        Self {
            group_id,
            title: String::new(),
            amount,
            payer_id,
            split: SplitMode::Equal,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the equal split with explicit shares.
    #[must_use]
    pub fn shares(mut self, shares: Vec<Share>) -> Self {
        self.split = SplitMode::Explicit(shares);
        self
    }
}
