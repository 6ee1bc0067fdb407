//! Split allocation.
//!
//! Turns an expense amount plus a split mode into the ordered list of
//! `(member_id, share)` pairs that gets persisted as the expense's splits.
//! Everything here is pure: no storage access, no side effects.

use std::collections::HashSet;

use serde::Deserialize;

use crate::{EngineError, MoneyCents, ResultEngine};

/// How equal splits deal with amounts that do not divide evenly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualRounding {
    /// Every member gets `amount / count` rounded half-up to the cent. The
    /// shares may miss the amount by up to half a cent per member
    /// (`10.00 / 3` gives `3.33` three times).
    #[default]
    Uniform,
    /// Every member gets `amount / count` rounded down, then the leftover
    /// cents go one each to the first members. Shares always sum to the
    /// amount.
    DistributeRemainder,
}

/// Whether explicit shares must add up to the expense amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplicitSum {
    /// Shares must sum exactly to the amount.
    #[default]
    Strict,
    /// Any sum is accepted.
    Lenient,
}

/// Policy knobs for [`allocate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    pub equal_rounding: EqualRounding,
    pub explicit_sum: ExplicitSum,
}

/// One member's share of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share {
    pub member_id: i64,
    pub share: MoneyCents,
}

impl Share {
    #[must_use]
    pub fn new(member_id: i64, share: MoneyCents) -> Self {
        Self { member_id, share }
    }
}

/// How an expense is divided among members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitMode {
    /// Divide evenly across every member of the group.
    Equal,
    /// Use the shares given by the caller.
    Explicit(Vec<Share>),
}

/// Allocates `amount` across members.
///
/// `group_members` are the ids of the group's members in listing order. Equal
/// mode splits across all of them; explicit mode only uses them to check that
/// every share targets a member of the group.
pub fn allocate(
    amount: MoneyCents,
    mode: &SplitMode,
    group_members: &[i64],
    policy: AllocationPolicy,
) -> ResultEngine<Vec<Share>> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
    }

    match mode {
        SplitMode::Equal => allocate_equal(amount, group_members, policy.equal_rounding),
        SplitMode::Explicit(shares) => {
            allocate_explicit(amount, shares, group_members, policy.explicit_sum)
        }
    }
}

fn allocate_equal(
    amount: MoneyCents,
    members: &[i64],
    rounding: EqualRounding,
) -> ResultEngine<Vec<Share>> {
    if members.is_empty() {
        return Err(EngineError::InvalidSplit(
            "equal split needs at least one member".to_string(),
        ));
    }

    let count = members.len() as i64;
    let base = amount.cents() / count;
    let remainder = amount.cents() % count;

    let shares = match rounding {
        EqualRounding::Uniform => {
            let share = if remainder * 2 >= count { base + 1 } else { base };
            members
                .iter()
                .map(|&member_id| Share::new(member_id, MoneyCents::new(share)))
                .collect()
        }
        EqualRounding::DistributeRemainder => members
            .iter()
            .enumerate()
            .map(|(idx, &member_id)| {
                let extra = i64::from((idx as i64) < remainder);
                Share::new(member_id, MoneyCents::new(base + extra))
            })
            .collect(),
    };

    Ok(shares)
}

fn allocate_explicit(
    amount: MoneyCents,
    shares: &[Share],
    members: &[i64],
    sum_check: ExplicitSum,
) -> ResultEngine<Vec<Share>> {
    if shares.is_empty() {
        return Err(EngineError::InvalidSplit("splits must not be empty".to_string()));
    }

    let known: HashSet<i64> = members.iter().copied().collect();
    let mut seen = HashSet::with_capacity(shares.len());
    let mut total = MoneyCents::ZERO;

    for share in shares {
        if !known.contains(&share.member_id) {
            return Err(EngineError::InvalidSplit(format!(
                "member {} does not belong to the group",
                share.member_id
            )));
        }
        if !seen.insert(share.member_id) {
            return Err(EngineError::InvalidSplit(format!(
                "member {} appears more than once",
                share.member_id
            )));
        }
        if share.share.is_negative() {
            return Err(EngineError::InvalidSplit(format!(
                "share for member {} must not be negative",
                share.member_id
            )));
        }
        total = total
            .checked_add(share.share)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
    }

    if sum_check == ExplicitSum::Strict && total != amount {
        return Err(EngineError::InvalidSplit(format!(
            "shares sum to {total}, expected {amount}"
        )));
    }

    Ok(shares.to_vec())
}
