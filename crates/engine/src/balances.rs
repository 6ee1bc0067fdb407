//! Net balance computation.
//!
//! The payer of an expense fronted the whole amount, so they are credited with
//! it; every split debits its member by the share they owe back (the payer
//! included, when they take part in the split). Positive balances are owed to
//! the member, negative balances are owed by the member.

use std::collections::HashMap;

use crate::{EngineError, Expense, Member, MoneyCents, ResultEngine, Split};

/// A member together with their net position in the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberBalance {
    pub member: Member,
    pub balance: MoneyCents,
}

/// Computes every member's balance from the group's full history.
///
/// The output has one entry per member, in the order `members` are given,
/// members without activity included at zero. Expenses or splits pointing at
/// somebody outside `members` are reported as [`EngineError::Inconsistent`],
/// and so is a balance that no longer fits in `i64` cents.
pub fn compute_balances(
    members: Vec<Member>,
    expenses: &[Expense],
    splits: &[Split],
) -> ResultEngine<Vec<MemberBalance>> {
    let mut balances: HashMap<i64, MoneyCents> = members
        .iter()
        .map(|member| (member.id, MoneyCents::ZERO))
        .collect();

    for expense in expenses {
        let payer = balances.get_mut(&expense.payer_id).ok_or_else(|| {
            EngineError::Inconsistent(format!(
                "expense {} paid by unknown member {}",
                expense.id, expense.payer_id
            ))
        })?;
        *payer = payer
            .checked_add(expense.amount)
            .ok_or_else(|| overflow(expense.payer_id))?;
    }

    for split in splits {
        let member = balances.get_mut(&split.member_id).ok_or_else(|| {
            EngineError::Inconsistent(format!(
                "split {} assigned to unknown member {}",
                split.id, split.member_id
            ))
        })?;
        *member = member
            .checked_sub(split.share)
            .ok_or_else(|| overflow(split.member_id))?;
    }

    Ok(members
        .into_iter()
        .map(|member| {
            let balance = balances.get(&member.id).copied().unwrap_or_default();
            MemberBalance { member, balance }
        })
        .collect())
}

fn overflow(member_id: i64) -> EngineError {
    EngineError::Inconsistent(format!("balance of member {member_id} overflows"))
}
