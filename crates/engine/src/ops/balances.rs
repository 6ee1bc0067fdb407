use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Expense, Member, MemberBalance, ResultEngine, compute_balances, expenses};

use super::{Engine, with_tx};

impl Engine {
    /// Derives every member's net balance from the group's expenses and splits.
    ///
    /// Nothing is cached: the whole history is read in one transaction and
    /// replayed on every call. Output follows member insertion order.
    pub async fn compute_balances(&self, group_id: i64) -> ResultEngine<Vec<MemberBalance>> {
        with_tx!(self, |db_tx| {
            self.require_group(&db_tx, group_id).await?;

            let members: Vec<Member> = self
                .group_members(&db_tx, group_id)
                .await?
                .into_iter()
                .map(Member::from)
                .collect();
            let expenses: Vec<Expense> = expenses::Entity::find()
                .filter(expenses::Column::GroupId.eq(group_id))
                .order_by_asc(expenses::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Expense::from)
                .collect();
            let splits = self.group_splits(&db_tx, group_id).await?;

            tracing::debug!(
                group_id,
                members = members.len(),
                expenses = expenses.len(),
                splits = splits.len(),
                "computing balances"
            );
            compute_balances(members, &expenses, &splits)
        })
    }
}
