use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, JoinType, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};

use crate::{
    EngineError, Expense, ExpenseCmd, ExpenseDetail, ResultEngine, Split, SplitDetail, allocate,
    expenses, splits,
};

use super::{Engine, with_tx};

impl Engine {
    /// Records an expense and its splits as one atomic unit.
    ///
    /// Validation happens before anything is written:
    /// - the amount must be positive
    /// - the group must exist and have at least one member
    /// - the payer must be a member of the group
    /// - the split must allocate to members of the group (see [`allocate`])
    ///
    /// The expense row and the split rows share one DB transaction, so a
    /// failure while inserting splits leaves no expense behind.
    pub async fn create_expense(&self, cmd: ExpenseCmd) -> ResultEngine<ExpenseDetail> {
        if !cmd.amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        let title = cmd.title.trim().to_string();

        with_tx!(self, |db_tx| {
            self.require_group(&db_tx, cmd.group_id).await?;
            let member_models = self.group_members(&db_tx, cmd.group_id).await?;
            if member_models.is_empty() {
                return Err(EngineError::NoMembers(cmd.group_id));
            }

            let names: HashMap<i64, String> = member_models
                .into_iter()
                .map(|model| (model.id, model.name))
                .collect();
            if !names.contains_key(&cmd.payer_id) {
                return Err(EngineError::InvalidPayer(format!(
                    "member {} does not belong to group {}",
                    cmd.payer_id, cmd.group_id
                )));
            }

            let mut member_ids: Vec<i64> = names.keys().copied().collect();
            member_ids.sort_unstable();
            let shares = allocate(cmd.amount, &cmd.split, &member_ids, self.policy)?;

            let expense = expenses::ActiveModel {
                id: ActiveValue::NotSet,
                group_id: ActiveValue::Set(cmd.group_id),
                title: ActiveValue::Set(title),
                amount_minor: ActiveValue::Set(cmd.amount.cents()),
                payer_id: ActiveValue::Set(cmd.payer_id),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            splits::Entity::insert_many(
                shares
                    .iter()
                    .map(|share| splits::ActiveModel::from_share(expense.id, share)),
            )
            .exec(&db_tx)
            .await?;

            let split_models = splits::Entity::find()
                .filter(splits::Column::ExpenseId.eq(expense.id))
                .order_by_asc(splits::Column::Id)
                .all(&db_tx)
                .await?;

            tracing::info!(
                group_id = cmd.group_id,
                expense_id = expense.id,
                amount = %cmd.amount,
                splits = split_models.len(),
                "expense created"
            );

            Ok(detail(
                Expense::from(expense),
                split_models.into_iter().map(Split::from).collect(),
                &names,
            ))
        })
    }

    /// Lists a group's expenses newest first, each with its payer name and
    /// splits.
    pub async fn list_expenses(&self, group_id: i64) -> ResultEngine<Vec<ExpenseDetail>> {
        with_tx!(self, |db_tx| {
            self.require_group(&db_tx, group_id).await?;

            let names: HashMap<i64, String> = self
                .group_members(&db_tx, group_id)
                .await?
                .into_iter()
                .map(|model| (model.id, model.name))
                .collect();

            let expense_models = expenses::Entity::find()
                .filter(expenses::Column::GroupId.eq(group_id))
                .order_by_desc(expenses::Column::Id)
                .all(&db_tx)
                .await?;

            tracing::debug!(
                group_id,
                expenses = expense_models.len(),
                "listing expenses"
            );

            let mut by_expense: HashMap<i64, Vec<Split>> = HashMap::new();
            for split in self.group_splits(&db_tx, group_id).await? {
                by_expense.entry(split.expense_id).or_default().push(split);
            }

            Ok(expense_models
                .into_iter()
                .map(|model| {
                    let splits = by_expense.remove(&model.id).unwrap_or_default();
                    detail(Expense::from(model), splits, &names)
                })
                .collect())
        })
    }

    /// Every split of every expense in the group, ordered by id.
    pub(super) async fn group_splits(
        &self,
        db: &DatabaseTransaction,
        group_id: i64,
    ) -> ResultEngine<Vec<Split>> {
        let models = splits::Entity::find()
            .join(JoinType::InnerJoin, splits::Relation::Expenses.def())
            .filter(expenses::Column::GroupId.eq(group_id))
            .order_by_asc(splits::Column::Id)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Split::from).collect())
    }
}

fn detail(expense: Expense, splits: Vec<Split>, names: &HashMap<i64, String>) -> ExpenseDetail {
    let payer_name = names.get(&expense.payer_id).cloned();
    if payer_name.is_none() {
        tracing::warn!(
            expense_id = expense.id,
            payer_id = expense.payer_id,
            "expense payer is not a group member"
        );
    }
    let splits = splits
        .into_iter()
        .map(|split| SplitDetail {
            member_name: names.get(&split.member_id).cloned(),
            split,
        })
        .collect();

    ExpenseDetail {
        expense,
        payer_name,
        splits,
    }
}

