//! The module contains `Split`, one member's share of an expense.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{MoneyCents, Share};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub id: i64,
    pub expense_id: i64,
    pub member_id: i64,
    pub share: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "splits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub expense_id: i64,
    pub member_id: i64,
    pub share_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenses::Entity",
        from = "Column::ExpenseId",
        to = "super::expenses::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Builds the row persisting an allocated share of `expense_id`.
    pub(crate) fn from_share(expense_id: i64, share: &Share) -> Self {
        Self {
            id: ActiveValue::NotSet,
            expense_id: ActiveValue::Set(expense_id),
            member_id: ActiveValue::Set(share.member_id),
            share_minor: ActiveValue::Set(share.share.cents()),
        }
    }
}

impl From<Model> for Split {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            expense_id: model.expense_id,
            member_id: model.member_id,
            share: MoneyCents::new(model.share_minor),
        }
    }
}
