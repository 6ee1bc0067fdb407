//! Expense primitives.
//!
//! An `Expense` is a payment fronted by one member of a group. It is always
//! persisted together with the `Split`s allocating its amount to members.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{MoneyCents, Split};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub group_id: i64,
    pub title: String,
    pub amount: MoneyCents,
    pub payer_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A split joined with the name of the member it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitDetail {
    pub split: Split,
    pub member_name: Option<String>,
}

/// An expense as presented to readers: payer name and splits included.
///
/// Names are `None` only when the referenced member row is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDetail {
    pub expense: Expense,
    pub payer_name: Option<String>,
    pub splits: Vec<SplitDetail>,
}

impl ExpenseDetail {
    /// Sum of the shares allocated by this expense's splits.
    #[must_use]
    pub fn allocated(&self) -> MoneyCents {
        self.splits.iter().map(|detail| detail.split.share).sum()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_id: i64,
    pub title: String,
    pub amount_minor: i64,
    pub payer_id: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::splits::Entity")]
    Splits,
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Groups,
}

impl Related<super::splits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Splits.def()
    }
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            title: model.title,
            amount: MoneyCents::new(model.amount_minor),
            payer_id: model.payer_id,
            created_at: model.created_at,
        }
    }
}
