use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{Group, ResultEngine, groups};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Creates a new group. The name is trimmed and must not be blank.
    pub async fn create_group(&self, name: &str) -> ResultEngine<Group> {
        let name = normalize_required_name(name, "group")?;
        with_tx!(self, |db_tx| {
            let model = groups::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(group_id = model.id, "group created");
            Ok(Group::from(model))
        })
    }

    /// Lists every group, newest first.
    pub async fn list_groups(&self) -> ResultEngine<Vec<Group>> {
        with_tx!(self, |db_tx| {
            let models = groups::Entity::find()
                .order_by_desc(groups::Column::Id)
                .all(&db_tx)
                .await?;
            tracing::debug!(groups = models.len(), "listing groups");
            Ok(models.into_iter().map(Group::from).collect())
        })
    }

    /// Point lookup of a group.
    pub async fn group(&self, group_id: i64) -> ResultEngine<Group> {
        with_tx!(self, |db_tx| {
            let model = self.require_group(&db_tx, group_id).await?;
            Ok(Group::from(model))
        })
    }
}
