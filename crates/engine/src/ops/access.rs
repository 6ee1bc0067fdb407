use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, ResultEngine, groups, members};

use super::Engine;

impl Engine {
    async fn find_group_by_id(
        &self,
        db: &DatabaseTransaction,
        group_id: i64,
    ) -> ResultEngine<Option<groups::Model>> {
        groups::Entity::find_by_id(group_id)
            .one(db)
            .await
            .map_err(Into::into)
    }

    /// Returns the group row or `KeyNotFound` when it does not exist.
    pub(super) async fn require_group(
        &self,
        db: &DatabaseTransaction,
        group_id: i64,
    ) -> ResultEngine<groups::Model> {
        self.find_group_by_id(db, group_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))
    }

    /// Members of a group ordered by id, i.e. by insertion.
    pub(super) async fn group_members(
        &self,
        db: &DatabaseTransaction,
        group_id: i64,
    ) -> ResultEngine<Vec<members::Model>> {
        members::Entity::find()
            .filter(members::Column::GroupId.eq(group_id))
            .order_by_asc(members::Column::Id)
            .all(db)
            .await
            .map_err(Into::into)
    }
}
