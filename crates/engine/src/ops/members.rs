use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{Member, ResultEngine, members};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Adds a member to an existing group.
    pub async fn create_member(&self, group_id: i64, name: &str) -> ResultEngine<Member> {
        let name = normalize_required_name(name, "member")?;
        with_tx!(self, |db_tx| {
            self.require_group(&db_tx, group_id).await?;

            let model = members::ActiveModel {
                id: ActiveValue::NotSet,
                group_id: ActiveValue::Set(group_id),
                name: ActiveValue::Set(name),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(group_id, member_id = model.id, "member created");
            Ok(Member::from(model))
        })
    }

    /// Lists the members of a group in insertion order.
    pub async fn list_members(&self, group_id: i64) -> ResultEngine<Vec<Member>> {
        with_tx!(self, |db_tx| {
            self.require_group(&db_tx, group_id).await?;
            let models = self.group_members(&db_tx, group_id).await?;
            tracing::debug!(group_id, members = models.len(), "listing members");
            Ok(models.into_iter().map(Member::from).collect())
        })
    }
}
