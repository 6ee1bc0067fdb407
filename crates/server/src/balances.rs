//! Balance endpoint.

use api_types::balance::MemberBalance;
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use crate::{ServerError, members::member_view, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<i64>, ServerError>,
) -> Result<Json<Vec<MemberBalance>>, ServerError> {
    let balances = state.engine.compute_balances(group_id).await?;
    Ok(Json(
        balances
            .into_iter()
            .map(|entry| MemberBalance {
                member: member_view(entry.member),
                balance: entry.balance.to_decimal(),
            })
            .collect(),
    ))
}
