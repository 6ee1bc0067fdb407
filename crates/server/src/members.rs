//! Member endpoints.

use api_types::member::{Member, MemberNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{ServerError, server::ServerState};

pub(crate) fn member_view(value: engine::Member) -> Member {
    Member {
        id: value.id,
        group_id: value.group_id,
        name: value.name,
        created_at: value.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<i64>, ServerError>,
) -> Result<Json<Vec<Member>>, ServerError> {
    let members = state.engine.list_members(group_id).await?;
    Ok(Json(members.into_iter().map(member_view).collect()))
}

pub async fn member_new(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<i64>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<MemberNew>, ServerError>,
) -> Result<(StatusCode, Json<Member>), ServerError> {
    let member = state.engine.create_member(group_id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(member_view(member))))
}
