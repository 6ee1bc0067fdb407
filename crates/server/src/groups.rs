//! Group endpoints.

use api_types::group::{Group, GroupNew};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;

use crate::{ServerError, server::ServerState};

fn group_view(value: engine::Group) -> Group {
    Group {
        id: value.id,
        name: value.name,
        created_at: value.created_at,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Group>>, ServerError> {
    let groups = state.engine.list_groups().await?;
    Ok(Json(groups.into_iter().map(group_view).collect()))
}

pub async fn group_new(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<GroupNew>, ServerError>,
) -> Result<(StatusCode, Json<Group>), ServerError> {
    let group = state.engine.create_group(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(group_view(group))))
}
