//! Gain and loss API endpoints.

use api_types::outcome::{OutcomeNew, OutcomeView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::OutcomeSide;
use uuid::Uuid;

use crate::{
    ServerError, mappers,
    server::{CallerId, ServerState},
};

async fn add(
    caller: CallerId,
    state: ServerState,
    action_id: Uuid,
    side: OutcomeSide,
    payload: OutcomeNew,
) -> Result<(StatusCode, Json<OutcomeView>), ServerError> {
    let outcome = state
        .engine
        .add_outcome(
            &caller.0,
            action_id,
            side,
            mappers::kind_to_engine(payload.kind),
            &payload.description,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(mappers::outcome_view(&outcome))))
}

pub async fn add_gain(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(action_id): Path<Uuid>,
    Json(payload): Json<OutcomeNew>,
) -> Result<(StatusCode, Json<OutcomeView>), ServerError> {
    add(caller, state, action_id, OutcomeSide::Gain, payload).await
}

pub async fn add_loss(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(action_id): Path<Uuid>,
    Json(payload): Json<OutcomeNew>,
) -> Result<(StatusCode, Json<OutcomeView>), ServerError> {
    add(caller, state, action_id, OutcomeSide::Loss, payload).await
}

pub async fn remove_gain(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_outcome(&caller.0, OutcomeSide::Gain, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_loss(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_outcome(&caller.0, OutcomeSide::Loss, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
