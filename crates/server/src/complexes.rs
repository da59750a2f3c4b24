//! Complex API endpoints.

use api_types::complex::{ComplexDetail, ComplexNew, ComplexUpdate, ComplexView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError, mappers,
    server::{CallerId, ServerState},
};

pub async fn create(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Json(payload): Json<ComplexNew>,
) -> Result<(StatusCode, Json<ComplexView>), ServerError> {
    let complex = state
        .engine
        .new_complex(
            &caller.0,
            &payload.content,
            &payload.category,
            payload.trigger_episode.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(mappers::complex_view(&complex))))
}

pub async fn list(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ComplexView>>, ServerError> {
    let complexes = state.engine.complexes(&caller.0).await?;
    Ok(Json(complexes.iter().map(mappers::complex_view).collect()))
}

pub async fn detail(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComplexDetail>, ServerError> {
    let complex = state.engine.complex(&caller.0, id).await?;
    Ok(Json(mappers::complex_detail(&complex)))
}

pub async fn update(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ComplexUpdate>,
) -> Result<Json<ComplexView>, ServerError> {
    let complex = state
        .engine
        .update_complex(&caller.0, id, mappers::complex_patch(payload))
        .await?;
    Ok(Json(mappers::complex_view(&complex)))
}

pub async fn remove(
    Extension(caller): Extension<CallerId>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_complex(&caller.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
