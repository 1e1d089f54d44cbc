use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        models::{ApiJson, ApiPath, PartResponse},
    },
    core::part::{self, PartInput},
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

/// POST /api/cars/{car_id}/repairs/{record_id}/parts
pub async fn create_part(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, record_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<PartInput>,
) -> Result<(StatusCode, Json<PartResponse>)> {
    let part = part::create_part(&state.db, &user.id, car_id, record_id, input).await?;
    Ok((StatusCode::CREATED, Json(part.into())))
}

/// PUT /api/cars/{car_id}/repairs/{record_id}/parts/{part_id}
pub async fn update_part(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, record_id, part_id)): ApiPath<(i64, i64, i64)>,
    ApiJson(input): ApiJson<PartInput>,
) -> Result<Json<PartResponse>> {
    let part = part::update_part(&state.db, &user.id, car_id, record_id, part_id, input).await?;
    Ok(Json(part.into()))
}

/// DELETE /api/cars/{car_id}/repairs/{record_id}/parts/{part_id}
pub async fn delete_part(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, record_id, part_id)): ApiPath<(i64, i64, i64)>,
) -> Result<StatusCode> {
    part::delete_part(&state.db, &user.id, car_id, record_id, part_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
