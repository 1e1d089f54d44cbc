use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        models::{ApiJson, ApiPath, RepairRecordRequest, RepairRecordResponse},
    },
    core::repair,
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

/// GET /api/cars/{car_id}/repairs - Latest date first, parts nested
pub async fn list_repairs(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
) -> Result<Json<Vec<RepairRecordResponse>>> {
    let repairs = repair::list_repairs(&state.db, &user.id, car_id).await?;
    Ok(Json(repairs.into_iter().map(RepairRecordResponse::from).collect()))
}

/// POST /api/cars/{car_id}/repairs - Log a repair, moving any selected stock parts into it
pub async fn create_repair(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
    ApiJson(request): ApiJson<RepairRecordRequest>,
) -> Result<(StatusCode, Json<RepairRecordResponse>)> {
    let (input, selection) = request.into_parts();
    let repair = repair::create_repair(&state.db, &user.id, car_id, input, &selection).await?;
    Ok((StatusCode::CREATED, Json(repair.into())))
}

/// GET /api/cars/{car_id}/repairs/{record_id}
pub async fn get_repair(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, record_id)): ApiPath<(i64, i64)>,
) -> Result<Json<RepairRecordResponse>> {
    let repair = repair::get_repair(&state.db, &user.id, car_id, record_id).await?;
    Ok(Json(repair.into()))
}

/// PUT /api/cars/{car_id}/repairs/{record_id} - Full replace, plus stock transfer
pub async fn update_repair(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, record_id)): ApiPath<(i64, i64)>,
    ApiJson(request): ApiJson<RepairRecordRequest>,
) -> Result<Json<RepairRecordResponse>> {
    let (input, selection) = request.into_parts();
    let repair =
        repair::update_repair(&state.db, &user.id, car_id, record_id, input, &selection).await?;
    Ok(Json(repair.into()))
}

/// DELETE /api/cars/{car_id}/repairs/{record_id}
pub async fn delete_repair(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, record_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode> {
    repair::delete_repair(&state.db, &user.id, car_id, record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
