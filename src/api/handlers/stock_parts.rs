use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        models::{ApiJson, ApiPath, StockPartResponse},
    },
    core::stock_part::{self, StockPartInput},
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

/// GET /api/cars/{car_id}/stock
pub async fn list_stock_parts(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
) -> Result<Json<Vec<StockPartResponse>>> {
    let stock = stock_part::list_stock_parts(&state.db, &user.id, car_id).await?;
    Ok(Json(stock.into_iter().map(StockPartResponse::from).collect()))
}

/// POST /api/cars/{car_id}/stock
pub async fn create_stock_part(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
    ApiJson(input): ApiJson<StockPartInput>,
) -> Result<(StatusCode, Json<StockPartResponse>)> {
    let stock = stock_part::create_stock_part(&state.db, &user.id, car_id, input).await?;
    Ok((StatusCode::CREATED, Json(stock.into())))
}

/// GET /api/cars/{car_id}/stock/{stock_part_id}
pub async fn get_stock_part(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, stock_part_id)): ApiPath<(i64, i64)>,
) -> Result<Json<StockPartResponse>> {
    let stock = stock_part::get_stock_part(&state.db, &user.id, car_id, stock_part_id).await?;
    Ok(Json(stock.into()))
}

/// PUT /api/cars/{car_id}/stock/{stock_part_id}
pub async fn update_stock_part(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, stock_part_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<StockPartInput>,
) -> Result<Json<StockPartResponse>> {
    let stock =
        stock_part::update_stock_part(&state.db, &user.id, car_id, stock_part_id, input).await?;
    Ok(Json(stock.into()))
}

/// DELETE /api/cars/{car_id}/stock/{stock_part_id}
pub async fn delete_stock_part(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath((car_id, stock_part_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode> {
    stock_part::delete_stock_part(&state.db, &user.id, car_id, stock_part_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_stock_lifecycle() {
        let (db, car) = setup_with_car().await.unwrap();
        let server = test_server(db);
        let base = format!("/api/cars/{}/stock", car.id);

        let response = server
            .post(&base)
            .add_header("x-user-id", "alice")
            .json(&json!({
                "name": "Oil Filter",
                "part_code": "OF-123",
                "manufacturer": "Bosch",
                "quantity": 2,
                "cost": "10.50",
                "purchase_date": "2023-12-20",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let stock: Value = response.json();
        assert_eq!(stock["purchase_date"], "2023-12-20");
        assert_eq!(stock["notes"], Value::Null);
        let path = format!("{base}/{}", stock["id"]);

        let response = server
            .put(&path)
            .add_header("x-user-id", "alice")
            .json(&json!({"name": "Oil Filter", "part_code": "OF-123", "manufacturer": "Bosch", "cost": "9.999"}))
            .await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>().get("cost").is_some());

        let response = server.get(&base).add_header("x-user-id", "alice").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 1);

        server
            .get(&path)
            .add_header("x-user-id", "bob")
            .await
            .assert_status_not_found();
        server
            .delete(&path)
            .add_header("x-user-id", "alice")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&path)
            .add_header("x-user-id", "alice")
            .await
            .assert_status_not_found();
    }
}
