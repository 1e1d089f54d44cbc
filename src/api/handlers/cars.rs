use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        models::{ApiJson, ApiPath, CarResponse},
    },
    core::car::{self, CarInput},
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

/// GET /api/cars - List the caller's cars, newest first
pub async fn list_cars(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<CarResponse>>> {
    let cars = car::list_cars(&state.db, &user.id).await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// POST /api/cars - Register a car
pub async fn create_car(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<(StatusCode, Json<CarResponse>)> {
    let car = car::create_car(&state.db, &user.id, input).await?;
    Ok((StatusCode::CREATED, Json(car.into())))
}

/// GET /api/cars/{car_id}
pub async fn get_car(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
) -> Result<Json<CarResponse>> {
    let car = car::get_car(&state.db, &user.id, car_id).await?;
    Ok(Json(car.into()))
}

/// PUT /api/cars/{car_id} - Full replace
pub async fn update_car(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<Json<CarResponse>> {
    let car = car::update_car(&state.db, &user.id, car_id, input).await?;
    Ok(Json(car.into()))
}

/// DELETE /api/cars/{car_id} - Removes repairs, parts and stock too
pub async fn delete_car(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
) -> Result<StatusCode> {
    car::delete_car(&state.db, &user.id, car_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    fn corolla() -> Value {
        json!({
            "brand": "Toyota",
            "model": "Corolla",
            "vin": "JTDBR32E720012345",
            "year": 2012,
            "power": 132,
            "tire_front": "205/55 R16",
        })
    }

    #[tokio::test]
    async fn test_car_crud() {
        let server = test_server(setup_test_db().await.unwrap());

        let response = server
            .post("/api/cars")
            .add_header("x-user-id", "alice")
            .json(&corolla())
            .await;
        response.assert_status(StatusCode::CREATED);
        let car: Value = response.json();
        assert_eq!(car["model"], "Corolla");
        assert_eq!(car["tire_rear"], Value::Null);
        assert!(car.get("user_id").is_none());
        let id = car["id"].as_i64().unwrap();

        let response = server.get("/api/cars").add_header("x-user-id", "alice").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 1);

        let response = server
            .put(&format!("/api/cars/{id}"))
            .add_header("x-user-id", "alice")
            .json(&json!({"brand": "Toyota", "model": "Auris", "vin": "JTDBR32E720012345"}))
            .await;
        response.assert_status_ok();
        let car: Value = response.json();
        assert_eq!(car["model"], "Auris");
        assert_eq!(car["year"], Value::Null);

        server
            .delete(&format!("/api/cars/{id}"))
            .add_header("x-user-id", "alice")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/cars/{id}"))
            .add_header("x-user-id", "alice")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_json_bad_request() {
        let server = test_server(setup_test_db().await.unwrap());

        let response = server.get("/api/cars/abc").add_header("x-user-id", "alice").await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("abc"));

        let response = server
            .delete("/api/cars/1/repairs/x/parts/2")
            .add_header("x-user-id", "alice")
            .await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_requires_identity() {
        let server = test_server(setup_test_db().await.unwrap());
        let response = server.get("/api/cars").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>(), json!({"error": "Authentication required"}));
    }

    #[tokio::test]
    async fn test_other_users_car_is_not_found() {
        let db = setup_test_db().await.unwrap();
        let car = create_test_car(&db, "alice").await.unwrap();
        let server = test_server(db);

        let response = server
            .get(&format!("/api/cars/{}", car.id))
            .add_header("x-user-id", "bob")
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>(), json!({"error": "Car not found"}));

        server
            .delete(&format!("/api/cars/{}", car.id))
            .add_header("x-user-id", "bob")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_validation_reports_every_field() {
        let server = test_server(setup_test_db().await.unwrap());
        let mut body = corolla();
        body["year"] = json!(1899);
        body["power"] = json!(-1);

        let response = server
            .post("/api/cars")
            .add_header("x-user-id", "alice")
            .json(&body)
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>(),
            json!({
                "power": "Power cannot be negative.",
                "year": "Year must be between 1900 and 2100.",
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let server = test_server(setup_test_db().await.unwrap());

        let response = server
            .post("/api/cars")
            .add_header("x-user-id", "alice")
            .json(&json!({"brand": "Toyota", "year": "soon"}))
            .await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }
}
