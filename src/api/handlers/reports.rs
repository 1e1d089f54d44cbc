use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        models::{ApiPath, ReportQuery},
    },
    core::report::{generate_repair_report, parse_report_period},
    errors::Result,
    export::excel::{XLSX_CONTENT_TYPE, render_repair_report, report_filename},
};
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

/// GET /api/cars/{car_id}/export-report?date_from=YYYY-MM-DD&date_to=YYYY-MM-DD
#[tracing::instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn export_report(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(car_id): ApiPath<i64>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    let (date_from, date_to) =
        parse_report_period(query.date_from.as_deref(), query.date_to.as_deref())?;

    let report = generate_repair_report(&state.db, &user.id, car_id, date_from, date_to).await?;
    let bytes = render_repair_report(&report)?;
    let disposition = format!("attachment; filename=\"{}\"", report_filename(&report));

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::test_utils::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_export_report() {
        let (db, car) = setup_with_car().await.unwrap();
        create_test_repair(&db, car.id, "2024-01-10").await.unwrap();
        let server = test_server(db);

        let response = server
            .get(&format!("/api/cars/{}/export-report", car.id))
            .add_query_param("date_from", "2024-01-01")
            .add_query_param("date_to", "2024-01-31")
            .add_header("x-user-id", "alice")
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.header("content-type"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"report_Toyota_Corolla_20240101_20240131.xlsx\""
        );
        assert!(response.as_bytes().starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_export_rejects_missing_or_bad_dates() {
        let (db, car) = setup_with_car().await.unwrap();
        let server = test_server(db);
        let path = format!("/api/cars/{}/export-report", car.id);

        let response = server
            .get(&path)
            .add_query_param("date_from", "2024-01-01")
            .add_header("x-user-id", "alice")
            .await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());

        server
            .get(&path)
            .add_query_param("date_from", "2024-13-01")
            .add_query_param("date_to", "2024-01-31")
            .add_header("x-user-id", "alice")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_export_other_users_car_not_found() {
        let (db, car) = setup_with_car().await.unwrap();
        let server = test_server(db);

        server
            .get(&format!("/api/cars/{}/export-report", car.id))
            .add_query_param("date_from", "2024-01-01")
            .add_query_param("date_to", "2024-01-31")
            .add_header("x-user-id", "bob")
            .await
            .assert_status_not_found();
    }
}
