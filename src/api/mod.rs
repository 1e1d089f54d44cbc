//! HTTP surface of the garage service.
//!
//! [`build_router`] wires every handler under `/api/cars`, plus an
//! unauthenticated `/health` probe, and wraps the router in a request trace
//! layer.

/// Caller identity extractor
pub mod auth;
/// Route handlers, one module per resource
pub mod handlers;
/// Request and response bodies
pub mod models;

use crate::config::settings::AppConfig;
use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool
    pub db: Arc<DatabaseConnection>,
    /// Immutable application settings
    pub config: Arc<AppConfig>,
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    use handlers::{cars, health, parts, repairs, reports, stock_parts};

    let api_routes = Router::new()
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route(
            "/cars/{car_id}",
            get(cars::get_car).put(cars::update_car).delete(cars::delete_car),
        )
        // Repair history
        .route(
            "/cars/{car_id}/repairs",
            get(repairs::list_repairs).post(repairs::create_repair),
        )
        .route(
            "/cars/{car_id}/repairs/{record_id}",
            get(repairs::get_repair)
                .put(repairs::update_repair)
                .delete(repairs::delete_repair),
        )
        .route(
            "/cars/{car_id}/repairs/{record_id}/parts",
            axum::routing::post(parts::create_part),
        )
        .route(
            "/cars/{car_id}/repairs/{record_id}/parts/{part_id}",
            axum::routing::put(parts::update_part).delete(parts::delete_part),
        )
        // Parts stock
        .route(
            "/cars/{car_id}/stock",
            get(stock_parts::list_stock_parts).post(stock_parts::create_stock_part),
        )
        .route(
            "/cars/{car_id}/stock/{stock_part_id}",
            get(stock_parts::get_stock_part)
                .put(stock_parts::update_stock_part)
                .delete(stock_parts::delete_stock_part),
        )
        .route("/cars/{car_id}/export-report", get(reports::export_report));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
