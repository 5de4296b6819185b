use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde_json::json;
use tower_http::cors::CorsLayer;

use coldchain_router::config::CONFIG;
use coldchain_router::error::ApiError;
use coldchain_router::inventory::HttpInventoryOracle;
use coldchain_router::logging::RequestLog;
use coldchain_router::models::{Bid, OptimizeRequest};
use coldchain_router::request_handler::handle_optimize;

struct AppState {
    oracle: HttpInventoryOracle,
    solver_budget: chrono::Duration,
}

async fn healthz_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn optimize_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OptimizeRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<Vec<Bid>>, ApiError> {
    let log = RequestLog::new();
    info!("{log} received /optimize request");

    let Json(request) = body.map_err(|err| ApiError::MalformedRequest(err.to_string()))?;

    let bids = handle_optimize(&log, request, &state.oracle, state.solver_budget).await;
    info!("{log} responding with {} bids", bids.len());
    Ok(Json(bids))
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    pretty_env_logger::init_timed();

    let shared_state = Arc::new(AppState {
        oracle: HttpInventoryOracle::new(&CONFIG),
        solver_budget: CONFIG.solver_budget,
    });

    let app = Router::new()
        .route("/optimize", post(optimize_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(shared_state)
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", CONFIG.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {addr}: {err}"));
    info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
