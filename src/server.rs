use crate::charts::{self, DashboardData};
use crate::config::AppConfig;
use crate::selection::{SelectionAction, SelectionSnapshot, SelectionState};
use crate::types::{Dataset, TownRecord};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

pub struct AppState {
    pub dataset: Dataset,
    pub selection: Mutex<SelectionState>,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct DashboardParams {
    top_n: Option<usize>,
    only_with_hotels: Option<bool>,
}

pub async fn start_server(config: AppConfig, dataset: Dataset) -> Result<()> {
    let selection = SelectionState::from_dataset(&dataset);

    let state = Arc::new(AppState {
        dataset,
        selection: Mutex::new(selection),
        config: config.clone(),
    });

    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("Starting server on http://{}", addr);

    let app = Router::new()
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/records", get(records_handler))
        .route(
            "/api/selection",
            get(selection_handler).post(mutate_selection_handler),
        )
        .nest_service("/", ServeDir::new(&config.server.static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// One full render pass against the current selection. Query parameters
/// override the configured chart defaults for this response only.
async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Json<DashboardData> {
    let mut options = state.config.charts.clone();
    if let Some(top_n) = params.top_n {
        options.top_n = top_n;
    }
    if let Some(only_with_hotels) = params.only_with_hotels {
        options.only_with_hotels = only_with_hotels;
    }

    let selection = state.selection.lock().await;
    Json(charts::render_dashboard(&state.dataset, &selection, &options))
}

/// Raw data preview, unfiltered.
async fn records_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TownRecord>> {
    Json(state.dataset.records.clone())
}

async fn selection_handler(State(state): State<Arc<AppState>>) -> Json<SelectionSnapshot> {
    let selection = state.selection.lock().await;
    Json(selection.snapshot())
}

async fn mutate_selection_handler(
    State(state): State<Arc<AppState>>,
    Json(action): Json<SelectionAction>,
) -> Json<SelectionSnapshot> {
    info!(?action, "applying selection action");
    let mut selection = state.selection.lock().await;
    selection.apply(action);
    Json(selection.snapshot())
}
