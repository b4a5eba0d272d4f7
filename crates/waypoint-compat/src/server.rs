use crate::input::GraphSpec;
use crate::output::ReportJson;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use waypoint_core::{SolveOptions, Solver, Strategy};

/// Defaults applied to requests that leave a field unset.
#[derive(Debug, Clone)]
pub struct AppState {
    pub strategies: Vec<Strategy>,
    pub seed: Option<u64>,
    pub timing: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState { strategies: Strategy::ALL.to_vec(), seed: None, timing: false }
    }
}

/// Body of `POST /search`: the graph fields plus optional run settings.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub graph: GraphSpec,
    #[serde(default)]
    pub strategies: Option<Vec<String>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub timing: Option<bool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/strategies", get(strategies))
        .route("/search", post(search))
        .with_state(Arc::new(state))
}

/// Serves `router(state)` on `addr` until Ctrl+C.
pub async fn start_server(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

async fn index() -> &'static str {
    "waypoint: POST a graph to /search\n"
}

async fn strategies() -> Json<Vec<&'static str>> {
    Json(Strategy::ALL.iter().map(|s| s.name()).collect())
}

fn unprocessable(message: String) -> Response {
    warn!(%message, "rejected search request");
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": message }))).into_response()
}

/// Solve the posted problem on the blocking pool.
async fn search(State(state): State<Arc<AppState>>, body: Result<Json<SearchRequest>, JsonRejection>) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return unprocessable(rejection.body_text()),
    };
    let outcome = tokio::task::spawn_blocking(move || solve(&state, request)).await;
    match outcome {
        Ok(Ok(reports)) => Json(json!({ "reports": reports })).into_response(),
        Ok(Err(message)) => unprocessable(message),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": err.to_string() }))).into_response(),
    }
}

fn solve(state: &AppState, request: SearchRequest) -> Result<Vec<ReportJson>, String> {
    let strategies = match &request.strategies {
        Some(names) => names.iter()
            .map(|name| name.parse::<Strategy>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?,
        None => state.strategies.clone(),
    };
    let problem = request.graph.into_problem().map_err(|e| e.to_string())?;
    let options = SolveOptions {
        seed: request.seed.or(state.seed),
        timing: request.timing.unwrap_or(state.timing),
    };
    let reports = Solver::new(problem).solve(&strategies, options);
    Ok(reports.iter().map(ReportJson::from).collect())
}
