use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::analysis::{self, AnalysisOptions, AnalysisReport};
use crate::chart::{ChartData, render_scene};
use crate::config::Settings;
use crate::error::{PayloadError, RenderError, TableError};
use crate::export;
use crate::graph::{self, GraphOptions};
use crate::legend::LegendLayout;
use crate::scene::{CanvasSize, Scene};
use crate::table::{RowCap, Table, TableSource};
use crate::view::{ChartKind, ChartViewState, ViewAction};

pub struct AppState {
    settings: Settings,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    source: TableSource,
    #[serde(default)]
    row_cap: RowCap,
    #[serde(default)]
    columns: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartRequest {
    kind: ChartKind,
    data: ChartData,
    #[serde(default)]
    view: ChartViewState,
    #[serde(default)]
    size: Option<CanvasSize>,
}

#[derive(Serialize)]
struct SceneResponse {
    scene: Scene,
    legend: LegendLayout,
}

#[derive(Deserialize)]
struct ViewRequest {
    kind: ChartKind,
    #[serde(default)]
    view: ChartViewState,
    actions: Vec<ViewAction>,
}

#[derive(Deserialize)]
struct StandardRequest {
    data: ChartData,
    #[serde(default)]
    options: GraphOptions,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

/// Failure of a request, reported as `{"status": "error", "message": ...}`.
struct ApiError {
    code: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl ToString) -> Self {
        Self {
            code: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message: self.message,
        });
        (self.code, body).into_response()
    }
}

impl From<TableError> for ApiError {
    fn from(e: TableError) -> Self {
        ApiError::bad_request(e)
    }
}

impl From<PayloadError> for ApiError {
    fn from(e: PayloadError) -> Self {
        ApiError::bad_request(e)
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::RenderTargetUnavailable { .. } => ApiError::bad_request(e),
            other => {
                error!("rendering failed: {}", other);
                ApiError {
                    code: StatusCode::INTERNAL_SERVER_ERROR,
                    message: other.to_string(),
                }
            }
        }
    }
}

/// Builds the API router over shared settings.
pub fn router(settings: Settings) -> Router {
    let app_state = Arc::new(AppState { settings });

    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/chart/scene", post(chart_scene))
        .route("/api/chart/view", post(chart_view))
        .route("/api/chart/export", post(chart_export))
        .route("/api/chart/standard", post(chart_standard))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

pub async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = settings.bind_addr.clone();
    let app = router(settings);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let cap = request.row_cap.resolve(&state.settings.row_caps);
    let table = Table::from_source(&request.source, cap)?;
    let options = AnalysisOptions {
        columns: request.columns,
    };
    Ok(Json(analysis::analyze(&table, &options)))
}

fn chart_inputs(state: &AppState, request: &ChartRequest) -> Result<(ChartViewState, CanvasSize), ApiError> {
    request.data.validate()?;
    let view = request.view.sanitized(request.kind);
    let size = request.size.unwrap_or(state.settings.canvas);
    Ok((view, size))
}

async fn chart_scene(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChartRequest>,
) -> Result<Json<SceneResponse>, ApiError> {
    let (view, size) = chart_inputs(&state, &request)?;
    Ok(Json(SceneResponse {
        scene: render_scene(request.kind, &request.data, &view, size),
        legend: LegendLayout::compute(&request.data, size.width),
    }))
}

async fn chart_view(Json(request): Json<ViewRequest>) -> Json<ChartViewState> {
    let start = request.view.sanitized(request.kind);
    Json(start.replay(request.actions, request.kind))
}

fn png(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], bytes).into_response()
}

async fn chart_export(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChartRequest>,
) -> Result<Response, ApiError> {
    let (view, size) = chart_inputs(&state, &request)?;
    let bytes = export::export_png(request.kind, &request.data, &view, size)?;
    Ok(png(bytes))
}

async fn chart_standard(Json(request): Json<StandardRequest>) -> Result<Response, ApiError> {
    request.data.validate()?;
    let bytes = graph::render_standard_chart(&request.data, &request.options)?;
    Ok(png(bytes))
}
