use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::dashboard::DashboardMetrics,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::DashboardQuery,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(load_dashboard))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(
        ("window" = Option<String>, Query, description = "today | week | month | year | custom | all"),
        ("start" = Option<String>, Query, description = "Custom window start (YYYY-MM-DD)"),
        ("end" = Option<String>, Query, description = "Custom window end (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Dashboard metrics for the window (admin only)", body = ApiResponse<DashboardMetrics>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn load_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<ApiResponse<DashboardMetrics>>> {
    let resp = dashboard_service::load_dashboard(&state, &user, query).await?;
    Ok(Json(resp))
}
