use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::samples::{CreateSampleRequest, SampleRequestList, UpdateSampleStatusRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::SampleRequest,
    response::ApiResponse,
    routes::params::ListQuery,
    services::sample_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sample_requests).post(create_sample_request))
        .route("/{id}/status", patch(update_sample_status))
}

#[utoipa::path(
    post,
    path = "/api/samples",
    request_body = CreateSampleRequest,
    responses(
        (status = 200, description = "Sample request received", body = ApiResponse<SampleRequest>),
        (status = 400, description = "Missing fields"),
    ),
    tag = "Samples"
)]
pub async fn create_sample_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateSampleRequest>,
) -> AppResult<Json<ApiResponse<SampleRequest>>> {
    let resp = sample_service::create_sample_request(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/samples",
    params(
        ("status" = Option<String>, Query, description = "all | active | processing | completed"),
        ("q" = Option<String>, Query, description = "Search company, contact or email")
    ),
    responses(
        (status = 200, description = "All sample requests, newest first (admin only)", body = ApiResponse<SampleRequestList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Samples"
)]
pub async fn list_sample_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<SampleRequestList>>> {
    let resp = sample_service::list_sample_requests(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/samples/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Sample request ID")
    ),
    request_body = UpdateSampleStatusRequest,
    responses(
        (status = 200, description = "Request status advanced", body = ApiResponse<SampleRequest>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Transition not allowed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Samples"
)]
pub async fn update_sample_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSampleStatusRequest>,
) -> AppResult<Json<ApiResponse<SampleRequest>>> {
    let resp = sample_service::update_sample_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
