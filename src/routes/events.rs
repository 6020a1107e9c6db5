use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::events::{CreateEventRequest, EventBoard, EventList, UpdateEventStatusRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Event,
    response::ApiResponse,
    services::event_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/all", get(list_events_admin))
        .route("/{id}/status", patch(update_event_status))
}

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Upcoming and past events", body = ApiResponse<EventBoard>)
    ),
    tag = "Events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<EventBoard>>> {
    let resp = event_service::list_public(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/events/all",
    responses(
        (status = 200, description = "Every event, newest date first (admin only)", body = ApiResponse<EventList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn list_events_admin(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<EventList>>> {
    let resp = event_service::list_admin(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event published", body = ApiResponse<Event>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> AppResult<Json<ApiResponse<Event>>> {
    let resp = event_service::create_event(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/events/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEventStatusRequest,
    responses(
        (status = 200, description = "Event status toggled", body = ApiResponse<Event>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn update_event_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventStatusRequest>,
) -> AppResult<Json<ApiResponse<Event>>> {
    let resp = event_service::update_event_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
