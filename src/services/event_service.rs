use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::events::{CreateEventRequest, EventBoard, EventList, UpdateEventStatusRequest},
    entity::events::{
        ActiveModel as EventActive, Column as EventCol, Entity as Events, Model as EventModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Event, EventStatus},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Public events page: fetch everything, split by the manual status flag.
pub async fn list_public(state: &AppState) -> AppResult<ApiResponse<EventBoard>> {
    let events: Vec<Event> = Events::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(event_from_entity)
        .collect();

    let (upcoming, past) = split_events(events);
    Ok(ApiResponse::success(
        "Events",
        EventBoard { upcoming, past },
        Some(Meta::empty()),
    ))
}

/// Upcoming soonest-first, past most-recent-first. Buckets follow the
/// status flag only; the event date never moves an event between them.
pub fn split_events(events: Vec<Event>) -> (Vec<Event>, Vec<Event>) {
    let (mut upcoming, mut past): (Vec<Event>, Vec<Event>) = events
        .into_iter()
        .partition(|ev| ev.status == EventStatus::Upcoming);
    upcoming.sort_by(|a, b| a.event_date.cmp(&b.event_date));
    past.sort_by(|a, b| b.event_date.cmp(&a.event_date));
    (upcoming, past)
}

pub async fn list_admin(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<EventList>> {
    ensure_admin(user)?;
    let items: Vec<Event> = Events::find()
        .order_by_desc(EventCol::EventDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(event_from_entity)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Events",
        EventList { items },
        Some(meta),
    ))
}

pub async fn create_event(
    state: &AppState,
    user: &AuthUser,
    payload: CreateEventRequest,
) -> AppResult<ApiResponse<Event>> {
    ensure_admin(user)?;
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".into()));
    }
    if payload.location.trim().is_empty() {
        return Err(AppError::BadRequest("location is required".into()));
    }

    let event = EventActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title.trim().to_string()),
        event_date: Set(payload.event_date),
        tag: Set(payload.tag),
        location: Set(payload.location.trim().to_string()),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
        status: Set(EventStatus::Upcoming),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "event_create",
        Some("events"),
        Some(serde_json::json!({ "event_id": event.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Event published",
        event_from_entity(event),
        Some(Meta::empty()),
    ))
}

/// Events are the one bidirectional status: upcoming <-> past is a manual
/// correction toggle, so both directions are always legal.
pub async fn update_event_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateEventStatusRequest,
) -> AppResult<ApiResponse<Event>> {
    ensure_admin(user)?;
    let next = EventStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown event status: {}", payload.status)))?;

    let existing = Events::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(e) => e,
        None => return Err(AppError::NotFound),
    };

    let mut active: EventActive = existing.into();
    active.status = Set(next);
    let event = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "event_status_update",
        Some("events"),
        Some(serde_json::json!({ "event_id": event.id, "status": event.status.as_str() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Event updated",
        event_from_entity(event),
        Some(Meta::empty()),
    ))
}

fn event_from_entity(model: EventModel) -> Event {
    Event {
        id: model.id,
        title: model.title,
        event_date: model.event_date,
        tag: model.tag,
        location: model.location,
        description: model.description,
        image_url: model.image_url,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
