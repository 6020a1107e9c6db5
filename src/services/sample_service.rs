use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::samples::{CreateSampleRequest, SampleRequestList, UpdateSampleStatusRequest},
    entity::sample_requests::{
        ActiveModel as SampleActive, Column as SampleCol, Entity as SampleRequests,
        Model as SampleModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{SampleRequest, SampleStatus},
    response::{ApiResponse, Meta},
    routes::params::{ListQuery, StatusFilter},
    state::AppState,
};

/// Public intake from the trade page. Buyers are anonymous; the request
/// lands as `pending` for the trade team to pick up.
pub async fn create_sample_request(
    state: &AppState,
    payload: CreateSampleRequest,
) -> AppResult<ApiResponse<SampleRequest>> {
    for (field, value) in [
        ("coffee_name", &payload.coffee_name),
        ("company_name", &payload.company_name),
        ("contact_name", &payload.contact_name),
        ("email", &payload.email),
        ("courier", &payload.courier),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }
    if !payload.email.contains('@') {
        return Err(AppError::BadRequest("email is invalid".into()));
    }

    let request = SampleActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(payload.product_id),
        coffee_name: Set(payload.coffee_name.trim().to_string()),
        company_name: Set(payload.company_name.trim().to_string()),
        contact_name: Set(payload.contact_name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        courier: Set(payload.courier.trim().to_string()),
        courier_account: Set(payload.courier_account),
        notes: Set(payload.notes),
        status: Set(SampleStatus::Pending),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "sample_request_create",
        Some("sample_requests"),
        Some(serde_json::json!({ "request_id": request.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Request received",
        sample_from_entity(request),
        Some(Meta::empty()),
    ))
}

pub async fn list_sample_requests(
    state: &AppState,
    user: &AuthUser,
    query: ListQuery,
) -> AppResult<ApiResponse<SampleRequestList>> {
    ensure_admin(user)?;

    let requests: Vec<SampleRequest> = SampleRequests::find()
        .order_by_desc(SampleCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(sample_from_entity)
        .collect();

    let filtered = filter_samples(
        requests,
        query.status.unwrap_or_default(),
        query.q.as_deref().unwrap_or(""),
    );

    let meta = Meta::total(filtered.len() as i64);
    Ok(ApiResponse::success(
        "Sample requests",
        SampleRequestList { items: filtered },
        Some(meta),
    ))
}

/// Panel filter: `Processing` matches the shipped synonym too; search spans
/// company, contact and email.
pub fn filter_samples(
    requests: Vec<SampleRequest>,
    status: StatusFilter,
    search: &str,
) -> Vec<SampleRequest> {
    let needle = search.trim().to_lowercase();
    requests
        .into_iter()
        .filter(|request| {
            let keep = match status {
                StatusFilter::All => true,
                StatusFilter::Active => request.status != SampleStatus::Completed,
                StatusFilter::Processing => request.status.is_in_fulfilment(),
                StatusFilter::Completed => request.status == SampleStatus::Completed,
            };
            if !keep {
                return false;
            }
            if needle.is_empty() {
                return true;
            }
            request.company_name.to_lowercase().contains(&needle)
                || request.contact_name.to_lowercase().contains(&needle)
                || request.email.to_lowercase().contains(&needle)
        })
        .collect()
}

pub async fn update_sample_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSampleStatusRequest,
) -> AppResult<ApiResponse<SampleRequest>> {
    ensure_admin(user)?;
    let next = SampleStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown sample status: {}", payload.status)))?;

    let existing = SampleRequests::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if !existing.status.can_become(next) {
        return Err(AppError::InvalidTransition {
            from: existing.status.as_str().into(),
            to: next.as_str().into(),
        });
    }

    let mut active: SampleActive = existing.into();
    active.status = Set(next);
    let request = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "sample_status_update",
        Some("sample_requests"),
        Some(serde_json::json!({ "request_id": request.id, "status": request.status.as_str() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Request updated",
        sample_from_entity(request),
        Some(Meta::empty()),
    ))
}

fn sample_from_entity(model: SampleModel) -> SampleRequest {
    SampleRequest {
        id: model.id,
        product_id: model.product_id,
        coffee_name: model.coffee_name,
        company_name: model.company_name,
        contact_name: model.contact_name,
        email: model.email,
        courier: model.courier,
        courier_account: model.courier_account,
        notes: model.notes,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
