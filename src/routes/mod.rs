use axum::Router;

use crate::state::AppState;

pub mod catalog;
pub mod dashboard;
pub mod doc;
pub mod events;
pub mod health;
pub mod orders;
pub mod params;
pub mod samples;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/orders", orders::router())
        .nest("/samples", samples::router())
        .nest("/events", events::router())
        .nest("/dashboard", dashboard::router())
}
