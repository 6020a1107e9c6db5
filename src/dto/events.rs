use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Event;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_date: NaiveDate,
    pub tag: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEventStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventList {
    pub items: Vec<Event>,
}

/// Public events page: upcoming soonest-first, past most-recent-first.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventBoard {
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}
