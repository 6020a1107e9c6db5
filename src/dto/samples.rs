use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::SampleRequest;

/// Public intake from the trade page sample modal.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSampleRequest {
    pub product_id: Option<Uuid>,
    pub coffee_name: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub courier: String,
    pub courier_account: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSampleStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SampleRequestList {
    pub items: Vec<SampleRequest>,
}
