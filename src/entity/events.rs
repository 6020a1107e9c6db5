use sea_orm::entity::prelude::*;

use crate::models::EventStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub event_date: Date,
    pub tag: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
