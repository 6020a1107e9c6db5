use sea_orm::entity::prelude::*;

use crate::models::ProductKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub kind: ProductKind,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub price_kes: i64,
    pub original_price_kes: Option<i64>,
    pub retail_stock: i32,
    pub roast_level: Option<String>,
    pub species: Option<String>,
    pub region: Option<String>,
    pub grade: Option<String>,
    pub process: Option<String>,
    #[sea_orm(column_type = "Float", nullable)]
    pub cupping_score: Option<f32>,
    pub available_bags: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
    #[sea_orm(has_many = "super::sample_requests::Entity")]
    SampleRequests,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::sample_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SampleRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
