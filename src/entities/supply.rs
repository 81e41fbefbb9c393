use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw material or ingredient kept in stock.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub category_id: Option<i32>,
    pub unit_of_measure: String,
    #[sea_orm(column_type = "Decimal(Some((14, 3)))")]
    pub stock: Decimal,
    pub description: Option<String>,
    pub status: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supply_category::Entity",
        from = "Column::CategoryId",
        to = "super::supply_category::Column::Id"
    )]
    SupplyCategory,
    #[sea_orm(has_many = "super::purchase_detail::Entity")]
    PurchaseDetails,
}

impl Related<super::supply_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyCategory.def()
    }
}

impl Related<super::purchase_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
