use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Versioned recipe for a product. At most one sheet per product is active.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spec_sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    /// Yield of one batch of this recipe, in `unit_of_measure`
    #[sea_orm(column_type = "Decimal(Some((14, 3)))")]
    pub base_quantity: Decimal,
    pub unit_of_measure: String,
    pub date_effective: Date,
    pub end_date: Option<Date>,
    pub status: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(has_many = "super::spec_sheet_supply::Entity")]
    Supplies,
    #[sea_orm(has_many = "super::spec_sheet_process::Entity")]
    Processes,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::spec_sheet_supply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplies.def()
    }
}

impl Related<super::spec_sheet_process::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Processes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
