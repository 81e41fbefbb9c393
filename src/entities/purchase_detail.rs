use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One purchased lot of a supply; `subtotal = quantity * unit_price`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub register_purchase_id: i32,
    pub supply_id: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 3)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub subtotal: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::register_purchase::Entity",
        from = "Column::RegisterPurchaseId",
        to = "super::register_purchase::Column::Id",
        on_delete = "Cascade"
    )]
    RegisterPurchase,
    #[sea_orm(
        belongs_to = "super::supply::Entity",
        from = "Column::SupplyId",
        to = "super::supply::Column::Id"
    )]
    Supply,
}

impl Related<super::register_purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegisterPurchase.def()
    }
}

impl Related<super::supply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supply.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
