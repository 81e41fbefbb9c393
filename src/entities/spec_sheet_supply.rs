use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spec_sheet_supplies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub spec_sheet_id: i32,
    pub supply_id: i32,
    /// Purchase lot the quantity is costed against
    pub purchase_detail_id: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 3)))")]
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spec_sheet::Entity",
        from = "Column::SpecSheetId",
        to = "super::spec_sheet::Column::Id",
        on_delete = "Cascade"
    )]
    SpecSheet,
    #[sea_orm(
        belongs_to = "super::supply::Entity",
        from = "Column::SupplyId",
        to = "super::supply::Column::Id"
    )]
    Supply,
    #[sea_orm(
        belongs_to = "super::purchase_detail::Entity",
        from = "Column::PurchaseDetailId",
        to = "super::purchase_detail::Column::Id"
    )]
    PurchaseDetail,
}

impl Related<super::spec_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpecSheet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
