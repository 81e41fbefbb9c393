use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered step of a recipe; `process_order` is unique per sheet.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spec_sheet_processes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub spec_sheet_id: i32,
    pub process_id: Option<i32>,
    pub process_order: i32,
    pub name_override: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description_override: Option<String>,
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
        belongs_to = "super::process::Entity",
        from = "Column::ProcessId",
        to = "super::process::Column::Id"
    )]
    Process,
}

impl Related<super::spec_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpecSheet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
