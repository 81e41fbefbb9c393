use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_access_tables::Migration),
            Box::new(m20240101_000002_create_directory_tables::Migration),
            Box::new(m20240101_000003_create_inventory_tables::Migration),
            Box::new(m20240101_000004_create_production_tables::Migration),
            Box::new(m20240101_000005_create_expense_tables::Migration),
        ]
    }
}

/// Column helpers shared by every migration below
mod cols {
    use sea_orm_migration::prelude::*;

    pub fn pk<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col)
            .integer()
            .not_null()
            .auto_increment()
            .primary_key()
            .to_owned()
    }

    pub fn fk<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col).integer().not_null().to_owned()
    }

    pub fn money<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col)
            .decimal_len(14, 2)
            .not_null()
            .default(0)
            .to_owned()
    }

    pub fn quantity<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col)
            .decimal_len(14, 3)
            .not_null()
            .default(0)
            .to_owned()
    }

    pub fn flag<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col)
            .boolean()
            .not_null()
            .default(true)
            .to_owned()
    }

    pub fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .to_owned()
    }
}

mod m20240101_000001_create_access_tables {
    use super::cols;
    use sea_orm_migration::prelude::*;

    /// Resources guarded by `{resource}:read` / `{resource}:write` privileges
    const RESOURCES: [&str; 15] = [
        "customers",
        "reservations",
        "employees",
        "providers",
        "supply_categories",
        "supplies",
        "purchases",
        "products",
        "processes",
        "spec_sheets",
        "production_orders",
        "expense_categories",
        "expenses",
        "roles",
        "users",
    ];

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_access_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Roles::Table)
                        .if_not_exists()
                        .col(cols::pk(Roles::Id))
                        .col(ColumnDef::new(Roles::Name).string_len(50).not_null().unique_key())
                        .col(ColumnDef::new(Roles::Description).string().null())
                        .col(cols::flag(Roles::Status))
                        .col(cols::timestamp(Roles::CreatedAt))
                        .col(cols::timestamp(Roles::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Privileges::Table)
                        .if_not_exists()
                        .col(cols::pk(Privileges::Id))
                        .col(
                            ColumnDef::new(Privileges::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Privileges::Description).string().null())
                        .col(cols::timestamp(Privileges::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RolePrivileges::Table)
                        .if_not_exists()
                        .col(cols::fk(RolePrivileges::RoleId))
                        .col(cols::fk(RolePrivileges::PrivilegeId))
                        .primary_key(
                            Index::create()
                                .col(RolePrivileges::RoleId)
                                .col(RolePrivileges::PrivilegeId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_role_privileges_role_id")
                                .from(RolePrivileges::Table, RolePrivileges::RoleId)
                                .to(Roles::Table, Roles::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_role_privileges_privilege_id")
                                .from(RolePrivileges::Table, RolePrivileges::PrivilegeId)
                                .to(Privileges::Table, Privileges::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(cols::pk(Users::Id))
                        .col(ColumnDef::new(Users::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Users::Email)
                                .string_len(255)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(cols::fk(Users::RoleId))
                        .col(cols::flag(Users::Status))
                        .col(cols::timestamp(Users::CreatedAt))
                        .col(cols::timestamp(Users::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_users_role_id")
                                .from(Users::Table, Users::RoleId)
                                .to(Roles::Table, Roles::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            seed_privileges(manager).await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                Users::Table.into_iden(),
                RolePrivileges::Table.into_iden(),
                Privileges::Table.into_iden(),
                Roles::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }

    /// Seeds every privilege plus an `admin` role that holds all of them.
    async fn seed_privileges(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Privileges::Table)
            .columns([Privileges::Name, Privileges::Description]);
        for resource in RESOURCES {
            for (action, verb) in [("read", "List and view"), ("write", "Create, modify and delete")] {
                insert
                    .values([
                        format!("{}:{}", resource, action).into(),
                        format!("{} {}", verb, resource.replace('_', " ")).into(),
                    ])
                    .map_err(|e| DbErr::Migration(e.to_string()))?;
            }
        }
        manager.exec_stmt(insert).await?;

        let admin = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::Name, Roles::Description])
            .values(["admin".into(), "Full access to every resource".into()])
            .map_err(|e| DbErr::Migration(e.to_string()))?
            .to_owned();
        manager.exec_stmt(admin).await?;

        let grant_all = Query::insert()
            .into_table(RolePrivileges::Table)
            .columns([RolePrivileges::RoleId, RolePrivileges::PrivilegeId])
            .select_from(
                Query::select()
                    .column((Roles::Table, Roles::Id))
                    .column((Privileges::Table, Privileges::Id))
                    .from(Roles::Table)
                    .from(Privileges::Table)
                    .and_where(Expr::col((Roles::Table, Roles::Name)).eq("admin"))
                    .to_owned(),
            )
            .map_err(|e| DbErr::Migration(e.to_string()))?
            .to_owned();
        manager.exec_stmt(grant_all).await
    }

    #[derive(DeriveIden)]
    pub(super) enum Roles {
        Table,
        Id,
        Name,
        Description,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Privileges {
        Table,
        Id,
        Name,
        Description,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum RolePrivileges {
        Table,
        RoleId,
        PrivilegeId,
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        Name,
        Email,
        PasswordHash,
        RoleId,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_directory_tables {
    use super::cols;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_directory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(cols::pk(Customers::Id))
                        .col(ColumnDef::new(Customers::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Customers::Document)
                                .string_len(30)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Customers::Email).string_len(255).null())
                        .col(ColumnDef::new(Customers::Phone).string_len(30).null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(cols::flag(Customers::Status))
                        .col(cols::timestamp(Customers::CreatedAt))
                        .col(cols::timestamp(Customers::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Reservations::Table)
                        .if_not_exists()
                        .col(cols::pk(Reservations::Id))
                        .col(cols::fk(Reservations::CustomerId))
                        .col(
                            ColumnDef::new(Reservations::EventDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Reservations::EventType).string_len(100).not_null())
                        .col(ColumnDef::new(Reservations::Location).string().null())
                        .col(
                            ColumnDef::new(Reservations::NumberOfPeople)
                                .integer()
                                .not_null(),
                        )
                        .col(cols::money(Reservations::TotalAmount))
                        .col(cols::money(Reservations::AdvancePayment))
                        .col(ColumnDef::new(Reservations::Notes).text().null())
                        .col(
                            ColumnDef::new(Reservations::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(cols::timestamp(Reservations::CreatedAt))
                        .col(cols::timestamp(Reservations::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_customer_id")
                                .from(Reservations::Table, Reservations::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reservations_customer_id")
                        .table(Reservations::Table)
                        .col(Reservations::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(cols::pk(Employees::Id))
                        .col(ColumnDef::new(Employees::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Employees::Document)
                                .string_len(30)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Employees::Email).string_len(255).null())
                        .col(ColumnDef::new(Employees::Phone).string_len(30).null())
                        .col(ColumnDef::new(Employees::Position).string_len(100).null())
                        .col(ColumnDef::new(Employees::HireDate).date().null())
                        .col(cols::flag(Employees::Status))
                        .col(cols::timestamp(Employees::CreatedAt))
                        .col(cols::timestamp(Employees::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Providers::Table)
                        .if_not_exists()
                        .col(cols::pk(Providers::Id))
                        .col(ColumnDef::new(Providers::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Providers::Document)
                                .string_len(30)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Providers::ContactName).string_len(100).null())
                        .col(ColumnDef::new(Providers::Email).string_len(255).null())
                        .col(ColumnDef::new(Providers::Phone).string_len(30).null())
                        .col(ColumnDef::new(Providers::Address).string().null())
                        .col(cols::flag(Providers::Status))
                        .col(cols::timestamp(Providers::CreatedAt))
                        .col(cols::timestamp(Providers::UpdatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                Providers::Table.into_iden(),
                Employees::Table.into_iden(),
                Reservations::Table.into_iden(),
                Customers::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Name,
        Document,
        Email,
        Phone,
        Address,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Reservations {
        Table,
        Id,
        CustomerId,
        EventDate,
        EventType,
        Location,
        NumberOfPeople,
        TotalAmount,
        AdvancePayment,
        Notes,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Employees {
        Table,
        Id,
        Name,
        Document,
        Email,
        Phone,
        Position,
        HireDate,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Providers {
        Table,
        Id,
        Name,
        Document,
        ContactName,
        Email,
        Phone,
        Address,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_inventory_tables {
    use super::cols;
    use super::m20240101_000002_create_directory_tables::Providers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SupplyCategories::Table)
                        .if_not_exists()
                        .col(cols::pk(SupplyCategories::Id))
                        .col(
                            ColumnDef::new(SupplyCategories::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(SupplyCategories::Description).string().null())
                        .col(cols::flag(SupplyCategories::Status))
                        .col(cols::timestamp(SupplyCategories::CreatedAt))
                        .col(cols::timestamp(SupplyCategories::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Supplies::Table)
                        .if_not_exists()
                        .col(cols::pk(Supplies::Id))
                        .col(
                            ColumnDef::new(Supplies::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Supplies::CategoryId).integer().null())
                        .col(
                            ColumnDef::new(Supplies::UnitOfMeasure)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(cols::quantity(Supplies::Stock))
                        .col(ColumnDef::new(Supplies::Description).string().null())
                        .col(cols::flag(Supplies::Status))
                        .col(cols::timestamp(Supplies::CreatedAt))
                        .col(cols::timestamp(Supplies::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_supplies_category_id")
                                .from(Supplies::Table, Supplies::CategoryId)
                                .to(SupplyCategories::Table, SupplyCategories::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RegisterPurchases::Table)
                        .if_not_exists()
                        .col(cols::pk(RegisterPurchases::Id))
                        .col(cols::fk(RegisterPurchases::ProviderId))
                        .col(cols::fk(RegisterPurchases::CategoryId))
                        .col(
                            ColumnDef::new(RegisterPurchases::PurchaseDate)
                                .date()
                                .not_null(),
                        )
                        .col(cols::money(RegisterPurchases::SubtotalAmount))
                        .col(cols::money(RegisterPurchases::TotalAmount))
                        .col(
                            ColumnDef::new(RegisterPurchases::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(cols::timestamp(RegisterPurchases::CreatedAt))
                        .col(cols::timestamp(RegisterPurchases::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_register_purchases_provider_id")
                                .from(RegisterPurchases::Table, RegisterPurchases::ProviderId)
                                .to(Providers::Table, Providers::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_register_purchases_category_id")
                                .from(RegisterPurchases::Table, RegisterPurchases::CategoryId)
                                .to(SupplyCategories::Table, SupplyCategories::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_register_purchases_provider_category_status")
                        .table(RegisterPurchases::Table)
                        .col(RegisterPurchases::ProviderId)
                        .col(RegisterPurchases::CategoryId)
                        .col(RegisterPurchases::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseDetails::Table)
                        .if_not_exists()
                        .col(cols::pk(PurchaseDetails::Id))
                        .col(cols::fk(PurchaseDetails::RegisterPurchaseId))
                        .col(cols::fk(PurchaseDetails::SupplyId))
                        .col(cols::quantity(PurchaseDetails::Quantity))
                        .col(cols::money(PurchaseDetails::UnitPrice))
                        .col(cols::money(PurchaseDetails::Subtotal))
                        .col(cols::timestamp(PurchaseDetails::CreatedAt))
                        .col(cols::timestamp(PurchaseDetails::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_details_register_purchase_id")
                                .from(PurchaseDetails::Table, PurchaseDetails::RegisterPurchaseId)
                                .to(RegisterPurchases::Table, RegisterPurchases::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_details_supply_id")
                                .from(PurchaseDetails::Table, PurchaseDetails::SupplyId)
                                .to(Supplies::Table, Supplies::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_details_register_purchase_id")
                        .table(PurchaseDetails::Table)
                        .col(PurchaseDetails::RegisterPurchaseId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                PurchaseDetails::Table.into_iden(),
                RegisterPurchases::Table.into_iden(),
                Supplies::Table.into_iden(),
                SupplyCategories::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SupplyCategories {
        Table,
        Id,
        Name,
        Description,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Supplies {
        Table,
        Id,
        Name,
        CategoryId,
        UnitOfMeasure,
        Stock,
        Description,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum RegisterPurchases {
        Table,
        Id,
        ProviderId,
        CategoryId,
        PurchaseDate,
        SubtotalAmount,
        TotalAmount,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseDetails {
        Table,
        Id,
        RegisterPurchaseId,
        SupplyId,
        Quantity,
        UnitPrice,
        Subtotal,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_production_tables {
    use super::cols;
    use super::m20240101_000002_create_directory_tables::Employees;
    use super::m20240101_000003_create_inventory_tables::{PurchaseDetails, Supplies};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_production_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(cols::pk(Products::Id))
                        .col(
                            ColumnDef::new(Products::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Description).string().null())
                        .col(cols::money(Products::Price))
                        .col(cols::flag(Products::Status))
                        .col(cols::timestamp(Products::CreatedAt))
                        .col(cols::timestamp(Products::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Processes::Table)
                        .if_not_exists()
                        .col(cols::pk(Processes::Id))
                        .col(
                            ColumnDef::new(Processes::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Processes::Description).string().null())
                        .col(cols::flag(Processes::Status))
                        .col(cols::timestamp(Processes::CreatedAt))
                        .col(cols::timestamp(Processes::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SpecSheets::Table)
                        .if_not_exists()
                        .col(cols::pk(SpecSheets::Id))
                        .col(cols::fk(SpecSheets::ProductId))
                        .col(cols::quantity(SpecSheets::BaseQuantity))
                        .col(
                            ColumnDef::new(SpecSheets::UnitOfMeasure)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(ColumnDef::new(SpecSheets::DateEffective).date().not_null())
                        .col(ColumnDef::new(SpecSheets::EndDate).date().null())
                        .col(cols::flag(SpecSheets::Status))
                        .col(cols::timestamp(SpecSheets::CreatedAt))
                        .col(cols::timestamp(SpecSheets::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spec_sheets_product_id")
                                .from(SpecSheets::Table, SpecSheets::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_spec_sheets_product_status")
                        .table(SpecSheets::Table)
                        .col(SpecSheets::ProductId)
                        .col(SpecSheets::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SpecSheetSupplies::Table)
                        .if_not_exists()
                        .col(cols::pk(SpecSheetSupplies::Id))
                        .col(cols::fk(SpecSheetSupplies::SpecSheetId))
                        .col(cols::fk(SpecSheetSupplies::SupplyId))
                        .col(cols::fk(SpecSheetSupplies::PurchaseDetailId))
                        .col(cols::quantity(SpecSheetSupplies::Quantity))
                        .col(
                            ColumnDef::new(SpecSheetSupplies::UnitOfMeasure)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(cols::timestamp(SpecSheetSupplies::CreatedAt))
                        .col(cols::timestamp(SpecSheetSupplies::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spec_sheet_supplies_spec_sheet_id")
                                .from(SpecSheetSupplies::Table, SpecSheetSupplies::SpecSheetId)
                                .to(SpecSheets::Table, SpecSheets::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spec_sheet_supplies_supply_id")
                                .from(SpecSheetSupplies::Table, SpecSheetSupplies::SupplyId)
                                .to(Supplies::Table, Supplies::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spec_sheet_supplies_purchase_detail_id")
                                .from(
                                    SpecSheetSupplies::Table,
                                    SpecSheetSupplies::PurchaseDetailId,
                                )
                                .to(PurchaseDetails::Table, PurchaseDetails::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SpecSheetProcesses::Table)
                        .if_not_exists()
                        .col(cols::pk(SpecSheetProcesses::Id))
                        .col(cols::fk(SpecSheetProcesses::SpecSheetId))
                        .col(ColumnDef::new(SpecSheetProcesses::ProcessId).integer().null())
                        .col(
                            ColumnDef::new(SpecSheetProcesses::ProcessOrder)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SpecSheetProcesses::NameOverride)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SpecSheetProcesses::DescriptionOverride)
                                .text()
                                .null(),
                        )
                        .col(cols::timestamp(SpecSheetProcesses::CreatedAt))
                        .col(cols::timestamp(SpecSheetProcesses::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spec_sheet_processes_spec_sheet_id")
                                .from(SpecSheetProcesses::Table, SpecSheetProcesses::SpecSheetId)
                                .to(SpecSheets::Table, SpecSheets::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spec_sheet_processes_process_id")
                                .from(SpecSheetProcesses::Table, SpecSheetProcesses::ProcessId)
                                .to(Processes::Table, Processes::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("uq_spec_sheet_processes_sheet_order")
                        .table(SpecSheetProcesses::Table)
                        .col(SpecSheetProcesses::SpecSheetId)
                        .col(SpecSheetProcesses::ProcessOrder)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductionOrders::Table)
                        .if_not_exists()
                        .col(cols::pk(ProductionOrders::Id))
                        .col(cols::fk(ProductionOrders::ProductId))
                        .col(cols::fk(ProductionOrders::SpecSheetId))
                        .col(ColumnDef::new(ProductionOrders::EmployeeId).integer().null())
                        .col(cols::quantity(ProductionOrders::Quantity))
                        .col(ColumnDef::new(ProductionOrders::OrderDate).date().not_null())
                        .col(
                            ColumnDef::new(ProductionOrders::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(ProductionOrders::Notes).text().null())
                        .col(cols::timestamp(ProductionOrders::CreatedAt))
                        .col(cols::timestamp(ProductionOrders::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_orders_product_id")
                                .from(ProductionOrders::Table, ProductionOrders::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_orders_spec_sheet_id")
                                .from(ProductionOrders::Table, ProductionOrders::SpecSheetId)
                                .to(SpecSheets::Table, SpecSheets::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_orders_employee_id")
                                .from(ProductionOrders::Table, ProductionOrders::EmployeeId)
                                .to(Employees::Table, Employees::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                ProductionOrders::Table.into_iden(),
                SpecSheetProcesses::Table.into_iden(),
                SpecSheetSupplies::Table.into_iden(),
                SpecSheets::Table.into_iden(),
                Processes::Table.into_iden(),
                Products::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        Name,
        Description,
        Price,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Processes {
        Table,
        Id,
        Name,
        Description,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum SpecSheets {
        Table,
        Id,
        ProductId,
        BaseQuantity,
        UnitOfMeasure,
        DateEffective,
        EndDate,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum SpecSheetSupplies {
        Table,
        Id,
        SpecSheetId,
        SupplyId,
        PurchaseDetailId,
        Quantity,
        UnitOfMeasure,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum SpecSheetProcesses {
        Table,
        Id,
        SpecSheetId,
        ProcessId,
        ProcessOrder,
        NameOverride,
        DescriptionOverride,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ProductionOrders {
        Table,
        Id,
        ProductId,
        SpecSheetId,
        EmployeeId,
        Quantity,
        OrderDate,
        Status,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_expense_tables {
    use super::cols;
    use super::m20240101_000002_create_directory_tables::Employees;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_expense_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ExpenseCategories::Table)
                        .if_not_exists()
                        .col(cols::pk(ExpenseCategories::Id))
                        .col(
                            ColumnDef::new(ExpenseCategories::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ExpenseCategories::Description).string().null())
                        .col(cols::flag(ExpenseCategories::Status))
                        .col(cols::timestamp(ExpenseCategories::CreatedAt))
                        .col(cols::timestamp(ExpenseCategories::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Expenses::Table)
                        .if_not_exists()
                        .col(cols::pk(Expenses::Id))
                        .col(cols::fk(Expenses::CategoryId))
                        .col(ColumnDef::new(Expenses::EmployeeId).integer().null())
                        .col(cols::money(Expenses::Amount))
                        .col(ColumnDef::new(Expenses::ExpenseDate).date().not_null())
                        .col(ColumnDef::new(Expenses::Description).string().null())
                        .col(cols::flag(Expenses::Status))
                        .col(cols::timestamp(Expenses::CreatedAt))
                        .col(cols::timestamp(Expenses::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_category_id")
                                .from(Expenses::Table, Expenses::CategoryId)
                                .to(ExpenseCategories::Table, ExpenseCategories::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_employee_id")
                                .from(Expenses::Table, Expenses::EmployeeId)
                                .to(Employees::Table, Employees::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(
                    Table::drop()
                        .table(ExpenseCategories::Table)
                        .if_exists()
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ExpenseCategories {
        Table,
        Id,
        Name,
        Description,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Expenses {
        Table,
        Id,
        CategoryId,
        EmployeeId,
        Amount,
        ExpenseDate,
        Description,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}
