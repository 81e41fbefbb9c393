//! sea-orm entities, one module per table.

pub mod customer;
pub mod employee;
pub mod expense;
pub mod expense_category;
pub mod privilege;
pub mod process;
pub mod product;
pub mod production_order;
pub mod provider;
pub mod purchase_detail;
pub mod register_purchase;
pub mod reservation;
pub mod role;
pub mod role_privilege;
pub mod spec_sheet;
pub mod spec_sheet_process;
pub mod spec_sheet_supply;
pub mod supply;
pub mod supply_category;
pub mod user;
