pub mod auth;
pub mod common;
pub mod customers;
pub mod employees;
pub mod expense_categories;
pub mod expenses;
pub mod health;
pub mod processes;
pub mod production_orders;
pub mod products;
pub mod providers;
pub mod purchases;
pub mod reservations;
pub mod roles;
pub mod spec_sheets;
pub mod supplies;
pub mod supply_categories;
pub mod users;

use crate::services::{
    accounts::AccountService, customers::CustomerService, employees::EmployeeService,
    expense_categories::ExpenseCategoryService, expenses::ExpenseService,
    processes::ProcessService, production_orders::ProductionOrderService,
    products::ProductService, providers::ProviderService, purchases::PurchaseService,
    reservations::ReservationService, roles::RoleService, spec_sheets::SpecSheetService,
    supplies::SupplyService, supply_categories::SupplyCategoryService, users::UserService,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub reservations: Arc<ReservationService>,
    pub employees: Arc<EmployeeService>,
    pub providers: Arc<ProviderService>,
    pub supply_categories: Arc<SupplyCategoryService>,
    pub supplies: Arc<SupplyService>,
    pub purchases: Arc<PurchaseService>,
    pub products: Arc<ProductService>,
    pub processes: Arc<ProcessService>,
    pub spec_sheets: Arc<SpecSheetService>,
    pub production_orders: Arc<ProductionOrderService>,
    pub expense_categories: Arc<ExpenseCategoryService>,
    pub expenses: Arc<ExpenseService>,
    pub roles: Arc<RoleService>,
    pub users: Arc<UserService>,
    pub accounts: Arc<AccountService>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, auth_service: Arc<crate::auth::AuthService>) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db.clone())),
            reservations: Arc::new(ReservationService::new(db.clone())),
            employees: Arc::new(EmployeeService::new(db.clone())),
            providers: Arc::new(ProviderService::new(db.clone())),
            supply_categories: Arc::new(SupplyCategoryService::new(db.clone())),
            supplies: Arc::new(SupplyService::new(db.clone())),
            purchases: Arc::new(PurchaseService::new(db.clone())),
            products: Arc::new(ProductService::new(db.clone())),
            processes: Arc::new(ProcessService::new(db.clone())),
            spec_sheets: Arc::new(SpecSheetService::new(db.clone())),
            production_orders: Arc::new(ProductionOrderService::new(db.clone())),
            expense_categories: Arc::new(ExpenseCategoryService::new(db.clone())),
            expenses: Arc::new(ExpenseService::new(db.clone())),
            roles: Arc::new(RoleService::new(db.clone())),
            users: Arc::new(UserService::new(db.clone())),
            accounts: Arc::new(AccountService::new(db, auth_service)),
        }
    }
}
