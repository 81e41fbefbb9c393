/*!
 * # Permissions Module
 *
 * Privileges are `resource:action` strings. Every resource has a `read`
 * privilege (list, get) and a `write` privilege (create, update, delete,
 * status changes). Granted privileges may use wildcards: `resource:*`
 * covers every action on one resource and `*` covers everything.
 */

/// Permission actions
pub struct Actions;

impl Actions {
    pub const READ: &'static str = "read";
    pub const WRITE: &'static str = "write";
    pub const ALL: &'static str = "*";
}

/// Resource types
pub struct Resources;

impl Resources {
    pub const CUSTOMERS: &'static str = "customers";
    pub const RESERVATIONS: &'static str = "reservations";
    pub const EMPLOYEES: &'static str = "employees";
    pub const PROVIDERS: &'static str = "providers";
    pub const SUPPLY_CATEGORIES: &'static str = "supply_categories";
    pub const SUPPLIES: &'static str = "supplies";
    pub const PURCHASES: &'static str = "purchases";
    pub const PRODUCTS: &'static str = "products";
    pub const PROCESSES: &'static str = "processes";
    pub const SPEC_SHEETS: &'static str = "spec_sheets";
    pub const PRODUCTION_ORDERS: &'static str = "production_orders";
    pub const EXPENSE_CATEGORIES: &'static str = "expense_categories";
    pub const EXPENSES: &'static str = "expenses";
    pub const ROLES: &'static str = "roles";
    pub const USERS: &'static str = "users";

    pub const ALL: [&'static str; 15] = [
        Self::CUSTOMERS,
        Self::RESERVATIONS,
        Self::EMPLOYEES,
        Self::PROVIDERS,
        Self::SUPPLY_CATEGORIES,
        Self::SUPPLIES,
        Self::PURCHASES,
        Self::PRODUCTS,
        Self::PROCESSES,
        Self::SPEC_SHEETS,
        Self::PRODUCTION_ORDERS,
        Self::EXPENSE_CATEGORIES,
        Self::EXPENSES,
        Self::ROLES,
        Self::USERS,
    ];
}

/// Name of the seeded role that bypasses permission checks
pub const ADMIN_ROLE: &str = "admin";

/// Common permission string constants for compile-time safety
pub mod consts {
    pub const CUSTOMERS_READ: &str = "customers:read";
    pub const CUSTOMERS_WRITE: &str = "customers:write";

    pub const RESERVATIONS_READ: &str = "reservations:read";
    pub const RESERVATIONS_WRITE: &str = "reservations:write";

    pub const EMPLOYEES_READ: &str = "employees:read";
    pub const EMPLOYEES_WRITE: &str = "employees:write";

    pub const PROVIDERS_READ: &str = "providers:read";
    pub const PROVIDERS_WRITE: &str = "providers:write";

    pub const SUPPLY_CATEGORIES_READ: &str = "supply_categories:read";
    pub const SUPPLY_CATEGORIES_WRITE: &str = "supply_categories:write";

    pub const SUPPLIES_READ: &str = "supplies:read";
    pub const SUPPLIES_WRITE: &str = "supplies:write";

    pub const PURCHASES_READ: &str = "purchases:read";
    pub const PURCHASES_WRITE: &str = "purchases:write";

    pub const PRODUCTS_READ: &str = "products:read";
    pub const PRODUCTS_WRITE: &str = "products:write";

    pub const PROCESSES_READ: &str = "processes:read";
    pub const PROCESSES_WRITE: &str = "processes:write";

    pub const SPEC_SHEETS_READ: &str = "spec_sheets:read";
    pub const SPEC_SHEETS_WRITE: &str = "spec_sheets:write";

    pub const PRODUCTION_ORDERS_READ: &str = "production_orders:read";
    pub const PRODUCTION_ORDERS_WRITE: &str = "production_orders:write";

    pub const EXPENSE_CATEGORIES_READ: &str = "expense_categories:read";
    pub const EXPENSE_CATEGORIES_WRITE: &str = "expense_categories:write";

    pub const EXPENSES_READ: &str = "expenses:read";
    pub const EXPENSES_WRITE: &str = "expenses:write";

    pub const ROLES_READ: &str = "roles:read";
    pub const ROLES_WRITE: &str = "roles:write";

    pub const USERS_READ: &str = "users:read";
    pub const USERS_WRITE: &str = "users:write";
}

/// Format a permission string from resource and action
pub fn format_permission(resource: &str, action: &str) -> String {
    format!("{}:{}", resource, action)
}

/// Every concrete privilege the API checks, in seeding order
pub fn all_permissions() -> Vec<String> {
    Resources::ALL
        .iter()
        .flat_map(|resource| {
            [Actions::READ, Actions::WRITE]
                .into_iter()
                .map(move |action| format_permission(resource, action))
        })
        .collect()
}

/// Whether a granted privilege covers the required one
pub fn permission_matches(granted: &str, required: &str) -> bool {
    if granted == Actions::ALL || granted == required {
        return true;
    }

    match (granted.split_once(':'), required.split_once(':')) {
        (Some((granted_resource, Actions::ALL)), Some((required_resource, _))) => {
            granted_resource == required_resource
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("customers:read", "customers:read", true)]
    #[case("customers:read", "customers:write", false)]
    #[case("customers:*", "customers:write", true)]
    #[case("customers:*", "customers_archive:read", false)]
    #[case("*", "roles:write", true)]
    #[case("supplies:write", "supply_categories:write", false)]
    fn wildcard_matching(#[case] granted: &str, #[case] required: &str, #[case] expected: bool) {
        assert_eq!(permission_matches(granted, required), expected);
    }

    #[test]
    fn all_permissions_cover_read_and_write_for_each_resource() {
        let perms = all_permissions();
        assert_eq!(perms.len(), Resources::ALL.len() * 2);
        assert!(perms.contains(&consts::SPEC_SHEETS_WRITE.to_string()));
        assert!(perms.contains(&consts::PRODUCTION_ORDERS_READ.to_string()));
    }
}
