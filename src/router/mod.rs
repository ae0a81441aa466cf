use crate::auth::rbac::Role;

pub mod guard;

pub use guard::{evaluate, NavigationDecision, Navigator, Notice, Notifier, TracingNotifier};

pub const LOGIN: &str = "login";
pub const MAIN: &str = "main";

/// A navigable screen and its access requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
    /// `None` means any authenticated user may open the route.
    pub roles: Option<&'static [Role]>,
}

impl Route {
    pub const fn open(name: &'static str, path: &'static str) -> Self {
        Self { name, path, requires_auth: false, roles: None }
    }

    pub const fn authenticated(name: &'static str, path: &'static str) -> Self {
        Self { name, path, requires_auth: true, roles: None }
    }

    pub const fn restricted(name: &'static str, path: &'static str, roles: &'static [Role]) -> Self {
        Self { name, path, requires_auth: true, roles: Some(roles) }
    }

    pub fn accepts(&self, role: Role) -> bool {
        self.roles.is_some_and(|roles| roles.contains(&role))
    }
}

const BOSS_MANAGER: &[Role] = &[Role::Boss, Role::Manager];
const BOSS_STOREKEEPER: &[Role] = &[Role::Boss, Role::Storekeeper];
const BOSS_ONLY: &[Role] = &[Role::Boss];

pub static ROUTES: &[Route] = &[
    Route::open(LOGIN, "/login"),
    Route::authenticated(MAIN, "/"),
    Route::authenticated("reset_password", "/reset-password"),
    // Clients
    Route::authenticated("client_list", "/client"),
    Route::authenticated("client_overdue", "/client/overdue"),
    Route::authenticated("client_detail", "/client/detail"),
    // Orders
    Route::restricted("order_create", "/order/create", BOSS_MANAGER),
    Route::restricted("order_list", "/order/list", BOSS_MANAGER),
    Route::restricted("order_detail", "/order/detail", BOSS_MANAGER),
    // System management
    Route::restricted("installer_list", "/installer", BOSS_MANAGER),
    Route::restricted("brand_category", "/system/brand-category", BOSS_MANAGER),
    Route::restricted("staff_list", "/staff", BOSS_ONLY),
    Route::restricted("dashboard", "/dashboard", BOSS_ONLY),
    // Inventory
    Route::restricted("inventory_list", "/inventory/list", BOSS_STOREKEEPER),
    Route::restricted("inventory_purchase", "/inventory/purchase", BOSS_STOREKEEPER),
    Route::restricted("inventory_purchase_list", "/inventory/purchase/list", BOSS_STOREKEEPER),
    Route::restricted("inventory_purchase_detail", "/inventory/purchase/detail", BOSS_STOREKEEPER),
    Route::restricted("inventory_receive", "/inventory/receive", BOSS_STOREKEEPER),
    Route::restricted("inventory_receive_list", "/inventory/receive/list", BOSS_STOREKEEPER),
    Route::restricted("inventory_receive_detail", "/inventory/receive/detail", BOSS_STOREKEEPER),
    Route::restricted("inventory_log", "/inventory/log", BOSS_ONLY),
];

pub fn find(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Resolve a client-side path, ignoring any query string and trailing slash.
pub fn find_by_path(path: &str) -> Option<&'static Route> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.iter().find(|r| r.path == normalized)
}
