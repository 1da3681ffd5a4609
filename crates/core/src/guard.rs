//! Route guard
//!
//! Decides whether a screen may open for the current session. The check is
//! a plain role comparison against the locally stored record.

use crate::models::{Role, SessionContext};

const CUSTOMER_ONLY: &[Role] = &[Role::Customer];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    // Public
    Login,
    Register,
    Unauthorized,
    NotFound,

    // Customer
    CustomerDashboard,
    BrowseCars,
    CarDetails,
    MyBookings,
    Payment,
    Profile,

    // Admin
    AdminDashboard,
    ManageCars,
    AddCar,
    ManageBookings,
    AdminPayments,
    ManageUsers,
}

impl Route {
    /// Roles allowed to open the screen; `None` for public screens
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Login | Route::Register | Route::Unauthorized | Route::NotFound => None,

            Route::CustomerDashboard
            | Route::BrowseCars
            | Route::CarDetails
            | Route::MyBookings
            | Route::Payment
            | Route::Profile => Some(CUSTOMER_ONLY),

            Route::AdminDashboard
            | Route::ManageCars
            | Route::AddCar
            | Route::ManageBookings
            | Route::AdminPayments
            | Route::ManageUsers => Some(ADMIN_ONLY),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Unauthorized => "/unauthorized",
            Route::NotFound => "/404",
            Route::CustomerDashboard => "/customer/dashboard",
            Route::BrowseCars => "/customer/cars",
            Route::CarDetails => "/customer/cars/:carId",
            Route::MyBookings => "/customer/bookings",
            Route::Payment => "/customer/payment/:bookingId",
            Route::Profile => "/customer/profile",
            Route::AdminDashboard => "/admin/dashboard",
            Route::ManageCars => "/admin/cars",
            Route::AddCar => "/admin/cars/add",
            Route::ManageBookings => "/admin/bookings",
            Route::AdminPayments => "/admin/payments",
            Route::ManageUsers => "/admin/users",
        }
    }

    /// Where a user lands right after logging in
    pub fn landing_for(role: Option<Role>) -> Route {
        match role {
            Some(Role::Admin) => Route::AdminDashboard,
            Some(Role::Customer) => Route::CustomerDashboard,
            None => Route::Unauthorized,
        }
    }

    /// Evaluate the guard for this screen
    pub fn check(&self, session: &SessionContext) -> GuardDecision {
        match self.required_roles() {
            None => GuardDecision::Allow,
            Some(roles) => guard(session, roles),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a navigation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToUnauthorized,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// Screen to show instead, if any
    pub fn redirect(&self) -> Option<Route> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(Route::Login),
            GuardDecision::RedirectToUnauthorized => Some(Route::Unauthorized),
        }
    }
}

/// Allow the session if its role is one of `required`.
///
/// An empty `required` list admits any logged-in user.
pub fn guard(session: &SessionContext, required: &[Role]) -> GuardDecision {
    let Some(user) = session.user() else {
        return GuardDecision::RedirectToLogin;
    };

    if required.is_empty() {
        return GuardDecision::Allow;
    }

    match user.role {
        Some(role) if required.contains(&role) => GuardDecision::Allow,
        _ => GuardDecision::RedirectToUnauthorized,
    }
}
