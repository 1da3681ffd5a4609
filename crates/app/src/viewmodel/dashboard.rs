//! Dashboard view models

use carhire_core::stats::{BookingStats, CustomerSummary, FleetStats, PaymentStats, UserStats};
use carhire_core::Route;

use super::{banner, ScreenResult};
use crate::state::AppState;

pub async fn customer(state: &AppState) -> ScreenResult<CustomerSummary> {
    let user_id = state.enter(Route::CustomerDashboard)?.user_id;
    let bookings = state
        .client
        .rentals()
        .by_user(user_id)
        .await
        .map_err(banner("Failed to load dashboard data"))?;
    Ok(CustomerSummary::from_bookings(&bookings))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOverview {
    pub fleet: FleetStats,
    pub bookings: BookingStats,
    pub payments: PaymentStats,
    pub users: UserStats,
}

/// Fleet, booking, payment and user figures in one place
pub async fn admin(state: &AppState) -> ScreenResult<AdminOverview> {
    state.enter(Route::AdminDashboard)?;
    let client = &state.client;
    let fallback = "Failed to load dashboard data";

    let cars = client.cars().list().await.map_err(banner(fallback))?;
    let bookings = client.rentals().list().await.map_err(banner(fallback))?;
    let payments = client.payments().list().await.map_err(banner(fallback))?;
    let users = client.users().list().await.map_err(banner(fallback))?;

    Ok(AdminOverview {
        fleet: FleetStats::from_cars(&cars),
        bookings: BookingStats::from_bookings(&bookings),
        payments: PaymentStats::from_payments(&payments),
        users: UserStats::from_users(&users),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in, state_in};
    use crate::viewmodel::ScreenError;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_dashboards_follow_roles() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        assert!(matches!(
            customer(&state).await,
            Err(ScreenError::Redirect(Route::Login))
        ));

        let dir = TempDir::new().unwrap();
        let state = signed_in(&dir, json!({"userId": 3, "role": "CUSTOMER"}));
        assert!(matches!(
            admin(&state).await,
            Err(ScreenError::Redirect(Route::Unauthorized))
        ));
    }

    #[tokio::test]
    async fn test_customer_dashboard_banner_when_offline() {
        let dir = TempDir::new().unwrap();
        let state = signed_in(&dir, json!({"userId": 3, "role": "CUSTOMER"}));
        match customer(&state).await {
            Err(ScreenError::Banner(message)) => assert_eq!(message, "Failed to load dashboard data"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
