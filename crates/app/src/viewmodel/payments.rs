//! Checkout for customers and the admin payment ledger

use carhire_core::stats::PaymentStats;
use carhire_core::validation::validate_date_range;
use carhire_core::{NewPayment, Payment, PaymentFilter, Route};
use carhire_net::PaymentProbe;
use chrono::NaiveDate;

use super::{banner, ListScreen, ScreenError, ScreenResult};
use crate::state::AppState;

pub const ALREADY_PAID: &str = "Payment already exists for this booking";

pub type PaymentScreen = ListScreen<Payment, PaymentFilter>;

impl PaymentScreen {
    /// Figures over the payments currently shown
    pub fn stats(&self) -> PaymentStats {
        PaymentStats::from_payments(self.visible())
    }

    pub fn empty_message(&self) -> &'static str {
        if self.items.is_empty() {
            "No payments recorded yet"
        } else {
            "No payments match your search criteria"
        }
    }
}

/// What the customer fills in on the payment screen
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    /// Defaults to today
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
}

/// Pay the full price of one of the customer's bookings
pub async fn pay(
    state: &AppState,
    booking_id: i64,
    checkout: &Checkout,
    today: NaiveDate,
) -> ScreenResult<Payment> {
    let user_id = state.enter(Route::Payment)?.user_id;

    match state.client.payments().probe(booking_id).await {
        PaymentProbe::Exists(_) => return Err(ScreenError::Banner(ALREADY_PAID.to_string())),
        PaymentProbe::Missing => {}
        PaymentProbe::Failed(e) => {
            return Err(ScreenError::from_net(e, "Failed to load booking details"));
        }
    }

    let booking = state
        .client
        .rentals()
        .get(booking_id)
        .await
        .map_err(banner("Failed to load booking details"))?;
    if booking.user_id != user_id {
        tracing::warn!(booking_id, user_id, "Refusing payment for another user's booking");
        return Err(ScreenError::Redirect(Route::Unauthorized));
    }

    let payment = NewPayment {
        booking_id,
        payment_date: checkout.payment_date.unwrap_or(today),
        amount: booking.total_price,
        payment_method: checkout.payment_method.clone(),
    };
    state
        .client
        .payments()
        .create(&payment)
        .await
        .map_err(banner("Payment failed. Please try again."))
}

/// All payments, filtered locally
pub async fn manage(state: &AppState, filter: PaymentFilter) -> ScreenResult<PaymentScreen> {
    state.enter(Route::AdminPayments)?;
    let mut screen = PaymentScreen::default();
    screen
        .load(
            state.client.payments().list(),
            "Failed to fetch payments. Please try again.",
        )
        .await?;
    Ok(screen.with_filter(filter))
}

/// Payments in a date range, filtered by the backend
pub async fn in_range(
    state: &AppState,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    search: String,
) -> ScreenResult<PaymentScreen> {
    state.enter(Route::AdminPayments)?;
    let (from, to) = validate_date_range(from, to)?;
    let payments = state
        .client
        .payments()
        .date_range(from, to)
        .await
        .map_err(banner("Failed to fetch payments for selected date range"))?;

    let mut screen = PaymentScreen::default();
    screen.items.replace(payments);
    screen.filter.search = search;
    Ok(screen)
}

pub async fn view(state: &AppState, payment_id: i64) -> ScreenResult<Payment> {
    state.enter(Route::AdminPayments)?;
    state
        .client
        .payments()
        .get(payment_id)
        .await
        .map_err(banner("Failed to fetch payment details"))
}

pub async fn delete(state: &AppState, payment_id: i64) -> ScreenResult<()> {
    state.enter(Route::AdminPayments)?;
    state
        .client
        .payments()
        .delete(payment_id)
        .await
        .map_err(banner("Failed to delete payment"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in, signed_in_against};
    use carhire_net::test_support::StubServer;
    use serde_json::json;
    use tempfile::TempDir;

    fn payments() -> Vec<Payment> {
        serde_json::from_value(json!([
            {"paymentId": 11, "bookingId": 4, "amount": "15000", "paymentDate": "2025-01-05T10:30:00", "paymentMethod": "CARD"},
            {"paymentId": 12, "bookingId": 5, "amount": 9000, "paymentDate": "2025-01-20", "paymentMethod": "CASH"},
            {"paymentId": 13, "bookingId": 6, "amount": 6000, "paymentDate": "2025-02-02", "paymentMethod": "ONLINE"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_stats_follow_the_filter() {
        let mut screen = PaymentScreen::default();
        screen.items.replace(payments());
        assert_eq!(screen.stats().total_revenue, 30000.0);

        screen.filter.from = NaiveDate::from_ymd_opt(2025, 1, 1);
        screen.filter.to = NaiveDate::from_ymd_opt(2025, 1, 31);
        let stats = screen.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_revenue, 24000.0);
        assert_eq!(stats.average, 12000.0);

        screen.filter.search = "cash".to_string();
        assert_eq!(screen.stats().count, 1);
    }

    #[tokio::test]
    async fn test_range_needs_both_dates() {
        let dir = TempDir::new().unwrap();
        let state = signed_in(&dir, json!({"userId": 1, "role": "ADMIN"}));
        match in_range(&state, NaiveDate::from_ymd_opt(2025, 1, 1), None, String::new()).await {
            Err(ScreenError::Validation(fields)) => {
                assert_eq!(
                    fields.get("dateRange"),
                    Some("Please select both start and end dates")
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_blocks_checkout() {
        let dir = TempDir::new().unwrap();
        let state = signed_in(&dir, json!({"userId": 3, "role": "CUSTOMER"}));
        let today = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        match pay(&state, 4, &Checkout::default(), today).await {
            Err(ScreenError::Banner(message)) => {
                assert_eq!(message, "Failed to load booking details")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_existing_payment_refuses_checkout() {
        let server = StubServer::start(|r| match r.path() {
            "/api/payments/booking/4" => (
                200,
                json!({"paymentId": 11, "bookingId": 4, "amount": 15000}).to_string(),
            ),
            _ => (500, String::new()),
        })
        .await;
        let dir = TempDir::new().unwrap();
        let state = signed_in_against(&dir, &server, json!({"userId": 3, "role": "CUSTOMER"}));
        let today = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        match pay(&state, 4, &Checkout::default(), today).await {
            Err(ScreenError::Banner(message)) => assert_eq!(message, ALREADY_PAID),
            other => panic!("unexpected {other:?}"),
        }
        assert!(server.requests().iter().all(|r| r.method != "POST"));
    }

    #[tokio::test]
    async fn test_checkout_pays_the_booking_total() {
        let server = StubServer::start(|r| match (r.method.as_str(), r.path()) {
            ("GET", "/api/payments/booking/4") => (404, String::new()),
            ("GET", "/api/rentals/4") => (
                200,
                json!({"bookingId": 4, "carId": 2, "userId": 3, "startDate": "2025-01-10",
                       "endDate": "2025-01-12", "totalPrice": 15000, "status": "pending"})
                .to_string(),
            ),
            ("POST", "/api/payments") => {
                let mut body = r.json();
                body["paymentId"] = json!(21);
                (201, body.to_string())
            }
            _ => (500, String::new()),
        })
        .await;
        let dir = TempDir::new().unwrap();
        let state = signed_in_against(&dir, &server, json!({"userId": 3, "role": "CUSTOMER"}));
        let today = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        let payment = pay(&state, 4, &Checkout::default(), today).await.unwrap();
        assert_eq!(payment.payment_id, 21);
        assert_eq!(payment.amount, 15000.0);

        let posted = server
            .requests()
            .into_iter()
            .find(|r| r.method == "POST")
            .unwrap();
        assert_eq!(posted.json()["paymentDate"], "2025-01-05");
        assert_eq!(posted.json()["bookingId"], 4);
    }

    #[tokio::test]
    async fn test_cannot_pay_for_someone_else() {
        let server = StubServer::start(|r| match r.path() {
            "/api/payments/booking/4" => (404, String::new()),
            "/api/rentals/4" => (
                200,
                json!({"bookingId": 4, "carId": 2, "userId": 99, "startDate": "2025-01-10",
                       "endDate": "2025-01-12", "totalPrice": 15000, "status": "pending"})
                .to_string(),
            ),
            _ => (500, String::new()),
        })
        .await;
        let dir = TempDir::new().unwrap();
        let state = signed_in_against(&dir, &server, json!({"userId": 3, "role": "CUSTOMER"}));
        let today = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        assert!(matches!(
            pay(&state, 4, &Checkout::default(), today).await,
            Err(ScreenError::Redirect(Route::Unauthorized))
        ));
    }
}
