//! Booking screens for customers and admins

use std::collections::BTreeSet;

use carhire_core::stats::BookingStats;
use carhire_core::{Booking, BookingFilter, BookingStatus, FieldErrors, Route};
use carhire_net::PaymentProbe;
use chrono::NaiveDate;

use super::{banner, ListScreen, ScreenResult};
use crate::state::AppState;

pub type BookingScreen = ListScreen<Booking, BookingFilter>;

impl BookingScreen {
    pub fn stats(&self) -> BookingStats {
        BookingStats::from_bookings(self.items.items())
    }

    pub fn empty_message(&self) -> &'static str {
        if self.items.is_empty() {
            "No bookings have been made yet"
        } else if self.filter.search.trim().is_empty() {
            "No bookings match your filter criteria"
        } else {
            "No bookings match your search criteria"
        }
    }
}

/// The customer's own bookings and which of them are paid
#[derive(Debug)]
pub struct MyBookings {
    pub screen: BookingScreen,
    pub paid: BTreeSet<i64>,
    /// Bookings whose payment state could not be determined
    pub unknown: BTreeSet<i64>,
}

impl MyBookings {
    pub fn is_paid(&self, booking: &Booking) -> bool {
        self.paid.contains(&booking.booking_id)
    }

    /// Show the pay action: pending and known to be unpaid
    pub fn can_pay(&self, booking: &Booking) -> bool {
        booking.status.awaits_payment()
            && !self.paid.contains(&booking.booking_id)
            && !self.unknown.contains(&booking.booking_id)
    }

    /// Count per status tab
    pub fn tab_count(&self, status: Option<BookingStatus>) -> usize {
        match status {
            None => self.screen.items.len(),
            Some(status) => self.screen.stats().count(status),
        }
    }
}

pub async fn mine(state: &AppState, status: Option<BookingStatus>) -> ScreenResult<MyBookings> {
    let user_id = state.enter(Route::MyBookings)?.user_id;
    let mut screen = BookingScreen::default();
    screen
        .load(state.client.rentals().by_user(user_id), "Failed to load bookings")
        .await?;

    let mut paid = BTreeSet::new();
    let mut unknown = BTreeSet::new();
    let payments = state.client.payments();
    for booking in screen.items.items() {
        match payments.probe(booking.booking_id).await {
            PaymentProbe::Exists(_) => {
                paid.insert(booking.booking_id);
            }
            PaymentProbe::Missing => {}
            PaymentProbe::Failed(e) => {
                tracing::warn!(booking_id = booking.booking_id, error = %e, "Payment probe failed");
                unknown.insert(booking.booking_id);
            }
        }
    }

    let filter = BookingFilter {
        status,
        ..Default::default()
    };
    Ok(MyBookings {
        screen: screen.with_filter(filter),
        paid,
        unknown,
    })
}

pub async fn cancel(state: &AppState, booking_id: i64) -> ScreenResult<()> {
    state.enter(Route::MyBookings)?;
    state
        .client
        .rentals()
        .cancel(booking_id)
        .await
        .map_err(banner("Failed to cancel booking"))
}

/// Every booking, for the admin
pub async fn manage(state: &AppState, filter: BookingFilter) -> ScreenResult<BookingScreen> {
    state.enter(Route::ManageBookings)?;
    let mut screen = BookingScreen::default();
    screen
        .load(
            state.client.rentals().list(),
            "Failed to load bookings. Please try again.",
        )
        .await?;
    Ok(screen.with_filter(filter))
}

pub async fn set_status(
    state: &AppState,
    booking_id: i64,
    status: BookingStatus,
) -> ScreenResult<()> {
    state.enter(Route::ManageBookings)?;
    state
        .client
        .rentals()
        .update_status(booking_id, status)
        .await
        .map_err(banner("Failed to update booking status"))
}

/// Changes an admin may make to a booking; unset fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct BookingEdit {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub total_price: Option<f64>,
}

impl BookingEdit {
    /// Apply to `booking`, keeping the date order intact
    pub fn apply(&self, booking: &mut Booking) -> Result<(), FieldErrors> {
        let start = self.start_date.unwrap_or(booking.start_date);
        let end = self.end_date.unwrap_or(booking.end_date);
        let mut errors = FieldErrors::new();
        if end < start {
            errors.add("endDate", "End date must be after start date");
        }
        if self.total_price.is_some_and(|p| p.is_nan() || p < 0.0) {
            errors.add("totalPrice", "Total price cannot be negative");
        }
        errors.into_result(())?;

        booking.start_date = start;
        booking.end_date = end;
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(total) = self.total_price {
            booking.total_price = total;
        }
        Ok(())
    }
}

pub async fn edit(state: &AppState, booking_id: i64, edit: &BookingEdit) -> ScreenResult<Booking> {
    state.enter(Route::ManageBookings)?;
    let rentals = state.client.rentals();
    let mut booking = rentals
        .get(booking_id)
        .await
        .map_err(banner("Failed to fetch booking"))?;
    edit.apply(&mut booking)?;
    rentals
        .update(&booking)
        .await
        .map_err(banner("Failed to update booking"))
}

pub async fn delete(state: &AppState, booking_id: i64) -> ScreenResult<()> {
    state.enter(Route::ManageBookings)?;
    state
        .client
        .rentals()
        .delete(booking_id)
        .await
        .map_err(banner("Failed to delete booking"))
}

pub(crate) fn status_label(status: BookingStatus) -> String {
    format!("{} {}", status.icon(), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in, signed_in_against};
    use crate::viewmodel::ScreenError;
    use carhire_net::test_support::StubServer;
    use serde_json::json;
    use tempfile::TempDir;

    fn bookings() -> Vec<Booking> {
        serde_json::from_value(json!([
            {"bookingId": 1, "carId": 7, "userId": 3, "startDate": "2025-01-01", "endDate": "2025-01-03",
             "totalPrice": 15000, "status": "pending", "customerName": "Nimal Perera", "email": "nimal@example.com"},
            {"bookingId": 2, "carId": 8, "userId": 4, "startDate": "2025-02-01", "endDate": "2025-02-02",
             "totalPrice": 9000, "status": "completed", "customerName": "Kamala Silva", "email": "kamala@example.com"},
            {"bookingId": 3, "carId": 7, "userId": 3, "startDate": "2025-03-01", "endDate": "2025-03-05",
             "totalPrice": 25000, "status": "completed", "customerName": "Nimal Perera"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_admin_filter_and_stats() {
        let mut screen = BookingScreen::default();
        screen.items.replace(bookings());
        screen.filter.search = "nimal".to_string();
        let ids: Vec<i64> = screen.visible().iter().map(|b| b.booking_id).collect();
        assert_eq!(ids, vec![1, 3]);

        screen.filter.status = Some(BookingStatus::Completed);
        let ids: Vec<i64> = screen.visible().iter().map(|b| b.booking_id).collect();
        assert_eq!(ids, vec![3]);

        let stats = screen.stats();
        assert_eq!(stats.count(BookingStatus::Completed), 2);
        assert_eq!(stats.revenue, 34000.0);

        screen.filter.clear();
        assert_eq!(screen.visible().len(), 3);
    }

    #[test]
    fn test_pay_action_only_for_unpaid_pending() {
        let mut screen = BookingScreen::default();
        screen.items.replace(bookings());
        let mut mine = MyBookings {
            screen,
            paid: BTreeSet::new(),
            unknown: BTreeSet::new(),
        };
        let items = mine.screen.items.items().to_vec();

        assert!(mine.can_pay(&items[0]));
        assert!(!mine.can_pay(&items[1]));
        mine.paid.insert(1);
        assert!(mine.is_paid(&items[0]));
        assert!(!mine.can_pay(&items[0]));
        assert_eq!(mine.tab_count(None), 3);
        assert_eq!(mine.tab_count(Some(BookingStatus::Pending)), 1);
    }

    #[test]
    fn test_edit_keeps_dates_ordered() {
        let mut booking = bookings().remove(0);
        let edit = BookingEdit {
            end_date: NaiveDate::from_ymd_opt(2024, 12, 30),
            ..Default::default()
        };
        let errors = edit.apply(&mut booking).unwrap_err();
        assert!(errors.get("endDate").is_some());
        assert_eq!(booking.end_date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());

        let edit = BookingEdit {
            end_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            status: Some(BookingStatus::Approved),
            ..Default::default()
        };
        edit.apply(&mut booking).unwrap();
        assert_eq!(booking.status, BookingStatus::Approved);
    }

    #[tokio::test]
    async fn test_admin_screens_refuse_customers() {
        let dir = TempDir::new().unwrap();
        let state = signed_in(&dir, json!({"userId": 3, "role": "CUSTOMER"}));
        assert!(matches!(
            manage(&state, BookingFilter::default()).await,
            Err(ScreenError::Redirect(Route::Unauthorized))
        ));
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(BookingStatus::Pending), "⏳ pending");
    }

    #[tokio::test]
    async fn test_mine_marks_paid_and_unknown() {
        let server = StubServer::start(|r| match r.path() {
            "/api/rentals/user/3" => (
                200,
                json!([
                    {"bookingId": 1, "carId": 7, "userId": 3, "startDate": "2025-01-01",
                     "endDate": "2025-01-03", "totalPrice": 15000, "status": "pending"},
                    {"bookingId": 2, "carId": 8, "userId": 3, "startDate": "2025-02-01",
                     "endDate": "2025-02-02", "totalPrice": 9000, "status": "pending"},
                    {"bookingId": 3, "carId": 7, "userId": 3, "startDate": "2025-03-01",
                     "endDate": "2025-03-05", "totalPrice": 25000, "status": "completed"}
                ])
                .to_string(),
            ),
            "/api/payments/booking/1" => (
                200,
                json!({"paymentId": 11, "bookingId": 1, "amount": 15000}).to_string(),
            ),
            "/api/payments/booking/2" => (404, String::new()),
            _ => (500, json!({"message": "Database unavailable"}).to_string()),
        })
        .await;
        let dir = TempDir::new().unwrap();
        let state = signed_in_against(&dir, &server, json!({"userId": 3, "role": "CUSTOMER"}));

        let mine = mine(&state, None).await.unwrap();
        assert_eq!(mine.paid, BTreeSet::from([1]));
        assert_eq!(mine.unknown, BTreeSet::from([3]));

        let items = mine.screen.items.items().to_vec();
        assert!(!mine.can_pay(&items[0]));
        assert!(mine.can_pay(&items[1]));
        assert!(!mine.can_pay(&items[2]));
        assert_eq!(mine.tab_count(Some(BookingStatus::Pending)), 2);
    }
}
