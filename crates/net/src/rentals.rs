//! Booking endpoints

use carhire_core::models::{Booking, BookingStatus, NewBooking};
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::Result;

pub struct RentalService<'a> {
    client: &'a ApiClient,
}

impl<'a> RentalService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, booking: &NewBooking) -> Result<Booking> {
        let request = self
            .client
            .request(Method::POST, &["api", "rentals"])?
            .json(booking);
        let created: Booking = self
            .client
            .send_json(request, "Failed to create booking")
            .await?;
        info!(
            booking_id = created.booking_id,
            car_id = created.car_id,
            total = created.total_price,
            "Booking created"
        );
        Ok(created)
    }

    pub async fn get(&self, booking_id: i64) -> Result<Booking> {
        let request = self
            .client
            .request(Method::GET, &["api", "rentals", &booking_id.to_string()])?;
        self.client.send_json(request, "Failed to fetch booking").await
    }

    pub async fn list(&self) -> Result<Vec<Booking>> {
        let request = self.client.request(Method::GET, &["api", "rentals"])?;
        self.client.send_json(request, "Failed to fetch bookings").await
    }

    pub async fn by_user(&self, user_id: i64) -> Result<Vec<Booking>> {
        let request = self
            .client
            .request(Method::GET, &["api", "rentals", "user", &user_id.to_string()])?;
        self.client
            .send_json(request, "Failed to fetch user bookings")
            .await
    }

    pub async fn by_status(&self, status: BookingStatus) -> Result<Vec<Booking>> {
        let request = self
            .client
            .request(Method::GET, &["api", "rentals", "status", status.as_str()])?;
        self.client
            .send_json(request, "Failed to fetch bookings by status")
            .await
    }

    pub async fn cancel(&self, booking_id: i64) -> Result<()> {
        let request = self
            .client
            .request(Method::PATCH, &["api", "rentals", &booking_id.to_string(), "cancel"])?;
        self.client.send(request, "Failed to cancel booking").await?;
        info!(booking_id, "Booking cancelled");
        Ok(())
    }

    pub async fn update_status(&self, booking_id: i64, status: BookingStatus) -> Result<()> {
        let request = self
            .client
            .request(Method::PUT, &["api", "rentals", &booking_id.to_string(), "status"])?
            .json(&json!({ "status": status }));
        self.client
            .send(request, "Failed to update booking status")
            .await?;
        info!(booking_id, status = %status, "Booking status changed");
        Ok(())
    }

    /// Replace a booking's dates, car or status
    pub async fn update(&self, booking: &Booking) -> Result<Booking> {
        let request = self
            .client
            .request(Method::PUT, &["api", "rentals", &booking.booking_id.to_string()])?
            .json(booking);
        let updated = self
            .client
            .send_json(request, "Failed to update booking")
            .await?;
        info!(booking_id = booking.booking_id, "Booking updated");
        Ok(updated)
    }

    pub async fn delete(&self, booking_id: i64) -> Result<()> {
        let request = self
            .client
            .request(Method::DELETE, &["api", "rentals", &booking_id.to_string()])?;
        self.client.send(request, "Failed to delete booking").await?;
        info!(booking_id, "Booking deleted");
        Ok(())
    }

    /// Whether the car is free for every day in the range
    pub async fn check_availability(
        &self,
        car_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool> {
        let request = self
            .client
            .request(Method::GET, &["api", "rentals", "check-availability"])?
            .query(&[
                ("carId", car_id.to_string()),
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ]);
        self.client
            .send_json(request, "Failed to check availability")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubServer;

    const BOOKING_JSON: &str = r#"{"bookingId":4,"carId":7,"userId":3,"startDate":"2025-01-01","endDate":"2025-01-03","totalPrice":15000,"status":"pending"}"#;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_create_posts_dates() {
        let server = StubServer::start(|_| (200, BOOKING_JSON.to_string())).await;
        let booking = NewBooking {
            car_id: 7,
            user_id: 3,
            start_date: day("2025-01-01"),
            end_date: day("2025-01-03"),
        };

        let created = server.client().rentals().create(&booking).await.unwrap();
        assert_eq!(created.booking_id, 4);
        assert_eq!(created.status, BookingStatus::Pending);

        let body = server.requests()[0].json();
        assert_eq!(body["carId"], 7);
        assert_eq!(body["startDate"], "2025-01-01");
        assert_eq!(body["endDate"], "2025-01-03");
    }

    #[tokio::test]
    async fn test_availability_query() {
        let server = StubServer::start(|_| (200, "false".to_string())).await;
        let free = server
            .client()
            .rentals()
            .check_availability(7, day("2025-02-01"), day("2025-02-04"))
            .await
            .unwrap();
        assert!(!free);

        let requests = server.requests();
        assert_eq!(requests[0].path(), "/api/rentals/check-availability");
        assert_eq!(
            requests[0].query(),
            Some("carId=7&startDate=2025-02-01&endDate=2025-02-04")
        );
    }

    #[tokio::test]
    async fn test_cancel_and_status_paths() {
        let server = StubServer::start(|_| (200, String::new())).await;
        let client = server.client();
        client.rentals().cancel(4).await.unwrap();
        client
            .rentals()
            .update_status(4, BookingStatus::Approved)
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, "PATCH");
        assert_eq!(requests[0].path(), "/api/rentals/4/cancel");
        assert_eq!(requests[1].method, "PUT");
        assert_eq!(requests[1].path(), "/api/rentals/4/status");
        assert_eq!(requests[1].json()["status"], "approved");
    }

    #[tokio::test]
    async fn test_by_user() {
        let server = StubServer::start(|_| (200, format!("[{}]", BOOKING_JSON))).await;
        let bookings = server.client().rentals().by_user(3).await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(server.requests()[0].path(), "/api/rentals/user/3");
    }
}
