//! Booking (rental) models

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{from_str_insensitive, UnknownVariant};

/// Lifecycle status of a booking; transitions are decided by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Confirmed,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn all() -> &'static [BookingStatus] {
        &[
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::Confirmed,
            BookingStatus::Active,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ]
    }

    /// Short marker shown next to the status
    pub fn icon(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "⏳",
            BookingStatus::Confirmed => "✅",
            BookingStatus::Cancelled => "❌",
            _ => "ℹ️",
        }
    }

    /// Whether a customer may still cancel
    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    /// Whether the customer should be offered to pay, given no payment exists yet
    pub fn awaits_payment(&self) -> bool {
        matches!(self, BookingStatus::Pending)
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(UnknownVariant {
                kind: "booking status",
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        from_str_insensitive(deserializer)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's reservation of a car for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    pub car_id: i64,
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "super::lenient_number")]
    pub total_price: f64,
    pub status: BookingStatus,
    // Display fields some listings join in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl Booking {
    pub fn car_label(&self) -> String {
        match (self.brand.as_deref(), self.car_model.as_deref()) {
            (Some(brand), Some(model)) => format!("{} {}", brand, model),
            (None, Some(model)) => model.to_string(),
            (Some(brand), None) => brand.to_string(),
            (None, None) => format!("Car #{}", self.car_id),
        }
    }
}

/// Body for creating a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub car_id: i64,
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_from_backend_json() {
        let booking: Booking = serde_json::from_value(json!({
            "bookingId": 4,
            "carId": 12,
            "userId": 7,
            "startDate": "2025-01-01",
            "endDate": "2025-01-03",
            "totalPrice": 15000.0,
            "status": "PENDING"
        }))
        .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(booking.car_label(), "Car #12");
    }

    #[test]
    fn test_null_or_text_total_price() {
        let bookings: Vec<Booking> = serde_json::from_value(json!([
            {"bookingId": 1, "carId": 2, "userId": 7, "startDate": "2025-01-01",
             "endDate": "2025-01-03", "totalPrice": null, "status": "pending"},
            {"bookingId": 2, "carId": 2, "userId": 7, "startDate": "2025-02-01",
             "endDate": "2025-02-02", "totalPrice": "10000", "status": "completed"}
        ]))
        .unwrap();

        assert_eq!(bookings[0].total_price, 0.0);
        assert_eq!(bookings[1].total_price, 10000.0);
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(BookingStatus::Pending.icon(), "⏳");
        assert_eq!(BookingStatus::Confirmed.icon(), "✅");
        assert_eq!(BookingStatus::Cancelled.icon(), "❌");
        assert_eq!(BookingStatus::Active.icon(), "ℹ️");
    }

    #[test]
    fn test_new_booking_wire_format() {
        let body = NewBooking {
            car_id: 12,
            user_id: 7,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"carId": 12, "userId": 7, "startDate": "2025-01-01", "endDate": "2025-01-03"})
        );
    }
}
