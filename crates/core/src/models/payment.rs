//! Payment models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A payment recorded against a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: i64,
    pub booking_id: i64,
    #[serde(default, deserialize_with = "super::lenient_number")]
    pub amount: f64,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl Payment {
    /// Calendar day of the payment, ignoring any time component
    pub fn payment_day(&self) -> Option<NaiveDate> {
        let raw = self.payment_date.as_deref()?;
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Body for recording a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub booking_id: i64,
    pub payment_date: NaiveDate,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_string_and_garbage() {
        let p: Payment = serde_json::from_value(json!({
            "paymentId": 1, "bookingId": 4, "amount": "15000.50"
        }))
        .unwrap();
        assert_eq!(p.amount, 15000.5);

        let p: Payment = serde_json::from_value(json!({
            "paymentId": 2, "bookingId": 5, "amount": "n/a"
        }))
        .unwrap();
        assert_eq!(p.amount, 0.0);

        let p: Payment = serde_json::from_value(json!({
            "paymentId": 4, "bookingId": 7, "amount": "15000 LKR"
        }))
        .unwrap();
        assert_eq!(p.amount, 15000.0);

        let p: Payment = serde_json::from_value(json!({
            "paymentId": 3, "bookingId": 6, "amount": null
        }))
        .unwrap();
        assert_eq!(p.amount, 0.0);
    }

    #[test]
    fn test_payment_day_ignores_time() {
        let p: Payment = serde_json::from_value(json!({
            "paymentId": 1, "bookingId": 4, "amount": 10,
            "paymentDate": "2025-03-14T18:30:00"
        }))
        .unwrap();
        assert_eq!(p.payment_day(), NaiveDate::from_ymd_opt(2025, 3, 14));
    }
}
