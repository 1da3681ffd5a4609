//! Payment endpoints

use carhire_core::models::{NewPayment, Payment};
use chrono::NaiveDate;
use reqwest::Method;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::{Error, Result};

/// Outcome of asking whether a booking has been paid
#[derive(Debug)]
pub enum PaymentProbe {
    Exists(Payment),
    /// The backend has no payment for the booking
    Missing,
    /// The question could not be answered
    Failed(Error),
}

impl PaymentProbe {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentProbe::Exists(_))
    }

    pub fn payment(&self) -> Option<&Payment> {
        match self {
            PaymentProbe::Exists(payment) => Some(payment),
            _ => None,
        }
    }
}

pub struct PaymentService<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, payment: &NewPayment) -> Result<Payment> {
        let request = self
            .client
            .request(Method::POST, &["api", "payments"])?
            .json(payment);
        let created: Payment = self
            .client
            .send_json(request, "Failed to create payment")
            .await?;
        info!(
            payment_id = created.payment_id,
            booking_id = created.booking_id,
            amount = created.amount,
            "Payment recorded"
        );
        Ok(created)
    }

    pub async fn get(&self, payment_id: i64) -> Result<Payment> {
        let request = self
            .client
            .request(Method::GET, &["api", "payments", &payment_id.to_string()])?;
        self.client.send_json(request, "Failed to fetch payment").await
    }

    /// The booking's payment; `None` when the backend answers with an empty body
    pub async fn by_booking(&self, booking_id: i64) -> Result<Option<Payment>> {
        let request = self.client.request(
            Method::GET,
            &["api", "payments", "booking", &booking_id.to_string()],
        )?;
        self.client.send_json(request, "Failed to fetch payment").await
    }

    pub async fn list(&self) -> Result<Vec<Payment>> {
        let request = self.client.request(Method::GET, &["api", "payments"])?;
        self.client.send_json(request, "Failed to fetch payments").await
    }

    /// Payments made between two days, inclusive, filtered by the backend
    pub async fn date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Payment>> {
        let request = self
            .client
            .request(Method::GET, &["api", "payments", "date-range"])?
            .query(&[("startDate", start.to_string()), ("endDate", end.to_string())]);
        self.client
            .send_json(request, "Failed to fetch payments by date range")
            .await
    }

    pub async fn delete(&self, payment_id: i64) -> Result<()> {
        let request = self
            .client
            .request(Method::DELETE, &["api", "payments", &payment_id.to_string()])?;
        self.client.send(request, "Failed to delete payment").await?;
        info!(payment_id, "Payment deleted");
        Ok(())
    }

    /// Look up the booking's payment without treating absence as an error.
    ///
    /// Only a 404 or an empty answer means `Missing`; anything else that goes
    /// wrong is `Failed`.
    pub async fn probe(&self, booking_id: i64) -> PaymentProbe {
        let probe = match self.by_booking(booking_id).await {
            Ok(Some(payment)) => PaymentProbe::Exists(payment),
            Ok(None) => PaymentProbe::Missing,
            Err(e) if e.is_not_found() => PaymentProbe::Missing,
            Err(e) => PaymentProbe::Failed(e),
        };
        debug!(booking_id, paid = probe.is_paid(), "Payment probe");
        probe
    }

    /// Shorthand for callers that only care whether a payment is known to exist
    pub async fn exists(&self, booking_id: i64) -> bool {
        self.probe(booking_id).await.is_paid()
    }
}
