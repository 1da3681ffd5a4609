//! CSV export of the currently displayed list

use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{Booking, Car, Payment, User};

/// A record that can be written as one CSV row
pub trait CsvRecord {
    /// Plural name used in file names and empty-list messages
    const ENTITY: &'static str;
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

/// Quote a field when it contains a separator, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line(fields: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    fields
        .into_iter()
        .map(|f| escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a header row followed by one row per record
pub fn to_csv<T: CsvRecord>(records: &[&T]) -> String {
    let mut out = line(T::HEADERS.iter());
    for record in records {
        out.push('\n');
        out.push_str(&line(record.row()));
    }
    out
}

/// `bookings_2025-01-31.csv` style name
pub fn default_file_name<T: CsvRecord>(today: NaiveDate) -> String {
    format!("{}_{}.csv", T::ENTITY, today.format("%Y-%m-%d"))
}

/// Write the records to `path`, refusing an empty list
pub fn write_csv<T: CsvRecord>(path: &Path, records: &[&T]) -> Result<usize> {
    if records.is_empty() {
        return Err(Error::InvalidOperation(format!("No {} to export", T::ENTITY)));
    }
    std::fs::write(path, to_csv(records))?;
    tracing::info!(path = %path.display(), rows = records.len(), "Exported {}", T::ENTITY);
    Ok(records.len())
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn or_blank(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl CsvRecord for Car {
    const ENTITY: &'static str = "cars";
    const HEADERS: &'static [&'static str] = &[
        "Car ID",
        "Brand",
        "Model",
        "Plate Number",
        "Fuel",
        "Rate",
        "Year",
        "Seats",
        "Status",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.car_id.to_string(),
            self.brand.clone(),
            self.car_model.clone(),
            self.plate_number.clone(),
            self.types_of_fuel.clone(),
            money(self.rate),
            self.year.to_string(),
            self.seating_capacity.to_string(),
            self.status.to_string(),
        ]
    }
}

impl CsvRecord for Booking {
    const ENTITY: &'static str = "bookings";
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Customer",
        "Email",
        "Phone",
        "Car",
        "Start Date",
        "End Date",
        "Status",
        "Amount",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.booking_id.to_string(),
            or_blank(&self.customer_name),
            or_blank(&self.email),
            or_blank(&self.phone),
            self.car_label(),
            self.start_date.to_string(),
            self.end_date.to_string(),
            self.status.to_string(),
            money(self.total_price),
        ]
    }
}

impl CsvRecord for Payment {
    const ENTITY: &'static str = "payments";
    const HEADERS: &'static [&'static str] = &[
        "Payment ID",
        "Booking ID",
        "Amount (LKR)",
        "Payment Date",
        "Payment Method",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.payment_id.to_string(),
            self.booking_id.to_string(),
            money(self.amount),
            self.payment_day()
                .map(|d| d.to_string())
                .unwrap_or_else(|| or_blank(&self.payment_date)),
            or_blank(&self.payment_method),
        ]
    }
}

impl CsvRecord for User {
    const ENTITY: &'static str = "users";
    const HEADERS: &'static [&'static str] = &[
        "User ID",
        "Username",
        "Email",
        "First Name",
        "Last Name",
        "Phone",
        "Role",
        "Created Date",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            or_blank(&self.username),
            or_blank(&self.email),
            or_blank(&self.first_name),
            or_blank(&self.last_name),
            self.phone_number
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            self.role.map(|r| r.to_string()).unwrap_or_default(),
            self.created_at
                .as_deref()
                .map(|c| c.split('T').next().unwrap_or(c).to_string())
                .unwrap_or_default(),
        ]
    }
}
