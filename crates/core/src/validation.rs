//! Form checks that run before any request is sent

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::models::{CarDraft, Credentials, RegisterRequest};

/// Field name to message, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Raw registration form, including the confirmation field
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    pub address: String,
    pub nic: String,
}

pub fn validate_login(credentials: &Credentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if credentials.email.trim().is_empty() {
        errors.add("email", "Email is required");
    }
    if credentials.password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result(())
}

/// Check a registration form and build the request body without the confirmation
pub fn validate_registration(form: &RegistrationForm) -> Result<RegisterRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.full_name.trim().is_empty() {
        errors.add("fullName", "Full name is required");
    }

    if form.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !looks_like_email(&form.email) {
        errors.add("email", "Email is invalid");
    }

    if form.password.is_empty() {
        errors.add("password", "Password is required");
    } else if form.password.chars().count() < 6 {
        errors.add("password", "Password must be at least 6 characters");
    }

    if form.confirm_password.is_empty() {
        errors.add("confirmPassword", "Please confirm your password");
    } else if form.password != form.confirm_password {
        errors.add("confirmPassword", "Passwords do not match");
    }

    let phone = form.phone_number.trim();
    if phone.is_empty() {
        errors.add("phoneNumber", "Phone number is required");
    } else if phone.len() != 10 || !phone.bytes().all(|b| b.is_ascii_digit()) {
        errors.add("phoneNumber", "Phone number must be 10 digits");
    }

    if form.address.trim().is_empty() {
        errors.add("address", "Address is required");
    }

    if form.nic.trim().is_empty() {
        errors.add("nic", "NIC is required");
    }

    errors.into_result(RegisterRequest {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        phone_number: phone.to_string(),
        address: form.address.trim().to_string(),
        nic: form.nic.trim().to_string(),
        role: "customer".to_string(),
    })
}

/// Same shape the registration form accepts: `a@b.c` somewhere, no whitespace inside
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("invalid email pattern"));

pub fn looks_like_email(input: &str) -> bool {
    EMAIL.is_match(input)
}

/// Check the booking date pair and return it ordered
pub fn validate_booking_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), FieldErrors> {
    let mut errors = FieldErrors::new();

    match start {
        None => errors.add("startDate", "Start date is required"),
        Some(s) if s < today => errors.add("startDate", "Start date cannot be in the past"),
        Some(_) => {}
    }

    match (start, end) {
        (_, None) => errors.add("endDate", "End date is required"),
        (Some(s), Some(e)) if e < s => errors.add("endDate", "End date must be after start date"),
        _ => {}
    }

    match (start, end) {
        (Some(s), Some(e)) if errors.is_empty() => Ok((s, e)),
        _ => Err(errors),
    }
}

/// Check a car form against the add/edit rules
pub fn validate_car(draft: &CarDraft, current_year: i32) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.car_model.trim().is_empty() {
        errors.add("carModel", "Car model is required");
    }
    if draft.brand.trim().is_empty() {
        errors.add("brand", "Brand is required");
    }
    if draft.plate_number.trim().is_empty() {
        errors.add("plateNumber", "Plate number is required");
    }
    if draft.types_of_fuel.trim().is_empty() {
        errors.add("typesOfFuel", "Fuel type is required");
    }
    if draft.rate.is_nan() || draft.rate <= 0.0 {
        errors.add("rate", "Valid rate is required");
    }
    if draft.year < 1900 || draft.year > current_year + 1 {
        errors.add("year", "Valid year is required");
    }
    if draft.seating_capacity < 1 {
        errors.add("seatingCapacity", "Valid seating capacity is required");
    }

    errors.into_result(())
}

/// Most images accepted in one upload
pub const MAX_CAR_IMAGES: usize = 5;

/// MIME type for an image file, judged by extension
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Only image files, and no more than [`MAX_CAR_IMAGES`] of them
pub fn validate_images<P: AsRef<Path>>(paths: &[P]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if paths.iter().any(|p| image_mime(p.as_ref()).is_none()) {
        errors.add("images", "Only image files are allowed");
    } else if paths.len() > MAX_CAR_IMAGES {
        errors.add("images", format!("Maximum {} images allowed", MAX_CAR_IMAGES));
    }
    errors.into_result(())
}

/// Both bounds present and in order, for the payments date-range query
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), FieldErrors> {
    let mut errors = FieldErrors::new();
    match (start, end) {
        (Some(s), Some(e)) if s <= e => return Ok((s, e)),
        (Some(_), Some(_)) => errors.add("startDate", "Start date cannot be after end date"),
        _ => errors.add("dateRange", "Please select both start and end dates"),
    }
    Err(errors)
}
