//! Screen logic behind each command
//!
//! Every screen checks its route guard, talks to the backend through the
//! client and returns plain data for the renderer. Failures come back as a
//! [`ScreenError`].

pub mod auth;
pub mod bookings;
pub mod cars;
pub mod dashboard;
pub mod payments;
pub mod users;

use std::future::Future;
use std::path::PathBuf;

use carhire_core::export::{self, CsvRecord};
use carhire_core::filter::Filter;
use carhire_core::{FieldErrors, RemoteCollection, Route, ServerMessage};
use chrono::NaiveDate;
use thiserror::Error;

/// How a screen failed
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The guard sent the user elsewhere
    #[error("Redirected to {0}")]
    Redirect(Route),

    /// Form input rejected before anything was sent
    #[error("{0}")]
    Validation(FieldErrors),

    /// Page-level error banner
    #[error("{0}")]
    Banner(String),
}

impl ScreenError {
    /// Turn a client error into what the screen shows.
    ///
    /// Field errors stay per field; anything else becomes a banner with the
    /// server's message, or `fallback` when it gave none.
    pub fn from_net(err: carhire_net::Error, fallback: &str) -> Self {
        if let Some(fields) = err.field_errors() {
            return ScreenError::Validation(fields.clone());
        }
        tracing::warn!(error = %err, "Request failed");
        match err {
            carhire_net::Error::Core(carhire_core::Error::InvalidOperation(message)) => {
                ScreenError::Banner(message)
            }
            other => ScreenError::Banner(other.server_message().unwrap_or(fallback).to_string()),
        }
    }

    pub fn from_core(err: carhire_core::Error) -> Self {
        match err {
            carhire_core::Error::Validation(fields) => ScreenError::Validation(fields),
            carhire_core::Error::InvalidOperation(message) => ScreenError::Banner(message),
            other => ScreenError::Banner(other.to_string()),
        }
    }

    /// Process exit status for the failure
    pub fn exit_code(&self) -> i32 {
        match self {
            ScreenError::Redirect(_) => 2,
            _ => 1,
        }
    }
}

impl From<FieldErrors> for ScreenError {
    fn from(errors: FieldErrors) -> Self {
        ScreenError::Validation(errors)
    }
}

pub type ScreenResult<T> = Result<T, ScreenError>;

/// Adapter for `map_err` with a fallback banner
pub(crate) fn banner(fallback: &'static str) -> impl Fn(carhire_net::Error) -> ScreenError {
    move |err| ScreenError::from_net(err, fallback)
}

/// A fetched list plus the filter applied to it
#[derive(Debug)]
pub struct ListScreen<T, F> {
    pub items: RemoteCollection<T>,
    pub filter: F,
}

impl<T, F: Default> Default for ListScreen<T, F> {
    fn default() -> Self {
        Self {
            items: RemoteCollection::new(),
            filter: F::default(),
        }
    }
}

impl<T, F> ListScreen<T, F>
where
    F: Filter<T> + Default,
{
    /// Fetch the list. Filters go back to their defaults.
    pub async fn load<Fut>(&mut self, fetch: Fut, fallback: &str) -> ScreenResult<()>
    where
        Fut: Future<Output = carhire_net::Result<Vec<T>>>,
    {
        self.filter = F::default();
        self.items.load(fetch, fallback).await;
        match self.items.banner() {
            Some(message) => Err(ScreenError::Banner(message.to_string())),
            None => Ok(()),
        }
    }

    pub fn with_filter(mut self, filter: F) -> Self {
        self.filter = filter;
        self
    }

    /// Items that pass the current filter, in fetched order
    pub fn visible(&self) -> Vec<&T> {
        self.items.view(&self.filter)
    }
}

/// Write `records` as CSV to `path`, or to the dated default name
pub fn export_csv<T: CsvRecord>(
    records: &[&T],
    path: Option<PathBuf>,
    today: NaiveDate,
) -> ScreenResult<(PathBuf, usize)> {
    let path = path.unwrap_or_else(|| PathBuf::from(export::default_file_name::<T>(today)));
    let rows = export::write_csv(&path, records).map_err(ScreenError::from_core)?;
    Ok((path, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins_over_fallback() {
        let err = carhire_net::Error::Api {
            status: 400,
            message: "Plate number already registered".to_string(),
        };
        match ScreenError::from_net(err, "Failed to add car") {
            ScreenError::Banner(message) => assert_eq!(message, "Plate number already registered"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_fallback_for_transport_errors() {
        let err = carhire_net::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        match ScreenError::from_net(err, "Failed to load bookings") {
            ScreenError::Banner(message) => assert_eq!(message, "Failed to load bookings"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_field_errors_stay_per_field() {
        let mut fields = FieldErrors::new();
        fields.add("email", "Email is required");
        let err = carhire_net::Error::Core(carhire_core::Error::Validation(fields));
        let screen = ScreenError::from_net(err, "Login failed");
        assert!(matches!(&screen, ScreenError::Validation(f) if f.get("email").is_some()));
        assert_eq!(screen.exit_code(), 1);
        assert_eq!(ScreenError::Redirect(Route::Login).exit_code(), 2);
    }

    #[test]
    fn test_export_refuses_empty_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("users.csv");
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let empty: Vec<&carhire_core::User> = Vec::new();
        match export_csv(&empty, Some(path.clone()), today) {
            Err(ScreenError::Banner(message)) => assert_eq!(message, "No users to export"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!path.exists());
    }
}
