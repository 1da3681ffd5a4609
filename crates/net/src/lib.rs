//! carhire network library
//!
//! Typed REST client for the car-rental backend.
//!
//! # Usage
//!
//! ```ignore
//! let client = ApiClient::from_config(&config)?;
//! let user = client.auth().login(&store, &credentials).await?;
//! let cars = client.cars().available().await?;
//!
//! match client.payments().probe(booking_id).await {
//!     PaymentProbe::Exists(payment) => { /* already paid */ }
//!     PaymentProbe::Missing => { /* offer to pay */ }
//!     PaymentProbe::Failed(err) => { /* show banner */ }
//! }
//! ```

pub mod auth;
pub mod cars;
pub mod client;
pub mod error;
pub mod payments;
pub mod rentals;
pub mod users;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use auth::AuthService;
pub use cars::{CarSearch, CarService};
pub use client::ApiClient;
pub use error::{Error, Result};
pub use payments::{PaymentProbe, PaymentService};
pub use rentals::RentalService;
pub use users::UserService;
