//! carhire core library
//!
//! Models, session handling, route guard, price preview, list filtering and
//! export for the car-rental client. Nothing in this crate performs network
//! calls.

pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod guard;
pub mod models;
pub mod pricing;
pub mod stats;
pub mod storage;
pub mod validation;

pub use collection::{LoadState, RemoteCollection};
pub use config::Config;
pub use error::{Error, Result, ServerMessage};
pub use export::CsvRecord;
pub use filter::{BookingFilter, CarFilter, Filter, PaymentFilter, UserFilter};
pub use guard::{guard, GuardDecision, Route};
pub use models::*;
pub use pricing::{quote, PriceQuote};
pub use storage::SessionStore;
pub use validation::FieldErrors;
