//! Local persistence
//!
//! The only state the client keeps between runs is the session record.

mod session;

pub use session::SessionStore;
