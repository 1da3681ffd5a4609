//! Shared helpers for screen tests

use carhire_core::config::ApiConfig;
use carhire_core::{Config, SessionStore};
use carhire_net::test_support::StubServer;
use carhire_net::ApiClient;
use serde_json::Value;
use tempfile::TempDir;

use crate::state::AppState;

/// Nothing listens on the discard port, so any request fails fast
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// State with a session file inside `dir` and an unreachable backend
pub fn state_in(dir: &TempDir) -> AppState {
    let api = ApiConfig {
        base_url: UNREACHABLE.to_string(),
        timeout_secs: 2,
    };
    let client = ApiClient::new(&api).unwrap();
    let sessions = SessionStore::new(dir.path().join("session.json"));
    AppState::with_parts(Config::default(), client, sessions)
}

/// Same as [`state_in`] but already signed in with `record`
pub fn signed_in(dir: &TempDir, record: Value) -> AppState {
    let mut state = state_in(dir);
    state.sessions.save_record(&record).unwrap();
    state.reload_session();
    state
}

/// Signed in with `record`, talking to `server`
pub fn signed_in_against(dir: &TempDir, server: &StubServer, record: Value) -> AppState {
    let sessions = SessionStore::new(dir.path().join("session.json"));
    sessions.save_record(&record).unwrap();
    AppState::with_parts(Config::default(), server.client(), sessions)
}
