//! Application state management

use carhire_core::{Config, Route, SessionContext, SessionStore, SessionUser};
use carhire_net::{ApiClient, Result};

use crate::viewmodel::ScreenError;

/// Everything a command needs: configuration, the backend client and the
/// session as it stood when the command started.
pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    pub sessions: SessionStore,
    session: SessionContext,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::from_config(&config)?;
        let sessions = SessionStore::open(&config)?;
        Ok(Self::with_parts(config, client, sessions))
    }

    pub fn with_parts(config: Config, client: ApiClient, sessions: SessionStore) -> Self {
        let session = sessions.context();
        Self {
            config,
            client,
            sessions,
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Re-read the stored record after login, logout or a profile change
    pub fn reload_session(&mut self) {
        self.session = self.sessions.context();
    }

    /// Check the route's guard and hand back the signed-in user
    pub fn enter(&self, route: Route) -> std::result::Result<&SessionUser, ScreenError> {
        if let Some(target) = route.check(&self.session).redirect() {
            tracing::info!(route = %route, redirect = %target, "Route guard redirected");
            return Err(ScreenError::Redirect(target));
        }
        self.session
            .user()
            .ok_or(ScreenError::Redirect(Route::Login))
    }
}
