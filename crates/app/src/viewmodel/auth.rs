//! Authentication view model

use carhire_core::validation::RegistrationForm;
use carhire_core::{Credentials, Route, SessionUser};

use super::{banner, ScreenError, ScreenResult};
use crate::state::AppState;

/// Log in and return the screen to land on
pub async fn login(state: &mut AppState, credentials: &Credentials) -> ScreenResult<Route> {
    let user = state
        .client
        .auth()
        .login(&state.sessions, credentials)
        .await
        .map_err(banner("Login failed"))?;
    state.reload_session();
    Ok(Route::landing_for(user.role))
}

/// Create an account; the user logs in afterwards
pub async fn register(state: &AppState, form: &RegistrationForm) -> ScreenResult<Route> {
    state
        .client
        .auth()
        .register(form)
        .await
        .map_err(banner("Registration failed"))?;
    Ok(Route::Login)
}

/// Forget the stored session. No request is made.
pub fn logout(state: &mut AppState) -> ScreenResult<()> {
    state.sessions.clear().map_err(ScreenError::from_core)?;
    state.reload_session();
    tracing::info!("Logged out");
    Ok(())
}

pub fn whoami(state: &AppState) -> Option<&SessionUser> {
    state.session().user()
}
