//! User management and the customer's own profile

use carhire_core::stats::UserStats;
use carhire_core::{Route, SessionUser, User, UserFilter, UserUpdate};

use super::{banner, ListScreen, ScreenError, ScreenResult};
use crate::state::AppState;

pub type UserScreen = ListScreen<User, UserFilter>;

impl UserScreen {
    pub fn stats(&self) -> UserStats {
        UserStats::from_users(self.items.items())
    }

    pub fn empty_message(&self) -> &'static str {
        if self.items.is_empty() {
            "No users registered yet"
        } else {
            "No users match your search criteria"
        }
    }
}

pub async fn manage(state: &AppState, filter: UserFilter) -> ScreenResult<UserScreen> {
    state.enter(Route::ManageUsers)?;
    let mut screen = UserScreen::default();
    screen
        .load(
            state.client.users().list(),
            "Failed to load users. Please try again.",
        )
        .await?;
    Ok(screen.with_filter(filter))
}

pub async fn view(state: &AppState, user_id: i64) -> ScreenResult<User> {
    state.enter(Route::ManageUsers)?;
    state
        .client
        .users()
        .get(user_id)
        .await
        .map_err(banner("Failed to fetch user details"))
}

pub async fn edit(state: &AppState, user_id: i64, update: &UserUpdate) -> ScreenResult<User> {
    state.enter(Route::ManageUsers)?;
    let record = state
        .client
        .users()
        .update(user_id, update)
        .await
        .map_err(banner("Failed to update user"))?;
    serde_json::from_value(record)
        .map_err(|e| ScreenError::Banner(format!("Failed to update user: {}", e)))
}

pub async fn delete(state: &AppState, user_id: i64) -> ScreenResult<()> {
    let me = state.enter(Route::ManageUsers)?.user_id;
    if me == user_id {
        return Err(ScreenError::Banner(
            "You cannot delete your own account".to_string(),
        ));
    }
    state
        .client
        .users()
        .delete(user_id)
        .await
        .map_err(banner("Failed to delete user"))
}

/// The signed-in customer's account as the backend has it
pub async fn profile(state: &AppState) -> ScreenResult<User> {
    let user_id = state.enter(Route::Profile)?.user_id;
    state
        .client
        .users()
        .get(user_id)
        .await
        .map_err(banner("Failed to load profile"))
}

/// Save profile changes and merge the result into the stored session
pub async fn update_profile(state: &mut AppState, update: &UserUpdate) -> ScreenResult<SessionUser> {
    let user_id = state.enter(Route::Profile)?.user_id;
    let record = state
        .client
        .users()
        .update(user_id, update)
        .await
        .map_err(banner("Failed to update profile"))?;
    let user = state
        .sessions
        .update_current_user(&record)
        .map_err(ScreenError::from_core)?;
    state.reload_session();
    Ok(user)
}
