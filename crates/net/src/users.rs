//! User account endpoints

use carhire_core::models::{Role, User, UserUpdate};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{Error, Result};

pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let request = self.client.request(Method::GET, &["api", "users"])?;
        self.client.send_json(request, "Failed to fetch users").await
    }

    pub async fn get(&self, user_id: i64) -> Result<User> {
        let request = self
            .client
            .request(Method::GET, &["api", "users", &user_id.to_string()])?;
        self.client.send_json(request, "Failed to fetch user").await
    }

    /// Update a profile and return the record as the backend now has it.
    ///
    /// The raw JSON is returned so callers can merge it into a session.
    pub async fn update(&self, user_id: i64, update: &UserUpdate) -> Result<Value> {
        if update.is_empty() {
            return Err(Error::Core(carhire_core::Error::InvalidOperation(
                "Nothing to update".to_string(),
            )));
        }
        let request = self
            .client
            .request(Method::PUT, &["api", "users", &user_id.to_string()])?
            .json(update);
        let updated = self
            .client
            .send_json(request, "Failed to update profile")
            .await?;
        info!(user_id, "Profile updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: i64) -> Result<()> {
        let request = self
            .client
            .request(Method::DELETE, &["api", "users", &user_id.to_string()])?;
        self.client.send(request, "Failed to delete user").await?;
        info!(user_id, "User deleted");
        Ok(())
    }

    pub async fn by_role(&self, role: Role) -> Result<Vec<User>> {
        let request = self
            .client
            .request(Method::GET, &["api", "users", "role", role.as_str()])?;
        self.client
            .send_json(request, "Failed to fetch users by role")
            .await
    }

    pub async fn count_by_role(&self, role: Role) -> Result<u64> {
        let request = self
            .client
            .request(Method::GET, &["api", "users", "count", "role", role.as_str()])?;
        self.client.send_json(request, "Failed to count users").await
    }
}
