//! Registration and login

use carhire_core::models::{Credentials, SessionUser};
use carhire_core::storage::SessionStore;
use carhire_core::validation::{self, RegistrationForm};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

use crate::client::ApiClient;
use crate::error::Result;

pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a customer account. Does not log in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<()> {
        let body = validation::validate_registration(form).map_err(carhire_core::Error::from)?;
        let request = self
            .client
            .request(Method::POST, &["auth", "register"])?
            .json(&body);
        self.client.send(request, "Registration failed").await?;
        info!(email = %body.email, "Registered account");
        Ok(())
    }

    /// Authenticate and persist the returned user record as the session
    pub async fn login(
        &self,
        store: &SessionStore,
        credentials: &Credentials,
    ) -> Result<SessionUser> {
        validation::validate_login(credentials).map_err(carhire_core::Error::from)?;
        let request = self
            .client
            .request(Method::POST, &["auth", "login"])?
            .json(credentials);
        let record: Value = self.client.send_json(request, "Login failed").await?;
        let user = store.save_record(&record)?;
        info!(user_id = user.user_id, role = ?user.role, "Logged in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::StubServer;
    use carhire_core::models::Role;
    use carhire_core::ServerMessage;
    use tempfile::TempDir;

    fn credentials() -> Credentials {
        Credentials {
            email: "nimal@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_record() {
        let server = StubServer::start(|_| {
            (
                200,
                r#"{"userId":3,"fullName":"Nimal Perera","email":"nimal@example.com","role":"CUSTOMER","phoneNumber":"0771234567"}"#
                    .to_string(),
            )
        })
        .await;
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let user = server.client().auth().login(&store, &credentials()).await.unwrap();
        assert_eq!(user.user_id, 3);
        assert_eq!(user.role, Some(Role::Customer));

        let stored = store.current_user().unwrap();
        assert_eq!(stored, user);
        assert_eq!(stored.profile.get("phoneNumber").unwrap(), "0771234567");

        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path(), "/auth/login");
        assert_eq!(requests[0].json()["email"], "nimal@example.com");
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let server =
            StubServer::start(|_| (401, r#"{"message":"Invalid email or password"}"#.to_string()))
                .await;
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let err = server
            .client()
            .auth()
            .login(&store, &credentials())
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Invalid email or password"));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_validation_skips_network() {
        let server = StubServer::start(|_| (200, "{}".to_string())).await;
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let empty = Credentials {
            email: String::new(),
            password: String::new(),
        };

        let err = server.client().auth().login(&store, &empty).await.unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.get("email").is_some());
        assert!(fields.get("password").is_some());
        assert!(matches!(err, Error::Core(_)));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_customer_role() {
        let server = StubServer::start(|_| (200, "User registered successfully".to_string())).await;
        let form = RegistrationForm {
            full_name: "Nimal Perera".to_string(),
            email: "nimal@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            phone_number: "0771234567".to_string(),
            address: "12 Galle Road".to_string(),
            nic: "199012345678".to_string(),
        };

        server.client().auth().register(&form).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].path(), "/auth/register");
        let body = requests[0].json();
        assert_eq!(body["role"], "customer");
        assert_eq!(body["phonNumber"], "0771234567");
        assert!(body.get("confirmPassword").is_none());
    }
}
