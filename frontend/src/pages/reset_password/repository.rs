use super::utils::{RecoverySource, INVALID_LINK_MESSAGE};
use crate::api::{ApiClient, ApiError};
use std::rc::Rc;

#[derive(Clone)]
pub struct ResetPasswordRepository {
    client: Rc<ApiClient>,
}

impl ResetPasswordRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Establishes the recovery session the password update runs under.
    pub async fn prepare(&self, source: RecoverySource) -> Result<(), ApiError> {
        match source {
            RecoverySource::TokenHash(token_hash) => {
                self.client.verify_recovery_token(token_hash).await.map(|_| ())
            }
            // A fragment session can be stale, so the token is checked against the server.
            RecoverySource::Fragment => match self.client.get_session().await? {
                Some(_) => self.client.get_user().await.map(|_| ()).map_err(|err| {
                    log::warn!("Recovery session rejected: {}", err);
                    ApiError::unauthorized(INVALID_LINK_MESSAGE)
                }),
                None => Err(ApiError::unauthorized(INVALID_LINK_MESSAGE)),
            },
            RecoverySource::LinkError(description) => Err(ApiError::validation(description)),
            RecoverySource::Missing => Err(ApiError::validation(INVALID_LINK_MESSAGE)),
        }
    }

    /// The recovery session is discarded afterwards so the user signs in with the new
    /// password.
    pub async fn update_password(&self, password: String) -> Result<(), ApiError> {
        self.client.update_password(password).await?;
        if let Err(err) = self.client.sign_out().await {
            log::warn!("Sign-out after password reset failed: {}", err);
        }
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{client_for, signed_in_client};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn prepare_verifies_token_hash() {
        let server = MockServer::start_async().await;
        let verify = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/verify")
                    .json_body(json!({ "type": "recovery", "token_hash": "hash1" }));
                then.status(200).json_body(json!({
                    "access_token": "recovery-at",
                    "refresh_token": "rt",
                    "expires_in": 3600,
                    "user": { "id": "u1", "email": "ada@example.com" }
                }));
            })
            .await;

        let client = Rc::new(client_for(&server.base_url()));
        let repo = ResetPasswordRepository::new_with_client(client.clone());
        repo.prepare(RecoverySource::TokenHash("hash1".into()))
            .await
            .unwrap();
        verify.assert_async().await;
        assert_eq!(
            client.current_session().map(|s| s.access_token),
            Some("recovery-at".into())
        );
    }

    #[tokio::test]
    async fn prepare_rejects_missing_link() {
        let server = MockServer::start_async().await;
        let repo = ResetPasswordRepository::new_with_client(Rc::new(client_for(&server.base_url())));
        let error = repo.prepare(RecoverySource::Missing).await.unwrap_err();
        assert_eq!(error.error, INVALID_LINK_MESSAGE);
    }

    #[tokio::test]
    async fn prepare_checks_fragment_session_with_server() {
        let server = MockServer::start_async().await;
        let user = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/auth/v1/user")
                    .header("authorization", "Bearer access-u1");
                then.status(401).json_body(json!({ "msg": "JWT expired" }));
            })
            .await;

        let repo = ResetPasswordRepository::new_with_client(Rc::new(signed_in_client(
            &server.base_url(),
            "u1",
        )));
        let error = repo.prepare(RecoverySource::Fragment).await.unwrap_err();

        user.assert_async().await;
        assert_eq!(error.error, INVALID_LINK_MESSAGE);
    }

    #[tokio::test]
    async fn update_password_signs_out_afterwards() {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/auth/v1/user")
                    .header("authorization", "Bearer access-u1")
                    .json_body(json!({ "password": "new-password" }));
                then.status(200)
                    .json_body(json!({ "id": "u1", "email": "u1@example.com" }));
            })
            .await;
        let logout = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/logout");
                then.status(204);
            })
            .await;

        let client = Rc::new(signed_in_client(&server.base_url(), "u1"));
        let repo = ResetPasswordRepository::new_with_client(client.clone());
        repo.update_password("new-password".into()).await.unwrap();

        update.assert_async().await;
        logout.assert_async().await;
        assert!(client.current_session().is_none());
    }
}
