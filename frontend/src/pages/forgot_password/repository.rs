use crate::api::{ApiClient, ApiError};
use std::rc::Rc;

#[derive(Clone)]
pub struct ForgotPasswordRepository {
    client: Rc<ApiClient>,
}

impl ForgotPasswordRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn request_reset(&self, email: String) -> Result<(), ApiError> {
        self.client.reset_password_for_email(email).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::client_for;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn request_reset_posts_email_with_redirect() {
        let server = MockServer::start_async().await;
        let recover = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/recover")
                    .query_param_exists("redirect_to")
                    .json_body(json!({ "email": "ada@example.com" }));
                then.status(200).json_body(json!({}));
            })
            .await;

        let repo = ForgotPasswordRepository::new_with_client(Rc::new(client_for(&server.base_url())));
        repo.request_reset("ada@example.com".into()).await.unwrap();
        recover.assert_async().await;
    }

    #[tokio::test]
    async fn request_reset_surfaces_rate_limit() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/recover");
                then.status(429).json_body(json!({
                    "code": 429,
                    "error_code": "over_email_send_rate_limit",
                    "msg": "For security purposes, you can only request this once every 60 seconds"
                }));
            })
            .await;

        let repo = ForgotPasswordRepository::new_with_client(Rc::new(client_for(&server.base_url())));
        let error = repo.request_reset("ada@example.com".into()).await.unwrap_err();
        assert_eq!(error.code, "over_email_send_rate_limit");
        assert!(error.error.contains("60 seconds"));
    }
}
