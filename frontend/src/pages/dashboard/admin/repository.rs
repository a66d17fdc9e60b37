use super::utils::{expiry_from, new_token, InviteInput};
use crate::api::{
    ApiClient, ApiError, InvitationEmailRequest, InvitationStatus, NewInvitation,
    TherapistInvitation,
};
use chrono::Utc;
use std::rc::Rc;

/// Result of a write that is followed by an invitation email. The row is kept even
/// when the email fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub invitation: TherapistInvitation,
    pub email_error: Option<ApiError>,
}

#[derive(Clone)]
pub struct InvitationRepository {
    client: Rc<ApiClient>,
}

impl InvitationRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<TherapistInvitation>, ApiError> {
        self.client.list_invitations().await
    }

    pub async fn create(
        &self,
        input: InviteInput,
        invited_by: Option<String>,
    ) -> Result<Delivery, ApiError> {
        let invitation = self
            .client
            .create_invitation(&NewInvitation {
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                token: new_token(),
                status: InvitationStatus::Pending,
                invited_by,
                expires_at: expiry_from(Utc::now()),
            })
            .await?;
        Ok(self.deliver(invitation).await)
    }

    pub async fn resend(&self, id: String) -> Result<Delivery, ApiError> {
        let invitation = self
            .client
            .reissue_invitation(&id, &new_token(), expiry_from(Utc::now()))
            .await?;
        Ok(self.deliver(invitation).await)
    }

    pub async fn revoke(&self, id: String) -> Result<TherapistInvitation, ApiError> {
        self.client.revoke_invitation(&id).await
    }

    async fn deliver(&self, invitation: TherapistInvitation) -> Delivery {
        let request = InvitationEmailRequest {
            email: invitation.email.clone(),
            first_name: invitation.first_name.clone().unwrap_or_default(),
            last_name: invitation.last_name.clone().unwrap_or_default(),
            invite_url: self.client.invitation_link(&invitation.token).await,
        };
        let email_error = match self.client.send_invitation_email(&request).await {
            Ok(()) => None,
            Err(err) => {
                log::warn!("Invitation {} saved but email failed: {}", invitation.id, err);
                Some(err)
            }
        };
        Delivery {
            invitation,
            email_error,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::signed_in_client;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::{json, Value};

    fn repository(server: &MockServer) -> InvitationRepository {
        InvitationRepository::new_with_client(Rc::new(signed_in_client(&server.base_url(), "admin1")))
    }

    fn row(id: &str, token: &str, status: &str) -> Value {
        json!({
            "id": id,
            "email": "grace@example.com",
            "first_name": "Grace",
            "last_name": "Hopper",
            "token": token,
            "status": status,
            "invited_by": "admin1",
            "expires_at": (Utc::now() + chrono::Duration::days(7)).to_rfc3339(),
        })
    }

    fn input() -> InviteInput {
        InviteInput {
            email: "grace@example.com".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        }
    }

    #[tokio::test]
    async fn create_inserts_row_then_sends_email() {
        let server = MockServer::start_async().await;
        let insert = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/therapist_invitations")
                    .json_body_partial(r#"{"email":"grace@example.com","status":"pending","invited_by":"admin1"}"#);
                then.status(201).json_body(json!([row("inv-1", "tok1", "pending")]));
            })
            .await;
        let email = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/functions/v1/send-therapist-invitation")
                    .json_body_partial(
                        r#"{"email":"grace@example.com","invite_url":"http://localhost:3000/signup?invite=tok1"}"#,
                    );
                then.status(200).json_body(json!({ "message": "sent" }));
            })
            .await;

        let delivery = repository(&server)
            .create(input(), Some("admin1".into()))
            .await
            .unwrap();

        insert.assert_async().await;
        email.assert_async().await;
        assert_eq!(delivery.invitation.id, "inv-1");
        assert!(delivery.email_error.is_none());
    }

    #[tokio::test]
    async fn create_keeps_invitation_when_email_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/therapist_invitations");
                then.status(201).json_body(json!([row("inv-1", "tok1", "pending")]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/functions/v1/send-therapist-invitation");
                then.status(500).json_body(json!({ "error": "smtp down" }));
            })
            .await;

        let delivery = repository(&server).create(input(), None).await.unwrap();

        assert_eq!(delivery.invitation.token, "tok1");
        assert_eq!(delivery.email_error.map(|e| e.error), Some("smtp down".to_string()));
    }

    #[tokio::test]
    async fn failed_insert_skips_email() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/therapist_invitations");
                then.status(409).json_body(json!({ "message": "duplicate key" }));
            })
            .await;
        let email = server
            .mock_async(|when, then| {
                when.method(POST).path("/functions/v1/send-therapist-invitation");
                then.status(200);
            })
            .await;

        let err = repository(&server).create(input(), None).await.unwrap_err();

        assert_eq!(err.error, "duplicate key");
        email.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn resend_reissues_token_and_emails_again() {
        let server = MockServer::start_async().await;
        let patch = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/therapist_invitations")
                    .query_param("id", "eq.inv1")
                    .json_body_partial(r#"{"status":"pending"}"#);
                then.status(200).json_body(json!([row("inv1", "tok2", "pending")]));
            })
            .await;
        let email = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/functions/v1/send-therapist-invitation")
                    .json_body_partial(r#"{"invite_url":"http://localhost:3000/signup?invite=tok2"}"#);
                then.status(200);
            })
            .await;

        let delivery = repository(&server).resend("inv1".into()).await.unwrap();

        patch.assert_async().await;
        email.assert_async().await;
        assert_eq!(delivery.invitation.token, "tok2");
    }

    #[tokio::test]
    async fn revoke_sets_status() {
        let server = MockServer::start_async().await;
        let patch = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/therapist_invitations")
                    .query_param("id", "eq.inv1")
                    .json_body(json!({ "status": "revoked" }));
                then.status(200).json_body(json!([row("inv1", "tok1", "revoked")]));
            })
            .await;

        let revoked = repository(&server).revoke("inv1".into()).await.unwrap();

        patch.assert_async().await;
        assert_eq!(revoked.status, InvitationStatus::Revoked);
    }
}
