use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::json;

use super::{
    client::{filter_eq, ApiClient},
    types::{ApiError, InvitationEmailRequest, InvitationStatus, NewInvitation, TherapistInvitation},
};

pub const INVITATION_FUNCTION: &str = "send-therapist-invitation";

impl ApiClient {
    pub async fn list_invitations(&self) -> Result<Vec<TherapistInvitation>, ApiError> {
        let config = self.resolved_config().await;
        let url = format!(
            "{}?select=*&order=created_at.desc",
            config.rest_url("/therapist_invitations")
        );
        self.send_json(self.request(&config, Method::GET, &url))
            .await
    }

    pub async fn create_invitation(
        &self,
        invitation: &NewInvitation,
    ) -> Result<TherapistInvitation, ApiError> {
        let config = self.resolved_config().await;
        let builder = self
            .request(
                &config,
                Method::POST,
                &config.rest_url("/therapist_invitations"),
            )
            .header("Prefer", "return=representation")
            .json(invitation);
        let rows: Vec<TherapistInvitation> = self.send_json(builder).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::unknown("Invitation was not returned"))
    }

    pub async fn find_invitation_by_token(
        &self,
        token: &str,
    ) -> Result<Option<TherapistInvitation>, ApiError> {
        let config = self.resolved_config().await;
        let url = format!(
            "{}?token={}&select=*",
            config.rest_url("/therapist_invitations"),
            filter_eq(token)
        );
        let rows: Vec<TherapistInvitation> = self
            .send_json(self.request(&config, Method::GET, &url))
            .await?;
        Ok(rows.into_iter().next())
    }

    /// New token and expiry for a resend.
    pub async fn reissue_invitation(
        &self,
        id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<TherapistInvitation, ApiError> {
        self.patch_invitation(
            &format!("id={}", filter_eq(id)),
            json!({
                "token": token,
                "expires_at": expires_at,
                "status": InvitationStatus::Pending,
            }),
        )
        .await
    }

    pub async fn revoke_invitation(&self, id: &str) -> Result<TherapistInvitation, ApiError> {
        self.patch_invitation(
            &format!("id={}", filter_eq(id)),
            json!({ "status": InvitationStatus::Revoked }),
        )
        .await
    }

    pub async fn accept_invitation(&self, token: &str) -> Result<TherapistInvitation, ApiError> {
        self.patch_invitation(
            &format!("token={}", filter_eq(token)),
            json!({ "status": InvitationStatus::Accepted, "accepted_at": Utc::now() }),
        )
        .await
    }

    async fn patch_invitation(
        &self,
        filter: &str,
        body: serde_json::Value,
    ) -> Result<TherapistInvitation, ApiError> {
        let config = self.resolved_config().await;
        let url = format!("{}?{}", config.rest_url("/therapist_invitations"), filter);
        let builder = self
            .request(&config, Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(&body);
        let rows: Vec<TherapistInvitation> = self.send_json(builder).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Invitation not found"))
    }

    pub async fn send_invitation_email(
        &self,
        request: &InvitationEmailRequest,
    ) -> Result<(), ApiError> {
        let config = self.resolved_config().await;
        let builder = self
            .request(
                &config,
                Method::POST,
                &config.functions_url(INVITATION_FUNCTION),
            )
            .json(request);
        self.send_empty(builder).await
    }

    pub async fn invitation_link(&self, token: &str) -> String {
        let config = self.resolved_config().await;
        config.site_link(&format!(
            "/signup?invite={}",
            percent_encoding::utf8_percent_encode(token, percent_encoding::NON_ALPHANUMERIC)
        ))
    }
}
