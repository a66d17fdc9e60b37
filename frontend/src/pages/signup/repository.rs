use super::utils::{classify_invitation, InvitationCheck, SignupOutcome};
use crate::api::{ApiClient, ApiError};
use crate::state::auth::SignUpInput;
use chrono::Utc;
use std::rc::Rc;

#[derive(Clone)]
pub struct SignupRepository {
    client: Rc<ApiClient>,
}

impl SignupRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn check_invitation(&self, token: String) -> Result<InvitationCheck, ApiError> {
        let found = self.client.find_invitation_by_token(&token).await?;
        Ok(classify_invitation(found, Utc::now()))
    }

    /// Marks the invitation accepted after a successful sign-up. A failure there is
    /// logged and does not undo the new account.
    pub async fn register(&self, input: SignUpInput) -> Result<SignupOutcome, ApiError> {
        let token = input.metadata.invitation_token.clone();
        let response = self
            .client
            .sign_up(input.email, input.password, input.metadata)
            .await?;
        if let Some(token) = token {
            if let Err(err) = self.client.accept_invitation(&token).await {
                log::warn!("Could not mark invitation as accepted: {}", err);
            }
        }
        Ok(if response.session.is_some() {
            SignupOutcome::SignedIn
        } else {
            SignupOutcome::ConfirmationRequired
        })
    }
}
