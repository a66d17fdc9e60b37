use crate::api::{ApiError, Role, SignUpMetadata, TherapistInvitation};
use crate::state::auth::SignUpInput;
use crate::utils::validation::{looks_like_email, new_password_errors, validation_error};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupFormState {
    pub fn prefill_from(&mut self, invitation: &TherapistInvitation) {
        self.email = invitation.email.clone();
        if let Some(first) = &invitation.first_name {
            self.first_name = first.clone();
        }
        if let Some(last) = &invitation.last_name {
            self.last_name = last.clone();
        }
    }

    /// With an invitation the account is a therapist account bound to the invited email.
    pub fn to_input(&self, invitation: Option<&TherapistInvitation>) -> Result<SignUpInput, ApiError> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("Last name is required".to_string());
        }
        let email = match invitation {
            Some(invitation) => invitation.email.clone(),
            None => self.email.trim().to_lowercase(),
        };
        if !looks_like_email(&email) {
            errors.push("Enter a valid email address".to_string());
        }
        errors.extend(new_password_errors(&self.password, &self.confirm_password));
        if !errors.is_empty() {
            return Err(validation_error("Please fix the following", errors));
        }

        let (role, invitation_token) = match invitation {
            Some(invitation) => (Role::Therapist, Some(invitation.token.clone())),
            None => (Role::Client, None),
        };
        Ok(SignUpInput {
            email,
            password: self.password.clone(),
            metadata: SignUpMetadata {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                role,
                invitation_token,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvitationCheck {
    Usable(TherapistInvitation),
    Unusable(String),
}

pub fn classify_invitation(found: Option<TherapistInvitation>, now: DateTime<Utc>) -> InvitationCheck {
    use crate::api::InvitationStatus::*;
    let Some(invitation) = found else {
        return InvitationCheck::Unusable("This invitation link is not valid.".into());
    };
    match invitation.effective_status(now) {
        Pending => InvitationCheck::Usable(invitation),
        Accepted => InvitationCheck::Unusable(
            "This invitation has already been used. Sign in instead.".into(),
        ),
        Expired => InvitationCheck::Unusable(
            "This invitation has expired. Ask the MindHaven team to send a new one.".into(),
        ),
        Revoked => InvitationCheck::Unusable("This invitation has been revoked.".into()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    SignedIn,
    ConfirmationRequired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InvitationStatus;
    use chrono::Duration;

    fn invitation(status: InvitationStatus, expires_in_days: i64) -> TherapistInvitation {
        TherapistInvitation {
            id: "inv-1".into(),
            email: "grace@example.com".into(),
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            token: "tok1".into(),
            status,
            invited_by: None,
            expires_at: Utc::now() + Duration::days(expires_in_days),
            created_at: None,
            accepted_at: None,
        }
    }

    fn filled() -> SignupFormState {
        SignupFormState {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            email: "Ada@Example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
        }
    }

    #[test]
    fn client_signup_builds_client_metadata() {
        let input = filled().to_input(None).unwrap();
        assert_eq!(input.email, "ada@example.com");
        assert_eq!(input.metadata.role, Role::Client);
        assert_eq!(input.metadata.first_name, "Ada");
        assert!(input.metadata.invitation_token.is_none());
    }

    #[test]
    fn invited_signup_uses_invitation_email_and_token() {
        let invite = invitation(InvitationStatus::Pending, 3);
        let mut form = filled();
        form.email = "someone-else@example.com".into();
        let input = form.to_input(Some(&invite)).unwrap();
        assert_eq!(input.email, "grace@example.com");
        assert_eq!(input.metadata.role, Role::Therapist);
        assert_eq!(input.metadata.invitation_token.as_deref(), Some("tok1"));
    }

    #[test]
    fn validation_collects_all_errors() {
        let error = SignupFormState::default().to_input(None).unwrap_err();
        let errors = error.details.unwrap()["errors"].as_array().unwrap().len();
        assert_eq!(errors, 4);
    }

    #[test]
    fn prefill_copies_invitation_fields() {
        let mut form = SignupFormState::default();
        form.prefill_from(&invitation(InvitationStatus::Pending, 1));
        assert_eq!(form.email, "grace@example.com");
        assert_eq!(form.first_name, "Grace");
        assert_eq!(form.last_name, "Hopper");
    }

    #[test]
    fn classify_invitation_reports_each_state() {
        let now = Utc::now();
        assert!(matches!(
            classify_invitation(Some(invitation(InvitationStatus::Pending, 2)), now),
            InvitationCheck::Usable(_)
        ));
        assert!(matches!(
            classify_invitation(Some(invitation(InvitationStatus::Pending, -1)), now),
            InvitationCheck::Unusable(msg) if msg.contains("expired")
        ));
        assert!(matches!(
            classify_invitation(Some(invitation(InvitationStatus::Accepted, 2)), now),
            InvitationCheck::Unusable(msg) if msg.contains("already been used")
        ));
        assert!(matches!(
            classify_invitation(Some(invitation(InvitationStatus::Revoked, 2)), now),
            InvitationCheck::Unusable(msg) if msg.contains("revoked")
        ));
        assert!(matches!(
            classify_invitation(None, now),
            InvitationCheck::Unusable(msg) if msg.contains("not valid")
        ));
    }
}
