use crate::api::{ApiError, InvitationStatus, TherapistInvitation};
use crate::utils::validation::{looks_like_email, validation_error};
use chrono::{DateTime, Duration, Utc};

pub const INVITATION_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub fn validate_invite(email: &str, first_name: &str, last_name: &str) -> Result<InviteInput, ApiError> {
    let email = email.trim().to_lowercase();
    let first_name = first_name.trim().to_string();
    let last_name = last_name.trim().to_string();
    let mut errors = Vec::new();
    if first_name.is_empty() {
        errors.push("First name is required".to_string());
    }
    if last_name.is_empty() {
        errors.push("Last name is required".to_string());
    }
    if !looks_like_email(&email) {
        errors.push("Enter a valid email address".to_string());
    }
    if !errors.is_empty() {
        return Err(validation_error("Please fix the invitation details", errors));
    }
    Ok(InviteInput {
        email,
        first_name,
        last_name,
    })
}

pub fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub fn expiry_from(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(INVITATION_TTL_DAYS)
}

/// Accepted and revoked invitations are final.
pub fn can_resend(invitation: &TherapistInvitation, now: DateTime<Utc>) -> bool {
    matches!(
        invitation.effective_status(now),
        InvitationStatus::Pending | InvitationStatus::Expired
    )
}

pub fn can_revoke(invitation: &TherapistInvitation, now: DateTime<Utc>) -> bool {
    invitation.effective_status(now) == InvitationStatus::Pending
}

pub fn status_classes(status: InvitationStatus) -> &'static str {
    match status {
        InvitationStatus::Pending => "bg-status-info-bg text-status-info-text",
        InvitationStatus::Accepted => "bg-status-success-bg text-status-success-text",
        InvitationStatus::Expired => "bg-status-warning-bg text-status-warning-text",
        InvitationStatus::Revoked => "bg-status-error-bg text-status-error-text",
    }
}

/// Replaces the row with the same id, or puts a new one first.
pub fn upsert_invitation(list: &mut Vec<TherapistInvitation>, invitation: TherapistInvitation) {
    match list.iter_mut().find(|row| row.id == invitation.id) {
        Some(row) => *row = invitation,
        None => list.insert(0, invitation),
    }
}
