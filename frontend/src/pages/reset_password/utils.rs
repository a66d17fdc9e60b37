use crate::api::url_session::{parse_auth_fragment, UrlAuthFragment};
use crate::api::ApiError;
use crate::state::auth::is_recovery_location;
use crate::utils::location::{query_param, LocationSnapshot};
use crate::utils::validation::{new_password_errors, validation_error};

pub const INVALID_LINK_MESSAGE: &str =
    "This password reset link is invalid or has expired. Request a new one.";

/// Where the recovery session for this page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySource {
    /// `?token_hash=...&type=recovery`, verified by the page.
    TokenHash(String),
    /// `#access_token=...&type=recovery`, already adopted by the api client.
    Fragment,
    LinkError(String),
    Missing,
}

pub fn recovery_source(location: &LocationSnapshot) -> RecoverySource {
    if let Some(UrlAuthFragment::Error { description, .. }) = parse_auth_fragment(&location.hash) {
        return RecoverySource::LinkError(description);
    }
    if !is_recovery_location(location) {
        return RecoverySource::Missing;
    }
    match query_param(&location.search, "token_hash") {
        Some(token_hash) => RecoverySource::TokenHash(token_hash),
        None => RecoverySource::Fragment,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryStatus {
    Checking,
    Ready,
    Invalid(String),
}

pub fn validate_new_password(password: &str, confirmation: &str) -> Result<String, ApiError> {
    let errors = new_password_errors(password, confirmation);
    if errors.is_empty() {
        Ok(password.to_string())
    } else {
        Err(validation_error("Please choose a different password", errors))
    }
}
