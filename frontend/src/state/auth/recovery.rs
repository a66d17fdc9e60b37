use crate::api::url_session::parse_fragment_params;
use crate::utils::location::{query_param, LocationSnapshot};

pub const RESET_PASSWORD_PATH: &str = "/reset-password";

/// True while the user is completing a password reset from an email link. The
/// temporary session created by that link must never count as a login.
pub fn is_recovery_flow(path: &str, hash: &str) -> bool {
    path.trim_end_matches('/') == RESET_PASSWORD_PATH
        && parse_fragment_params(hash)
            .get("type")
            .map(|kind| kind == "recovery")
            .unwrap_or(false)
}

/// Also accepts the `?token_hash=...&type=recovery` form used by links that are verified
/// client-side.
pub fn is_recovery_location(location: &LocationSnapshot) -> bool {
    if is_recovery_flow(&location.path, &location.hash) {
        return true;
    }
    location.path.trim_end_matches('/') == RESET_PASSWORD_PATH
        && query_param(&location.search, "type").as_deref() == Some("recovery")
        && query_param(&location.search, "token_hash").is_some()
}
