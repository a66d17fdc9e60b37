use crate::api::{ApiError, SignInRequest};
use crate::utils::validation::looks_like_email;

pub fn validate_credentials(email: &str, password: &str) -> Result<SignInRequest, ApiError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if !looks_like_email(email) {
        return Err(ApiError::validation("Enter a valid email address"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(SignInRequest {
        email: email.to_lowercase(),
        password: password.to_string(),
    })
}

/// Backend messages for bad credentials are terse; show something friendlier.
pub fn sign_in_error_message(error: &ApiError) -> String {
    match error.code.as_str() {
        "invalid_credentials" | "invalid_grant" => "Invalid email or password".to_string(),
        "email_not_confirmed" => "Please confirm your email address before signing in".to_string(),
        _ => error.error.clone(),
    }
}
