use crate::api::ApiError;
use serde_json::json;

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn looks_like_email(value: &str) -> bool {
    match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

pub fn new_password_errors(password: &str, confirmation: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if password != confirmation {
        errors.push("Passwords do not match".to_string());
    }
    errors
}

/// Validation error whose details list every problem, rendered by `InlineErrorMessage`.
pub fn validation_error(title: &str, errors: Vec<String>) -> ApiError {
    let mut error = ApiError::validation(title);
    error.details = Some(json!({ "errors": errors }));
    error
}
