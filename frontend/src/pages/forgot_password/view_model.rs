use super::repository::ForgotPasswordRepository;
use crate::api::{ApiClient, ApiError};
use crate::utils::validation::looks_like_email;
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct ForgotPasswordViewModel {
    pub email: RwSignal<String>,
    pub error: RwSignal<Option<ApiError>>,
    pub sent_to: RwSignal<Option<String>>,
    pub submit_action: Action<String, Result<String, ApiError>>,
}

fn validate_email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if !looks_like_email(&email) {
        return Err(ApiError::validation("Enter a valid email address"));
    }
    Ok(email)
}

pub fn use_forgot_password_view_model() -> ForgotPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ForgotPasswordRepository::new_with_client(Rc::new(api));

    let email = create_rw_signal(String::new());
    let error = create_rw_signal(None);
    let sent_to = create_rw_signal(None);

    let submit_action = create_action(move |value: &String| {
        let repo = repository.clone();
        let raw = value.clone();
        async move {
            let email = validate_email(&raw)?;
            repo.request_reset(email.clone()).await?;
            Ok(email)
        }
    });

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(address) => {
                    sent_to.set(Some(address));
                    error.set(None);
                }
                Err(err) => {
                    log::warn!("Password reset request failed: {}", err);
                    error.set(Some(err));
                    sent_to.set(None);
                }
            }
        }
    });

    ForgotPasswordViewModel {
        email,
        error,
        sent_to,
        submit_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_email_normalizes_and_rejects() {
        assert_eq!(validate_email(" Ada@Example.com ").unwrap(), "ada@example.com");
        assert_eq!(validate_email("").unwrap_err().error, "Email is required");
        assert_eq!(
            validate_email("ada").unwrap_err().error,
            "Enter a valid email address"
        );
    }
}
