use super::utils;
use crate::api::{ApiError, SignInRequest};
use crate::state::auth;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub error: RwSignal<Option<ApiError>>,
    pub sign_in_action: Action<SignInRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.sign_in_action.pending().get_untracked() {
            return;
        }
        match utils::validate_credentials(&self.email.get_untracked(), &self.password.get_untracked()) {
            Ok(request) => {
                self.error.set(None);
                self.sign_in_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

/// Successful sign-ins are followed by the page guard, which redirects once the
/// profile is known.
pub fn use_login_view_model() -> LoginViewModel {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let sign_in_action = auth::use_sign_in_action();

    create_effect(move |_| {
        if let Some(result) = sign_in_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    password.set(String::new());
                }
                Err(err) => {
                    log::warn!("Sign-in failed: {}", err);
                    error.set(Some(ApiError::validation(utils::sign_in_error_message(&err))));
                }
            }
        }
    });

    LoginViewModel {
        email,
        password,
        error,
        sign_in_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get_untracked().is_none());
            assert!(vm.email.get_untracked().is_empty());
        });
    }

    #[test]
    fn submit_with_invalid_email_sets_error_without_dispatch() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.email.set("not-an-email".into());
            vm.password.set("secret".into());
            vm.submit();
            assert_eq!(
                vm.error.get_untracked().map(|e| e.error),
                Some("Enter a valid email address".to_string())
            );
            assert_eq!(vm.sign_in_action.version().get_untracked(), 0);
        });
    }
}
