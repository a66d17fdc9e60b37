use super::{
    repository::ResetPasswordRepository,
    utils::{recovery_source, validate_new_password, RecoveryStatus},
};
use crate::api::{ApiClient, ApiError};
use crate::utils::location;
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct ResetPasswordViewModel {
    pub status: RwSignal<RecoveryStatus>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub error: RwSignal<Option<ApiError>>,
    pub completed: RwSignal<bool>,
    pub submit_action: Action<(String, String), Result<(), ApiError>>,
}

impl ResetPasswordViewModel {
    pub fn submit(&self) {
        if self.submit_action.pending().get_untracked()
            || self.status.get_untracked() != RecoveryStatus::Ready
        {
            return;
        }
        self.submit_action.dispatch((
            self.password.get_untracked(),
            self.confirm_password.get_untracked(),
        ));
    }
}

pub fn use_reset_password_view_model() -> ResetPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ResetPasswordRepository::new_with_client(Rc::new(api));
    let source = recovery_source(&location::current());

    let status = create_rw_signal(RecoveryStatus::Checking);
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let completed = create_rw_signal(false);

    let repo_for_prepare = repository.clone();
    let prepared = create_local_resource(
        move || source.clone(),
        move |source| {
            let repo = repo_for_prepare.clone();
            async move { repo.prepare(source).await }
        },
    );
    create_effect(move |_| {
        if let Some(result) = prepared.get() {
            match result {
                Ok(()) => status.set(RecoveryStatus::Ready),
                Err(err) => {
                    log::warn!("Password recovery link rejected: {}", err);
                    status.set(RecoveryStatus::Invalid(err.error));
                }
            }
        }
    });

    let submit_action = create_action(move |(value, confirmation): &(String, String)| {
        let repo = repository.clone();
        let checked = validate_new_password(value, confirmation);
        async move { repo.update_password(checked?).await }
    });

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    password.set(String::new());
                    confirm_password.set(String::new());
                    completed.set(true);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    ResetPasswordViewModel {
        status,
        password,
        confirm_password,
        error,
        completed,
        submit_action,
    }
}
