use super::{
    repository::SignupRepository,
    utils::{InvitationCheck, SignupFormState, SignupOutcome},
};
use crate::api::{ApiClient, ApiError, TherapistInvitation};
use crate::state::auth::SignUpInput;
use crate::utils::location;
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct SignupViewModel {
    pub form: RwSignal<SignupFormState>,
    pub invite_token: StoredValue<Option<String>>,
    pub invitation: RwSignal<Option<TherapistInvitation>>,
    pub invitation_error: RwSignal<Option<String>>,
    pub checking_invitation: Signal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    pub confirmation_sent: RwSignal<bool>,
    pub submit_action: Action<SignUpInput, Result<SignupOutcome, ApiError>>,
}

impl SignupViewModel {
    pub fn is_invited(&self) -> bool {
        self.invite_token.with_value(|token| token.is_some())
    }

    pub fn submit(&self) {
        if self.submit_action.pending().get_untracked() {
            return;
        }
        let invitation = self.invitation.get_untracked();
        if self.is_invited() && invitation.is_none() {
            self.error.set(Some(ApiError::validation(
                "This invitation link cannot be used",
            )));
            return;
        }
        match self
            .form
            .with_untracked(|form| form.to_input(invitation.as_ref()))
        {
            Ok(input) => {
                self.error.set(None);
                self.submit_action.dispatch(input);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_signup_view_model() -> SignupViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = SignupRepository::new_with_client(Rc::new(api));
    let token = location::query_param(&location::current().search, "invite");
    let invite_token = store_value(token.clone());

    let form = create_rw_signal(SignupFormState::default());
    let invitation = create_rw_signal(None::<TherapistInvitation>);
    let invitation_error = create_rw_signal(None::<String>);
    let error = create_rw_signal(None::<ApiError>);
    let confirmation_sent = create_rw_signal(false);

    let repo_for_check = repository.clone();
    let invitation_check = create_local_resource(
        move || token.clone(),
        move |token| {
            let repo = repo_for_check.clone();
            async move {
                match token {
                    Some(token) => Some(repo.check_invitation(token).await),
                    None => None,
                }
            }
        },
    );
    let checking_invitation =
        Signal::derive(move || invite_token.with_value(|t| t.is_some()) && invitation_check.loading().get());

    create_effect(move |_| match invitation_check.get().flatten() {
        Some(Ok(InvitationCheck::Usable(found))) => {
            form.update(|state| state.prefill_from(&found));
            invitation.set(Some(found));
            invitation_error.set(None);
        }
        Some(Ok(InvitationCheck::Unusable(message))) => invitation_error.set(Some(message)),
        Some(Err(err)) => {
            log::error!("Failed to look up invitation: {}", err);
            invitation_error.set(Some("We could not verify this invitation. Please try again.".into()));
        }
        None => {}
    });

    let repo_for_submit = repository.clone();
    let submit_action = create_action(move |input: &SignUpInput| {
        let repo = repo_for_submit.clone();
        let input = input.clone();
        async move { repo.register(input).await }
    });

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(SignupOutcome::SignedIn) => error.set(None),
                Ok(SignupOutcome::ConfirmationRequired) => {
                    error.set(None);
                    confirmation_sent.set(true);
                }
                Err(err) => {
                    log::warn!("Sign-up failed: {}", err);
                    error.set(Some(err));
                }
            }
        }
    });

    SignupViewModel {
        form,
        invite_token,
        invitation,
        invitation_error,
        checking_invitation,
        error,
        confirmation_sent,
        submit_action,
    }
}
