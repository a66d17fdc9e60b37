use super::{
    repository::{Delivery, InvitationRepository},
    utils::{upsert_invitation, validate_invite},
};
use crate::api::{ApiClient, ApiError, TherapistInvitation};
use crate::state::{auth::use_auth, toast::use_toasts};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct AdminViewModel {
    pub email: RwSignal<String>,
    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub form_error: RwSignal<Option<ApiError>>,
    pub invitations: RwSignal<Vec<TherapistInvitation>>,
    pub loading: Signal<bool>,
    pub load_error: RwSignal<Option<ApiError>>,
    pub pending_revoke: RwSignal<Option<TherapistInvitation>>,
    pub create_action: Action<(), Result<Delivery, ApiError>>,
    pub resend_action: Action<String, Result<Delivery, ApiError>>,
    pub revoke_action: Action<String, Result<TherapistInvitation, ApiError>>,
}

impl AdminViewModel {
    pub fn submit_invite(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        match validate_invite(
            &self.email.get_untracked(),
            &self.first_name.get_untracked(),
            &self.last_name.get_untracked(),
        ) {
            Ok(_) => {
                self.form_error.set(None);
                self.create_action.dispatch(());
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }

    pub fn confirm_revoke(&self) {
        if let Some(invitation) = self.pending_revoke.get_untracked() {
            self.pending_revoke.set(None);
            self.revoke_action.dispatch(invitation.id);
        }
    }

    fn clear_form(&self) {
        self.email.set(String::new());
        self.first_name.set(String::new());
        self.last_name.set(String::new());
    }
}

pub fn use_admin_view_model() -> AdminViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = InvitationRepository::new_with_client(Rc::new(api));
    let (auth, _) = use_auth();
    let toasts = use_toasts();

    let email = create_rw_signal(String::new());
    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let form_error = create_rw_signal(None::<ApiError>);
    let invitations = create_rw_signal(Vec::<TherapistInvitation>::new());
    let load_error = create_rw_signal(None::<ApiError>);
    let pending_revoke = create_rw_signal(None::<TherapistInvitation>);

    let repo_for_list = repository.clone();
    let listing = create_local_resource(
        || (),
        move |_| {
            let repo = repo_for_list.clone();
            async move { repo.list().await }
        },
    );
    let loading = Signal::derive(move || listing.loading().get());
    create_effect(move |_| match listing.get() {
        Some(Ok(rows)) => {
            invitations.set(rows);
            load_error.set(None);
        }
        Some(Err(err)) => {
            log::error!("Failed to load invitations: {}", err);
            load_error.set(Some(err));
        }
        None => {}
    });

    let repo_for_create = repository.clone();
    let invite_action = create_action(move |_: &()| {
        let repo = repo_for_create.clone();
        let input = validate_invite(
            &email.get_untracked(),
            &first_name.get_untracked(),
            &last_name.get_untracked(),
        );
        let invited_by = auth.with_untracked(|state| state.user().map(|user| user.id.clone()));
        async move { repo.create(input?, invited_by).await }
    });

    let repo_for_resend = repository.clone();
    let resend_action = create_action(move |id: &String| {
        let repo = repo_for_resend.clone();
        let id = id.clone();
        async move { repo.resend(id).await }
    });

    let repo_for_revoke = repository;
    let revoke_action = create_action(move |id: &String| {
        let repo = repo_for_revoke.clone();
        let id = id.clone();
        async move { repo.revoke(id).await }
    });

    let vm = AdminViewModel {
        email,
        first_name,
        last_name,
        form_error,
        invitations,
        loading,
        load_error,
        pending_revoke,
        create_action: invite_action,
        resend_action,
        revoke_action,
    };

    create_effect(move |_| {
        if let Some(result) = invite_action.value().get() {
            match result {
                Ok(delivery) => {
                    let address = delivery.invitation.email.clone();
                    invitations.update(|list| upsert_invitation(list, delivery.invitation));
                    vm.clear_form();
                    match delivery.email_error {
                        None => {
                            toasts.success(format!("Invitation sent to {}", address));
                        }
                        Some(err) => {
                            toasts.warning(
                                "Invitation created",
                                format!("The email to {} could not be sent: {}", address, err),
                            );
                        }
                    }
                }
                Err(err) => {
                    log::error!("Failed to create invitation: {}", err);
                    form_error.set(Some(err));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = resend_action.value().get() {
            match result {
                Ok(delivery) => {
                    let address = delivery.invitation.email.clone();
                    invitations.update(|list| upsert_invitation(list, delivery.invitation));
                    match delivery.email_error {
                        None => {
                            toasts.success(format!("Invitation resent to {}", address));
                        }
                        Some(err) => {
                            toasts.warning("Invitation renewed", format!("The email could not be sent: {}", err));
                        }
                    }
                }
                Err(err) => {
                    log::error!("Failed to resend invitation: {}", err);
                    toasts.error("Could not resend invitation", err.to_string());
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = revoke_action.value().get() {
            match result {
                Ok(revoked) => {
                    invitations.update(|list| upsert_invitation(list, revoked));
                    toasts.success("Invitation revoked");
                }
                Err(err) => {
                    log::error!("Failed to revoke invitation: {}", err);
                    toasts.error("Could not revoke invitation", err.to_string());
                }
            }
        }
    });

    vm
}
