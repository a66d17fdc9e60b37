use super::{
    draft::{is_locked, resume_step, Draft},
    repository::{DocumentUpload, OnboardingRepository},
    steps::{STEPS, STEP_COUNT},
};
use crate::api::{ApiClient, ApiError, OnboardingStatus, UploadedDocument};
use crate::state::{auth::use_auth, toast::use_toasts};
use crate::utils::{location, validation::validation_error};
use leptos::*;
use serde_json::{Map, Value};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum WizardPhase {
    Loading,
    Ready,
    Locked(OnboardingStatus),
    LoadFailed(ApiError),
}

#[derive(Clone, Copy)]
pub struct OnboardingViewModel {
    pub phase: RwSignal<WizardPhase>,
    pub current: RwSignal<usize>,
    pub draft: RwSignal<Draft>,
    pub error: RwSignal<Option<ApiError>>,
    pub uploading: RwSignal<Option<&'static str>>,
    pub save_action: Action<(usize, Map<String, Value>), Result<usize, ApiError>>,
    pub upload_action: Action<DocumentUpload, Result<(&'static str, UploadedDocument), ApiError>>,
    pub complete_action: Action<Map<String, Value>, Result<(), ApiError>>,
}

impl OnboardingViewModel {
    pub fn is_busy(&self) -> bool {
        self.save_action.pending().get() || self.complete_action.pending().get()
    }

    /// Saves the current step and advances once the backend confirms.
    pub fn next(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        let step = self.current.get_untracked();
        let Some(def) = STEPS.get(step) else {
            return;
        };
        let (errors, data) = self
            .draft
            .with_untracked(|draft| (draft.step_errors(def), draft.step_data(def)));
        if !errors.is_empty() {
            self.error
                .set(Some(validation_error("Please complete the required fields", errors)));
            return;
        }
        self.error.set(None);
        self.save_action.dispatch((step, data));
    }

    /// Going back keeps unsaved answers in memory but does not persist them.
    pub fn back(&self) {
        self.error.set(None);
        self.current.update(|step| *step = step.saturating_sub(1));
    }

    pub fn jump_to(&self, step: usize) {
        if step < STEP_COUNT {
            self.error.set(None);
            self.current.set(step);
        }
    }

    pub fn submit(&self) {
        if self.complete_action.pending().get_untracked() {
            return;
        }
        let (incomplete, data) = self
            .draft
            .with_untracked(|draft| (draft.first_incomplete_step(), draft.full_data()));
        if let Some(step) = incomplete {
            let errors = self.draft.with_untracked(|draft| draft.step_errors(&STEPS[step]));
            self.error.set(Some(validation_error(
                &format!("Step {} ({}) is incomplete", step + 1, STEPS[step].title),
                errors,
            )));
            return;
        }
        self.error.set(None);
        self.complete_action.dispatch(data);
    }

    pub fn upload(&self, upload: DocumentUpload) {
        if self.uploading.get_untracked().is_some() {
            return;
        }
        self.uploading.set(Some(upload.field_key));
        self.upload_action.dispatch(upload);
    }

    /// Reads the chosen file into memory and uploads it for `field_key`.
    #[cfg(target_arch = "wasm32")]
    pub fn upload_file(&self, field_key: &'static str, kind: &str, file: web_sys::File) {
        let vm = *self;
        let kind = kind.to_string();
        spawn_local(async move {
            let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await;
            match buffer {
                Ok(buffer) => vm.upload(DocumentUpload {
                    field_key,
                    kind,
                    file_name: file.name(),
                    content_type: file.type_(),
                    bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
                }),
                Err(_) => {
                    log::error!("Could not read selected file {}", file.name());
                    vm.error
                        .set(Some(ApiError::unknown("Could not read the selected file")));
                }
            }
        });
    }
}

pub fn use_onboarding_view_model() -> OnboardingViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = OnboardingRepository::new_with_client(Rc::new(api));
    let (auth, _) = use_auth();
    let toasts = use_toasts();

    let phase = create_rw_signal(WizardPhase::Loading);
    let current = create_rw_signal(0usize);
    let draft = create_rw_signal(Draft::default());
    let error = create_rw_signal(None::<ApiError>);
    let uploading = create_rw_signal(None::<&'static str>);

    let repo_for_load = repository.clone();
    let record = create_local_resource(
        move || auth.with(|state| state.user().map(|user| user.id.clone())),
        move |user_id| {
            let repo = repo_for_load.clone();
            async move {
                match user_id {
                    Some(id) => repo.load(id).await,
                    None => Ok(None),
                }
            }
        },
    );
    create_effect(move |_| match record.get() {
        Some(Ok(found)) => {
            let stored = found
                .as_ref()
                .and_then(|r| r.draft_data.clone())
                .unwrap_or_default();
            draft.set(Draft::from_map(stored));
            current.set(resume_step(found.as_ref()));
            phase.set(if is_locked(found.as_ref()) {
                WizardPhase::Locked(found.map(|r| r.onboarding_status).unwrap_or(OnboardingStatus::Submitted))
            } else {
                WizardPhase::Ready
            });
        }
        Some(Err(err)) => {
            log::error!("Failed to load onboarding draft: {}", err);
            phase.set(WizardPhase::LoadFailed(err));
        }
        None => {}
    });

    let repo_for_save = repository.clone();
    let save_action = create_action(move |(step, data): &(usize, Map<String, Value>)| {
        let repo = repo_for_save.clone();
        let step = *step;
        let data = data.clone();
        async move { repo.save_step(step, data).await.map(|_| step) }
    });
    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(step) => {
                    current.set((step + 1).min(STEP_COUNT - 1));
                }
                Err(err) => {
                    log::error!("Failed to save onboarding step: {}", err);
                    toasts.error("Could not save your progress", err.to_string());
                    error.set(Some(err));
                }
            }
        }
    });

    let repo_for_upload = repository.clone();
    let upload_action = create_action(move |upload: &DocumentUpload| {
        let repo = repo_for_upload.clone();
        let upload = upload.clone();
        let user_id = auth.with_untracked(|state| state.user().map(|user| user.id.clone()));
        async move {
            let user_id = user_id.ok_or_else(|| ApiError::unauthorized("Sign in to upload documents"))?;
            let key = upload.field_key;
            repo.upload_document(&user_id, upload).await.map(|doc| (key, doc))
        }
    });
    create_effect(move |_| {
        if let Some(result) = upload_action.value().get() {
            uploading.set(None);
            match result {
                Ok((key, document)) => {
                    draft.update(|d| d.set_text(key, document.public_url));
                    toasts.success("Document uploaded");
                }
                Err(err) => {
                    log::error!("Document upload failed: {}", err);
                    toasts.error("Upload failed", err.to_string());
                }
            }
        }
    });

    let repo_for_complete = repository;
    let complete_action = create_action(move |data: &Map<String, Value>| {
        let repo = repo_for_complete.clone();
        let data = data.clone();
        async move { repo.complete(data).await }
    });
    create_effect(move |_| {
        if let Some(result) = complete_action.value().get() {
            match result {
                Ok(()) => {
                    toasts.success("Application submitted");
                    location::redirect("/dashboard/therapist");
                }
                Err(err) => {
                    log::error!("Failed to complete onboarding: {}", err);
                    error.set(Some(err));
                }
            }
        }
    });

    OnboardingViewModel {
        phase,
        current,
        draft,
        error,
        uploading,
        save_action,
        upload_action,
        complete_action,
    }
}
