use super::{
    draft::display_value,
    steps::{document_kind, titles, FieldDef, FieldKind, StepDef, DOCUMENTS_STEP, REVIEW_STEP, STEPS},
    view_model::{use_onboarding_view_model, OnboardingViewModel, WizardPhase},
};
use crate::components::{
    common::{Button, ButtonVariant},
    error::InlineErrorMessage,
    layout::{ErrorMessage, LoadingSpinner},
    wizard::StepIndicator,
};
use leptos::{ev::Event, *};

const INPUT_CLASS: &str = "appearance-none block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text rounded-md focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm";

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Tel => "tel",
        FieldKind::Date => "date",
        FieldKind::Number => "number",
        _ => "text",
    }
}

#[cfg(target_arch = "wasm32")]
fn on_file_selected(ev: Event, field: &'static FieldDef, vm: OnboardingViewModel) {
    use wasm_bindgen::JsCast;
    let file = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0));
    if let Some(file) = file {
        vm.upload_file(field.key, document_kind(field.key), file);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn on_file_selected(_ev: Event, field: &'static FieldDef, _vm: OnboardingViewModel) {
    log::debug!("file selection for {} ignored outside the browser", document_kind(field.key));
}

#[component]
fn FieldInput(field: &'static FieldDef, vm: OnboardingViewModel) -> impl IntoView {
    let key = field.key;
    let text = move || vm.draft.with(|d| d.text(key));
    let set_text = move |ev: Event| vm.draft.update(|d| d.set_text(key, event_target_value(&ev)));

    let control = match field.kind {
        FieldKind::LongText => view! {
            <textarea id=key rows="4" class=INPUT_CLASS prop:value=text on:input=set_text></textarea>
        }
        .into_view(),
        FieldKind::Choice(options) => view! {
            <select id=key class=INPUT_CLASS prop:value=text on:change=set_text>
                <option value="">"Select..."</option>
                {options
                    .iter()
                    .map(|option| view! { <option value=*option selected=move || text() == *option>{*option}</option> })
                    .collect_view()}
            </select>
        }
        .into_view(),
        FieldKind::MultiChoice(options) => view! {
            <div class="grid grid-cols-2 md:grid-cols-3 gap-2">
                {options
                    .iter()
                    .map(|option| {
                        let option = *option;
                        view! {
                            <label class="flex items-center gap-2 text-sm text-fg">
                                <input
                                    type="checkbox"
                                    prop:checked=move || vm.draft.with(|d| d.list(key).iter().any(|o| o == option))
                                    on:change=move |_| vm.draft.update(|d| d.toggle(key, option))
                                />
                                {option}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_view(),
        FieldKind::Document => view! {
            <div class="space-y-2">
                {move || {
                    let url = text();
                    (!url.is_empty()).then(|| view! {
                        <a href=url target="_blank" rel="noopener" class="text-sm text-action-primary-bg hover:underline">
                            <i class="fas fa-file mr-1"></i>"View uploaded file"
                        </a>
                    })
                }}
                <input
                    id=key
                    type="file"
                    accept=".pdf,.jpg,.jpeg,.png"
                    class="block text-sm text-fg-muted"
                    disabled=move || vm.uploading.get().is_some()
                    on:change=move |ev| on_file_selected(ev, field, vm)
                />
                <Show when=move || vm.uploading.get() == Some(key)>
                    <p class="text-xs text-fg-muted">"Uploading..."</p>
                </Show>
            </div>
        }
        .into_view(),
        kind => view! {
            <input id=key type=input_type(kind) class=INPUT_CLASS prop:value=text on:input=set_text />
        }
        .into_view(),
    };

    view! {
        <div class="space-y-1">
            <label for=key class="block text-sm font-medium text-fg">
                {field.label}
                {field.required.then(|| view! { <span class="text-status-error-text">" *"</span> })}
            </label>
            {control}
        </div>
    }
}

#[component]
fn StepForm(step: &'static StepDef, vm: OnboardingViewModel) -> impl IntoView {
    view! {
        <div class="space-y-4">
            {step
                .fields
                .iter()
                .map(|field| view! { <FieldInput field=field vm=vm /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn ReviewStep(vm: OnboardingViewModel) -> impl IntoView {
    view! {
        <div class="space-y-6">
            {STEPS[..REVIEW_STEP]
                .iter()
                .enumerate()
                .map(|(index, step)| {
                    view! {
                        <section class="border border-border rounded-md p-4">
                            <div class="flex justify-between items-center mb-2">
                                <h3 class="font-semibold text-fg">{step.title}</h3>
                                <button
                                    type="button"
                                    class="text-sm text-action-primary-bg hover:underline"
                                    on:click=move |_| vm.jump_to(index)
                                >
                                    "Edit"
                                </button>
                            </div>
                            <dl class="grid grid-cols-1 md:grid-cols-2 gap-x-4 gap-y-1 text-sm">
                                {step
                                    .fields
                                    .iter()
                                    .map(|field| {
                                        let value = move || {
                                            let shown = vm.draft.with(|d| display_value(d, field));
                                            if shown.is_empty() { "Not provided".to_string() } else { shown }
                                        };
                                        view! {
                                            <dt class="text-fg-muted">{field.label}</dt>
                                            <dd class="text-fg">{value}</dd>
                                        }
                                    })
                                    .collect_view()}
                            </dl>
                        </section>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn Wizard(vm: OnboardingViewModel) -> impl IntoView {
    let current = vm.current;
    let saving = vm.save_action.pending();
    let completing = vm.complete_action.pending();

    view! {
        <div class="space-y-6">
            <StepIndicator titles=titles() current=current />
            <div class="bg-surface-elevated rounded-lg shadow p-6 space-y-4">
                <div>
                    <h2 class="text-xl font-semibold text-fg">{move || STEPS[current.get()].title}</h2>
                    <p class="text-sm text-fg-muted">{move || STEPS[current.get()].description}</p>
                </div>
                {move || {
                    let step = current.get();
                    if step == REVIEW_STEP {
                        view! { <ReviewStep vm=vm /> }.into_view()
                    } else {
                        view! { <StepForm step=&STEPS[step] vm=vm /> }.into_view()
                    }
                }}
                <InlineErrorMessage error=vm.error />
                <div class="flex justify-between pt-4 border-t border-border">
                    <Button
                        variant=ButtonVariant::Secondary
                        disabled=Signal::derive(move || current.get() == 0 || vm.is_busy())
                        on_click=Callback::new(move |_| vm.back())
                    >
                        "Back"
                    </Button>
                    <Show
                        when=move || current.get() == REVIEW_STEP
                        fallback=move || view! {
                            <Button
                                loading=saving
                                disabled=Signal::derive(move || {
                                    current.get() == DOCUMENTS_STEP && vm.uploading.get().is_some()
                                })
                                on_click=Callback::new(move |_| vm.next())
                            >
                                "Save & continue"
                            </Button>
                        }
                    >
                        <Button loading=completing on_click=Callback::new(move |_| vm.submit())>
                            "Submit application"
                        </Button>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn OnboardingPanel() -> impl IntoView {
    let vm = use_onboarding_view_model();

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Therapist onboarding"</h1>
                <p class="text-fg-muted">"Your progress is saved after each step."</p>
            </div>
            {move || match vm.phase.get() {
                WizardPhase::Loading => view! { <LoadingSpinner /> }.into_view(),
                WizardPhase::Ready => view! { <Wizard vm=vm /> }.into_view(),
                WizardPhase::Locked(status) => view! {
                    <div class="bg-surface-elevated rounded-lg shadow p-6 space-y-2">
                        <p class="font-semibold text-fg">{format!("Application status: {}", status.label())}</p>
                        <p class="text-sm text-fg-muted">"Your application is with our team. We'll email you when there is an update."</p>
                        <a href="/dashboard/therapist" class="text-sm text-action-primary-bg hover:underline">"Back to dashboard"</a>
                    </div>
                }
                .into_view(),
                WizardPhase::LoadFailed(err) => view! {
                    <ErrorMessage message=format!("We couldn't load your onboarding progress: {}", err) />
                }
                .into_view(),
            }}
        </div>
    }
}
