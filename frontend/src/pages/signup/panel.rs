use super::view_model::{use_signup_view_model, SignupViewModel};
use super::utils::SignupFormState;
use crate::components::{
    common::Button,
    error::InlineErrorMessage,
    layout::{AuthCard, ErrorMessage, LoadingSpinner, SuccessMessage},
};
use leptos::{ev::SubmitEvent, *};

fn form_field(
    form: RwSignal<SignupFormState>,
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    read: fn(&SignupFormState) -> String,
    write: fn(&mut SignupFormState, String),
    locked: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="space-y-1">
            <label for=id class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=id
                name=id
                type=input_type
                required
                disabled=move || locked.get()
                class="appearance-none block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text rounded-md focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm disabled:opacity-60"
                prop:value=move || form.with(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|state| write(state, value));
                }
            />
        </div>
    }
}

#[component]
fn SignupForm(vm: SignupViewModel) -> impl IntoView {
    let pending = vm.submit_action.pending();
    let unlocked = Signal::derive(|| false);
    let email_locked = Signal::derive(move || vm.invitation.with(|i| i.is_some()));
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <div class="grid grid-cols-2 gap-3">
                {form_field(vm.form, "first_name", "First name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v, unlocked)}
                {form_field(vm.form, "last_name", "Last name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v, unlocked)}
            </div>
            {form_field(vm.form, "email", "Email", "email", |f| f.email.clone(), |f, v| f.email = v, email_locked)}
            {form_field(vm.form, "password", "Password", "password", |f| f.password.clone(), |f, v| f.password = v, unlocked)}
            {form_field(vm.form, "confirm_password", "Confirm password", "password", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v, unlocked)}
            <p class="text-xs text-fg-muted">"Use at least 8 characters."</p>
            <InlineErrorMessage error=vm.error />
            <Button class="w-full" submit=true loading=pending>
                {move || if pending.get() { "Creating account..." } else { "Create account" }}
            </Button>
        </form>
    }
}

#[component]
pub fn SignupPanel() -> impl IntoView {
    let vm = use_signup_view_model();
    let (title, subtitle) = if vm.is_invited() {
        ("Join MindHaven as a therapist", "Complete your account to start onboarding")
    } else {
        ("Create your account", "Find support that fits you")
    };

    view! {
        <AuthCard title=title subtitle=subtitle>
            {move || {
                if vm.checking_invitation.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else if let Some(message) = vm.invitation_error.get() {
                    view! {
                        <div>
                            <ErrorMessage message=message />
                            <a href="/login" class="text-sm text-action-primary-bg hover:underline">"Go to sign in"</a>
                        </div>
                    }
                    .into_view()
                } else if vm.confirmation_sent.get() {
                    view! {
                        <SuccessMessage message="Check your email to confirm your account, then sign in." />
                    }
                    .into_view()
                } else {
                    view! { <SignupForm vm=vm /> }.into_view()
                }
            }}
            <p class="text-center text-sm text-fg-muted">
                "Already have an account? "
                <a href="/login" class="text-action-primary-bg hover:underline">"Sign in"</a>
            </p>
        </AuthCard>
    }
}
