use super::{utils::RecoveryStatus, view_model::use_reset_password_view_model};
use crate::components::{
    common::{Button, TextField},
    error::InlineErrorMessage,
    layout::{AuthCard, ErrorMessage, LoadingSpinner, SuccessMessage},
};
use leptos::*;

#[component]
pub fn ResetPasswordPanel() -> impl IntoView {
    let vm = use_reset_password_view_model();
    let pending = vm.submit_action.pending();

    view! {
        <AuthCard title="Set a new password">
            {move || {
                if vm.completed.get() {
                    return view! {
                        <div>
                            <SuccessMessage message="Your password has been updated. Sign in with your new password." />
                            <a href="/login" class="text-sm text-action-primary-bg hover:underline">"Go to sign in"</a>
                        </div>
                    }
                    .into_view();
                }
                match vm.status.get() {
                    RecoveryStatus::Checking => view! { <LoadingSpinner /> }.into_view(),
                    RecoveryStatus::Invalid(message) => view! {
                        <div>
                            <ErrorMessage message=message />
                            <a href="/forgot-password" class="text-sm text-action-primary-bg hover:underline">
                                "Request a new link"
                            </a>
                        </div>
                    }
                    .into_view(),
                    RecoveryStatus::Ready => view! {
                        <form
                            class="space-y-4"
                            on:submit=move |ev| {
                                ev.prevent_default();
                                vm.submit();
                            }
                        >
                            <TextField id="password" label="New password" value=vm.password input_type="password" required=true />
                            <TextField id="confirm_password" label="Confirm new password" value=vm.confirm_password input_type="password" required=true />
                            <InlineErrorMessage error=vm.error />
                            <Button class="w-full" submit=true loading=pending>
                                {move || if pending.get() { "Updating..." } else { "Update password" }}
                            </Button>
                        </form>
                    }
                    .into_view(),
                }
            }}
        </AuthCard>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn reset_panel_shows_spinner_while_checking_link() {
        let html = render_to_string(move || view! { <ResetPasswordPanel /> });
        assert!(html.contains("Set a new password"));
        assert!(html.contains("animate-spin"));
    }
}
