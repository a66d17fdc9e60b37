use super::view_model::use_forgot_password_view_model;
use crate::components::{
    common::{Button, TextField},
    error::InlineErrorMessage,
    layout::{AuthCard, SuccessMessage},
};
use leptos::*;

#[component]
pub fn ForgotPasswordPanel() -> impl IntoView {
    let vm = use_forgot_password_view_model();
    let pending = vm.submit_action.pending();

    view! {
        <AuthCard
            title="Reset your password"
            subtitle="Enter your email address and we'll send you a link to reset your password."
        >
            {move || match vm.sent_to.get() {
                Some(address) => view! {
                    <div>
                        <SuccessMessage message=format!(
                            "If an account exists for {}, a reset link is on its way.",
                            address,
                        ) />
                        <a href="/login" class="text-sm text-action-primary-bg hover:underline">"Back to sign in"</a>
                    </div>
                }
                .into_view(),
                None => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            if !pending.get_untracked() {
                                vm.submit_action.dispatch(vm.email.get_untracked());
                            }
                        }
                    >
                        <TextField id="email" label="Email" value=vm.email input_type="email" required=true />
                        <InlineErrorMessage error=vm.error />
                        <Button class="w-full" submit=true loading=pending>
                            {move || if pending.get() { "Sending..." } else { "Send reset link" }}
                        </Button>
                        <p class="text-center text-sm">
                            <a href="/login" class="text-action-primary-bg hover:underline">"Back to sign in"</a>
                        </p>
                    </form>
                }
                .into_view(),
            }}
        </AuthCard>
    }
}
