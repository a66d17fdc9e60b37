use super::view_model::use_login_view_model;
use crate::components::{
    common::{Button, TextField},
    error::InlineErrorMessage,
    layout::AuthCard,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.sign_in_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <AuthCard title="Welcome back" subtitle="Sign in to your MindHaven account">
            <form class="space-y-4" on:submit=on_submit>
                <TextField id="email" label="Email" value=vm.email input_type="email" required=true />
                <TextField id="password" label="Password" value=vm.password input_type="password" required=true />
                <InlineErrorMessage error=vm.error />
                <div class="flex justify-end">
                    <a href="/forgot-password" class="text-sm text-action-primary-bg hover:underline">
                        "Forgot your password?"
                    </a>
                </div>
                <Button class="w-full" loading=pending submit=true>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </Button>
            </form>
            <p class="text-center text-sm text-fg-muted">
                "New to MindHaven? "
                <a href="/signup" class="text-action-primary-bg hover:underline">"Create an account"</a>
            </p>
        </AuthCard>
    }
}
