use crate::components::{
    common::{Button, TextField},
    error::InlineErrorMessage,
};
use crate::pages::dashboard::admin::view_model::AdminViewModel;
use leptos::*;

#[component]
pub fn InviteForm(vm: AdminViewModel) -> impl IntoView {
    let pending = vm.create_action.pending();
    view! {
        <form
            class="grid grid-cols-1 md:grid-cols-3 gap-4 items-end"
            on:submit=move |ev| {
                ev.prevent_default();
                vm.submit_invite();
            }
        >
            <TextField id="invite-first-name" label="First name" value=vm.first_name required=true disabled=pending />
            <TextField id="invite-last-name" label="Last name" value=vm.last_name required=true disabled=pending />
            <TextField id="invite-email" label="Email" value=vm.email input_type="email" required=true disabled=pending />
            <div class="md:col-span-3 space-y-2">
                <InlineErrorMessage error=vm.form_error />
                <Button submit=true loading=pending>
                    {move || if pending.get() { "Sending..." } else { "Send invitation" }}
                </Button>
            </div>
        </form>
    }
}
