use super::{
    components::{invitation_list::InvitationList, invite_form::InviteForm},
    view_model::use_admin_view_model,
};
use crate::components::{error::InlineErrorMessage, layout::LoadingSpinner};
use leptos::*;

#[component]
pub fn AdminDashboardPanel() -> impl IntoView {
    let vm = use_admin_view_model();

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Admin dashboard"</h1>
                <p class="text-fg-muted">"Invite therapists and track their invitations."</p>
            </div>
            <section id="invitations" class="bg-surface-elevated rounded-lg shadow p-6 space-y-6">
                <h2 class="text-lg font-semibold text-fg">"Invite a therapist"</h2>
                <InviteForm vm=vm />
                <h2 class="text-lg font-semibold text-fg">"Invitations"</h2>
                <InlineErrorMessage error=vm.load_error />
                <Show when=move || !vm.loading.get() fallback=|| view! { <LoadingSpinner /> }>
                    <InvitationList vm=vm />
                </Show>
            </section>
        </div>
    }
}
