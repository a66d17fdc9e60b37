use crate::api::TherapistInvitation;
use crate::components::{confirm_dialog::ConfirmDialog, empty_state::EmptyState};
use crate::pages::dashboard::admin::{
    utils::{can_resend, can_revoke, status_classes},
    view_model::AdminViewModel,
};
use chrono::Utc;
use leptos::*;

#[component]
fn InvitationRow(invitation: TherapistInvitation, vm: AdminViewModel) -> impl IntoView {
    let now = Utc::now();
    let status = invitation.effective_status(now);
    let resendable = can_resend(&invitation, now);
    let revocable = can_revoke(&invitation, now);
    let id = invitation.id.clone();
    let for_revoke = invitation.clone();
    let busy = Signal::derive(move || {
        vm.resend_action.pending().get() || vm.revoke_action.pending().get()
    });

    view! {
        <tr>
            <td class="px-4 py-3 text-sm text-fg">{invitation.display_name()}</td>
            <td class="px-4 py-3 text-sm text-fg-muted">{invitation.email.clone()}</td>
            <td class="px-4 py-3">
                <span class=format!("text-xs font-medium rounded-full px-2 py-1 {}", status_classes(status))>
                    {status.label()}
                </span>
            </td>
            <td class="px-4 py-3 text-sm text-fg-muted">
                {invitation.expires_at.format("%b %-d, %Y").to_string()}
            </td>
            <td class="px-4 py-3 text-right space-x-3">
                {resendable.then(|| view! {
                    <button
                        type="button"
                        class="text-sm text-action-primary-bg hover:underline disabled:opacity-50"
                        disabled=move || busy.get()
                        on:click=move |_| vm.resend_action.dispatch(id.clone())
                    >
                        "Resend"
                    </button>
                })}
                {revocable.then(|| view! {
                    <button
                        type="button"
                        class="text-sm text-status-error-text hover:underline disabled:opacity-50"
                        disabled=move || busy.get()
                        on:click=move |_| vm.pending_revoke.set(Some(for_revoke.clone()))
                    >
                        "Revoke"
                    </button>
                })}
            </td>
        </tr>
    }
}

#[component]
pub fn InvitationList(vm: AdminViewModel) -> impl IntoView {
    let revoke_message = Signal::derive(move || {
        vm.pending_revoke
            .with(|pending| pending.as_ref().map(|inv| inv.email.clone()))
            .map(|email| format!("{} will no longer be able to use their invitation link.", email))
            .unwrap_or_default()
    });

    view! {
        {move || {
            let rows = vm.invitations.get();
            if rows.is_empty() {
                view! {
                    <EmptyState
                        title="No invitations yet"
                        description="Invite a therapist to join MindHaven using the form above."
                        icon="fa-envelope-open-text"
                    />
                }
                .into_view()
            } else {
                view! {
                    <table class="min-w-full divide-y divide-border">
                        <thead>
                            <tr class="text-left text-xs uppercase text-fg-muted">
                                <th class="px-4 py-2">"Name"</th>
                                <th class="px-4 py-2">"Email"</th>
                                <th class="px-4 py-2">"Status"</th>
                                <th class="px-4 py-2">"Expires"</th>
                                <th class="px-4 py-2"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            {rows
                                .into_iter()
                                .map(|invitation| view! { <InvitationRow invitation=invitation vm=vm /> })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_view()
            }
        }}
        <ConfirmDialog
            is_open=Signal::derive(move || vm.pending_revoke.with(Option::is_some))
            title="Revoke invitation?"
            message=revoke_message
            confirm_label="Revoke"
            destructive=true
            on_confirm=Callback::new(move |_| vm.confirm_revoke())
            on_cancel=Callback::new(move |_| vm.pending_revoke.set(None))
        />
    }
}
