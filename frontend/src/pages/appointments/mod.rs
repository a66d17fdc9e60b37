use crate::api::Role;
use crate::components::{empty_state::EmptyState, layout::Layout};
use crate::state::{auth::use_auth, toast::use_toasts};
use chrono::Utc;
use leptos::*;

pub mod data;

use data::{format_slot, past, sample_appointments, upcoming, Appointment, AppointmentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Upcoming,
    Past,
}

fn counterpart(appointment: &Appointment, role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Therapist) => appointment.client_name,
        _ => appointment.therapist_name,
    }
}

#[component]
pub fn AppointmentCard(
    appointment: Appointment,
    role: Option<Role>,
    #[prop(optional)] on_cancel: Option<Callback<&'static str>>,
) -> impl IntoView {
    let id = appointment.id;
    let cancellable = appointment.status == AppointmentStatus::Scheduled && on_cancel.is_some();
    view! {
        <li class="flex items-center justify-between py-4">
            <div>
                <p class="text-sm font-semibold text-fg">{counterpart(&appointment, role)}</p>
                <p class="text-sm text-fg-muted">{format_slot(&appointment)}</p>
                <p class="text-xs text-fg-muted">
                    {appointment.format.label()} " · " {appointment.status.label()}
                </p>
            </div>
            {cancellable.then(|| view! {
                <button
                    type="button"
                    class="text-sm text-status-error-text hover:underline"
                    on:click=move |_| {
                        if let Some(on_cancel) = on_cancel {
                            on_cancel.call(id);
                        }
                    }
                >
                    "Cancel"
                </button>
            })}
        </li>
    }
}

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let toasts = use_toasts();
    let role = move || auth.with(|state| state.role());
    let now = Utc::now();
    let appointments = create_rw_signal(sample_appointments(now));
    let tab = create_rw_signal(Tab::Upcoming);

    let on_cancel = Callback::new(move |id: &'static str| {
        appointments.update(|list| {
            if let Some(found) = list.iter_mut().find(|a| a.id == id) {
                found.status = AppointmentStatus::Cancelled;
            }
        });
        toasts.info("Appointment cancelled");
    });

    let visible = move || {
        appointments.with(|list| match tab.get() {
            Tab::Upcoming => upcoming(list, now),
            Tab::Past => past(list, now),
        })
    };
    let tab_class = move |t: Tab| {
        if tab.get() == t {
            "px-3 py-2 text-sm font-medium border-b-2 border-action-primary-bg text-fg"
        } else {
            "px-3 py-2 text-sm font-medium text-fg-muted hover:text-fg"
        }
    };

    view! {
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">
                    {move || if role() == Some(Role::Therapist) { "Your schedule" } else { "Your appointments" }}
                </h1>
                <div class="flex gap-2 border-b border-border">
                    <button type="button" class=move || tab_class(Tab::Upcoming) on:click=move |_| tab.set(Tab::Upcoming)>"Upcoming"</button>
                    <button type="button" class=move || tab_class(Tab::Past) on:click=move |_| tab.set(Tab::Past)>"Past"</button>
                </div>
                {move || {
                    let list = visible();
                    if list.is_empty() {
                        view! { <EmptyState title="No appointments here" icon="fa-calendar" /> }.into_view()
                    } else {
                        let cancel = (tab.get() == Tab::Upcoming).then_some(on_cancel);
                        view! {
                            <ul class="divide-y divide-border bg-surface-elevated rounded-lg shadow px-4">
                                {list
                                    .into_iter()
                                    .map(|a| match cancel {
                                        Some(cb) => view! { <AppointmentCard appointment=a role=role() on_cancel=cb /> }.into_view(),
                                        None => view! { <AppointmentCard appointment=a role=role() /> }.into_view(),
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view()
                    }
                }}
            </div>
        </Layout>
    }
}
