use crate::api::Role;
use crate::components::{empty_state::EmptyState, layout::Layout};
use crate::pages::appointments::{
    data::{sample_appointments, upcoming},
    AppointmentCard,
};
use crate::state::auth::use_auth;
use chrono::Utc;
use leptos::*;

const UPCOMING_PREVIEW: usize = 3;

#[component]
fn QuickLink(href: &'static str, icon: &'static str, title: &'static str, body: &'static str) -> impl IntoView {
    view! {
        <a href=href class="block bg-surface-elevated rounded-lg shadow p-5 hover:shadow-md transition-shadow">
            <i class=format!("fas {} text-action-primary-bg text-xl", icon)></i>
            <p class="mt-2 font-semibold text-fg">{title}</p>
            <p class="text-sm text-fg-muted">{body}</p>
        </a>
    }
}

#[component]
pub fn ClientDashboardPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let first_name = move || {
        auth.with(|state| {
            state
                .profile()
                .and_then(|p| p.first_name.clone())
                .unwrap_or_else(|| "there".to_string())
        })
    };
    let next_sessions: Vec<_> = upcoming(&sample_appointments(Utc::now()), Utc::now())
        .into_iter()
        .take(UPCOMING_PREVIEW)
        .collect();
    let has_sessions = !next_sessions.is_empty();

    view! {
        <Layout>
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-bold text-fg">"Welcome back, " {first_name}</h1>
                    <p class="text-fg-muted">"Here is what's coming up in your care."</p>
                </div>
                <section class="bg-surface-elevated rounded-lg shadow p-6">
                    <div class="flex justify-between items-center">
                        <h2 class="text-lg font-semibold text-fg">"Upcoming sessions"</h2>
                        <a href="/appointments" class="text-sm text-action-primary-bg hover:underline">"View all"</a>
                    </div>
                    {if has_sessions {
                        view! {
                            <ul class="divide-y divide-border">
                                {next_sessions
                                    .into_iter()
                                    .map(|a| view! { <AppointmentCard appointment=a role=Some(Role::Client) /> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view()
                    } else {
                        view! { <EmptyState title="No upcoming sessions" icon="fa-calendar" /> }.into_view()
                    }}
                </section>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <QuickLink href="/messages" icon="fa-comments" title="Messages" body="Stay in touch with your therapist between sessions." />
                    <QuickLink href="/for-therapists" icon="fa-user-doctor" title="Find a therapist" body="Browse licensed therapists who fit your needs." />
                    <QuickLink href="/appointments" icon="fa-calendar-check" title="Appointments" body="Review past sessions and manage upcoming ones." />
                </div>
            </div>
        </Layout>
    }
}
