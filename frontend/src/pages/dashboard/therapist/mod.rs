use crate::api::{ApiClient, Role};
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};
use crate::pages::appointments::{
    data::{sample_appointments, upcoming},
    AppointmentCard,
};
use crate::state::auth::use_auth;
use chrono::Utc;
use leptos::*;
use std::rc::Rc;

mod repository;
pub mod utils;

use repository::TherapistDashboardRepository;
use utils::{onboarding_summary, OnboardingSummary};

#[component]
fn OnboardingCard(summary: OnboardingSummary) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated rounded-lg shadow p-6 space-y-2">
            <div class="flex justify-between items-center">
                <h2 class="text-lg font-semibold text-fg">"Onboarding"</h2>
                <span class="text-xs font-medium rounded-full bg-surface-muted px-3 py-1 text-fg">
                    {summary.status.label()}
                </span>
            </div>
            <p class="text-sm text-fg-muted">{summary.detail}</p>
            {summary.action.map(|(href, label)| view! {
                <a
                    href=href
                    class="inline-flex rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                >
                    {label}
                </a>
            })}
        </section>
    }
}

#[component]
pub fn TherapistDashboardPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = TherapistDashboardRepository::new_with_client(Rc::new(api));

    let record = create_local_resource(
        move || auth.with(|state| state.user().map(|user| user.id.clone())),
        move |user_id| {
            let repo = repository.clone();
            async move {
                match user_id {
                    Some(id) => repo.load_record(id).await,
                    None => Ok(None),
                }
            }
        },
    );

    let schedule: Vec<_> = upcoming(&sample_appointments(Utc::now()), Utc::now());

    view! {
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">"Therapist dashboard"</h1>
                {move || match record.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Ok(found)) => view! { <OnboardingCard summary=onboarding_summary(found.as_ref()) /> }.into_view(),
                    Some(Err(err)) => {
                        log::error!("Failed to load therapist record: {}", err);
                        view! { <ErrorMessage message="We couldn't load your onboarding status." /> }.into_view()
                    }
                }}
                <section class="bg-surface-elevated rounded-lg shadow p-6">
                    <div class="flex justify-between items-center">
                        <h2 class="text-lg font-semibold text-fg">"Upcoming schedule"</h2>
                        <a href="/appointments" class="text-sm text-action-primary-bg hover:underline">"Full schedule"</a>
                    </div>
                    <ul class="divide-y divide-border">
                        {schedule
                            .into_iter()
                            .map(|a| view! { <AppointmentCard appointment=a role=Some(Role::Therapist) /> })
                            .collect_view()}
                    </ul>
                </section>
            </div>
        </Layout>
    }
}
