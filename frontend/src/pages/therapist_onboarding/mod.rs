use crate::components::layout::Layout;
use leptos::*;

pub mod draft;
mod panel;
mod repository;
pub mod steps;
mod view_model;

pub use panel::OnboardingPanel;

#[component]
pub fn TherapistOnboardingPage() -> impl IntoView {
    view! {
        <Layout>
            <OnboardingPanel />
        </Layout>
    }
}
