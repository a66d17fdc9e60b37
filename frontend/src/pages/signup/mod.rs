use crate::components::layout::PublicLayout;
use leptos::*;

mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

pub use panel::SignupPanel;

#[component]
pub fn SignupPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <SignupPanel />
        </PublicLayout>
    }
}
