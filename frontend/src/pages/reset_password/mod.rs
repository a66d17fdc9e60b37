use crate::components::layout::PublicLayout;
use leptos::*;

mod panel;
mod repository;
pub mod utils;
mod view_model;

pub use panel::ResetPasswordPanel;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <ResetPasswordPanel />
        </PublicLayout>
    }
}
