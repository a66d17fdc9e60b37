use crate::components::layout::PublicLayout;
use leptos::*;

mod panel;
pub mod utils;
pub mod view_model;

pub use panel::LoginPanel;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <LoginPanel />
        </PublicLayout>
    }
}
