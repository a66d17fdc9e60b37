use crate::components::layout::Layout;
use leptos::*;

mod components;
mod panel;
mod repository;
mod utils;
mod view_model;

pub use panel::AdminDashboardPanel;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <Layout>
            <AdminDashboardPanel />
        </Layout>
    }
}
