use crate::components::layout::{ErrorMessage, Layout};
use crate::state::auth::{dashboard_route, use_auth};
use crate::utils::location;
use leptos::*;

pub mod admin;
pub mod client;
pub mod therapist;

pub use admin::AdminDashboardPage;
pub use client::ClientDashboardPage;
pub use therapist::TherapistDashboardPage;

/// Role-specific dashboard for the profile, or `None` when the profile is missing.
pub fn role_dashboard(route: &'static str) -> Option<&'static str> {
    (route != "/dashboard").then_some(route)
}

/// Landing route for `/dashboard`: forwards to the role dashboard once the profile is known.
#[component]
pub fn DashboardRedirect() -> impl IntoView {
    let (auth, _) = use_auth();
    let target = create_memo(move |_| auth.with(|state| role_dashboard(dashboard_route(state.profile()))));

    create_effect(move |_| {
        if let Some(route) = target.get() {
            location::redirect(route);
        }
    });

    view! {
        <Layout>
            <Show when=move || target.get().is_none()>
                <div class="max-w-xl space-y-4">
                    <h1 class="text-2xl font-bold text-fg">"Welcome to MindHaven"</h1>
                    <ErrorMessage message="We couldn't load your profile. Try signing out and back in, or contact support if this keeps happening." />
                </div>
            </Show>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::profile_with_role;

    #[test]
    fn role_dashboard_requires_profile() {
        assert_eq!(role_dashboard(dashboard_route(None)), None);
        let admin = profile_with_role(Role::Admin);
        assert_eq!(
            role_dashboard(dashboard_route(Some(&admin))),
            Some("/dashboard/admin")
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::auth::AuthState;
    use crate::test_support::helpers::{provide_auth_state, session_for};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn missing_profile_shows_message() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::signed_in(session_for("u1"), None));
            view! { <DashboardRedirect /> }
        });
        assert!(html.contains("load your profile"));
    }
}
