use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::{ApiClient, Role},
    components::guard::{AuthGuard, ProtectedRoute},
    pages::{
        appointments::AppointmentsPage,
        dashboard::{AdminDashboardPage, ClientDashboardPage, DashboardRedirect, TherapistDashboardPage},
        forgot_password::ForgotPasswordPage,
        login::LoginPage,
        marketing::{AboutPage, ForTherapistsPage, HomePage},
        messages::MessagesPage,
        not_found::NotFoundPage,
        reset_password::ResetPasswordPage,
        signup::SignupPage,
        therapist_onboarding::TherapistOnboardingPage,
    },
    state::{auth::AuthProvider, toast::provide_toasts},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/about",
    "/for-therapists",
    "/login",
    "/signup",
    "/forgot-password",
    "/reset-password",
    "/dashboard",
    "/dashboard/client",
    "/dashboard/therapist",
    "/dashboard/admin",
    "/onboarding/therapist",
    "/messages",
    "/appointments",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/dashboard",
    "/dashboard/client",
    "/dashboard/therapist",
    "/dashboard/admin",
    "/onboarding/therapist",
    "/messages",
    "/appointments",
];

/// Pages that redirect away once a user is signed in.
pub const SIGNED_OUT_ROUTE_PATHS: &[&str] = &["/login", "/signup"];

/// Roles allowed on a protected path. Empty means any signed-in user.
pub fn route_roles(path: &str) -> &'static [Role] {
    match path {
        "/dashboard/client" => &[Role::Client],
        "/dashboard/therapist" | "/onboarding/therapist" => &[Role::Therapist],
        "/dashboard/admin" => &[Role::Admin],
        _ => &[],
    }
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_toasts();
    provide_meta_context();
    view! {
        <Title text="MindHaven" />
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/about" view=AboutPage/>
                    <Route path="/for-therapists" view=ForTherapistsPage/>
                    <Route path="/login" view=GuardedLogin/>
                    <Route path="/signup" view=GuardedSignup/>
                    <Route path="/forgot-password" view=ForgotPasswordPage/>
                    <Route path="/reset-password" view=ResetPasswordPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/dashboard/client" view=ProtectedClientDashboard/>
                    <Route path="/dashboard/therapist" view=ProtectedTherapistDashboard/>
                    <Route path="/dashboard/admin" view=ProtectedAdminDashboard/>
                    <Route path="/onboarding/therapist" view=ProtectedOnboarding/>
                    <Route path="/messages" view=ProtectedMessages/>
                    <Route path="/appointments" view=ProtectedAppointments/>
                    <Route path="/*any" view=NotFoundPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn GuardedLogin() -> impl IntoView {
    view! { <AuthGuard><LoginPage/></AuthGuard> }
}

#[component]
fn GuardedSignup() -> impl IntoView {
    view! { <AuthGuard><SignupPage/></AuthGuard> }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <ProtectedRoute><DashboardRedirect/></ProtectedRoute> }
}

#[component]
fn ProtectedClientDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute allowed_roles=route_roles("/dashboard/client").to_vec()>
            <ClientDashboardPage/>
        </ProtectedRoute>
    }
}

#[component]
fn ProtectedTherapistDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute allowed_roles=route_roles("/dashboard/therapist").to_vec()>
            <TherapistDashboardPage/>
        </ProtectedRoute>
    }
}

#[component]
fn ProtectedAdminDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute allowed_roles=route_roles("/dashboard/admin").to_vec()>
            <AdminDashboardPage/>
        </ProtectedRoute>
    }
}

#[component]
fn ProtectedOnboarding() -> impl IntoView {
    view! {
        <ProtectedRoute allowed_roles=route_roles("/onboarding/therapist").to_vec()>
            <TherapistOnboardingPage/>
        </ProtectedRoute>
    }
}

#[component]
fn ProtectedMessages() -> impl IntoView {
    view! { <ProtectedRoute><MessagesPage/></ProtectedRoute> }
}

#[component]
fn ProtectedAppointments() -> impl IntoView {
    view! { <ProtectedRoute><AppointmentsPage/></ProtectedRoute> }
}
