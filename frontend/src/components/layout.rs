use crate::{
    api::Role,
    components::toast::ToastHost,
    state::auth::{self, use_auth},
    utils::location,
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const fn link(href: &'static str, label: &'static str) -> NavLink {
    NavLink { href, label }
}

pub fn nav_links(role: Option<Role>, dashboard: &'static str) -> Vec<NavLink> {
    let mut links = vec![link(dashboard, "Dashboard")];
    match role {
        Some(Role::Client) => {
            links.push(link("/appointments", "Appointments"));
            links.push(link("/messages", "Messages"));
        }
        Some(Role::Therapist) => {
            links.push(link("/onboarding/therapist", "Onboarding"));
            links.push(link("/appointments", "Schedule"));
            links.push(link("/messages", "Messages"));
        }
        Some(Role::Admin) => links.push(link("/dashboard/admin#invitations", "Invitations")),
        None => {}
    }
    links
}

pub const MARKETING_LINKS: [NavLink; 3] = [
    link("/about", "About"),
    link("/for-therapists", "For therapists"),
    link("/login", "Sign in"),
];

const NAV_LINK_CLASS: &str = "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let links = move || auth.with(|state| nav_links(state.role(), state.dashboard_route()));
    let user_label = move || {
        auth.with(|state| {
            state
                .profile()
                .map(|profile| profile.display_name())
                .or_else(|| state.user().and_then(|user| user.email.clone()))
                .unwrap_or_default()
        })
    };

    let sign_out_action = auth::use_sign_out_action();
    let sign_out_pending = sign_out_action.pending();
    create_effect(move |_| {
        if sign_out_action.value().get().is_some() {
            location::redirect("/login");
        }
    });
    let on_sign_out = move |_| {
        if sign_out_pending.get_untracked() {
            return;
        }
        set_menu_open.set(false);
        sign_out_action.dispatch(());
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-fg">"MindHaven"</a>
                    <div class="flex items-center gap-2">
                        <nav class="hidden lg:flex space-x-4 items-center">
                            {move || {
                                links()
                                    .into_iter()
                                    .map(|l| view! { <a href=l.href class=NAV_LINK_CLASS>{l.label}</a> })
                                    .collect_view()
                            }}
                            <span class="text-sm text-fg-muted">{user_label}</span>
                            <button
                                on:click=on_sign_out
                                class=format!("{} disabled:opacity-50", NAV_LINK_CLASS)
                                disabled=move || sign_out_pending.get()
                            >
                                "Sign out"
                            </button>
                        </nav>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Close menu" } else { "Open menu" }}
                            </span>
                            <i class=move || if menu_open.get() { "fas fa-xmark" } else { "fas fa-bars" }></i>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            {move || {
                                links()
                                    .into_iter()
                                    .map(|l| {
                                        view! {
                                            <a
                                                href=l.href
                                                class=format!("block {}", NAV_LINK_CLASS)
                                                on:click=move |_| set_menu_open.set(false)
                                            >
                                                {l.label}
                                            </a>
                                        }
                                    })
                                    .collect_view()
                            }}
                            <button
                                on:click=on_sign_out
                                class=format!("w-full text-left {} disabled:opacity-50", NAV_LINK_CLASS)
                                disabled=move || sign_out_pending.get()
                            >
                                "Sign out"
                            </button>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

/// Chrome for signed-in screens.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
            <ToastHost/>
        </div>
    }
}

/// Chrome for marketing and auth screens.
#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface flex flex-col">
            <header class="border-b border-border bg-surface-elevated">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-fg">"MindHaven"</a>
                    <nav class="flex space-x-2">
                        {MARKETING_LINKS
                            .iter()
                            .map(|l| view! { <a href=l.href class=NAV_LINK_CLASS>{l.label}</a> })
                            .collect_view()}
                    </nav>
                </div>
            </header>
            <main class="flex-1">{children()}</main>
            <footer class="border-t border-border py-6 text-center text-xs text-fg-muted">
                "MindHaven is not a crisis service. If you are in danger, call your local emergency number."
            </footer>
            <ToastHost/>
        </div>
    }
}

/// Centered card used by the sign-in, sign-up and password screens.
#[component]
pub fn AuthCard(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8 bg-surface-elevated border border-border rounded-lg shadow p-8">
                <div>
                    <h2 class="text-center text-3xl font-extrabold text-fg">{title}</h2>
                    {subtitle.map(|s| view! { <p class="mt-2 text-center text-sm text-fg-muted">{s}</p> })}
                </div>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8" role="status">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
            <span class="sr-only">"Loading"</span>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}
