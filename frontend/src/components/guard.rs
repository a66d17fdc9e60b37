use crate::{
    api::Role,
    components::layout::LoadingSpinner,
    state::auth::{use_auth, AuthState},
    utils::location,
};
use leptos::*;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Upper bound on how long a guard waits for the session check.
pub const AUTH_CHECK_TIMEOUT_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Pending,
    Render,
    Redirect(String),
}

pub fn login_redirect(origin: &str) -> String {
    if origin.is_empty() || origin == "/" {
        return "/login".to_string();
    }
    format!(
        "/login?redirect={}",
        utf8_percent_encode(origin, NON_ALPHANUMERIC)
    )
}

/// Only same-origin absolute paths are honoured as post-login targets.
pub fn sanitize_redirect(raw: Option<&str>) -> Option<String> {
    let target = raw?.trim();
    let same_origin = target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\");
    (same_origin && !target.starts_with("/login")).then(|| target.to_string())
}

pub fn protected_outcome(
    state: &AuthState,
    allowed_roles: &[Role],
    timed_out: bool,
    origin: &str,
) -> GuardOutcome {
    if state.is_loading() && !timed_out {
        return GuardOutcome::Pending;
    }
    if !state.is_authenticated() {
        return GuardOutcome::Redirect(login_redirect(origin));
    }
    if allowed_roles.is_empty() {
        return GuardOutcome::Render;
    }
    match state.role() {
        Some(role) if allowed_roles.contains(&role) => GuardOutcome::Render,
        _ => GuardOutcome::Redirect(state.dashboard_route().to_string()),
    }
}

/// Outcome for pages that only make sense signed out (login, signup).
pub fn public_outcome(state: &AuthState, timed_out: bool, redirect: Option<&str>) -> GuardOutcome {
    if state.is_loading() && !timed_out {
        return GuardOutcome::Pending;
    }
    if !state.is_authenticated() {
        return GuardOutcome::Render;
    }
    let target = sanitize_redirect(redirect).unwrap_or_else(|| state.dashboard_route().to_string());
    GuardOutcome::Redirect(target)
}

/// Tracks loading episodes so the failsafe only ever expires the episode that armed it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailsafeClock {
    episode: u64,
    loading: bool,
    expired: bool,
}

impl FailsafeClock {
    /// Feeds the current loading flag. Returns the episode a timer must be armed for when
    /// a new loading episode starts.
    pub fn observe(&mut self, loading: bool) -> Option<u64> {
        match (self.loading, loading) {
            (false, true) => {
                self.episode += 1;
                self.loading = true;
                self.expired = false;
                Some(self.episode)
            }
            (true, false) => {
                self.loading = false;
                self.expired = false;
                None
            }
            _ => None,
        }
    }

    /// Returns whether the timer expired the current episode. Stale timers are ignored.
    pub fn fire(&mut self, episode: u64) -> bool {
        if self.loading && episode == self.episode && !self.expired {
            self.expired = true;
            return true;
        }
        false
    }

    pub fn timed_out(&self) -> bool {
        self.expired
    }
}

fn use_failsafe_timeout(auth: ReadSignal<AuthState>) -> Signal<bool> {
    let clock = create_rw_signal(FailsafeClock::default());
    create_effect(move |_| {
        let loading = auth.with(|state| state.is_loading());
        let changed = clock.with_untracked(|c| c.loading != loading);
        if !changed {
            return;
        }
        if let Some(episode) = clock.try_update(|c| c.observe(loading)).flatten() {
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(AUTH_CHECK_TIMEOUT_MS).await;
                if clock.try_update(|c| c.fire(episode)).unwrap_or(false) {
                    log::warn!("Auth check timed out after {} ms", AUTH_CHECK_TIMEOUT_MS);
                }
            });
        }
    });
    Signal::derive(move || clock.with(|c| c.timed_out()))
}

fn follow_redirects(outcome: Memo<GuardOutcome>) {
    create_effect(move |_| {
        if let GuardOutcome::Redirect(target) = outcome.get() {
            location::redirect(&target);
        }
    });
}

fn render_outcome(outcome: Memo<GuardOutcome>, children: ChildrenFn) -> impl IntoView {
    move || match outcome.get() {
        GuardOutcome::Render => children().into_view(),
        GuardOutcome::Pending => view! { <LoadingSpinner /> }.into_view(),
        GuardOutcome::Redirect(_) => ().into_view(),
    }
}

#[component]
pub fn ProtectedRoute(
    #[prop(optional)] allowed_roles: Vec<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth, _) = use_auth();
    let origin = location::current().path_and_query();
    let timed_out = use_failsafe_timeout(auth);
    let outcome = create_memo(move |_| {
        auth.with(|state| protected_outcome(state, &allowed_roles, timed_out.get(), &origin))
    });
    follow_redirects(outcome);
    render_outcome(outcome, children)
}

#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let search = location::current().search;
    let redirect = location::query_param(&search, "redirect");
    let timed_out = use_failsafe_timeout(auth);
    let outcome = create_memo(move |_| {
        auth.with(|state| public_outcome(state, timed_out.get(), redirect.as_deref()))
    });
    follow_redirects(outcome);
    render_outcome(outcome, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthChangeEvent;
    use crate::test_support::helpers::{profile_with_role, session_for};

    fn signed_in(role: Option<Role>) -> AuthState {
        AuthState::signed_in(session_for("u1"), role.map(profile_with_role))
    }

    #[test]
    fn pending_while_loading_until_timeout() {
        let loading = AuthState::authenticating();
        assert_eq!(
            protected_outcome(&loading, &[], false, "/messages"),
            GuardOutcome::Pending
        );
        assert_eq!(
            protected_outcome(&loading, &[], true, "/messages"),
            GuardOutcome::Redirect("/login?redirect=%2Fmessages".into())
        );
    }

    #[test]
    fn loading_never_renders_protected_content() {
        let mut state = AuthState::authenticating();
        state.apply(crate::state::auth::AuthInput::InitialSession {
            result: Ok(Some(session_for("u1"))),
            recovery_flow: false,
        });
        assert!(state.is_loading());
        for roles in [vec![], vec![Role::Admin]] {
            assert_eq!(
                protected_outcome(&state, &roles, false, "/dashboard/admin"),
                GuardOutcome::Pending
            );
        }
    }

    #[test]
    fn timed_out_check_with_user_but_no_profile_resolves() {
        let mut state = AuthState::authenticating();
        state.apply(crate::state::auth::AuthInput::InitialSession {
            result: Ok(Some(session_for("u1"))),
            recovery_flow: false,
        });
        assert_eq!(
            protected_outcome(&state, &[], true, "/messages"),
            GuardOutcome::Render
        );
        assert_eq!(
            protected_outcome(&state, &[Role::Admin], true, "/dashboard/admin"),
            GuardOutcome::Redirect("/dashboard".into())
        );
    }

    #[test]
    fn admin_route_renders_for_admin_and_redirects_client() {
        assert_eq!(
            protected_outcome(&signed_in(Some(Role::Admin)), &[Role::Admin], false, "/dashboard/admin"),
            GuardOutcome::Render
        );
        assert_eq!(
            protected_outcome(&signed_in(Some(Role::Client)), &[Role::Admin], false, "/dashboard/admin"),
            GuardOutcome::Redirect("/dashboard/client".into())
        );
    }

    #[test]
    fn unauthenticated_users_go_to_login_with_origin() {
        let state = AuthState::signed_out();
        assert_eq!(
            protected_outcome(&state, &[Role::Therapist], false, "/onboarding/therapist?step=2"),
            GuardOutcome::Redirect("/login?redirect=%2Fonboarding%2Ftherapist%3Fstep%3D2".into())
        );
        assert_eq!(
            protected_outcome(&state, &[], false, "/"),
            GuardOutcome::Redirect("/login".into())
        );
    }

    #[test]
    fn public_pages_redirect_authenticated_users() {
        assert_eq!(
            public_outcome(&AuthState::signed_out(), false, None),
            GuardOutcome::Render
        );
        assert_eq!(
            public_outcome(&signed_in(Some(Role::Therapist)), false, None),
            GuardOutcome::Redirect("/dashboard/therapist".into())
        );
        assert_eq!(
            public_outcome(&signed_in(Some(Role::Client)), false, Some("/messages")),
            GuardOutcome::Redirect("/messages".into())
        );
        assert_eq!(
            public_outcome(&signed_in(Some(Role::Client)), false, Some("https://evil.example")),
            GuardOutcome::Redirect("/dashboard/client".into())
        );
    }

    #[test]
    fn hung_session_check_resolves_once_the_timer_fires() {
        let mut clock = FailsafeClock::default();
        let state = AuthState::authenticating();
        let episode = clock.observe(state.is_loading()).unwrap();
        assert_eq!(
            protected_outcome(&state, &[], clock.timed_out(), "/messages"),
            GuardOutcome::Pending
        );

        assert!(clock.fire(episode));
        assert_eq!(
            protected_outcome(&state, &[], clock.timed_out(), "/messages"),
            GuardOutcome::Redirect("/login?redirect=%2Fmessages".into())
        );
    }

    #[test]
    fn new_loading_episode_blocks_again_after_an_expired_one() {
        let mut clock = FailsafeClock::default();
        let first = clock.observe(true).unwrap();
        assert!(clock.fire(first));
        assert_eq!(clock.observe(false), None);

        let mut state = AuthState::signed_out();
        state.apply(crate::state::auth::AuthInput::AuthStateChanged {
            event: AuthChangeEvent::SignedIn,
            session: Some(session_for("u1")),
            recovery_flow: false,
        });
        assert!(state.is_loading());
        assert!(clock.observe(state.is_loading()).is_some());
        assert!(!clock.timed_out());
        assert_eq!(
            protected_outcome(&state, &[], clock.timed_out(), "/messages"),
            GuardOutcome::Pending
        );
        assert_eq!(
            public_outcome(&state, clock.timed_out(), None),
            GuardOutcome::Pending
        );
    }

    #[test]
    fn timer_from_an_earlier_episode_is_ignored() {
        let mut clock = FailsafeClock::default();
        let first = clock.observe(true).unwrap();
        clock.observe(false);
        let second = clock.observe(true).unwrap();
        assert_ne!(first, second);

        assert!(!clock.fire(first));
        assert!(!clock.timed_out());
        assert!(clock.fire(second));
        assert!(clock.timed_out());
    }

    #[test]
    fn timer_after_loading_finished_changes_nothing() {
        let mut clock = FailsafeClock::default();
        let episode = clock.observe(true).unwrap();
        clock.observe(false);
        assert!(!clock.fire(episode));
        assert!(!clock.timed_out());
        assert_eq!(clock.observe(false), None);
    }

    #[test]
    fn sanitize_redirect_rejects_foreign_targets() {
        assert_eq!(sanitize_redirect(Some("/appointments")), Some("/appointments".into()));
        assert_eq!(sanitize_redirect(Some("//evil.example")), None);
        assert_eq!(sanitize_redirect(Some("/\\evil.example")), None);
        assert_eq!(sanitize_redirect(Some("javascript:alert(1)")), None);
        assert_eq!(sanitize_redirect(Some("/login?redirect=/x")), None);
        assert_eq!(sanitize_redirect(None), None);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{profile_with_role, provide_auth_state, session_for};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn protected_route_renders_children_for_allowed_role() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::signed_in(
                session_for("u1"),
                Some(profile_with_role(Role::Admin)),
            ));
            view! {
                <ProtectedRoute allowed_roles=vec![Role::Admin]>
                    {|| view! { <div>"admin-outlet"</div> }}
                </ProtectedRoute>
            }
        });
        assert!(html.contains("admin-outlet"));
    }

    #[test]
    fn protected_route_hides_children_for_other_role() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::signed_in(
                session_for("u1"),
                Some(profile_with_role(Role::Client)),
            ));
            view! {
                <ProtectedRoute allowed_roles=vec![Role::Admin]>
                    {|| view! { <div>"admin-outlet"</div> }}
                </ProtectedRoute>
            }
        });
        assert!(!html.contains("admin-outlet"));
    }

    #[test]
    fn protected_route_shows_spinner_while_loading() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::authenticating());
            view! {
                <ProtectedRoute>
                    {|| view! { <div>"protected-content"</div> }}
                </ProtectedRoute>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn auth_guard_renders_login_for_signed_out_users() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::signed_out());
            view! {
                <AuthGuard>
                    {|| view! { <form>"login-form"</form> }}
                </AuthGuard>
            }
        });
        assert!(html.contains("login-form"));
    }
}
