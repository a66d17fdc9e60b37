use crate::{
    api::{ApiClient, ApiError, SignInRequest, SignUpMetadata, Subscription},
    utils::location,
};
use leptos::*;

pub mod machine;
pub mod recovery;

pub use machine::{dashboard_route, AuthCommand, AuthInput, AuthPhase, AuthState};
pub use recovery::is_recovery_location;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub metadata: SignUpMetadata,
}

fn dispatch(api: &ApiClient, set_state: WriteSignal<AuthState>, input: AuthInput) {
    let mut command = None;
    set_state.update(|state| command = state.apply(input));
    if let Some(command) = command {
        run_command(api.clone(), set_state, command);
    }
}

fn run_command(api: ApiClient, set_state: WriteSignal<AuthState>, command: AuthCommand) {
    match command {
        AuthCommand::FetchProfile { user_id, deferred } => spawn_local(async move {
            if deferred {
                yield_to_event_loop().await;
            }
            let result = api.get_profile(&user_id).await;
            dispatch(&api, set_state, AuthInput::ProfileLoaded { user_id, result });
        }),
    }
}

#[cfg(target_arch = "wasm32")]
async fn yield_to_event_loop() {
    gloo_timers::future::TimeoutFuture::new(0).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn yield_to_event_loop() {}

/// Feeds pushed auth events into the state. The recovery check runs per event because
/// the location can change while the app is open.
pub fn subscribe_to_auth_events(api: &ApiClient, set_state: WriteSignal<AuthState>) -> Subscription {
    let listener_api = api.clone();
    api.on_auth_state_change(move |event, session| {
        let recovery_flow = is_recovery_location(&location::current());
        dispatch(
            &listener_api,
            set_state,
            AuthInput::AuthStateChanged {
                event,
                session,
                recovery_flow,
            },
        );
    })
}

pub async fn load_initial_session(api: &ApiClient, set_state: WriteSignal<AuthState>) {
    set_state.update(AuthState::begin);
    let result = api.get_session().await;
    let recovery_flow = is_recovery_location(&location::current());
    dispatch(
        api,
        set_state,
        AuthInput::InitialSession {
            result,
            recovery_flow,
        },
    );
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (state, set_state) = create_signal(AuthState::authenticating());
    provide_context::<AuthContext>((state, set_state));

    let subscription = subscribe_to_auth_events(&api, set_state);
    on_cleanup(move || drop(subscription));

    create_effect(move |started: Option<()>| {
        if started.is_some() {
            return;
        }
        let api = api.clone();
        spawn_local(async move { load_initial_session(&api, set_state).await });
    });

    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

fn api_from_context() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

pub fn use_sign_in_action() -> Action<SignInRequest, Result<(), ApiError>> {
    let api = api_from_context();
    create_action(move |request: &SignInRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { api.sign_in_with_password(request).await.map(|_| ()) }
    })
}

pub fn use_sign_out_action() -> Action<(), Result<(), ApiError>> {
    let api = api_from_context();
    create_action(move |_: &()| {
        let api = api.clone();
        async move {
            let result = api.sign_out().await;
            if let Err(err) = &result {
                log::warn!("Sign-out request failed: {}", err);
            }
            result
        }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{session_store::MemorySessionStore, Role};
    use crate::config::ClientConfig;
    use crate::test_support::ssr::with_local_runtime_async;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    async fn wait_until(mut check: impl FnMut() -> bool) {
        for _ in 0..100 {
            if check() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn sign_in_and_sign_out_flow_through_auth_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/token");
                then.status(200).json_body(json!({
                    "access_token": "at",
                    "refresh_token": "rt",
                    "expires_in": 3600,
                    "user": { "id": "u1", "email": "admin@example.com" }
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/profiles")
                    .query_param("id", "eq.u1");
                then.status(200).json_body(json!([{
                    "id": "u1",
                    "email": "admin@example.com",
                    "first_name": "Ada",
                    "last_name": "Admin",
                    "role": "admin"
                }]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/logout");
                then.status(204);
            })
            .await;

        with_local_runtime_async(|| async move {
            let api = ApiClient::new_with_store(
                ClientConfig::new(server.base_url(), "anon", "http://site"),
                Box::new(MemorySessionStore::default()),
            );
            let (state, set_state) = create_signal(AuthState::signed_out());
            let subscription = subscribe_to_auth_events(&api, set_state);

            api.sign_in_with_password(SignInRequest {
                email: "admin@example.com".into(),
                password: "secret-pass".into(),
            })
            .await
            .unwrap();
            assert!(state.get_untracked().is_authenticated());

            wait_until(|| state.get_untracked().profile().is_some()).await;
            let snapshot = state.get_untracked();
            assert_eq!(snapshot.role(), Some(Role::Admin));
            assert!(!snapshot.is_loading());
            assert_eq!(snapshot.dashboard_route(), "/dashboard/admin");

            api.sign_out().await.unwrap();
            let snapshot = state.get_untracked();
            assert!(snapshot.user().is_none());
            assert!(snapshot.profile().is_none());
            assert!(snapshot.session().is_none());

            drop(subscription);
        })
        .await;
    }

    #[tokio::test]
    async fn initial_session_without_stored_session_finishes_loading() {
        let server = MockServer::start_async().await;
        with_local_runtime_async(|| async move {
            let api = ApiClient::new_with_store(
                ClientConfig::new(server.base_url(), "anon", "http://site"),
                Box::new(MemorySessionStore::default()),
            );
            let (state, set_state) = create_signal(AuthState::default());
            let _subscription = subscribe_to_auth_events(&api, set_state);

            load_initial_session(&api, set_state).await;

            let snapshot = state.get_untracked();
            assert!(!snapshot.is_loading());
            assert!(!snapshot.is_authenticated());
        })
        .await;
    }
}
