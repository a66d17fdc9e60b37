#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{ApiClient, Profile, Role, Session, User};
    use crate::config::ClientConfig;
    use crate::state::auth::{AuthContext, AuthState};
    use leptos::*;
    use serde_json::Value;

    pub fn profile_with_role(role: Role) -> Profile {
        Profile {
            id: "u1".into(),
            email: format!("{}@example.com", role.as_str()),
            first_name: Some("Test".into()),
            last_name: Some(role.label().into()),
            role,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn session_for(user_id: &str) -> Session {
        Session {
            access_token: format!("access-{}", user_id),
            refresh_token: format!("refresh-{}", user_id),
            token_type: "bearer".into(),
            expires_in: 3600,
            expires_at: None,
            user: User {
                id: user_id.into(),
                email: Some(format!("{}@example.com", user_id)),
                user_metadata: Value::Null,
            },
        }
    }

    pub fn provide_auth_state(state: AuthState) -> AuthContext {
        let context: AuthContext = create_signal(state);
        provide_context(context);
        context
    }

    /// Client pointed at a mock server, with an in-memory session store.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn client_for(base_url: &str) -> ApiClient {
        ApiClient::new_with_store(
            ClientConfig::new(base_url, "anon-key", "http://localhost:3000"),
            Box::new(crate::api::session_store::MemorySessionStore::default()),
        )
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn signed_in_client(base_url: &str, user_id: &str) -> ApiClient {
        let client = client_for(base_url);
        client.restore_session(session_for(user_id));
        client
    }
}
