//! Session reconciliation. Three asynchronous sources feed this reducer: the initial
//! get-session call, pushed auth state changes and profile fetches keyed by user id.
//! All of them converge on `AuthState::apply`, which returns the follow-up work the
//! driver has to perform.

use crate::api::{ApiError, AuthChangeEvent, Profile, Role, Session, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Unknown,
    Authenticating,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone)]
pub enum AuthInput {
    InitialSession {
        result: Result<Option<Session>, ApiError>,
        recovery_flow: bool,
    },
    AuthStateChanged {
        event: AuthChangeEvent,
        session: Option<Session>,
        recovery_flow: bool,
    },
    ProfileLoaded {
        user_id: String,
        result: Result<Option<Profile>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// `deferred` fetches must run on a zero-delay timer, outside the callback that
    /// delivered the auth event.
    FetchProfile { user_id: String, deferred: bool },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    phase: AuthPhase,
    user: Option<User>,
    session: Option<Session>,
    profile: Option<Profile>,
    profile_pending_for: Option<String>,
}

impl AuthState {
    /// State while the initial session check is running.
    pub fn authenticating() -> Self {
        Self {
            phase: AuthPhase::Authenticating,
            ..Self::default()
        }
    }

    pub fn signed_in(session: Session, profile: Option<Profile>) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            user: Some(session.user.clone()),
            session: Some(session),
            profile,
            profile_pending_for: None,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            phase: AuthPhase::Unauthenticated,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, AuthPhase::Unknown | AuthPhase::Authenticating)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn dashboard_route(&self) -> &'static str {
        dashboard_route(self.profile.as_ref())
    }

    pub fn begin(&mut self) {
        if self.phase == AuthPhase::Unknown {
            self.phase = AuthPhase::Authenticating;
        }
    }

    pub fn apply(&mut self, input: AuthInput) -> Option<AuthCommand> {
        match input {
            AuthInput::InitialSession {
                result,
                recovery_flow,
            } => {
                let session = match result {
                    Ok(session) if !recovery_flow => session,
                    Ok(_) => None,
                    Err(err) => {
                        log::error!("Error getting session: {}", err);
                        None
                    }
                };
                match session {
                    Some(session) => self.adopt(session, false),
                    None => {
                        self.clear();
                        None
                    }
                }
            }
            AuthInput::AuthStateChanged {
                event,
                session,
                recovery_flow,
            } => {
                if recovery_flow {
                    log::info!("Ignoring {:?} during password recovery", event);
                    return None;
                }
                match (event, session) {
                    (AuthChangeEvent::SignedOut, _) | (_, None) => {
                        self.clear();
                        None
                    }
                    (_, Some(session)) => self.adopt(session, true),
                }
            }
            AuthInput::ProfileLoaded { user_id, result } => {
                let current = self.user.as_ref().map(|u| u.id.as_str());
                if current != Some(user_id.as_str()) {
                    log::debug!("Dropping stale profile for {}", user_id);
                    return None;
                }
                self.profile = match result {
                    Ok(profile) => profile,
                    Err(err) => {
                        log::error!("Error fetching profile: {}", err);
                        None
                    }
                };
                if self.profile_pending_for.as_deref() == Some(user_id.as_str()) {
                    self.profile_pending_for = None;
                }
                self.phase = AuthPhase::Authenticated;
                None
            }
        }
    }

    fn adopt(&mut self, session: Session, deferred: bool) -> Option<AuthCommand> {
        let user_id = session.user.id.clone();
        let same_user = self.user.as_ref().map(|u| u.id == user_id).unwrap_or(false);
        self.user = Some(session.user.clone());
        self.session = Some(session);

        if !same_user {
            self.profile = None;
        }
        let profile_ready = same_user && self.profile.is_some();
        self.phase = if profile_ready {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Authenticating
        };

        if self.profile_pending_for.as_deref() == Some(user_id.as_str()) {
            return None;
        }
        self.profile_pending_for = Some(user_id.clone());
        Some(AuthCommand::FetchProfile { user_id, deferred })
    }

    fn clear(&mut self) {
        self.user = None;
        self.session = None;
        self.profile = None;
        self.profile_pending_for = None;
        self.phase = AuthPhase::Unauthenticated;
    }
}

pub fn dashboard_route(profile: Option<&Profile>) -> &'static str {
    match profile.map(|p| p.role) {
        Some(Role::Client) => "/dashboard/client",
        Some(Role::Therapist) => "/dashboard/therapist",
        Some(Role::Admin) => "/dashboard/admin",
        None => "/dashboard",
    }
}
