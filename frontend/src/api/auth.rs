use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};

use super::{
    client::ApiClient,
    types::{
        ApiError, AuthChangeEvent, Session, SignInRequest, SignUpMetadata, SignUpRequest,
        SignUpResponse, User,
    },
    url_session::{parse_auth_fragment, RedirectKind, UrlAuthFragment},
};
use crate::utils::location::{self, LocationSnapshot};

impl ApiClient {
    /// Returns the current session, restoring it on first use from the redirect
    /// fragment or from storage. An expired stored session is refreshed once.
    pub async fn get_session(&self) -> Result<Option<Session>, ApiError> {
        if !self.mark_initialized() {
            self.initialize(&location::current()).await?;
        }
        Ok(self.current_session())
    }

    pub(crate) async fn initialize(&self, location: &LocationSnapshot) -> Result<(), ApiError> {
        match parse_auth_fragment(&location.hash) {
            Some(UrlAuthFragment::Session { session, kind }) => {
                log::info!("Session detected in URL ({:?})", kind);
                self.set_session(Some(session));
                if kind == RedirectKind::Recovery {
                    self.emit(AuthChangeEvent::PasswordRecovery);
                } else {
                    location::clear_hash();
                    self.emit(AuthChangeEvent::SignedIn);
                }
                return Ok(());
            }
            Some(UrlAuthFragment::Error { code, description }) => {
                log::warn!("Auth redirect error {}: {}", code, description);
            }
            None => {}
        }

        let stored = match self.store().load() {
            Ok(stored) => stored,
            Err(err) => {
                log::warn!("Discarding stored session: {}", err);
                None
            }
        };
        let Some(stored) = stored else {
            self.emit(AuthChangeEvent::InitialSession);
            return Ok(());
        };

        if stored.is_expired_at(Utc::now().timestamp()) {
            match self.refresh_session(&stored.refresh_token).await {
                Ok(refreshed) => {
                    self.set_session(Some(refreshed));
                    self.emit(AuthChangeEvent::TokenRefreshed);
                }
                Err(err) => {
                    log::warn!("Stored session could not be refreshed: {}", err);
                    self.set_session(None);
                    self.emit(AuthChangeEvent::InitialSession);
                }
            }
        } else {
            self.restore_session(stored);
            self.emit(AuthChangeEvent::InitialSession);
        }
        Ok(())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ApiError> {
        if refresh_token.is_empty() {
            return Err(ApiError::unauthorized("No refresh token"));
        }
        let config = self.resolved_config().await;
        let builder = self
            .request(
                &config,
                Method::POST,
                &config.auth_url("/token?grant_type=refresh_token"),
            )
            .json(&json!({ "refresh_token": refresh_token }));
        let session: Session = self.send_json(builder).await?;
        Ok(with_expiry(session))
    }

    pub async fn sign_in_with_password(&self, request: SignInRequest) -> Result<Session, ApiError> {
        let config = self.resolved_config().await;
        let builder = self
            .request(
                &config,
                Method::POST,
                &config.auth_url("/token?grant_type=password"),
            )
            .json(&request);
        let session = with_expiry(self.send_json::<Session>(builder).await?);
        self.set_session(Some(session.clone()));
        self.emit(AuthChangeEvent::SignedIn);
        Ok(session)
    }

    /// The backend answers with a session when email confirmation is disabled and
    /// with the bare user otherwise.
    pub async fn sign_up(
        &self,
        email: String,
        password: String,
        metadata: SignUpMetadata,
    ) -> Result<SignUpResponse, ApiError> {
        let config = self.resolved_config().await;
        let request = SignUpRequest {
            email,
            password,
            data: metadata,
        };
        let builder = self
            .request(&config, Method::POST, &config.auth_url("/signup"))
            .json(&request);
        let body: Value = self.send_json(builder).await?;
        let response = parse_sign_up_body(body)?;
        if let Some(session) = &response.session {
            self.set_session(Some(session.clone()));
            self.emit(AuthChangeEvent::SignedIn);
        }
        Ok(response)
    }

    /// Local state is cleared even when the backend call fails.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let result = if self.current_session().is_some() {
            let config = self.resolved_config().await;
            let builder = self.request(&config, Method::POST, &config.auth_url("/logout"));
            self.send_empty(builder).await
        } else {
            Ok(())
        };
        self.set_session(None);
        self.emit(AuthChangeEvent::SignedOut);
        result
    }

    pub async fn get_user(&self) -> Result<User, ApiError> {
        if self.current_session().is_none() {
            return Err(ApiError::unauthorized("Not signed in"));
        }
        let config = self.resolved_config().await;
        let builder = self.request(&config, Method::GET, &config.auth_url("/user"));
        self.send_json(builder).await
    }

    pub async fn update_password(&self, password: String) -> Result<User, ApiError> {
        let Some(mut session) = self.current_session() else {
            return Err(ApiError::unauthorized("Auth session missing"));
        };
        let config = self.resolved_config().await;
        let builder = self
            .request(&config, Method::PUT, &config.auth_url("/user"))
            .json(&json!({ "password": password }));
        let user: User = self.send_json(builder).await?;
        session.user = user.clone();
        self.set_session(Some(session));
        self.emit(AuthChangeEvent::UserUpdated);
        Ok(user)
    }

    pub async fn verify_recovery_token(&self, token_hash: String) -> Result<Session, ApiError> {
        let config = self.resolved_config().await;
        let builder = self
            .request(&config, Method::POST, &config.auth_url("/verify"))
            .json(&json!({ "type": "recovery", "token_hash": token_hash }));
        let session = with_expiry(self.send_json::<Session>(builder).await?);
        self.set_session(Some(session.clone()));
        self.emit(AuthChangeEvent::PasswordRecovery);
        Ok(session)
    }

    pub async fn reset_password_for_email(&self, email: String) -> Result<(), ApiError> {
        let config = self.resolved_config().await;
        let redirect_to = config.site_link("/reset-password");
        let url = format!(
            "{}?redirect_to={}",
            config.auth_url("/recover"),
            percent_encoding::utf8_percent_encode(&redirect_to, percent_encoding::NON_ALPHANUMERIC)
        );
        let builder = self
            .request(&config, Method::POST, &url)
            .json(&json!({ "email": email }));
        self.send_empty(builder).await
    }
}

fn with_expiry(mut session: Session) -> Session {
    if session.expires_at.is_none() && session.expires_in > 0 {
        session.expires_at = Some(Utc::now().timestamp() + session.expires_in);
    }
    session
}

fn parse_sign_up_body(body: Value) -> Result<SignUpResponse, ApiError> {
    if body.get("access_token").is_some() {
        let session: Session = serde_json::from_value(body)
            .map_err(|e| ApiError::unknown(format!("Failed to parse session: {}", e)))?;
        let session = with_expiry(session);
        return Ok(SignUpResponse {
            user: Some(session.user.clone()),
            session: Some(session),
        });
    }
    if body.get("user").is_some() || body.get("session").is_some() {
        return serde_json::from_value(body)
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)));
    }
    let user: User = serde_json::from_value(body)
        .map_err(|e| ApiError::unknown(format!("Failed to parse user: {}", e)))?;
    Ok(SignUpResponse {
        user: Some(user),
        session: None,
    })
}
