use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{
    events::{AuthEventBus, Subscription},
    session_store::{default_store, SessionStore},
    types::{ApiError, AuthChangeEvent, Session},
};
use crate::config::{self, ClientConfig};

/// Client for the hosted backend. Clones share the session, the session store and the
/// auth event bus.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

struct Inner {
    http: Client,
    config: Option<ClientConfig>,
    store: Box<dyn SessionStore>,
    session: RefCell<Option<Session>>,
    initialized: Cell<bool>,
    events: AuthEventBus,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::build(None, default_store())
    }

    pub fn new_with_store(config: ClientConfig, store: Box<dyn SessionStore>) -> Self {
        Self::build(Some(config), store)
    }

    fn build(config: Option<ClientConfig>, store: Box<dyn SessionStore>) -> Self {
        Self {
            inner: Rc::new(Inner {
                http: Client::new(),
                config,
                store,
                session: RefCell::new(None),
                initialized: Cell::new(false),
                events: AuthEventBus::default(),
            }),
        }
    }

    pub(crate) async fn resolved_config(&self) -> ClientConfig {
        match &self.inner.config {
            Some(config) => config.clone(),
            None => config::await_client_config().await,
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.inner.http
    }

    pub(crate) fn store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }

    pub(crate) fn mark_initialized(&self) -> bool {
        self.inner.initialized.replace(true)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.inner.session.borrow().clone()
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        let persisted = match &session {
            Some(session) => self.store().save(session),
            None => self.store().clear(),
        };
        if let Err(err) = persisted {
            log::warn!("Failed to persist session: {}", err);
        }
        *self.inner.session.borrow_mut() = session;
    }

    /// Adopts a session that is already persisted.
    pub(crate) fn restore_session(&self, session: Session) {
        *self.inner.session.borrow_mut() = Some(session);
    }

    pub(crate) fn emit(&self, event: AuthChangeEvent) {
        let session = self.current_session();
        self.inner.events.emit(event, session.as_ref());
    }

    /// Registers a listener for auth state changes. Dropping the returned handle
    /// unsubscribes it.
    pub fn on_auth_state_change(
        &self,
        listener: impl Fn(AuthChangeEvent, Option<Session>) + 'static,
    ) -> Subscription {
        self.inner.events.subscribe(listener)
    }

    fn bearer(&self, config: &ClientConfig) -> String {
        let token = self
            .current_session()
            .map(|s| s.access_token)
            .unwrap_or_else(|| config.anon_key.clone());
        format!("Bearer {}", token)
    }

    /// Starts a request carrying the anon key and the current access token.
    pub(crate) fn request(&self, config: &ClientConfig, method: Method, url: &str) -> RequestBuilder {
        self.http_client()
            .request(method, url)
            .header("apikey", config.anon_key.as_str())
            .header(header::AUTHORIZATION, self.bearer(config))
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            log::error!("Request failed: {}", e);
            ApiError::request_failed(format!("Request failed: {}", e))
        })?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder).await.map(|_| ())
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        let error = ApiError::from_response_body(status, &body);
        log::warn!("Backend returned {}: {}", status, error);
        error
    }
}

/// PostgREST equality filter with the value percent-encoded.
pub(crate) fn filter_eq(value: &str) -> String {
    format!(
        "eq.{}",
        percent_encoding::utf8_percent_encode(value, percent_encoding::NON_ALPHANUMERIC)
    )
}
