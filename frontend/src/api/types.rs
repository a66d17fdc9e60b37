use chrono::{DateTime, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Therapist,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Therapist => "therapist",
            Role::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Therapist => "Therapist",
            Role::Admin => "Administrator",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (true, true) => self.email.clone(),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (false, false) => format!("{} {}", first, last),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.expires_at.map(|at| at <= now_secs).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: SignUpMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpMetadata {
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub session: Option<Session>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
    Revoked,
}

impl InvitationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "Pending",
            InvitationStatus::Accepted => "Accepted",
            InvitationStatus::Expired => "Expired",
            InvitationStatus::Revoked => "Revoked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapistInvitation {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub token: String,
    pub status: InvitationStatus,
    #[serde(default)]
    pub invited_by: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl TherapistInvitation {
    /// Pending invitations past their expiry are reported as expired even when the
    /// stored status has not been swept yet.
    pub fn effective_status(&self, now: DateTime<Utc>) -> InvitationStatus {
        if self.status == InvitationStatus::Pending && self.expires_at <= now {
            InvitationStatus::Expired
        } else {
            self.status
        }
    }

    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == InvitationStatus::Pending
    }

    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewInvitation {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub token: String,
    pub status: InvitationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_by: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvitationEmailRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub invite_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    NotStarted,
    InProgress,
    Submitted,
    Approved,
    Rejected,
}

impl OnboardingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OnboardingStatus::NotStarted => "Not started",
            OnboardingStatus::InProgress => "In progress",
            OnboardingStatus::Submitted => "Submitted for review",
            OnboardingStatus::Approved => "Approved",
            OnboardingStatus::Rejected => "Changes requested",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapistRecord {
    pub id: String,
    pub user_id: String,
    #[serde(default = "default_onboarding_status")]
    pub onboarding_status: OnboardingStatus,
    #[serde(default)]
    pub onboarding_step: Option<u8>,
    #[serde(default)]
    pub draft_data: Option<Map<String, Value>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_onboarding_status() -> OnboardingStatus {
    OnboardingStatus::NotStarted
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveDraftRequest {
    pub step: u8,
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteOnboardingRequest {
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub path: String,
    pub public_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNAUTHORIZED")
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "NOT_FOUND")
    }

    /// Normalizes the error bodies returned by the auth, data, storage and function
    /// endpoints, which disagree on where they put the message.
    pub fn from_response_body(status: u16, body: &Value) -> Self {
        let message = ["error_description", "msg", "message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        let code = body
            .get("error_code")
            .or_else(|| body.get("code"))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| match status {
                400 | 422 => "VALIDATION_ERROR".to_string(),
                401 | 403 => "UNAUTHORIZED".to_string(),
                404 => "NOT_FOUND".to_string(),
                _ => "REQUEST_FAILED".to_string(),
            });
        let details = body.get("details").filter(|d| !d.is_null()).cloned();
        Self {
            error: message,
            code,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;
    use wasm_bindgen_test::*;

    fn invitation(status: InvitationStatus, expires_in: Duration) -> TherapistInvitation {
        TherapistInvitation {
            id: "inv-1".into(),
            email: "dr@example.com".into(),
            first_name: Some("Dana".into()),
            last_name: Some("Reyes".into()),
            token: "tok".into(),
            status,
            invited_by: None,
            expires_at: Utc::now() + expires_in,
            created_at: None,
            accepted_at: None,
        }
    }

    #[wasm_bindgen_test]
    fn profile_role_deserializes_from_snake_case() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@example.com",
            "first_name": "Ada",
            "last_name": null,
            "role": "therapist"
        }))
        .unwrap();
        assert_eq!(profile.role, Role::Therapist);
        assert_eq!(profile.display_name(), "Ada");
    }

    #[test]
    fn profile_with_unknown_role_is_rejected() {
        let result = serde_json::from_value::<Profile>(json!({
            "id": "u1",
            "email": "a@example.com",
            "role": "superuser"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let profile = Profile {
            id: "u1".into(),
            email: "a@example.com".into(),
            first_name: Some("  ".into()),
            last_name: None,
            role: Role::Client,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(profile.display_name(), "a@example.com");
    }

    #[wasm_bindgen_test]
    fn session_parses_token_response() {
        let session: Session = serde_json::from_value(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "expires_at": 1700000000,
            "user": { "id": "u1", "email": "a@example.com" }
        }))
        .unwrap();
        assert_eq!(session.token_type, "bearer");
        assert!(session.is_expired_at(1700000000));
        assert!(!session.is_expired_at(1699999999));
    }

    #[wasm_bindgen_test]
    fn auth_change_event_uses_sdk_names() {
        let raw = serde_json::to_value(AuthChangeEvent::PasswordRecovery).unwrap();
        assert_eq!(raw, json!("PASSWORD_RECOVERY"));
    }

    #[test]
    fn pending_invitation_past_expiry_is_expired() {
        let now = Utc::now();
        let stale = invitation(InvitationStatus::Pending, Duration::hours(-1));
        assert_eq!(stale.effective_status(now), InvitationStatus::Expired);
        assert!(!stale.is_usable(now));

        let fresh = invitation(InvitationStatus::Pending, Duration::days(3));
        assert!(fresh.is_usable(now));

        let revoked = invitation(InvitationStatus::Revoked, Duration::days(3));
        assert_eq!(revoked.effective_status(now), InvitationStatus::Revoked);
        assert!(!revoked.is_usable(now));
    }

    #[test]
    fn api_error_from_auth_body_prefers_description() {
        let err = ApiError::from_response_body(
            400,
            &json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }),
        );
        assert_eq!(err.error, "Invalid login credentials");
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[test]
    fn api_error_from_postgrest_body_keeps_code_and_details() {
        let err = ApiError::from_response_body(
            409,
            &json!({ "message": "duplicate key", "code": "23505", "details": "Key (email) exists" }),
        );
        assert_eq!(err.error, "duplicate key");
        assert_eq!(err.code, "23505");
        assert_eq!(err.details, Some(json!("Key (email) exists")));
    }

    #[test]
    fn api_error_without_message_uses_status() {
        let err = ApiError::from_response_body(404, &Value::Null);
        assert_eq!(err.error, "Request failed with status 404");
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }
}
