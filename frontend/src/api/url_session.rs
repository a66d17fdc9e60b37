//! Parsing of the auth redirect fragment (`#access_token=...&type=recovery`) the backend
//! appends to email links.

use super::types::{Session, User};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Recovery,
    Signup,
    Invite,
    MagicLink,
    Other,
}

impl RedirectKind {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("recovery") => RedirectKind::Recovery,
            Some("signup") => RedirectKind::Signup,
            Some("invite") => RedirectKind::Invite,
            Some("magiclink") => RedirectKind::MagicLink,
            _ => RedirectKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UrlAuthFragment {
    Session { session: Session, kind: RedirectKind },
    Error { code: String, description: String },
}

pub fn parse_fragment_params(hash: &str) -> HashMap<String, String> {
    hash.trim_start_matches('#')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = value.replace('+', " ");
            let decoded = percent_decode_str(&value).decode_utf8().ok()?;
            Some((key.to_string(), decoded.into_owned()))
        })
        .collect()
}

/// Returns `None` when the fragment carries no auth payload at all.
pub fn parse_auth_fragment(hash: &str) -> Option<UrlAuthFragment> {
    let params = parse_fragment_params(hash);
    if let Some(code) = params.get("error_code").or_else(|| params.get("error")) {
        let description = params
            .get("error_description")
            .cloned()
            .unwrap_or_else(|| "The link is invalid or has expired".to_string());
        return Some(UrlAuthFragment::Error {
            code: code.clone(),
            description,
        });
    }
    let access_token = params.get("access_token")?.clone();
    let claims = decode_claims(&access_token)?;
    let user = user_from_claims(&claims)?;
    let expires_in = params
        .get("expires_in")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0);
    let expires_at = params
        .get("expires_at")
        .and_then(|v| v.parse::<i64>().ok())
        .or_else(|| claims.get("exp").and_then(Value::as_i64));
    let session = Session {
        access_token,
        refresh_token: params.get("refresh_token").cloned().unwrap_or_default(),
        token_type: params
            .get("token_type")
            .cloned()
            .unwrap_or_else(|| "bearer".to_string()),
        expires_in,
        expires_at,
        user,
    };
    Some(UrlAuthFragment::Session {
        session,
        kind: RedirectKind::parse(params.get("type").map(String::as_str)),
    })
}

pub fn decode_claims(token: &str) -> Option<Value> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn user_from_claims(claims: &Value) -> Option<User> {
    let id = claims.get("sub")?.as_str()?.to_string();
    Some(User {
        id,
        email: claims
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_string),
        user_metadata: claims.get("user_metadata").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
pub(crate) fn fake_jwt(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{}.{}.signature", header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recovery_fragment_yields_session_with_claims_user() {
        let token = fake_jwt(&json!({ "sub": "u1", "email": "a@example.com", "exp": 1700000500 }));
        let hash = format!(
            "#access_token={}&expires_in=3600&refresh_token=rt&token_type=bearer&type=recovery",
            token
        );
        match parse_auth_fragment(&hash) {
            Some(UrlAuthFragment::Session { session, kind }) => {
                assert_eq!(kind, RedirectKind::Recovery);
                assert_eq!(session.user.id, "u1");
                assert_eq!(session.user.email.as_deref(), Some("a@example.com"));
                assert_eq!(session.refresh_token, "rt");
                assert_eq!(session.expires_at, Some(1700000500));
            }
            other => panic!("unexpected fragment: {:?}", other),
        }
    }

    #[test]
    fn error_fragment_is_decoded() {
        let hash = "#error=access_denied&error_code=otp_expired&error_description=Email+link+is+invalid+or+has+expired";
        assert_eq!(
            parse_auth_fragment(hash),
            Some(UrlAuthFragment::Error {
                code: "otp_expired".into(),
                description: "Email link is invalid or has expired".into(),
            })
        );
    }

    #[test]
    fn unrelated_fragment_is_ignored() {
        assert_eq!(parse_auth_fragment("#pricing"), None);
        assert_eq!(parse_auth_fragment(""), None);
    }

    #[test]
    fn malformed_token_is_ignored() {
        assert_eq!(parse_auth_fragment("#access_token=not-a-jwt&type=recovery"), None);
    }
}
