use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
const DEFAULT_SITE_URL: &str = "http://localhost:8080";

/// Shape of `config.json` and of `window.__MINDHAVEN_ENV`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "SUPABASE_URL")]
    pub supabase_url: Option<String>,
    #[serde(default, alias = "SUPABASE_ANON_KEY")]
    pub supabase_anon_key: Option<String>,
    #[serde(default, alias = "SITE_URL")]
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub supabase_url: String,
    pub anon_key: String,
    pub site_url: String,
}

impl ClientConfig {
    pub fn new(
        supabase_url: impl Into<String>,
        anon_key: impl Into<String>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            supabase_url: trim_trailing_slash(supabase_url.into()),
            anon_key: anon_key.into(),
            site_url: trim_trailing_slash(site_url.into()),
        }
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.supabase_url, path)
    }

    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1{}", self.supabase_url, path)
    }

    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1{}", self.supabase_url, path)
    }

    pub fn functions_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.supabase_url, name)
    }

    pub fn site_link(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }
}

fn trim_trailing_slash(value: String) -> String {
    value.trim_end_matches('/').to_string()
}

static CLIENT_CONFIG: OnceLock<ClientConfig> = OnceLock::new();

fn merge(primary: RuntimeConfig, fallback: RuntimeConfig) -> RuntimeConfig {
    RuntimeConfig {
        supabase_url: primary.supabase_url.or(fallback.supabase_url),
        supabase_anon_key: primary.supabase_anon_key.or(fallback.supabase_anon_key),
        site_url: primary.site_url.or(fallback.site_url),
    }
}

fn resolve(cfg: RuntimeConfig, origin: Option<String>) -> ClientConfig {
    let supabase_url = cfg
        .supabase_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let anon_key = cfg.supabase_anon_key.unwrap_or_default();
    if anon_key.is_empty() {
        log::warn!("No anon key configured; backend requests will be rejected");
    }
    let site_url = cfg
        .site_url
        .filter(|url| !url.trim().is_empty())
        .or(origin)
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
    ClientConfig::new(supabase_url, anon_key, site_url)
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    // Optional global written by env.js: window.__MINDHAVEN_ENV = { SUPABASE_URL: "..." }
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &"__MINDHAVEN_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let read = |upper: &str, lower: &str| {
        js_sys::Reflect::get(&any, &upper.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(&any, &lower.into()).ok())
            .and_then(|v| v.as_string())
    };
    Some(RuntimeConfig {
        supabase_url: read("SUPABASE_URL", "supabase_url"),
        supabase_anon_key: read("SUPABASE_ANON_KEY", "supabase_anon_key"),
        site_url: read("SITE_URL", "site_url"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let url = format!("{}/config.json", window_origin()?);
    let resp = reqwest::get(&url).await.ok()?;
    if !resp.status().is_success() {
        log::warn!("config.json returned {}", resp.status());
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn window_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn window_origin() -> Option<String> {
    None
}

pub async fn await_client_config() -> ClientConfig {
    if let Some(cached) = CLIENT_CONFIG.get() {
        return cached.clone();
    }
    let from_globals = snapshot_from_globals().unwrap_or_default();
    let needs_fetch = from_globals.supabase_url.is_none() || from_globals.supabase_anon_key.is_none();
    let merged = if needs_fetch {
        match fetch_runtime_config().await {
            Some(file) => merge(from_globals, file),
            None => from_globals,
        }
    } else {
        from_globals
    };
    let resolved = resolve(merged, window_origin());
    CLIENT_CONFIG.get_or_init(|| resolved).clone()
}

pub async fn init() {
    let cfg = await_client_config().await;
    log::info!("Backend configured at {}", cfg.supabase_url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_builds_service_urls() {
        let cfg = ClientConfig::new("https://proj.example.co/", "anon", "https://app.example.com/");
        assert_eq!(cfg.auth_url("/token"), "https://proj.example.co/auth/v1/token");
        assert_eq!(
            cfg.rest_url("/rpc/save_therapist_draft"),
            "https://proj.example.co/rest/v1/rpc/save_therapist_draft"
        );
        assert_eq!(
            cfg.functions_url("send-therapist-invitation"),
            "https://proj.example.co/functions/v1/send-therapist-invitation"
        );
        assert_eq!(cfg.site_link("/signup"), "https://app.example.com/signup");
    }

    #[test]
    fn globals_take_precedence_over_config_file() {
        let merged = merge(
            RuntimeConfig {
                supabase_url: Some("https://env".into()),
                supabase_anon_key: None,
                site_url: None,
            },
            RuntimeConfig {
                supabase_url: Some("https://file".into()),
                supabase_anon_key: Some("file-key".into()),
                site_url: Some("https://site".into()),
            },
        );
        assert_eq!(merged.supabase_url.as_deref(), Some("https://env"));
        assert_eq!(merged.supabase_anon_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn resolve_applies_defaults() {
        let cfg = resolve(RuntimeConfig::default(), None);
        assert_eq!(cfg.supabase_url, DEFAULT_BACKEND_URL);
        assert_eq!(cfg.site_url, DEFAULT_SITE_URL);

        let with_origin = resolve(RuntimeConfig::default(), Some("https://origin".into()));
        assert_eq!(with_origin.site_url, "https://origin");
    }

    #[test]
    fn runtime_config_accepts_upper_case_keys() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{"SUPABASE_URL":"https://x","SUPABASE_ANON_KEY":"k"}"#,
        )
        .unwrap();
        assert_eq!(cfg.supabase_url.as_deref(), Some("https://x"));
        assert_eq!(cfg.supabase_anon_key.as_deref(), Some("k"));
    }
}
