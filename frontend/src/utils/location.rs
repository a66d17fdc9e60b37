//! Read access to the browser location plus full-page navigation. On non-wasm targets
//! everything is inert so that views can be rendered on the host.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSnapshot {
    pub path: String,
    pub search: String,
    pub hash: String,
}

impl LocationSnapshot {
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.path, self.search)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn current() -> LocationSnapshot {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return LocationSnapshot::default();
    };
    LocationSnapshot {
        path: location.pathname().unwrap_or_default(),
        search: location.search().unwrap_or_default(),
        hash: location.hash().unwrap_or_default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current() -> LocationSnapshot {
    LocationSnapshot::default()
}

/// Drops the fragment without adding a history entry.
#[cfg(target_arch = "wasm32")]
pub fn clear_hash() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let snapshot = current();
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&snapshot.path_and_query()),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear_hash() {}

#[cfg(target_arch = "wasm32")]
pub fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if location.pathname().ok().as_deref() == Some(path) {
            return;
        }
        let _ = location.set_href(path);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect(path: &str) {
    log::debug!("redirect to {} skipped outside the browser", path);
}

/// Value of a query parameter in a `?a=b&c=d` string.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            percent_encoding::percent_decode_str(&value.replace('+', " "))
                .decode_utf8()
                .ok()
                .map(|v| v.into_owned())
        })
        .filter(|value| !value.is_empty())
}
