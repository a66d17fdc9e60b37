use wasm_bindgen::prelude::wasm_bindgen;

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

fn init_logging() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger was already initialized".into());
    }
}

/// Entry point: logging, runtime config, then the app.
#[wasm_bindgen]
pub fn boot() {
    init_logging();
    log::info!("Starting MindHaven frontend");

    // window.__MINDHAVEN_ENV (env.js) takes precedence over ./config.json.
    leptos::spawn_local(async move {
        config::init().await;
        log::debug!("Runtime config initialized");
    });

    router::mount_app();
}
