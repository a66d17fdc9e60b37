use leptos::*;
use std::future::Future;

/// Resource fetches are suppressed; tests drive repositories directly.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    leptos_reactive::suppress_resource_load(true);
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    leptos_reactive::suppress_resource_load(false);
    result
}

/// Runs `f` inside a reactive runtime on a tokio `LocalSet`, so that code calling
/// `spawn_local` (profile fetches, actions) can make progress.
pub async fn with_local_runtime_async<F, Fut, T>(f: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let runtime = leptos::create_runtime();
            let result = f().await;
            runtime.dispose();
            result
        })
        .await
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    with_runtime(|| view().into_view().render_to_string().to_string())
}
