use crate::state::toast::{use_toasts, Toast, ToastKind};
use leptos::*;

fn kind_classes(kind: ToastKind) -> (&'static str, &'static str) {
    match kind {
        ToastKind::Success => (
            "bg-status-success-bg border-status-success-border text-status-success-text",
            "fa-check-circle",
        ),
        ToastKind::Info => (
            "bg-status-info-bg border-status-info-border text-status-info-text",
            "fa-info-circle",
        ),
        ToastKind::Warning => (
            "bg-status-warning-bg border-status-warning-border text-status-warning-text",
            "fa-exclamation-triangle",
        ),
        ToastKind::Error => (
            "bg-status-error-bg border-status-error-border text-status-error-text",
            "fa-exclamation-circle",
        ),
    }
}

#[component]
fn ToastItem(toast: Toast, on_dismiss: Callback<u64>) -> impl IntoView {
    let (classes, icon) = kind_classes(toast.kind);
    let id = toast.id;
    view! {
        <div
            role="status"
            class=format!("pointer-events-auto w-80 border rounded-lg shadow-lg px-4 py-3 flex gap-3 {}", classes)
        >
            <i class=format!("fas {} mt-0.5", icon)></i>
            <div class="flex-1">
                <p class="text-sm font-semibold">{toast.title}</p>
                {toast.description.map(|d| view! { <p class="text-sm mt-1">{d}</p> })}
            </div>
            <button
                type="button"
                aria-label="Dismiss"
                class="opacity-70 hover:opacity-100"
                on:click=move |_| on_dismiss.call(id)
            >
                {"✕"}
            </button>
        </div>
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();
    let on_dismiss = Callback::new(move |id: u64| toasts.dismiss(id));
    view! {
        <div aria-live="polite" class="pointer-events-none fixed bottom-4 right-4 z-[80] flex flex-col gap-2">
            <For
                each=move || toasts.items()
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast on_dismiss=on_dismiss /> }
            />
        </div>
    }
}
