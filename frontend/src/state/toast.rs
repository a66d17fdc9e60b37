use leptos::*;

pub const TOAST_DISMISS_MS: u32 = 5_000;
const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastStack {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastStack {
    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        description: Option<String>,
    ) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            kind,
            title: title.into(),
            description,
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Handle to the global toast stack. Copyable so handlers can capture it freely.
#[derive(Clone, Copy)]
pub struct Toasts {
    stack: RwSignal<ToastStack>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            stack: create_rw_signal(ToastStack::default()),
        }
    }

    pub fn items(&self) -> Vec<Toast> {
        self.stack.with(|stack| stack.items().to_vec())
    }

    pub fn success(&self, title: impl Into<String>) -> u64 {
        self.show(ToastKind::Success, title, None)
    }

    pub fn info(&self, title: impl Into<String>) -> u64 {
        self.show(ToastKind::Info, title, None)
    }

    pub fn warning(&self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.show(ToastKind::Warning, title, Some(description.into()))
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.show(ToastKind::Error, title, Some(description.into()))
    }

    pub fn show(
        &self,
        kind: ToastKind,
        title: impl Into<String>,
        description: Option<String>,
    ) -> u64 {
        let mut id = 0;
        self.stack
            .update(|stack| id = stack.push(kind, title, description));
        self.schedule_dismiss(id);
        id
    }

    pub fn dismiss(&self, id: u64) {
        let _ = self.stack.try_update(|stack| stack.dismiss(id));
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let toasts = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DISMISS_MS).await;
            toasts.dismiss(id);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().unwrap_or_default()
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn toasts_handle_is_shared_through_context() {
        with_runtime(|| {
            let provided = provide_toasts();
            let used = use_toasts();
            used.warning("Invitation created", "Email could not be sent");
            let items = provided.items();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].kind, ToastKind::Warning);
            assert_eq!(items[0].description.as_deref(), Some("Email could not be sent"));
            provided.dismiss(items[0].id);
            assert!(used.items().is_empty());
        });
    }
}
