use crate::components::layout::PublicLayout;
use leptos::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <div class="max-w-xl mx-auto px-4 py-24 text-center space-y-4">
                <p class="text-5xl font-extrabold text-fg">"404"</p>
                <h1 class="text-2xl font-semibold text-fg">"Page not found"</h1>
                <p class="text-fg-muted">"The page you are looking for does not exist or has moved."</p>
                <a href="/" class="text-action-primary-bg hover:underline">"Go home"</a>
            </div>
        </PublicLayout>
    }
}
