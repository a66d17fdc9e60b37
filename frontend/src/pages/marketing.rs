use crate::components::layout::PublicLayout;
use leptos::*;
use leptos_meta::Title;

#[derive(Debug, Clone, Copy)]
struct Feature {
    icon: &'static str,
    title: &'static str,
    body: &'static str,
}

const CLIENT_FEATURES: [Feature; 3] = [
    Feature {
        icon: "fa-user-doctor",
        title: "Licensed therapists",
        body: "Every therapist is credential-checked before they can see clients.",
    },
    Feature {
        icon: "fa-video",
        title: "Sessions your way",
        body: "Meet by video, phone or in person, on a schedule that works for you.",
    },
    Feature {
        icon: "fa-lock",
        title: "Private by default",
        body: "Your messages and records stay between you and your care team.",
    },
];

const THERAPIST_FEATURES: [Feature; 3] = [
    Feature {
        icon: "fa-calendar-check",
        title: "Fill your calendar",
        body: "Clients find you by specialty, approach and availability.",
    },
    Feature {
        icon: "fa-file-signature",
        title: "Simple onboarding",
        body: "A guided application that saves your progress as you go.",
    },
    Feature {
        icon: "fa-hand-holding-dollar",
        title: "Your rates",
        body: "Set your own fees and choose which insurers you accept.",
    },
];

#[component]
fn FeatureGrid(features: [Feature; 3]) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            {features
                .into_iter()
                .map(|f| view! {
                    <div class="bg-surface-elevated rounded-lg shadow p-6">
                        <i class=format!("fas {} text-2xl text-action-primary-bg", f.icon)></i>
                        <h3 class="mt-3 font-semibold text-fg">{f.title}</h3>
                        <p class="mt-1 text-sm text-fg-muted">{f.body}</p>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="MindHaven | Therapy that fits your life" />
        <PublicLayout>
            <section class="max-w-5xl mx-auto px-4 py-16 text-center space-y-6">
                <h1 class="text-4xl font-extrabold text-fg">"Therapy that fits your life"</h1>
                <p class="text-lg text-fg-muted">
                    "Connect with licensed therapists for video, phone or in-person sessions."
                </p>
                <div class="flex justify-center gap-4">
                    <a href="/signup" class="rounded-md px-6 py-3 font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover">
                        "Get started"
                    </a>
                    <a href="/for-therapists" class="rounded-md px-6 py-3 font-semibold border border-border text-fg hover:bg-surface-muted">
                        "I'm a therapist"
                    </a>
                </div>
            </section>
            <section class="max-w-5xl mx-auto px-4 pb-16">
                <FeatureGrid features=CLIENT_FEATURES />
            </section>
        </PublicLayout>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <Title text="About | MindHaven" />
        <PublicLayout>
            <article class="max-w-3xl mx-auto px-4 py-16 space-y-4 text-fg">
                <h1 class="text-3xl font-bold">"About MindHaven"</h1>
                <p class="text-fg-muted">
                    "MindHaven makes it easier to find the right therapist and stay connected between sessions."
                </p>
                <p class="text-fg-muted">
                    "We work with licensed clinicians across many specialties and approaches, and we review every therapist's credentials before they join."
                </p>
            </article>
        </PublicLayout>
    }
}

#[component]
pub fn ForTherapistsPage() -> impl IntoView {
    view! {
        <Title text="For therapists | MindHaven" />
        <PublicLayout>
            <section class="max-w-5xl mx-auto px-4 py-16 space-y-8">
                <div class="text-center space-y-3">
                    <h1 class="text-3xl font-bold text-fg">"Grow your practice with MindHaven"</h1>
                    <p class="text-fg-muted">
                        "Joining is by invitation. If you have received an invitation email, follow its link to create your account."
                    </p>
                </div>
                <FeatureGrid features=THERAPIST_FEATURES />
            </section>
        </PublicLayout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use leptos_meta::provide_meta_context;

    #[test]
    fn home_page_links_to_signup() {
        let html = render_to_string(move || {
            provide_meta_context();
            view! { <HomePage /> }
        });
        assert!(html.contains("Therapy that fits your life"));
        assert!(html.contains("/signup"));
        assert!(html.contains("Licensed therapists"));
    }

    #[test]
    fn therapist_page_explains_invitations() {
        let html = render_to_string(move || {
            provide_meta_context();
            view! { <ForTherapistsPage /> }
        });
        assert!(html.contains("Joining is by invitation"));
        assert!(html.contains("Simple onboarding"));
    }

    #[test]
    fn about_page_renders() {
        let html = render_to_string(move || {
            provide_meta_context();
            view! { <AboutPage /> }
        });
        assert!(html.contains("About MindHaven"));
    }
}
