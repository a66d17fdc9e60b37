use crate::components::{empty_state::EmptyState, layout::Layout};
use crate::state::toast::use_toasts;
use chrono::Utc;
use leptos::{ev::SubmitEvent, *};

pub mod data;

use data::{sample_threads, Inbox, Thread};

#[component]
fn ThreadList(inbox: RwSignal<Inbox>) -> impl IntoView {
    let row = move |thread: Thread| {
        let id = thread.id;
        let is_selected = move || inbox.with(|i| i.selected().map(|t| t.id) == Some(id));
        view! {
            <li>
                <button
                    type="button"
                    class=move || {
                        if is_selected() {
                            "w-full text-left px-4 py-3 bg-surface-muted"
                        } else {
                            "w-full text-left px-4 py-3 hover:bg-surface-muted"
                        }
                    }
                    on:click=move |_| inbox.update(|i| i.select(id))
                >
                    <div class="flex justify-between">
                        <span class="text-sm font-semibold text-fg">{thread.participant}</span>
                        {(thread.unread > 0).then(|| view! {
                            <span class="text-xs rounded-full bg-action-primary-bg text-action-primary-text px-2">{thread.unread}</span>
                        })}
                    </div>
                    <p class="text-xs text-fg-muted">{thread.subtitle}</p>
                    <p class="text-sm text-fg-muted truncate">{thread.preview().to_string()}</p>
                </button>
            </li>
        }
    };
    view! {
        <ul class="divide-y divide-border">
            {move || inbox.with(|i| i.threads().to_vec()).into_iter().map(row).collect_view()}
        </ul>
    }
}

#[component]
fn Conversation(inbox: RwSignal<Inbox>) -> impl IntoView {
    let toasts = use_toasts();
    let draft = create_rw_signal(String::new());
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let body = draft.get_untracked();
        let mut result = Ok(());
        inbox.update(|i| result = i.send(&body, Utc::now()));
        match result {
            Ok(()) => draft.set(String::new()),
            Err(message) => {
                toasts.error("Message not sent", message);
            }
        }
    };

    view! {
        {move || match inbox.with(|i| i.selected().cloned()) {
            None => view! {
                <EmptyState title="Select a conversation" description="Your messages with your care team appear here." icon="fa-comments" />
            }
            .into_view(),
            Some(thread) => view! {
                <div class="flex flex-col h-full">
                    <div class="border-b border-border px-4 py-3">
                        <p class="font-semibold text-fg">{thread.participant}</p>
                        <p class="text-xs text-fg-muted">{thread.subtitle}</p>
                    </div>
                    <ul class="flex-1 space-y-3 p-4 overflow-y-auto">
                        {thread
                            .messages
                            .into_iter()
                            .map(|m| {
                                let (align, bubble) = if m.from_me {
                                    ("flex justify-end", "bg-action-primary-bg text-action-primary-text")
                                } else {
                                    ("flex justify-start", "bg-surface-muted text-fg")
                                };
                                view! {
                                    <li class=align>
                                        <div class=format!("max-w-md rounded-lg px-3 py-2 text-sm {}", bubble)>
                                            <p>{m.body}</p>
                                            <p class="mt-1 text-[10px] opacity-70">{m.sent_at.format("%b %-d, %H:%M").to_string()}</p>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            }
            .into_view(),
        }}
        <form class="flex gap-2 border-t border-border p-3" on:submit=on_submit>
            <input
                type="text"
                placeholder="Write a message"
                class="flex-1 px-3 py-2 border border-form-control-border bg-form-control-bg text-form-control-text rounded-md sm:text-sm"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                disabled=move || inbox.with(|i| i.selected().is_none())
            >
                "Send"
            </button>
        </form>
    }
}

#[component]
pub fn MessagesPage() -> impl IntoView {
    let inbox = create_rw_signal(Inbox::new(sample_threads(Utc::now())));
    view! {
        <Layout>
            <div class="space-y-4">
                <h1 class="text-2xl font-bold text-fg">"Messages"</h1>
                <div class="grid grid-cols-1 md:grid-cols-3 bg-surface-elevated rounded-lg shadow min-h-[28rem]">
                    <div class="border-r border-border">
                        <ThreadList inbox=inbox />
                    </div>
                    <div class="md:col-span-2 flex flex-col">
                        <Conversation inbox=inbox />
                    </div>
                </div>
            </div>
        </Layout>
    }
}
