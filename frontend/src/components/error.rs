use crate::api::ApiError;
use leptos::*;

fn detail_messages(error: &ApiError) -> Vec<String> {
    error
        .details
        .as_ref()
        .and_then(|details| details.get("errors"))
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|err| err.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Form-level error box. Validation details are listed, other codes are shown in small print.
#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div role="alert" class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let details = detail_messages(&e);
                    if !details.is_empty() {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {details.into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                            </ul>
                        }
                        .into_view()
                    } else if e.code != "UNKNOWN" && e.code != "VALIDATION_ERROR" && !e.code.is_empty() {
                        view! { <div class="text-xs opacity-75">{"Code: "}{e.code}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                })}
            </div>
        </Show>
    }
}
