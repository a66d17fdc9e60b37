use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Done,
    Current,
    Upcoming,
}

pub fn step_state(index: usize, current: usize) -> StepState {
    match index.cmp(&current) {
        std::cmp::Ordering::Less => StepState::Done,
        std::cmp::Ordering::Equal => StepState::Current,
        std::cmp::Ordering::Greater => StepState::Upcoming,
    }
}

pub fn progress_percent(current: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (((current + 1).min(total) * 100) / total) as u32
}

/// Progress bar plus numbered step list. `current` is zero-based.
#[component]
pub fn StepIndicator(
    #[prop(into)] titles: Vec<&'static str>,
    #[prop(into)] current: Signal<usize>,
) -> impl IntoView {
    let total = titles.len();
    view! {
        <div class="space-y-3">
            <div class="flex justify-between text-sm text-fg-muted">
                <span>{move || format!("Step {} of {}", current.get() + 1, total)}</span>
                <span>{move || format!("{}% complete", progress_percent(current.get(), total))}</span>
            </div>
            <div class="h-2 w-full rounded-full bg-surface-muted">
                <div
                    class="h-2 rounded-full bg-action-primary-bg transition-all"
                    style=move || format!("width: {}%", progress_percent(current.get(), total))
                ></div>
            </div>
            <ol class="hidden md:flex flex-wrap gap-2 text-xs">
                {titles
                    .into_iter()
                    .enumerate()
                    .map(|(index, title)| {
                        let class = move || match step_state(index, current.get()) {
                            StepState::Done => "px-2 py-1 rounded bg-status-success-bg text-status-success-text",
                            StepState::Current => "px-2 py-1 rounded bg-action-primary-bg text-action-primary-text font-semibold",
                            StepState::Upcoming => "px-2 py-1 rounded bg-surface-muted text-fg-muted",
                        };
                        view! { <li class=class>{format!("{}. {}", index + 1, title)}</li> }
                    })
                    .collect_view()}
            </ol>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_state_splits_around_current() {
        assert_eq!(step_state(0, 2), StepState::Done);
        assert_eq!(step_state(2, 2), StepState::Current);
        assert_eq!(step_state(5, 2), StepState::Upcoming);
    }

    #[test]
    fn progress_counts_current_step_as_reached() {
        assert_eq!(progress_percent(0, 10), 10);
        assert_eq!(progress_percent(9, 10), 100);
        assert_eq!(progress_percent(12, 10), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }
}
