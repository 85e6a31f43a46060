//! Status Selector Component
//!
//! Reusable project status buttons.

use leptos::prelude::*;

use crate::models::ProjectStatus;

/// Status buttons; the active one is highlighted
#[component]
pub fn StatusSelector(
    #[prop(into)] current: Signal<ProjectStatus>,
    on_change: impl Fn(ProjectStatus) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="status-selector">
            {ProjectStatus::ALL.iter().map(|&status| {
                let is_selected = move || current.get() == status;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "status-btn active" } else { "status-btn" }
                        on:click=move |_| on_change(status)
                    >
                        {status.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
