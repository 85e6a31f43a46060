//! Delete Confirm Button Component
//!
//! Inline delete confirmation: nothing is sent until the user confirms.

use leptos::prelude::*;

use crate::context::use_board;
use crate::models::ProjectId;

/// Inline delete confirmation button
///
/// Shows "Delete" initially. When clicked, arms the board's pending delete
/// and shows "Delete?" with ✓/✗ buttons.
///
/// # Arguments
/// * `button_class` - CSS class for the initial delete button
/// * `project_id` - Project removed on confirmation
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    project_id: ProjectId,
) -> impl IntoView {
    let ctx = use_board();
    let armed = move || ctx.is_pending_delete(project_id);

    view! {
        <Show when=move || !armed()>
            <button
                class=button_class.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.apply(|board| board.request_delete(project_id));
                }
            >
                "Delete"
            </button>
        </Show>
        <Show when=armed>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    disabled=move || ctx.is_pending()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.spawn(|board| async move { board.confirm_delete().await });
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.apply(|board| board.cancel_delete());
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
