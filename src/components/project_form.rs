//! Project Form Component
//!
//! Create/update form bound to the board's draft.

use leptos::prelude::*;

use crate::components::StatusSelector;
use crate::context::{use_board, BoardContext};
use crate::models::ProjectFields;

type Getter = fn(&ProjectFields) -> String;
type Setter = fn(&mut ProjectFields, String);

/// (input type, placeholder, getter, setter)
const FIELDS: &[(&str, &str, Getter, Setter)] = &[
    ("text", "Project Name", |f| f.project_name.clone(), |f, v| f.project_name = v),
    ("text", "Description", |f| f.description.clone(), |f, v| f.description = v),
    ("text", "Budget", |f| f.budget.clone(), |f, v| f.budget = v),
    ("text", "Timeline", |f| f.timeline.clone(), |f, v| f.timeline = v),
    ("date", "Demo Date", |f| f.demo_date_input(), |f, v| f.set_demo_date_input(&v)),
    ("text", "Client Name", |f| f.client_name.clone(), |f, v| f.client_name = v),
    ("text", "Contact Number", |f| f.contact_number.clone(), |f, v| f.contact_number = v),
    ("text", "Reference Person", |f| f.reference_person.clone(), |f, v| f.reference_person = v),
];

/// Form for composing a new project or editing the selected one
#[component]
pub fn ProjectForm() -> impl IntoView {
    let ctx = use_board();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if ctx.is_pending() {
            return;
        }
        ctx.spawn(|board| async move { board.submit().await.map(|_| ()) });
    };

    let heading = move || ctx.read(|board| board.draft().heading());
    let editing = move || ctx.read(|board| board.draft().editing().is_some());

    view! {
        <div class="card">
            <h3>{heading}</h3>

            <form class="form-grid" on:submit=submit>
                {FIELDS.iter().map(|&(kind, placeholder, get, set)| view! {
                    <DraftInput ctx kind placeholder get set />
                }).collect_view()}

                <StatusSelector
                    current=Signal::derive(move || ctx.read(|board| board.draft().fields().status))
                    on_change=move |status| ctx.apply(|board| board.update_draft(|f| f.status = status))
                />

                <div class="form-actions">
                    <button type="submit" class="primary-btn" disabled=move || ctx.is_pending()>
                        {heading}
                    </button>
                    <Show when=editing>
                        <button
                            type="button"
                            class="cancel-btn"
                            on:click=move |_| ctx.apply(|board| board.cancel_edit())
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
        </div>
    }
}

/// One draft-bound input
#[component]
fn DraftInput(
    ctx: BoardContext,
    kind: &'static str,
    placeholder: &'static str,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <input
            type=kind
            placeholder=placeholder
            title=placeholder
            prop:value=move || ctx.read(|board| get(board.draft().fields()))
            on:input=move |ev| {
                let value = event_target_value(&ev);
                ctx.edit_draft(|fields| set(fields, value));
            }
        />
    }
}
