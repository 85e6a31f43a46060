//! Project List Component
//!
//! Search box and the filtered, newest-first project cards.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_board;
use crate::models::Project;

#[component]
pub fn ProjectList() -> impl IntoView {
    let ctx = use_board();

    let visible = move || ctx.read(|board| board.visible());
    let count_line = move || {
        ctx.read(|board| {
            let shown = board.visible().len();
            let total = board.projects().len();
            let term = board.filter_term();
            if term.is_empty() {
                format!("{shown} of {total} projects")
            } else {
                format!("{shown} of {total} projects match \"{term}\"")
            }
        })
    };

    view! {
        <div class="search-row">
            <input
                type="text"
                class="search-box"
                placeholder="Search by Project Name..."
                on:input=move |ev| {
                    let term = event_target_value(&ev);
                    ctx.apply(|board| board.set_filter(&term));
                }
            />
        </div>

        <div class="project-list">
            {move || {
                let projects = visible();
                if projects.is_empty() {
                    view! { <p class="empty">"No projects found."</p> }.into_any()
                } else {
                    projects
                        .into_iter()
                        .map(|project| view! { <ProjectCard project /> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>

        <p class="project-count">{count_line}</p>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let ctx = use_board();
    let id = project.id;
    let selected = project.clone();

    view! {
        <div class="project-card">
            <h4>{project.fields.project_name}</h4>
            <p>{project.fields.description}</p>
            <p>
                <strong>"Status: "</strong>
                {project.fields.status.label()}
            </p>

            <div class="card-actions">
                <button
                    class="edit-btn"
                    disabled=move || ctx.is_pending()
                    on:click=move |_| ctx.apply(|board| board.select_for_edit(&selected))
                >
                    "Edit"
                </button>
                <DeleteConfirmButton button_class="delete-btn" project_id=id />
            </div>
        </div>
    }
}
