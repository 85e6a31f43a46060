//! Dashboard Page
//!
//! Protected view: project form on top, searchable list below.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

use crate::app::LOGIN_ROUTE;
use crate::board::ProjectBoard;
use crate::components::{ProjectForm, ProjectList};
use crate::context::{use_portal, BoardContext};
use crate::session::Access;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let portal = use_portal();
    let session = match portal.access() {
        Access::Allow(session) => session,
        Access::Deny => return view! { <Redirect path=LOGIN_ROUTE /> }.into_any(),
    };

    let ctx = BoardContext::new(ProjectBoard::new(portal.api(), session), portal.config.clone());
    provide_context(ctx);

    // Initial load
    Effect::new(move |_| {
        log::debug!("dashboard mounted, loading projects");
        ctx.spawn(|board| async move { board.refresh().await });
    });

    let navigate = use_navigate();
    let logout = move |_| {
        portal.authenticator().sign_out();
        navigate(LOGIN_ROUTE, Default::default());
    };

    view! {
        <Show when=move || ctx.is_expired()>
            <Redirect path=LOGIN_ROUTE />
        </Show>

        <div class="dashboard">
            <div class="dashboard-header">
                <h2>"Admin Dashboard"</h2>
                <button class="logout-btn" on:click=logout>"Logout"</button>
            </div>

            {move || ctx.notice().map(|message| view! {
                <div class="notice error">
                    <span>{message}</span>
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.dismiss_notice()>
                        "✗"
                    </button>
                </div>
            })}

            <hr />
            <ProjectForm />
            <hr />
            <ProjectList />
        </div>
    }
    .into_any()
}
