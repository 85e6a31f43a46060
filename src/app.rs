//! Admin Portal App
//!
//! Router with the login view and the token-gated dashboard.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

use crate::components::{DashboardPage, LoginPage};
use crate::config::PortalConfig;
use crate::context::PortalContext;

pub const LOGIN_ROUTE: &str = "/";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[component]
pub fn App(config: PortalConfig) -> impl IntoView {
    provide_context(PortalContext::new(config));

    view! {
        <Router>
            <main>
                <Routes fallback=NotFound>
                    <Route path=path!("/") view=LoginPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"Page not found"</h2>
            <A href=LOGIN_ROUTE>"Back to login"</A>
        </div>
    }
}
