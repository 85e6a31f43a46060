//! Login Page
//!
//! Credential form. Visitors who already hold a token go straight to the
//! dashboard.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

use crate::app::DASHBOARD_ROUTE;
use crate::context::use_portal;
use crate::models::Credentials;

#[component]
pub fn LoginPage() -> impl IntoView {
    let portal = use_portal();
    if portal.access().is_allowed() {
        return view! { <Redirect path=DASHBOARD_ROUTE /> }.into_any();
    }

    let authenticator = StoredValue::new_local(Rc::new(portal.authenticator()));
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let sign_in = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get() {
            return;
        }
        let credentials = Credentials::new(username.get(), password.get());
        let authenticator = authenticator.get_value();
        let navigate = navigate.clone();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = authenticator.sign_in(&credentials).await;
            set_loading.set(false);
            match result {
                Ok(_) => navigate(DASHBOARD_ROUTE, Default::default()),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-card">
                <h2 class="login-title">"LumoraTriad Admin Login"</h2>

                <form class="login-form" on:submit=sign_in>
                    <input
                        type="text"
                        placeholder="Username"
                        required=true
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        required=true
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="primary-btn" disabled=move || loading.get()>
                        {move || if loading.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>

                {move || error.get().map(|message| view! {
                    <p class="notice error">{message}</p>
                })}
            </div>
        </div>
    }
    .into_any()
}
