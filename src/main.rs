//! Admin Portal Frontend Entry Point

mod api;
mod app;
mod auth;
mod board;
mod busy;
mod components;
mod config;
mod context;
mod editor;
mod error;
mod logger;
mod models;
mod session;

#[cfg(test)]
mod testing;

use app::App;
use config::PortalConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = PortalConfig::from_env();
    logger::init(config.log_level);
    log::info!("using API at {}", config.api_base_url);

    mount_to_body(move || view! { <App config /> });
}
