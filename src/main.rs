//! Gigboard Frontend Entry Point

mod api;
mod app;
mod cache;
mod components;
mod config;
mod context;
mod error;
mod filter;
mod forms;
mod models;
mod projection;
mod reactive;
mod store;
mod widgets;

#[cfg(test)]
mod testing;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    rolling_logger::init(config.log_capacity);
    log::info!("[APP] Starting gigboard-ui {}", env!("CARGO_PKG_VERSION"));
    mount_to_body(move || view! { <App config=config.clone() /> });
}
