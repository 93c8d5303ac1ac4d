#![allow(warnings)]
//! Planboard Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod error;
mod models;
mod pomodoro;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use rolling_logger::LoggerConfig;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    let logger = LoggerConfig {
        capacity: config.log_capacity,
        level: config.log_filter(),
        console: true,
    };
    if let Err(err) = rolling_logger::init_logger("Planboard", logger) {
        web_sys::console::error_1(&format!("logger init failed: {}", err).into());
    }
    if let Some(err) = config_error {
        log::warn!("invalid configuration, using defaults: {}", err);
    }
    log::info!("starting with api base {}", config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}
