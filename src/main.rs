//! Rooms Rent Frontend Entry Point

mod app;
mod components;
mod models;
mod search;
mod seed;
mod stagger;
mod store;
mod views;

use app::App;
use leptos::prelude::*;

/// Lines kept by the in-memory log buffer
const LOG_CAPACITY: usize = 200;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if let Err(err) = rolling_logger::init(level, LOG_CAPACITY) {
        web_sys::console::warn_1(&format!("[APP] Logger not installed: {}", err).into());
    }
    log::info!("[APP] Starting");

    mount_to_body(App);
}
