//! Inventory Frontend Entry Point
//!
//! Enhances the server-rendered inventory pages: line-item form, data
//! tables, print/export buttons, form validation, tooltips and alerts.

mod app;
mod commands;
mod components;
mod config;
mod context;
mod dom;
mod enhance;
mod models;
mod store;

use config::UiConfig;
use context::AppContext;
use any_spawner::Executor;

fn main() {
    console_error_panic_hook::set_once();
    // Page glue spawns timers before any widget is mounted
    let _ = Executor::init_wasm_bindgen();
    let config = UiConfig::load();
    let ctx = AppContext::new(config);
    enhance::enhance_page(ctx);
    app::mount_widgets(ctx);
}
