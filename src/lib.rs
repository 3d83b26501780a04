use leptos::SignalSet;
use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

#[macro_use]
mod macros;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod presentation;

/// Install logging, read the page config and start the liveness poll
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = config::ConsoleConfig::from_window();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new(config.log_level));
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    let poll_ms = config.liveness_poll_ms;
    global_state::set_console_config(config);
    global_state::gadget_manager().start_polling(poll_ms, |live| global_state::live_gadgets().set(live));

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        "🚀 Analytics console initialized",
    );
}

/// Mount the Leptos console shell into `<body>`
#[wasm_bindgen(js_name = mountConsole)]
pub fn mount_console() {
    use app::App;
    leptos::mount_to_body(|| leptos::view! { <App /> });
}
