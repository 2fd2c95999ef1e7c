//! bubblechat Web Frontend
//!
//! Leptos-based WASM frontend rendering the chat transcript as message
//! bubbles.
//!
//! Sign-in, sending and history go to the chat backend (`/auth/*`,
//! `/chat/*`). Its base URL is fixed at build time with
//! `BUBBLE_API_BASE`; without it the page origin is used. `bubble-server`
//! does not serve those routes, so a frontend hosted there must be built
//! with `BUBBLE_API_BASE` set.

mod api;
mod app;
mod components;
mod pages;

pub use app::App;
pub use components::MessageBubble;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
