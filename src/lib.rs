//! Leptos hook reporting whether an element is visible inside a scrollable viewport,
//! backed by the browser `IntersectionObserver`.

pub mod components;
pub mod observer;
pub mod options;
pub mod tracker;

#[cfg(feature = "demo")]
pub mod app;

pub use components::hooks::{
    use_in_viewport, use_in_viewport_with, use_in_viewport_with_options, TargetRef,
    UseInViewportReturn,
};
pub use observer::{
    IntersectionCallback, IntersectionRecord, ObserverBackend, ObserverError, WebObservation,
    WebObserverBackend,
};
pub use options::{ChangeDetection, Threshold, ViewportOptions};
pub use tracker::ViewportTracker;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(feature = "demo", target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for demo builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg(feature = "demo")]
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
