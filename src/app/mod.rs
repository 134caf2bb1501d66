use crate::components::hooks::{use_in_viewport, use_in_viewport_with};
use crate::observer::WebObserverBackend;
use crate::options::{ChangeDetection, ViewportOptions};
use leptos::html;
use leptos::logging::log;
use leptos::prelude::*;

fn status(visible: bool) -> &'static str {
    if visible {
        "in viewport"
    } else {
        "out of view"
    }
}

#[component]
pub fn App() -> impl IntoView {
    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos` (enabled by the `demo` feature).
    let sentinel = NodeRef::<html::Div>::new();
    let sentinel_visible = use_in_viewport(sentinel).is_in_viewport;

    Effect::new(move |_| {
        log!("sentinel {}", status(sentinel_visible.get()));
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="sticky top-0 z-10 border-b bg-background px-4 py-2 text-xs">
                {move || format!("Sentinel: {}", status(sentinel_visible.get()))}
            </div>

            <div class="mx-auto w-full max-w-[720px] px-4 py-8">
                <div class="h-[150vh] text-xs text-muted-foreground">"Scroll down..."</div>
                <div node_ref=sentinel class="rounded-md border px-4 py-3 text-sm">
                    "Sentinel"
                </div>
                <div class="h-[50vh]"></div>
                <ScrollPanel />
            </div>
        </div>
    }
}

/// Observes an item against its own scroll container instead of the viewport.
#[component]
fn ScrollPanel() -> impl IntoView {
    let container = NodeRef::<html::Div>::new();
    let item = NodeRef::<html::Div>::new();

    // The root only exists after mount; rebuild the observer once it does.
    let options = Signal::derive_local(move || match container.get() {
        Some(root) => ViewportOptions::default()
            .with_root(web_sys::Element::from(root))
            .with_threshold(vec![0.0, 0.5, 1.0]),
        None => ViewportOptions::default(),
    });

    let state = use_in_viewport_with(item, options, ChangeDetection::Value, WebObserverBackend);

    view! {
        <div class="flex flex-col gap-2">
            <div class="text-xs">
                {move || format!("Panel item: {}", status(state.is_in_viewport.get()))}
            </div>
            <Show when=move || state.error.get().is_some() fallback=|| ().into_view()>
                {move || state.error.get().map(|e| view! {
                    <div class="text-xs text-destructive">{e.to_string()}</div>
                })}
            </Show>
            <div node_ref=container class="h-48 overflow-auto rounded-md border">
                <div class="h-96"></div>
                <div node_ref=item class="mx-4 rounded-md border px-4 py-3 text-sm">"Item"</div>
                <div class="h-96"></div>
            </div>
        </div>
    }
}
