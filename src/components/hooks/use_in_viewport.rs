use crate::observer::{ObserverBackend, ObserverError, WebObserverBackend};
use crate::options::{ChangeDetection, ViewportOptions};
use crate::tracker::ViewportTracker;
use leptos::html::ElementType;
use leptos::logging::error;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// A single-slot cell holding the element to observe, owned by the caller.
///
/// `current` is a tracked read (re-runs the hook's effect when the slot changes);
/// `current_untracked` is used at cleanup time.
pub trait TargetRef: Copy + Send + Sync + 'static {
    type Element: Clone + PartialEq + 'static;

    fn current(&self) -> Option<Self::Element>;
    fn current_untracked(&self) -> Option<Self::Element>;
}

impl<E> TargetRef for NodeRef<E>
where
    E: ElementType,
    E::Output: JsCast + Clone + 'static,
{
    type Element = web_sys::Element;

    fn current(&self) -> Option<web_sys::Element> {
        self.try_get().flatten().map(|el| el.unchecked_into())
    }

    fn current_untracked(&self) -> Option<web_sys::Element> {
        self.try_get_untracked().flatten().map(|el| el.unchecked_into())
    }
}

impl<T> TargetRef for RwSignal<Option<T>, LocalStorage>
where
    T: Clone + PartialEq + 'static,
{
    type Element = T;

    fn current(&self) -> Option<T> {
        self.try_get().flatten()
    }

    fn current_untracked(&self) -> Option<T> {
        self.try_get_untracked().flatten()
    }
}

#[derive(Clone, Copy)]
pub struct UseInViewportReturn {
    /// `true` while the target satisfies the configured threshold against the root.
    pub is_in_viewport: Signal<bool>,
    /// Set when the observer could not be created; cleared by the next successful run.
    pub error: Signal<Option<ObserverError>>,
}

/// Hook reporting whether the element behind `target` is inside the viewport.
///
/// Uses the default options (viewport root, `"0"` margin, `0.1` threshold).
/// `is_in_viewport` is `false` until the first intersection callback arrives, and
/// stays `false` for as long as `target` is empty. If the browser refuses to build
/// the observer, `error` is set instead, so a failure never reads as "not visible".
///
/// ```ignore
/// let sentinel = NodeRef::<html::Div>::new();
/// let UseInViewportReturn { is_in_viewport, .. } = use_in_viewport(sentinel);
/// view! { <div node_ref=sentinel>{move || is_in_viewport.get().then_some("hello")}</div> }
/// ```
pub fn use_in_viewport<T>(target: T) -> UseInViewportReturn
where
    T: TargetRef<Element = web_sys::Element>,
{
    use_in_viewport_with_options(target, ViewportOptions::default())
}

/// Like [`use_in_viewport`], with `options` forwarded verbatim; `None` fields fall
/// back to the browser's own defaults.
pub fn use_in_viewport_with_options<T>(target: T, options: ViewportOptions) -> UseInViewportReturn
where
    T: TargetRef<Element = web_sys::Element>,
{
    use_in_viewport_with(
        target,
        Signal::stored_local(options),
        ChangeDetection::default(),
        WebObserverBackend,
    )
}

/// General form of [`use_in_viewport`].
///
/// The observer is rebuilt whenever `target` or `options` notifies (or, with
/// [`ChangeDetection::Value`], only when either actually changes). The previous
/// subscription is always torn down before the next one is created, and the last
/// one is torn down when the owning reactive scope is disposed.
pub fn use_in_viewport_with<T, B>(
    target: T,
    options: Signal<ViewportOptions, LocalStorage>,
    change_detection: ChangeDetection,
    backend: B,
) -> UseInViewportReturn
where
    B: ObserverBackend,
    T: TargetRef<Element = B::Target>,
{
    let is_in_viewport = RwSignal::new(false);
    let last_error: RwSignal<Option<ObserverError>> = RwSignal::new(None);

    let tracker = StoredValue::new_local(ViewportTracker::new(backend));
    let last_inputs: StoredValue<Option<(Option<B::Target>, ViewportOptions)>, LocalStorage> =
        StoredValue::new_local(None);

    Effect::new(move |_| {
        let element = target.current();
        let opts = options.get();

        if change_detection == ChangeDetection::Value {
            let unchanged = last_inputs
                .try_with_value(|prev| {
                    matches!(prev, Some((el, o)) if *el == element && *o == opts)
                })
                .unwrap_or(false);
            if unchanged {
                return;
            }
            last_inputs.set_value(Some((element.clone(), opts.clone())));
        }

        let set_visible = move |visible: bool| {
            let _ = is_in_viewport.try_set(visible);
        };

        match tracker.try_update_value(|t| t.run(element.as_ref(), &opts, set_visible)) {
            Some(Err(err)) => {
                error!("use_in_viewport: {err}");
                last_error.set(Some(err));
            }
            Some(Ok(())) => {
                if last_error.get_untracked().is_some() {
                    last_error.set(None);
                }
            }
            None => {}
        }
    });

    on_cleanup(move || {
        let current = target.current_untracked();
        tracker.try_update_value(|t| t.cleanup(current.as_ref()));
    });

    UseInViewportReturn {
        is_in_viewport: is_in_viewport.read_only().into(),
        error: last_error.read_only().into(),
    }
}
