use crate::options::ViewportOptions;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

#[cfg(test)]
pub(crate) mod recording;

/// One entry from an intersection callback, reduced to what the hook reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntersectionRecord {
    pub is_intersecting: bool,
}

pub type IntersectionCallback = Rc<dyn Fn(&[IntersectionRecord])>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObserverError {
    /// The observer could not be constructed (missing API, bad options, ...).
    Construct(String),
}

impl ObserverError {
    pub(crate) fn from_js(value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        ObserverError::Construct(message)
    }
}

impl fmt::Display for ObserverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObserverError::Construct(msg) => {
                write!(f, "failed to create intersection observer: {msg}")
            }
        }
    }
}

impl std::error::Error for ObserverError {}

/// Something that can watch an element and report intersection changes.
///
/// The browser binding is [`WebObserverBackend`]; tests substitute a recording double.
pub trait ObserverBackend: 'static {
    type Target: Clone + PartialEq + 'static;
    /// Keeps the subscription alive. Dropping it releases the observer.
    type Handle: 'static;

    fn observe(
        &self,
        target: &Self::Target,
        options: &ViewportOptions,
        on_change: IntersectionCallback,
    ) -> Result<Self::Handle, ObserverError>;

    fn unobserve(&self, handle: &Self::Handle, target: &Self::Target);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WebObserverBackend;

/// A live `IntersectionObserver` plus the closure it calls into.
pub struct WebObservation {
    observer: web_sys::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl Drop for WebObservation {
    fn drop(&mut self) {
        // The closure is freed right after this; the observer must not call it again.
        self.observer.disconnect();
    }
}

impl ObserverBackend for WebObserverBackend {
    type Target = web_sys::Element;
    type Handle = WebObservation;

    fn observe(
        &self,
        target: &web_sys::Element,
        options: &ViewportOptions,
        on_change: IntersectionCallback,
    ) -> Result<WebObservation, ObserverError> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let records: Vec<IntersectionRecord> = entries
                .iter()
                .map(|e| e.unchecked_into::<web_sys::IntersectionObserverEntry>())
                .map(|e| IntersectionRecord {
                    is_intersecting: e.is_intersecting(),
                })
                .collect();
            on_change(&records);
        });

        let observer = web_sys::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options.to_init(),
        )
        .map_err(ObserverError::from_js)?;

        observer.observe(target);

        Ok(WebObservation {
            observer,
            _callback: callback,
        })
    }

    fn unobserve(&self, handle: &WebObservation, target: &web_sys::Element) {
        handle.observer.unobserve(target);
    }
}
