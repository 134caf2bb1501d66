use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

pub const DEFAULT_ROOT_MARGIN: &str = "0";
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Visibility ratio(s) at which the observer fires.
///
/// Accepts either a bare number or a list in JSON (`0.5` / `[0, 0.5, 1]`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Threshold {
    Single(f64),
    Multiple(Vec<f64>),
}

impl Threshold {
    pub(crate) fn to_js(&self) -> JsValue {
        match self {
            Threshold::Single(t) => JsValue::from_f64(*t),
            Threshold::Multiple(ts) => ts
                .iter()
                .map(|t| JsValue::from_f64(*t))
                .collect::<js_sys::Array>()
                .into(),
        }
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Threshold::Single(value)
    }
}

impl From<Vec<f64>> for Threshold {
    fn from(value: Vec<f64>) -> Self {
        Threshold::Multiple(value)
    }
}

impl From<&[f64]> for Threshold {
    fn from(value: &[f64]) -> Self {
        Threshold::Multiple(value.to_vec())
    }
}

/// Configuration handed to the intersection observer.
///
/// `Default` gives the hook defaults (viewport root, `"0"` margin, `0.1` threshold).
/// Fields left as `None` are not forwarded, so the browser's own defaults apply;
/// that is what a partially-specified object (see [`ViewportOptions::unset`] or a
/// partial JSON object) ends up with.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewportOptions {
    /// Containing element; `None` means the browser viewport.
    #[serde(skip)]
    pub root: Option<web_sys::Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
}

impl ViewportOptions {
    /// Options with every field left to the native observer's defaults.
    pub fn unset() -> Self {
        Self {
            root: None,
            root_margin: None,
            threshold: None,
        }
    }

    pub fn with_root(mut self, root: web_sys::Element) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_root_margin(mut self, root_margin: impl Into<String>) -> Self {
        self.root_margin = Some(root_margin.into());
        self
    }

    pub fn with_threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.threshold = Some(threshold.into());
        self
    }

    pub(crate) fn to_init(&self) -> web_sys::IntersectionObserverInit {
        let init = web_sys::IntersectionObserverInit::new();
        if let Some(root) = &self.root {
            init.set_root(Some(root));
        }
        if let Some(margin) = &self.root_margin {
            init.set_root_margin(margin);
        }
        if let Some(threshold) = &self.threshold {
            init.set_threshold(&threshold.to_js());
        }
        init
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: Some(DEFAULT_ROOT_MARGIN.to_string()),
            threshold: Some(Threshold::Single(DEFAULT_THRESHOLD)),
        }
    }
}

/// What makes the hook tear down and rebuild its observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChangeDetection {
    /// Every notification from the target or options signal re-subscribes,
    /// even when the new options are value-equal to the old ones.
    #[default]
    Notify,
    /// Only re-subscribe when the target or the options actually differ.
    Value,
}
