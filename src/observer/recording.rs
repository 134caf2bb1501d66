use super::{IntersectionCallback, IntersectionRecord, ObserverBackend, ObserverError};
use crate::options::ViewportOptions;
use std::cell::RefCell;
use std::rc::Rc;

pub(crate) type FakeElement = &'static str;

#[derive(Default)]
struct RecordingState {
    observed: Vec<(FakeElement, ViewportOptions)>,
    unobserved: Vec<FakeElement>,
    released: usize,
    // Every callback ever handed out, including superseded ones.
    callbacks: Vec<(FakeElement, IntersectionCallback)>,
    fail_with: Option<String>,
}

/// In-memory stand-in for the browser observer that records every call.
#[derive(Clone, Default)]
pub(crate) struct RecordingBackend {
    state: Rc<RefCell<RecordingState>>,
}

pub(crate) struct RecordingHandle {
    state: Rc<RefCell<RecordingState>>,
}

impl Drop for RecordingHandle {
    fn drop(&mut self) {
        self.state.borrow_mut().released += 1;
    }
}

impl RecordingBackend {
    pub fn failing(message: &str) -> Self {
        let backend = Self::default();
        backend.state.borrow_mut().fail_with = Some(message.to_string());
        backend
    }

    pub fn observed(&self) -> Vec<(FakeElement, ViewportOptions)> {
        self.state.borrow().observed.clone()
    }

    pub fn observed_targets(&self) -> Vec<FakeElement> {
        self.state.borrow().observed.iter().map(|(t, _)| *t).collect()
    }

    pub fn unobserved(&self) -> Vec<FakeElement> {
        self.state.borrow().unobserved.clone()
    }

    pub fn released(&self) -> usize {
        self.state.borrow().released
    }

    /// Delivers a record to every callback ever registered for `target`.
    pub fn fire(&self, target: FakeElement, is_intersecting: bool) {
        let callbacks: Vec<IntersectionCallback> = self
            .state
            .borrow()
            .callbacks
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in callbacks {
            cb(&[IntersectionRecord { is_intersecting }]);
        }
    }
}

impl ObserverBackend for RecordingBackend {
    type Target = FakeElement;
    type Handle = RecordingHandle;

    fn observe(
        &self,
        target: &FakeElement,
        options: &ViewportOptions,
        on_change: IntersectionCallback,
    ) -> Result<RecordingHandle, ObserverError> {
        let mut state = self.state.borrow_mut();
        if let Some(msg) = &state.fail_with {
            return Err(ObserverError::Construct(msg.clone()));
        }
        state.observed.push((*target, options.clone()));
        state.callbacks.push((*target, on_change));
        Ok(RecordingHandle {
            state: self.state.clone(),
        })
    }

    fn unobserve(&self, _handle: &RecordingHandle, target: &FakeElement) {
        self.state.borrow_mut().unobserved.push(*target);
    }
}
