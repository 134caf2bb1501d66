use crate::observer::{IntersectionCallback, IntersectionRecord, ObserverBackend, ObserverError};
use crate::options::ViewportOptions;
use std::cell::Cell;
use std::rc::Rc;

struct Subscription<B: ObserverBackend> {
    target: B::Target,
    handle: B::Handle,
}

/// Observer lifecycle behind `use_in_viewport`, free of any reactive runtime.
///
/// Holds at most one live subscription. Every subscription is stamped with a
/// generation; a callback only writes through the setter while its generation is
/// still the current one, so a superseded observer can never flip the flag even if
/// the backend delivers late.
pub struct ViewportTracker<B: ObserverBackend> {
    backend: B,
    live: Option<Subscription<B>>,
    generation: Rc<Cell<u64>>,
}

impl<B: ObserverBackend> ViewportTracker<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: None,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn is_observing(&self) -> bool {
        self.live.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// One effect run: tear down the previous subscription, then observe `target`
    /// if there is one.
    ///
    /// An empty target is a no-op and leaves the flag at its last value.
    pub fn run(
        &mut self,
        target: Option<&B::Target>,
        options: &ViewportOptions,
        set_visible: impl Fn(bool) + 'static,
    ) -> Result<(), ObserverError> {
        self.cleanup(target);

        let Some(target) = target else {
            return Ok(());
        };

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let current = self.generation.clone();
        let on_change: IntersectionCallback = Rc::new(move |records: &[IntersectionRecord]| {
            if current.get() != generation {
                return;
            }
            if let Some(record) = records.first() {
                set_visible(record.is_intersecting);
            }
        });

        let handle = self.backend.observe(target, options, on_change)?;
        self.live = Some(Subscription {
            target: target.clone(),
            handle,
        });
        Ok(())
    }

    /// Stops the live subscription, if any.
    ///
    /// `current` is the target as it is *now*; when it has been cleared the
    /// backend's unobserve is skipped and the handle is simply released.
    pub fn cleanup(&mut self, current: Option<&B::Target>) {
        let Some(sub) = self.live.take() else {
            return;
        };

        self.generation.set(self.generation.get() + 1);

        if current.is_some() {
            self.backend.unobserve(&sub.handle, &sub.target);
        }
    }
}

impl<B: ObserverBackend> Drop for ViewportTracker<B> {
    fn drop(&mut self) {
        // Outstanding callbacks may outlive the tracker; silence them.
        self.generation.set(self.generation.get() + 1);
    }
}
