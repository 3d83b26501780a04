use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;

use crate::domain::{logging::LogComponent, outcome::Outcome};
use crate::{log_debug, log_info};

/// Anything the manager can sweep.
pub trait Gadget {
    fn alive(&self) -> bool;
    fn resize(&self) -> Outcome;
}

/// Shared registry of top-level gadgets. Dead gadgets are dropped on the
/// next sweep.
#[derive(Default)]
pub struct GadgetManager {
    gadgets: RefCell<Vec<Rc<dyn Gadget>>>,
    poller: RefCell<Option<Interval>>,
}

impl GadgetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, gadget: Rc<dyn Gadget>) {
        self.gadgets.borrow_mut().push(gadget);
        log_debug!(
            LogComponent::Application("GadgetManager"),
            "gadget registered ({} total)",
            self.gadgets.borrow().len()
        );
    }

    pub fn len(&self) -> usize {
        self.gadgets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.gadgets.borrow().is_empty()
    }

    /// Poll `alive()` on every gadget and forget the dead ones.
    /// Returns how many are still alive.
    pub fn sweep(&self) -> usize {
        let mut gadgets = self.gadgets.borrow_mut();
        let before = gadgets.len();
        gadgets.retain(|gadget| gadget.alive());
        let live = gadgets.len();
        if live != before {
            log_debug!(
                LogComponent::Application("GadgetManager"),
                "🧹 sweep dropped {} dead gadget(s), {} alive",
                before - live,
                live
            );
        }
        live
    }

    /// Re-render every registered gadget, e.g. after a layout change.
    pub fn resize_all(&self) -> Vec<Outcome> {
        let gadgets: Vec<Rc<dyn Gadget>> = self.gadgets.borrow().clone();
        gadgets.iter().map(|gadget| gadget.resize()).collect()
    }

    /// Sweep every `interval_ms`, reporting the live count to `on_swept`.
    /// Replaces any poll already running.
    pub fn start_polling(self: &Rc<Self>, interval_ms: u32, on_swept: impl Fn(usize) + 'static) {
        let manager = Rc::downgrade(self);
        let interval = Interval::new(interval_ms, move || {
            if let Some(manager) = manager.upgrade() {
                on_swept(manager.sweep());
            }
        });
        // dropping the previous Interval cancels it
        self.poller.borrow_mut().replace(interval);
        log_info!(
            LogComponent::Application("GadgetManager"),
            "⏱️ liveness poll every {} ms",
            interval_ms
        );
    }

    pub fn stop_polling(&self) {
        self.poller.borrow_mut().take();
    }

    pub fn is_polling(&self) -> bool {
        self.poller.borrow().is_some()
    }
}
