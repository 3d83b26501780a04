use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::gadget_manager::{Gadget, GadgetManager};
use crate::domain::{
    dom::Dom,
    gadgets::{
        CellSubscription, ChartPlugin, ChartWidget, DataEvent, DataKind, DataSource, GadgetConfig,
        GadgetState, IdGenerator, LivenessMarker, SeriesSet,
    },
    logging::{LogComponent, Logger, SharedLogger},
    outcome::{Outcome, SkipReason},
};

/// Default prefix of generated liveness classes.
pub const GADGET_CLASS_PREFIX: &str = "curve_gadget_";

/// Inline styles stretching the chart host over its container.
pub const FILL_CONTAINER: [(&str, &str); 5] = [
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("right", "0"),
    ("bottom", "0"),
];

const COMPONENT: LogComponent = LogComponent::Application("CurveGadget");

/// Collaborators injected into every curve gadget.
#[derive(Clone)]
pub struct GadgetDeps {
    pub source: Rc<dyn DataSource>,
    pub dom: Rc<dyn Dom>,
    pub charts: Rc<dyn ChartPlugin>,
    pub ids: Rc<dyn IdGenerator>,
    pub logger: SharedLogger,
    pub class_prefix: String,
}

struct GadgetCore {
    config: GadgetConfig,
    marker: LivenessMarker,
    dom: Rc<dyn Dom>,
    charts: Rc<dyn ChartPlugin>,
    logger: SharedLogger,
    state: Cell<GadgetState>,
    latest: RefCell<SeriesSet>,
    widget: RefCell<Option<Box<dyn ChartWidget>>>,
    subscription: RefCell<Option<Box<dyn CellSubscription>>>,
}

impl GadgetCore {
    fn on_data(&self, event: DataEvent) -> Outcome {
        if self.state.get().is_dead() {
            return Outcome::Skipped(SkipReason::Dead);
        }
        if event.kind != DataKind::Curve {
            self.logger.warn(
                COMPONENT,
                &format!("{}: data.v should be {}, got {}", self.marker, DataKind::CURVE_TAG, event.kind),
            );
            return Outcome::Skipped(SkipReason::KindMismatch { received: event.kind.to_string() });
        }

        let series = SeriesSet::wrap(&event.value);
        *self.latest.borrow_mut() = series.clone();

        if let Some(widget) = self.widget.borrow_mut().as_mut() {
            return match widget.update(&series) {
                Ok(()) => {
                    self.state.set(GadgetState::Updated);
                    Outcome::Updated
                }
                Err(e) => {
                    self.logger.error(COMPONENT, &format!("{}: update failed: {e}", self.marker));
                    Outcome::Skipped(SkipReason::DomFailure(e.to_string()))
                }
            };
        }
        self.resize()
    }

    fn resize(&self) -> Outcome {
        if self.state.get().is_dead() {
            return Outcome::Skipped(SkipReason::Dead);
        }
        let selector = self.config.selector.as_str();
        if !self.dom.exists(selector) {
            return Outcome::Skipped(SkipReason::HostDetached);
        }

        let mounted = self
            .dom
            .add_class(selector, self.marker.class())
            .and_then(|_| self.dom.set_styles(selector, &FILL_CONTAINER))
            .and_then(|_| self.charts.mount(selector, &self.latest.borrow()));

        match mounted {
            Ok(widget) => {
                *self.widget.borrow_mut() = Some(widget);
                self.state.set(GadgetState::Rendered);
                Outcome::Rendered
            }
            Err(e) => {
                self.logger.error(COMPONENT, &format!("{}: render failed: {e}", self.marker));
                Outcome::Skipped(SkipReason::DomFailure(e.to_string()))
            }
        }
    }

    fn alive(&self) -> bool {
        if self.state.get().is_dead() {
            return false;
        }
        let live = self.dom.exists(&self.marker.selector());
        if !live {
            self.shutdown();
        }
        live
    }

    /// Kill the subscription unless the source already closed it.
    fn release_subscription(&self) {
        let subscription = self.subscription.borrow_mut().take();
        if let Some(mut subscription) = subscription {
            if !subscription.is_killed() {
                subscription.kill();
            }
        }
    }

    fn shutdown(&self) {
        self.release_subscription();
        self.widget.borrow_mut().take();
        self.state.set(GadgetState::Dead);
        self.logger.debug(COMPONENT, &format!("{} closed subscription to {}", self.marker, self.config.cell()));
    }
}

// unswept (child) gadgets close their feed when the last handle goes
impl Drop for GadgetCore {
    fn drop(&mut self) {
        self.release_subscription();
    }
}

/// Renders one analytics cell's curve and keeps it current while the host
/// element carrying its liveness marker exists.
///
/// Cloning yields another handle to the same gadget.
#[derive(Clone)]
pub struct CurveGadget {
    core: Rc<GadgetCore>,
}

impl CurveGadget {
    /// Opens the cell subscription and, unless `config.child` is set,
    /// registers with `manager` for liveness sweeps.
    pub fn new(config: GadgetConfig, deps: GadgetDeps, manager: &GadgetManager) -> Self {
        let marker = LivenessMarker::new(&deps.class_prefix, deps.ids.next_id());
        let core = Rc::new(GadgetCore {
            config,
            marker,
            dom: deps.dom,
            charts: deps.charts,
            logger: deps.logger,
            state: Cell::new(GadgetState::Constructed),
            latest: RefCell::new(SeriesSet::empty()),
            widget: RefCell::new(None),
            subscription: RefCell::new(None),
        });

        let weak = Rc::downgrade(&core);
        let subscription = deps.source.subscribe(
            &core.config.cell(),
            Box::new(move |event| {
                if let Some(core) = weak.upgrade() {
                    core.on_data(event);
                }
            }),
        );
        *core.subscription.borrow_mut() = Some(subscription);
        if core.state.get() == GadgetState::Constructed {
            core.state.set(GadgetState::Subscribed);
        }

        core.logger.debug(
            COMPONENT,
            &format!("📈 {} subscribed to {} (host {})", core.marker, core.config.cell(), core.config.selector),
        );

        let gadget = Self { core };
        if !gadget.core.config.child {
            manager.register(Rc::new(gadget.clone()));
        }
        gadget
    }

    /// Handle one inbound cell update.
    pub fn on_data(&self, event: DataEvent) -> Outcome {
        self.core.on_data(event)
    }

    /// (Re)create the chart widget on the host element with the latest data.
    pub fn resize(&self) -> Outcome {
        self.core.resize()
    }

    /// Polled liveness check; closes the subscription once the host is gone.
    pub fn alive(&self) -> bool {
        self.core.alive()
    }

    /// Explicit teardown for hosts with an unmount hook.
    pub fn dispose(&self) {
        if !self.core.state.get().is_dead() {
            self.core.shutdown();
        }
    }

    pub fn state(&self) -> GadgetState {
        self.core.state.get()
    }

    pub fn marker(&self) -> &LivenessMarker {
        &self.core.marker
    }

    pub fn config(&self) -> &GadgetConfig {
        &self.core.config
    }

    /// Series the next render will draw.
    pub fn latest(&self) -> SeriesSet {
        self.core.latest.borrow().clone()
    }
}

impl Gadget for CurveGadget {
    fn alive(&self) -> bool {
        CurveGadget::alive(self)
    }

    fn resize(&self) -> Outcome {
        CurveGadget::resize(self)
    }
}
