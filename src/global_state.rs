use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;

use crate::application::GadgetManager;
use crate::config::ConsoleConfig;
use crate::domain::gadgets::MonotonicIds;

pub struct Globals {
    pub selected_security: RwSignal<Option<String>>,
    pub live_gadgets: RwSignal<usize>,
}

thread_local! {
    static GLOBALS: Globals = Globals {
        selected_security: create_rw_signal(None),
        live_gadgets: create_rw_signal(0),
    };

    static GADGET_MANAGER: Rc<GadgetManager> = Rc::new(GadgetManager::new());
    static GADGET_IDS: Rc<MonotonicIds> = Rc::new(MonotonicIds::new());
    static CONFIG: RefCell<ConsoleConfig> = RefCell::new(ConsoleConfig::default());
}

pub fn with_globals<R>(f: impl FnOnce(&Globals) -> R) -> R {
    GLOBALS.with(f)
}

crate::global_signals! {
    pub selected_security => selected_security: Option<String>,
    pub live_gadgets => live_gadgets: usize,
}

/// Registry every top-level gadget on the page joins.
pub fn gadget_manager() -> Rc<GadgetManager> {
    GADGET_MANAGER.with(Rc::clone)
}

/// Page-wide liveness marker counter.
pub fn gadget_ids() -> Rc<MonotonicIds> {
    GADGET_IDS.with(Rc::clone)
}

pub fn console_config() -> ConsoleConfig {
    CONFIG.with(|config| config.borrow().clone())
}

pub fn set_console_config(config: ConsoleConfig) {
    CONFIG.with(|current| *current.borrow_mut() = config);
}
