#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use analytics_console_wasm::application::{FormDeps, GadgetDeps, FORM_SELECTOR, IDENTIFIERS_REGION, SECURITY_DROPDOWN};
use analytics_console_wasm::domain::{
    blotter::{DropdownOption, StaticSecurityCatalog},
    dom::{ChangeEvent, ChangeHandler, Dom, ListenerHandle},
    errors::{AppError, AppResult},
    gadgets::{
        CellCoordinate, CellSubscription, ChartPlugin, ChartWidget, DataEvent, DataHandler, DataSource,
        MonotonicIds, SeriesSet,
    },
    logging::{LogEntry, LogLevel, Logger},
};
use analytics_console_wasm::infrastructure::StaticTemplates;

#[derive(Debug, Clone, PartialEq)]
pub enum DomCall {
    AddClass { selector: String, class: String },
    SetStyles { selector: String, styles: Vec<(String, String)> },
    SetInnerHtml { selector: String, html: String },
    AppendHtml { selector: String, html: String },
    AppendOption { selector: String, option: DropdownOption },
    OnChange { scope: String, target: String },
}

struct Registered {
    target: String,
    active: Rc<Cell<bool>>,
    handler: ChangeHandler,
}

/// Fake document: each element is the set of selectors it answers to.
#[derive(Default)]
pub struct RecordingDom {
    elements: RefCell<Vec<HashSet<String>>>,
    calls: RefCell<Vec<DomCall>>,
    handlers: RefCell<Vec<Registered>>,
    removed_listeners: Rc<Cell<usize>>,
}

impl RecordingDom {
    pub fn with_elements(selectors: &[&str]) -> Rc<Self> {
        let dom = Self::default();
        for selector in selectors {
            dom.insert(selector);
        }
        Rc::new(dom)
    }

    pub fn insert(&self, selector: &str) {
        self.elements.borrow_mut().push(HashSet::from([selector.to_string()]));
    }

    /// Detach every element matching `selector`, classes included.
    pub fn remove(&self, selector: &str) {
        self.elements.borrow_mut().retain(|element| !element.contains(selector));
    }

    pub fn calls(&self) -> Vec<DomCall> {
        self.calls.borrow().clone()
    }

    pub fn inner_html_writes(&self, selector: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DomCall::SetInnerHtml { selector: s, html } if s == selector => Some(html),
                _ => None,
            })
            .collect()
    }

    pub fn appended_options(&self, selector: &str) -> Vec<DropdownOption> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DomCall::AppendOption { selector: s, option } if s == selector => Some(option),
                _ => None,
            })
            .collect()
    }

    pub fn removed_listeners(&self) -> usize {
        self.removed_listeners.get()
    }

    /// Fire `change` on `target`; returns how many active handlers ran.
    pub fn fire_change(&self, target: &str, value: &str) -> usize {
        let mut fired = 0;
        for registered in self.handlers.borrow_mut().iter_mut() {
            if registered.target == target && registered.active.get() {
                (registered.handler)(ChangeEvent::new(target, value));
                fired += 1;
            }
        }
        fired
    }

    fn require(&self, selector: &str) -> AppResult<()> {
        if self.exists(selector) {
            Ok(())
        } else {
            Err(AppError::DomError(format!("no element matches {selector}")))
        }
    }

    fn record(&self, call: DomCall) {
        self.calls.borrow_mut().push(call);
    }
}

struct FakeListener {
    active: Rc<Cell<bool>>,
    removed: Rc<Cell<usize>>,
}

impl ListenerHandle for FakeListener {
    fn remove(self: Box<Self>) {
        self.active.set(false);
        self.removed.set(self.removed.get() + 1);
    }
}

impl Dom for RecordingDom {
    fn exists(&self, selector: &str) -> bool {
        self.elements.borrow().iter().any(|element| element.contains(selector))
    }

    fn add_class(&self, selector: &str, class: &str) -> AppResult<()> {
        self.require(selector)?;
        for element in self.elements.borrow_mut().iter_mut().filter(|e| e.contains(selector)) {
            element.insert(format!(".{class}"));
        }
        self.record(DomCall::AddClass { selector: selector.to_string(), class: class.to_string() });
        Ok(())
    }

    fn set_styles(&self, selector: &str, styles: &[(&str, &str)]) -> AppResult<()> {
        self.require(selector)?;
        self.record(DomCall::SetStyles {
            selector: selector.to_string(),
            styles: styles.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        });
        Ok(())
    }

    fn set_inner_html(&self, selector: &str, html: &str) -> AppResult<()> {
        self.require(selector)?;
        self.record(DomCall::SetInnerHtml { selector: selector.to_string(), html: html.to_string() });
        Ok(())
    }

    fn append_html(&self, selector: &str, html: &str) -> AppResult<()> {
        self.require(selector)?;
        self.record(DomCall::AppendHtml { selector: selector.to_string(), html: html.to_string() });
        Ok(())
    }

    fn append_option(&self, selector: &str, option: &DropdownOption) -> AppResult<()> {
        self.require(selector)?;
        self.record(DomCall::AppendOption { selector: selector.to_string(), option: option.clone() });
        Ok(())
    }

    fn on_change(&self, scope: &str, target: &str, handler: ChangeHandler) -> AppResult<Box<dyn ListenerHandle>> {
        let active = Rc::new(Cell::new(true));
        self.handlers.borrow_mut().push(Registered {
            target: target.to_string(),
            active: Rc::clone(&active),
            handler,
        });
        self.record(DomCall::OnChange { scope: scope.to_string(), target: target.to_string() });
        Ok(Box::new(FakeListener { active, removed: Rc::clone(&self.removed_listeners) }))
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.lock().unwrap().iter().filter(|entry| entry.level == level).count()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message.clone())
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, entry: LogEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartCall {
    Mount { selector: String, data: SeriesSet },
    Update(SeriesSet),
}

#[derive(Default)]
pub struct RecordingCharts {
    calls: Rc<RefCell<Vec<ChartCall>>>,
}

impl RecordingCharts {
    pub fn calls(&self) -> Vec<ChartCall> {
        self.calls.borrow().clone()
    }
}

struct RecordingWidget {
    calls: Rc<RefCell<Vec<ChartCall>>>,
}

impl ChartWidget for RecordingWidget {
    fn update(&mut self, data: &SeriesSet) -> AppResult<()> {
        self.calls.borrow_mut().push(ChartCall::Update(data.clone()));
        Ok(())
    }
}

impl ChartPlugin for RecordingCharts {
    fn mount(&self, selector: &str, data: &SeriesSet) -> AppResult<Box<dyn ChartWidget>> {
        self.calls.borrow_mut().push(ChartCall::Mount { selector: selector.to_string(), data: data.clone() });
        Ok(Box::new(RecordingWidget { calls: Rc::clone(&self.calls) }))
    }
}

/// Data source whose subscribers are fed by hand.
#[derive(Default)]
pub struct FakeSource {
    handlers: RefCell<Vec<(CellCoordinate, Rc<Cell<bool>>, DataHandler)>>,
    kill_calls: Rc<Cell<usize>>,
}

impl FakeSource {
    pub fn subscribed_cells(&self) -> Vec<CellCoordinate> {
        self.handlers.borrow().iter().map(|(cell, _, _)| cell.clone()).collect()
    }

    /// Deliver to every live subscriber; returns how many received it.
    pub fn emit(&self, event: DataEvent) -> usize {
        let mut delivered = 0;
        for (_, killed, handler) in self.handlers.borrow_mut().iter_mut() {
            if !killed.get() {
                handler(event.clone());
                delivered += 1;
            }
        }
        delivered
    }

    pub fn kill_calls(&self) -> usize {
        self.kill_calls.get()
    }

    /// Close every feed from the source side, as a dropped socket would.
    pub fn close_all(&self) {
        for (_, killed, _) in self.handlers.borrow().iter() {
            killed.set(true);
        }
    }
}

struct FakeSubscription {
    killed: Rc<Cell<bool>>,
    kill_calls: Rc<Cell<usize>>,
}

impl CellSubscription for FakeSubscription {
    fn kill(&mut self) {
        self.kill_calls.set(self.kill_calls.get() + 1);
        self.killed.set(true);
    }

    fn is_killed(&self) -> bool {
        self.killed.get()
    }
}

impl DataSource for FakeSource {
    fn subscribe(&self, cell: &CellCoordinate, on_data: DataHandler) -> Box<dyn CellSubscription> {
        let killed = Rc::new(Cell::new(false));
        self.handlers.borrow_mut().push((cell.clone(), Rc::clone(&killed), on_data));
        Box::new(FakeSubscription { killed, kill_calls: Rc::clone(&self.kill_calls) })
    }
}

pub struct GadgetRig {
    pub dom: Rc<RecordingDom>,
    pub charts: Rc<RecordingCharts>,
    pub source: Rc<FakeSource>,
    pub logger: Arc<RecordingLogger>,
    pub ids: Rc<MonotonicIds>,
}

impl GadgetRig {
    pub fn new(hosts: &[&str]) -> Self {
        Self {
            dom: RecordingDom::with_elements(hosts),
            charts: Rc::new(RecordingCharts::default()),
            source: Rc::new(FakeSource::default()),
            logger: Arc::new(RecordingLogger::default()),
            ids: Rc::new(MonotonicIds::new()),
        }
    }

    pub fn deps(&self) -> GadgetDeps {
        GadgetDeps {
            source: self.source.clone(),
            dom: self.dom.clone(),
            charts: self.charts.clone(),
            ids: self.ids.clone(),
            logger: self.logger.clone(),
            class_prefix: "curve_gadget_".to_string(),
        }
    }
}

pub struct FormRig {
    pub dom: Rc<RecordingDom>,
    pub logger: Arc<RecordingLogger>,
    pub catalog: Rc<StaticSecurityCatalog>,
}

impl FormRig {
    pub fn new() -> Self {
        Self::with_catalog(StaticSecurityCatalog::placeholder())
    }

    pub fn with_catalog(catalog: StaticSecurityCatalog) -> Self {
        Self {
            dom: RecordingDom::with_elements(&[FORM_SELECTOR, SECURITY_DROPDOWN, IDENTIFIERS_REGION]),
            logger: Arc::new(RecordingLogger::default()),
            catalog: Rc::new(catalog),
        }
    }

    pub fn deps(&self) -> FormDeps {
        FormDeps {
            dom: self.dom.clone(),
            templates: Rc::new(StaticTemplates::builtin()),
            options: self.catalog.clone(),
            identifiers: self.catalog.clone(),
            logger: self.logger.clone(),
        }
    }
}

pub fn catalog_of(options: Vec<DropdownOption>) -> StaticSecurityCatalog {
    StaticSecurityCatalog::new(options, HashMap::new())
}
