use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::{
    blotter::{
        render_identifier_rows, BlockKind, Form, FormConfig, IdentifierTable, OptionSource,
        TemplateRenderer,
    },
    dom::{Dom, ListenerHandle},
    errors::{AppError, AppResult},
    logging::{LogComponent, Logger, SharedLogger},
    outcome::{Outcome, SkipReason},
};

pub const FORM_TEMPLATE: &str = "blotter.forms.trade";
pub const FORM_SELECTOR: &str = ".blotter-form-block";
pub const SECURITY_DROPDOWN: &str = ".blotter-security-select";
pub const IDENTIFIERS_REGION: &str = ".blotter-blocks-security-ids";

const COMPONENT: LogComponent = LogComponent::Application("TradeForm");

/// Collaborators the trade form is assembled from.
#[derive(Clone)]
pub struct FormDeps {
    pub dom: Rc<dyn Dom>,
    pub templates: Rc<dyn TemplateRenderer>,
    pub options: Rc<dyn OptionSource>,
    pub identifiers: Rc<dyn IdentifierTable>,
    pub logger: SharedLogger,
}

type SelectionObserver = Box<dyn FnMut(&str)>;

/// Keeps the identifiers block in sync with the security dropdown.
struct SecuritySelection {
    deps: FormDeps,
    observers: RefCell<Vec<SelectionObserver>>,
}

impl SecuritySelection {
    fn apply(&self, value: &str) -> Outcome {
        let (html, outcome) = match self.deps.identifiers.identifiers(value) {
            Some(ids) => (render_identifier_rows(&ids), Outcome::Replaced),
            None => {
                self.deps.logger.debug(COMPONENT, &format!("no identifiers for '{value}', clearing block"));
                (String::new(), Outcome::Cleared)
            }
        };

        let outcome = match self.deps.dom.set_inner_html(IDENTIFIERS_REGION, &html) {
            Ok(()) => outcome,
            Err(e) => {
                self.deps.logger.warn(COMPONENT, &format!("identifier refresh failed: {e}"));
                Outcome::Skipped(SkipReason::DomFailure(e.to_string()))
            }
        };

        for observer in self.observers.borrow_mut().iter_mut() {
            observer(value);
        }
        outcome
    }
}

/// Trade blotter form: portfolio, security, trade fields, security
/// identifiers and attributes, with the identifiers following the selected
/// security.
pub struct TradeForm {
    title: &'static str,
    form: Option<Form>,
    listeners: Vec<Box<dyn ListenerHandle>>,
    selection: Rc<SecuritySelection>,
}

impl TradeForm {
    pub fn new(deps: FormDeps) -> Self {
        Self {
            title: "Trade",
            form: None,
            listeners: Vec::new(),
            selection: Rc::new(SecuritySelection { deps, observers: RefCell::new(Vec::new()) }),
        }
    }

    /// Create and immediately load the form.
    pub fn mount(deps: FormDeps) -> AppResult<Self> {
        let mut trade_form = Self::new(deps);
        trade_form.load()?;
        Ok(trade_form)
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.form.is_some()
    }

    /// Build the blocks, render them and wire the dropdown.
    pub fn load(&mut self) -> AppResult<()> {
        if self.form.is_some() {
            return Err(AppError::StateError("trade form already loaded".to_string()));
        }
        let deps = self.selection.deps.clone();

        let mut form = Form::new(FormConfig::new(FORM_TEMPLATE, FORM_SELECTOR));
        form.push(BlockKind::Portfolio)?;
        let security = form.push(BlockKind::Security)?;
        form.push(BlockKind::TradeFields)?;
        form.push(BlockKind::SecurityIds)?;
        form.push(BlockKind::Attributes)?;

        {
            let dom = Rc::clone(&deps.dom);
            let options = Rc::clone(&deps.options);
            let logger = deps.logger.clone();
            form.on_loaded(move || {
                let mut appended = 0;
                for option in options.options() {
                    match dom.append_option(SECURITY_DROPDOWN, &option) {
                        Ok(()) => appended += 1,
                        Err(e) => logger.warn(COMPONENT, &format!("option {} not added: {e}", option.value)),
                    }
                }
                logger.debug(COMPONENT, &format!("security dropdown populated with {appended} options"));
            });
        }

        form.dom(deps.dom.as_ref(), deps.templates.as_ref())?;

        let selection = Rc::clone(&self.selection);
        let listener = form.on_change(
            deps.dom.as_ref(),
            security,
            SECURITY_DROPDOWN,
            Box::new(move |event| {
                selection.apply(&event.value);
            }),
        )?;
        self.listeners.push(listener);
        self.form = Some(form);

        deps.logger.info(COMPONENT, &format!("📝 {} form loaded", self.title));
        Ok(())
    }

    /// Same path the dropdown's change listener takes.
    pub fn select_security(&self, value: &str) -> Outcome {
        if self.form.is_none() {
            return Outcome::Skipped(SkipReason::HostDetached);
        }
        self.selection.apply(value)
    }

    /// Observe every security selection after the identifiers were refreshed.
    pub fn on_security_selected(&self, observer: impl FnMut(&str) + 'static) {
        self.selection.observers.borrow_mut().push(Box::new(observer));
    }

    /// Detach listeners and drop the form. Safe to call repeatedly.
    pub fn kill(&mut self) {
        if self.form.is_none() && self.listeners.is_empty() {
            return;
        }
        let removed = self.listeners.len();
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        self.form = None;
        self.selection.deps.logger.debug(COMPONENT, &format!("form killed, {removed} listener(s) removed"));
    }
}
