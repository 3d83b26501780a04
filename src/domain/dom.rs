//! DOM port: the narrow slice of element selection, styling and event
//! delegation the console needs. Browser code implements it with `web_sys`,
//! tests with a recording fake.

use crate::domain::blotter::DropdownOption;
use crate::domain::errors::AppResult;

/// A `change` event delivered through delegation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Selector the handler was registered with.
    pub target: String,
    /// Current value of the element that fired.
    pub value: String,
}

impl ChangeEvent {
    pub fn new(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self { target: target.into(), value: value.into() }
    }
}

pub type ChangeHandler = Box<dyn FnMut(ChangeEvent)>;

/// Keeps a delegated listener attached until removed.
pub trait ListenerHandle {
    fn remove(self: Box<Self>);
}

pub trait Dom {
    /// Whether any element currently matches `selector`.
    fn exists(&self, selector: &str) -> bool;

    fn add_class(&self, selector: &str, class: &str) -> AppResult<()>;

    fn set_styles(&self, selector: &str, styles: &[(&str, &str)]) -> AppResult<()>;

    fn set_inner_html(&self, selector: &str, html: &str) -> AppResult<()>;

    fn append_html(&self, selector: &str, html: &str) -> AppResult<()>;

    fn append_option(&self, selector: &str, option: &DropdownOption) -> AppResult<()>;

    /// Delegates `change` events fired by elements matching `target` inside
    /// the first element matching `scope`.
    fn on_change(&self, scope: &str, target: &str, handler: ChangeHandler) -> AppResult<Box<dyn ListenerHandle>>;
}
