use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::domain::{
    blotter::DropdownOption,
    dom::{ChangeEvent, ChangeHandler, Dom, ListenerHandle},
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
};
use crate::event_utils::{
    EventListenerHandle, EventOptions, delegated_target, element_value, event_listener_with_options,
};

/// `Dom` over the live browser document
#[derive(Clone)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new() -> AppResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| AppError::DomError("Document not available".to_string()))?;
        Ok(Self { document })
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    fn query_all(&self, selector: &str) -> AppResult<Vec<Element>> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|e| AppError::DomError(format!("invalid selector {selector}: {e:?}")))?;
        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    /// Like `query_all` but an empty match is an error.
    fn query_some(&self, selector: &str) -> AppResult<Vec<Element>> {
        let elements = self.query_all(selector)?;
        if elements.is_empty() {
            return Err(AppError::DomError(format!("no element matches {selector}")));
        }
        Ok(elements)
    }
}

impl Dom for BrowserDom {
    fn exists(&self, selector: &str) -> bool {
        matches!(self.document.query_selector(selector), Ok(Some(_)))
    }

    fn add_class(&self, selector: &str, class: &str) -> AppResult<()> {
        for element in self.query_some(selector)? {
            element
                .class_list()
                .add_1(class)
                .map_err(|e| AppError::DomError(format!("add class {class}: {e:?}")))?;
        }
        Ok(())
    }

    fn set_styles(&self, selector: &str, styles: &[(&str, &str)]) -> AppResult<()> {
        for element in self.query_some(selector)? {
            let Some(html) = element.dyn_ref::<HtmlElement>() else { continue };
            let style = html.style();
            for (property, value) in styles {
                style
                    .set_property(property, value)
                    .map_err(|e| AppError::DomError(format!("style {property}: {e:?}")))?;
            }
        }
        Ok(())
    }

    fn set_inner_html(&self, selector: &str, html: &str) -> AppResult<()> {
        for element in self.query_some(selector)? {
            element.set_inner_html(html);
        }
        Ok(())
    }

    fn append_html(&self, selector: &str, html: &str) -> AppResult<()> {
        for element in self.query_some(selector)? {
            element
                .insert_adjacent_html("beforeend", html)
                .map_err(|e| AppError::DomError(format!("append into {selector}: {e:?}")))?;
        }
        Ok(())
    }

    fn append_option(&self, selector: &str, option: &DropdownOption) -> AppResult<()> {
        for select in self.query_some(selector)? {
            let node = self
                .document
                .create_element("option")
                .map_err(|e| AppError::DomError(format!("create option: {e:?}")))?;
            node.set_attribute("value", &option.value)
                .map_err(|e| AppError::DomError(format!("option value: {e:?}")))?;
            node.set_text_content(Some(&option.label));
            select
                .append_child(&node)
                .map_err(|e| AppError::DomError(format!("append option: {e:?}")))?;
        }
        Ok(())
    }

    fn on_change(&self, scope: &str, target: &str, mut handler: ChangeHandler) -> AppResult<Box<dyn ListenerHandle>> {
        let scope_element = self
            .document
            .query_selector(scope)
            .ok()
            .flatten()
            .ok_or_else(|| AppError::DomError(format!("no element matches {scope}")))?;

        let delegate_scope = scope_element.clone();
        let target = target.to_string();
        let handle = event_listener_with_options(
            scope_element.as_ref(),
            "change",
            &EventOptions::default(),
            move |event| {
                if let Some(element) = delegated_target(&event, &delegate_scope, &target) {
                    handler(ChangeEvent::new(target.clone(), element_value(&element)));
                }
            },
        )
        .map_err(|e| AppError::DomError(format!("listen on {scope}: {e:?}")))?;

        get_logger().debug(
            LogComponent::Infrastructure("BrowserDom"),
            &format!("change listener attached on {scope}"),
        );
        Ok(Box::new(handle))
    }
}

impl ListenerHandle for EventListenerHandle {
    fn remove(self: Box<Self>) {
        self.detach();
    }
}
