#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use analytics_console_wasm::application::{FormDeps, TradeForm, FORM_SELECTOR, IDENTIFIERS_REGION};
use analytics_console_wasm::domain::{
    blotter::{DropdownOption, StaticSecurityCatalog},
    dom::Dom,
    logging::GlobalLogger,
    outcome::Outcome,
};
use analytics_console_wasm::infrastructure::{BrowserDom, StaticTemplates};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlSelectElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(id: &str, inner: &str) -> web_sys::Element {
    let document = gloo::utils::document();
    let host = document.create_element("div").unwrap();
    host.set_id(id);
    host.set_inner_html(inner);
    document.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
fn add_class_and_exists_follow_the_document() {
    let host = fixture("dom-probe", r#"<div id="probe-target"></div>"#);
    let dom = BrowserDom::new().unwrap();

    assert!(dom.exists("#probe-target"));
    assert!(!dom.exists(".probe-marker"));
    dom.add_class("#probe-target", "probe-marker").unwrap();
    assert!(dom.exists(".probe-marker"));
    assert!(dom.add_class("#nowhere", "x").is_err());

    host.remove();
    assert!(!dom.exists(".probe-marker"));
}

#[wasm_bindgen_test]
fn options_append_in_order() {
    let host = fixture("dom-options", r#"<select id="probe-select"></select>"#);
    let dom = BrowserDom::new().unwrap();
    dom.append_option("#probe-select", &DropdownOption::new("A", "Alpha")).unwrap();
    dom.append_option("#probe-select", &DropdownOption::new("B", "Beta")).unwrap();

    let select = gloo::utils::document()
        .get_element_by_id("probe-select")
        .unwrap()
        .dyn_into::<HtmlSelectElement>()
        .unwrap();
    assert_eq!(select.length(), 2);
    select.set_selected_index(1);
    assert_eq!(select.value(), "B");
    host.remove();
}

#[wasm_bindgen_test]
fn trade_form_follows_dropdown_changes() {
    let host = fixture("form-probe", r#"<div class="blotter-form-block"></div>"#);
    let dom = Rc::new(BrowserDom::new().unwrap());
    let catalog = Rc::new(StaticSecurityCatalog::placeholder());
    let deps = FormDeps {
        dom: dom.clone(),
        templates: Rc::new(StaticTemplates::builtin()),
        options: catalog.clone(),
        identifiers: catalog,
        logger: GlobalLogger::shared(),
    };
    let mut form = TradeForm::mount(deps).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    form.on_security_selected(move |value| sink.borrow_mut().push(value.to_string()));

    let select = gloo::utils::document()
        .query_selector(&format!("{FORM_SELECTOR} select"))
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlSelectElement>()
        .unwrap();
    assert_eq!(select.length(), 3);

    select.set_value("MSFT");
    let change = Event::new_with_event_init_dict("change", web_sys::EventInit::new().bubbles(true)).unwrap();
    select.dispatch_event(&change).unwrap();

    let region = gloo::utils::document().query_selector(IDENTIFIERS_REGION).unwrap().unwrap();
    assert!(region.inner_html().contains("594918104"));
    assert_eq!(*seen.borrow(), vec!["MSFT"]);

    assert_eq!(form.select_security("UNKNOWN"), Outcome::Cleared);
    assert_eq!(region.inner_html(), "");

    form.kill();
    select.dispatch_event(&change).unwrap();
    assert_eq!(seen.borrow().len(), 1);
    host.remove();
}
