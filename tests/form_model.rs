mod common;

use std::cell::Cell;
use std::rc::Rc;

use analytics_console_wasm::domain::blotter::{BlockKind, Extras, Form, FormConfig};
use analytics_console_wasm::infrastructure::StaticTemplates;
use common::{DomCall, RecordingDom};

fn trade_form() -> Form {
    Form::new(FormConfig::new("blotter.forms.trade", "#form"))
}

#[test]
fn blocks_render_once() {
    let dom = RecordingDom::with_elements(&["#form"]);
    let templates = StaticTemplates::builtin();
    let mut form = trade_form();
    let portfolio = form.push(BlockKind::Portfolio).unwrap();

    form.dom(dom.as_ref(), &templates).unwrap();
    assert!(form.is_rendered());
    assert!(form.block(portfolio).unwrap().is_rendered());

    assert!(form.dom(dom.as_ref(), &templates).is_err());
    assert!(form.push(BlockKind::Attributes).is_err());
    assert_eq!(form.children().len(), 1);

    let appends = dom.calls().iter().filter(|c| matches!(c, DomCall::AppendHtml { .. })).count();
    assert_eq!(appends, 1);
}

#[test]
fn root_template_replaces_container_content() {
    let dom = RecordingDom::with_elements(&["#form"]);
    let mut form = trade_form();
    form.push(BlockKind::Security).unwrap();
    form.dom(dom.as_ref(), &StaticTemplates::builtin()).unwrap();

    assert!(matches!(&dom.calls()[0], DomCall::SetInnerHtml { selector, .. } if selector == "#form"));
}

#[test]
fn loaded_handlers_fire_once_after_render() {
    let dom = RecordingDom::with_elements(&["#form"]);
    let templates = StaticTemplates::builtin();
    let fired = Rc::new(Cell::new(0));
    let mut form = trade_form();
    form.push_with(BlockKind::TradeFields, Extras::new()).unwrap();

    let counter = Rc::clone(&fired);
    form.on_loaded(move || counter.set(counter.get() + 1));
    assert_eq!(fired.get(), 0);

    form.dom(dom.as_ref(), &templates).unwrap();
    let _ = form.dom(dom.as_ref(), &templates);
    assert_eq!(fired.get(), 1);
}

#[test]
fn unknown_template_aborts_render() {
    let dom = RecordingDom::with_elements(&["#form"]);
    let mut form = Form::new(FormConfig::new("blotter.forms.unknown", "#form"));
    form.push(BlockKind::Portfolio).unwrap();

    assert!(form.dom(dom.as_ref(), &StaticTemplates::builtin()).is_err());
    assert!(!form.is_rendered());
}

#[test]
fn change_listeners_are_scoped_to_block_region() {
    let dom = RecordingDom::with_elements(&["#form"]);
    let mut form = trade_form();
    form.push(BlockKind::Portfolio).unwrap();
    let security = form.push(BlockKind::Security).unwrap();
    form.dom(dom.as_ref(), &StaticTemplates::builtin()).unwrap();

    assert_eq!(form.region_selector(security).as_deref(), Some("#form .form-block-1"));
    let _listener = form.on_change(dom.as_ref(), security, "select", Box::new(|_| {})).unwrap();
    assert!(dom.calls().contains(&DomCall::OnChange {
        scope: "#form .form-block-1".to_string(),
        target: "select".to_string(),
    }));
}
