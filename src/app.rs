use leptos::html::Div;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    application::{CurveGadget, TradeForm},
    domain::{
        gadgets::GadgetConfig,
        logging::{LogComponent, get_logger},
    },
    global_state::{console_config, gadget_manager, live_gadgets, selected_security},
    presentation::wiring::{browser_form_deps, browser_gadget_deps},
};

/// 🦀 Консоль: бланк сделки + кривая
#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>
            {r#"
            .analytics-console {
                font-family: -apple-system, BlinkMacSystemFont, sans-serif;
                background: #14181f;
                color: #e6e6e6;
                min-height: 100vh;
                padding: 16px;
            }
            .blotter-form-block fieldset {
                border: 1px solid #2c3440;
                margin-bottom: 8px;
            }
            .curve-panel {
                position: relative;
                height: 260px;
                margin-top: 16px;
                border: 1px solid #2c3440;
            }
            .console-status {
                margin-top: 12px;
                font-size: 12px;
                color: #9aa4b2;
            }
            "#}
        </style>
        <div class="analytics-console">
            <TradeBlotter />
            <CurvePanel source="primitives" row=0 col=0 />
            <StatusLine />
        </div>
    }
}

/// 📝 Trade blotter form; killed when the component unmounts
#[component]
pub fn TradeBlotter() -> impl IntoView {
    let host = create_node_ref::<Div>();
    let form: Rc<RefCell<Option<TradeForm>>> = Rc::new(RefCell::new(None));

    let slot = Rc::clone(&form);
    create_effect(move |_| {
        if host.get().is_none() || slot.borrow().is_some() {
            return;
        }
        match browser_form_deps().and_then(TradeForm::mount) {
            Ok(trade_form) => {
                let selected = selected_security();
                trade_form.on_security_selected(move |value| selected.set(Some(value.to_string())));
                *slot.borrow_mut() = Some(trade_form);
            }
            Err(e) => get_logger().error(
                LogComponent::Presentation("TradeBlotter"),
                &format!("❌ Failed to load trade form: {e}"),
            ),
        }
    });

    on_cleanup(move || {
        if let Some(mut trade_form) = form.borrow_mut().take() {
            trade_form.kill();
        }
    });

    view! { <div class="blotter-form-block" node_ref=host></div> }
}

/// 📈 Curve gadget for one analytics cell; disposed on unmount
#[component]
pub fn CurvePanel(#[prop(into)] source: String, row: u32, col: u32) -> impl IntoView {
    let host = create_node_ref::<Div>();
    let host_id = format!(
        "curve-host-{}-{row}-{col}",
        source.chars().filter(|c| c.is_ascii_alphanumeric()).collect::<String>()
    );
    let config = GadgetConfig { source, row, col, selector: format!("#{host_id}"), child: false };
    let gadget: Rc<RefCell<Option<CurveGadget>>> = Rc::new(RefCell::new(None));

    let slot = Rc::clone(&gadget);
    create_effect(move |_| {
        if host.get().is_none() || slot.borrow().is_some() {
            return;
        }
        match browser_gadget_deps(&console_config()) {
            Ok(deps) => {
                let manager = gadget_manager();
                let curve = CurveGadget::new(config.clone(), deps, &manager);
                // place the liveness marker before the first sweep
                curve.resize();
                live_gadgets().set(manager.len());
                *slot.borrow_mut() = Some(curve);
            }
            Err(e) => get_logger().error(
                LogComponent::Presentation("CurvePanel"),
                &format!("❌ Failed to start curve gadget: {e}"),
            ),
        }
    });

    on_cleanup(move || {
        if let Some(curve) = gadget.borrow_mut().take() {
            curve.dispose();
        }
    });

    view! {
        <div class="curve-panel">
            <div id=host_id class="curve-host" node_ref=host></div>
        </div>
    }
}

#[component]
pub fn StatusLine() -> impl IntoView {
    let selected = selected_security();
    let live = live_gadgets();

    view! {
        <div class="console-status">
            <span>"Security: " {move || selected.get().unwrap_or_else(|| "none".to_string())}</span>
            <span>" • Live gadgets: " {move || live.get().to_string()}</span>
        </div>
    }
}
