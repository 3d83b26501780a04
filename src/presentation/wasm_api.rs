use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use super::wiring::{browser_form_deps, browser_gadget_deps};
use crate::application::{CurveGadget, TradeForm};
use crate::domain::{
    gadgets::{DataEvent, GadgetConfig},
    logging::{LogComponent, get_logger},
};
use crate::global_state::{console_config, gadget_manager, live_gadgets};
use leptos::SignalSet;

// WASM API для взаимодействия с JavaScript
// Минимальная логика - только мост к application слою

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    let json = js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("value is not JSON-serializable"))?;
    serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Trade blotter form mounted into `.blotter-form-block`
#[wasm_bindgen]
pub struct TradeFormApi {
    form: TradeForm,
}

#[wasm_bindgen]
impl TradeFormApi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<TradeFormApi, JsValue> {
        let form = TradeForm::mount(browser_form_deps()?)?;
        Ok(Self { form })
    }

    pub fn title(&self) -> String {
        self.form.title().to_string()
    }

    /// Returns the handler outcome, e.g. `"replaced"` or `"cleared"`.
    #[wasm_bindgen(js_name = selectSecurity)]
    pub fn select_security(&self, value: &str) -> String {
        self.form.select_security(value).to_string()
    }

    pub fn kill(&mut self) {
        self.form.kill();
    }
}

/// Curve gadget bound to one analytics cell
#[wasm_bindgen]
pub struct CurveGadgetApi {
    gadget: CurveGadget,
}

#[wasm_bindgen]
impl CurveGadgetApi {
    /// `config`: `{source, row, col, selector, child?}`. Renders an empty
    /// chart right away when the host exists.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CurveGadgetApi, JsValue> {
        let config: GadgetConfig = from_js(&config)?;
        let deps = browser_gadget_deps(&console_config())?;
        let manager = gadget_manager();
        let gadget = CurveGadget::new(config, deps, &manager);
        gadget.resize();
        live_gadgets().set(manager.len());
        Ok(Self { gadget })
    }

    /// Feed a `{"t": .., "v": ..}` payload by hand.
    #[wasm_bindgen(js_name = onData)]
    pub fn on_data(&self, payload: &str) -> Result<String, JsValue> {
        let event: DataEvent = serde_json::from_str(payload).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.gadget.on_data(event).to_string())
    }

    pub fn resize(&self) -> String {
        self.gadget.resize().to_string()
    }

    pub fn alive(&self) -> bool {
        self.gadget.alive()
    }

    pub fn dispose(&self) {
        self.gadget.dispose();
    }

    pub fn marker(&self) -> String {
        self.gadget.marker().class().to_string()
    }

    pub fn state(&self) -> String {
        self.gadget.state().to_string()
    }
}

/// Run one liveness sweep now; returns the number of live gadgets.
#[wasm_bindgen(js_name = sweepGadgets)]
pub fn sweep_gadgets() -> usize {
    let live = gadget_manager().sweep();
    live_gadgets().set(live);
    get_logger().debug(LogComponent::Presentation("WasmApi"), &format!("manual sweep: {live} alive"));
    live
}

/// Re-render every registered gadget.
#[wasm_bindgen(js_name = resizeGadgets)]
pub fn resize_gadgets() {
    gadget_manager().resize_all();
}
