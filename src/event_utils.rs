use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

/// Owns the JS closure; the listener stays attached until `detach`.
pub struct EventListenerHandle {
    target: EventTarget,
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl EventListenerHandle {
    pub fn detach(self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

pub fn event_listener_with_options(
    target: &EventTarget,
    event_name: &str,
    options: &EventOptions,
    mut cb: impl FnMut(Event) + 'static,
) -> Result<EventListenerHandle, JsValue> {
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let callback = Closure::wrap(Box::new(move |ev: Event| {
        cb(ev);
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback_and_add_event_listener_options(
        event_name,
        callback.as_ref().unchecked_ref(),
        &opts,
    )?;

    Ok(EventListenerHandle {
        target: target.clone(),
        event_name: event_name.to_string(),
        callback,
        capture: options.capture,
    })
}

/// Closest ancestor-or-self of the event target matching `selector`,
/// restricted to elements inside `scope`.
pub fn delegated_target(event: &Event, scope: &Element, selector: &str) -> Option<Element> {
    let origin = event.target()?.dyn_into::<Element>().ok()?;
    let matched = origin.closest(selector).ok()??;
    scope.contains(Some(&*matched)).then_some(matched)
}

/// Current value of a form control (select, input, or `value` attribute).
pub fn element_value(element: &Element) -> String {
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    element.get_attribute("value").unwrap_or_default()
}
