use js_sys::{Function, Object, Reflect};
use metadata_common::dom::Scheduler;
use metadata_common::tags::{TagCommitter, TagWidget};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventInit, HtmlInputElement, KeyboardEvent, KeyboardEventInit};

use crate::dom::DomTagWidget;

const ENTER_KEY_CODE: u32 = 13;

/// Key events a user pressing Enter produces, in order.
const ENTER_SEQUENCE: [&str; 3] = ["keydown", "keypress", "keyup"];

impl TagWidget for DomTagWidget {
    fn input_text(&self) -> Option<String> {
        self.input().map(|input| input.value())
    }

    fn clear_input(&self) {
        if let Some(input) = self.input() {
            input.set_value("");
        }
    }
}

/// Commits a tag the way a user does: type the text, press Enter.
pub struct KeyboardCommitter;

impl TagCommitter<DomTagWidget> for KeyboardCommitter {
    fn commit_one_tag(&self, widget: &DomTagWidget, text: &str) {
        let Some(input) = widget.input() else {
            tracing::debug!("tag input disappeared before commit of {:?}", text);
            return;
        };
        input.set_value(text);
        if let Err(e) = type_then_enter(&input) {
            tracing::warn!("Failed to commit tag {:?}: {:?}", text, e);
        }
    }
}

fn type_then_enter(input: &HtmlInputElement) -> Result<(), JsValue> {
    let init = EventInit::new();
    init.set_bubbles(true);
    input.dispatch_event(&Event::new_with_event_init_dict("input", &init)?)?;

    for kind in ENTER_SEQUENCE {
        let init = KeyboardEventInit::new();
        init.set_key("Enter");
        init.set_code("Enter");
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict(kind, &init)?;
        // Synthetic events report keyCode/which as 0, and jQuery-based widgets
        // only look at those.
        for prop in ["keyCode", "which"] {
            let descriptor = Object::new();
            Reflect::set(&descriptor, &"value".into(), &JsValue::from(ENTER_KEY_CODE))?;
            Object::define_property(&event, &prop.into(), &descriptor);
        }
        input.dispatch_event(&event)?;
    }
    Ok(())
}

/// `window.setTimeout` on the page's event loop.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref::<Function>(),
            delay,
        ) {
            tracing::warn!("Failed to schedule task: {:?}", e);
        }
    }
}
