use metadata_common::dom::{FieldElement, FieldIdentity, FieldRole};
use metadata_common::watcher::WatchedNode;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventInit, EventTarget, HtmlInputElement, HtmlTextAreaElement};

/// Marks tag containers that already carry a blur listener.
const BOUND_ATTR: &str = "data-metadata-cleaner-bound";

/// Embedded text input of a tag widget; hidden inputs hold committed tags.
const TEXT_INPUT_SELECTOR: &str = "input:not([type=hidden])";

/// Events sent after a write-back: `input` for v-model style bindings,
/// `change` for dirty tracking and validation.
const CHANGE_EVENTS: [&str; 2] = ["input", "change"];

fn identity_of(element: &Element) -> FieldIdentity {
    // `className` is not a string on SVG elements; read the attribute instead.
    let class_attr = element.get_attribute("class").unwrap_or_default();
    FieldIdentity::from_attributes(
        &element.id(),
        element.get_attribute("name").as_deref(),
        &class_attr,
    )
}

fn text_input_in(container: &Element) -> Option<HtmlInputElement> {
    container
        .query_selector(TEXT_INPUT_SELECTOR)
        .ok()
        .flatten()?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// Plain input or textarea on the host page.
#[derive(Clone)]
pub struct DomField {
    element: Element,
}

impl DomField {
    /// Field for an event target, if the target is a text control.
    pub fn from_target(target: Option<EventTarget>) -> Option<Self> {
        let element = target?.dyn_into::<Element>().ok()?;
        let is_text_control = element.is_instance_of::<HtmlInputElement>()
            || element.is_instance_of::<HtmlTextAreaElement>();
        is_text_control.then_some(Self { element })
    }

    pub fn by_id(id: &str) -> Option<Self> {
        let element = web_sys::window()?.document()?.get_element_by_id(id)?;
        Self::from_target(Some(element.into()))
    }

    fn fire(&self, name: &str) -> Result<(), wasm_bindgen::JsValue> {
        let init = EventInit::new();
        init.set_bubbles(true);
        let event = Event::new_with_event_init_dict(name, &init)?;
        self.element.dispatch_event(&event)?;
        Ok(())
    }
}

impl FieldElement for DomField {
    fn identity(&self) -> FieldIdentity {
        identity_of(&self.element)
    }

    fn role(&self) -> FieldRole {
        if !self.element.is_instance_of::<HtmlTextAreaElement>() {
            return FieldRole::Input;
        }
        // Editors hide the textarea they replace.
        if self.element.get_attribute("aria-hidden").as_deref() == Some("true") {
            FieldRole::RichText
        } else {
            FieldRole::Textarea
        }
    }

    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn dispatch_change(&self) {
        for name in CHANGE_EVENTS {
            if let Err(e) = self.fire(name) {
                tracing::warn!("Failed to dispatch {} event: {:?}", name, e);
            }
        }
    }
}

/// Element as seen by the DOM watcher.
#[derive(Clone)]
pub struct DomNode {
    element: Element,
}

impl DomNode {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl WatchedNode for DomNode {
    fn identity(&self) -> FieldIdentity {
        identity_of(&self.element)
    }

    fn descendants(&self) -> Vec<Self> {
        let Ok(nodes) = self.element.query_selector_all("*") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomNode::new)
            .collect()
    }

    fn has_text_input(&self) -> bool {
        text_input_in(&self.element).is_some()
    }

    fn is_bound(&self) -> bool {
        self.element.has_attribute(BOUND_ATTR)
    }

    fn mark_bound(&self) {
        if let Err(e) = self.element.set_attribute(BOUND_ATTR, "1") {
            tracing::debug!("Failed to mark tag container: {:?}", e);
        }
    }
}

/// Tag widget container; the embedded input is looked up on every access
/// because widgets re-render it.
pub struct DomTagWidget {
    container: Element,
}

impl DomTagWidget {
    pub fn new(container: Element) -> Self {
        Self { container }
    }

    pub fn input(&self) -> Option<HtmlInputElement> {
        text_input_in(&self.container)
    }
}
