use std::rc::Rc;

use metadata_common::binder::EventBinder;
use metadata_common::tags::TagInputBridge;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement};

use crate::dom::{DomField, DomNode, DomTagWidget};

/// Attach the two delegated "field left" listeners to `document`.
///
/// Both listen in the capture phase: some host widgets stop propagation
/// before a bubbling listener at the root would ever see the event.
pub fn bind_document_listeners(document: &Document, binder: Rc<EventBinder>) -> Result<(), JsValue> {
    let text_binder = Rc::clone(&binder);
    let on_text_left = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(field) = DomField::from_target(event.target()) {
            text_binder.on_text_field_left(&field);
        }
    });
    document.add_event_listener_with_callback_and_bool(
        "blur",
        on_text_left.as_ref().unchecked_ref(),
        true,
    )?;
    on_text_left.forget();

    let on_keywords_left = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(field) = DomField::from_target(event.target()) {
            binder.on_keywords_field_left(&field);
        }
    });
    document.add_event_listener_with_callback_and_bool(
        "blur",
        on_keywords_left.as_ref().unchecked_ref(),
        true,
    )?;
    on_keywords_left.forget();

    Ok(())
}

/// Route the editor runtime's own blur notifications to the binder; editors
/// replace the textarea, so the DOM listeners never see those.
pub fn bind_editor_blur(binder: &Rc<EventBinder>) {
    let Some(runtime) = binder.editor().runtime() else {
        return;
    };
    let subscriber = Rc::clone(binder);
    runtime.subscribe_blur(Box::new(move |key: &str| match DomField::by_id(key) {
        Some(field) => {
            subscriber.on_editor_left(&field);
        }
        None => tracing::debug!("No field element for editor {}", key),
    }));
}

/// Focus-leave listener on a tag widget's container.
///
/// `focusout` bubbles, so an input the widget re-renders after binding is
/// still covered without rebinding.
pub fn bind_tag_widget(node: &DomNode, bridge: Rc<TagInputBridge<DomTagWidget>>) {
    let widget = Rc::new(DomTagWidget::new(node.element().clone()));
    let on_left = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let from_text_input = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .is_some_and(|input| input.type_() != "hidden");
        if !from_text_input {
            return;
        }
        let outcome = bridge.on_widget_left(Rc::clone(&widget));
        tracing::debug!("Tag input left: {:?}", outcome);
    });
    if let Err(e) = node
        .element()
        .add_event_listener_with_callback("focusout", on_left.as_ref().unchecked_ref())
    {
        tracing::warn!("Failed to bind tag input: {:?}", e);
        return;
    }
    on_left.forget();
}
