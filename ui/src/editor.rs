use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use metadata_common::editor::EditorRuntime;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Global the rich-text editor runtime installs on `window`.
const RUNTIME_GLOBAL: &str = "tinymce";

/// TinyMCE-shaped editor runtime, reached only through instance lookup,
/// `getContent`/`setContent` and its event hooks.
pub struct TinyMceRuntime {
    global: JsValue,
}

impl TinyMceRuntime {
    /// Resolve the runtime once at start-up; `None` when the page has none.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let global = Reflect::get(&window, &JsValue::from_str(RUNTIME_GLOBAL)).ok()?;
        if global.is_undefined() || global.is_null() {
            return None;
        }
        Some(Self { global })
    }

    fn editor(&self, key: &str) -> Option<JsValue> {
        let editor = call(&self.global, "get", &Array::of1(&JsValue::from_str(key))).ok()?;
        (!editor.is_undefined() && !editor.is_null()).then_some(editor)
    }

    /// Editors already attached when the runtime was detected.
    fn editors(&self) -> Vec<JsValue> {
        match call(&self.global, "get", &Array::new()) {
            Ok(all) if Array::is_array(&all) => Array::from(&all).iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl EditorRuntime for TinyMceRuntime {
    fn has_instance(&self, key: &str) -> bool {
        self.editor(key).is_some()
    }

    fn content(&self, key: &str) -> Option<String> {
        let editor = self.editor(key)?;
        call(&editor, "getContent", &Array::new()).ok()?.as_string()
    }

    fn set_content(&self, key: &str, value: &str) -> bool {
        let Some(editor) = self.editor(key) else {
            return false;
        };
        if let Err(e) = call(&editor, "setContent", &Array::of1(&JsValue::from_str(value))) {
            tracing::warn!("Editor {} rejected setContent: {:?}", key, e);
            return false;
        }
        // Keep the backing textarea in step with the editor document.
        if let Err(e) = call(&editor, "save", &Array::new()) {
            tracing::debug!("Editor {} save failed: {:?}", key, e);
        }
        true
    }

    fn subscribe_blur(&self, callback: Box<dyn Fn(&str)>) {
        let callback: Rc<dyn Fn(&str)> = Rc::from(callback);

        for editor in self.editors() {
            on_editor_blur(&editor, Rc::clone(&callback));
        }

        let on_add = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            match Reflect::get(&event, &JsValue::from_str("editor")) {
                Ok(editor) if !editor.is_undefined() => on_editor_blur(&editor, Rc::clone(&callback)),
                _ => tracing::debug!("AddEditor event without editor"),
            }
        });
        let args = Array::of2(&JsValue::from_str("AddEditor"), on_add.as_ref());
        if let Err(e) = call(&self.global, "on", &args) {
            tracing::warn!("Failed to watch for new editors: {:?}", e);
        }
        on_add.forget();
    }
}

fn on_editor_blur(editor: &JsValue, callback: Rc<dyn Fn(&str)>) {
    let Some(id) = Reflect::get(editor, &JsValue::from_str("id"))
        .ok()
        .and_then(|id| id.as_string())
    else {
        return;
    };

    let on_blur = Closure::<dyn FnMut()>::new(move || callback(id.as_str()));
    let args = Array::of2(&JsValue::from_str("blur"), on_blur.as_ref());
    match call(editor, "on", &args) {
        Ok(_) => on_blur.forget(),
        Err(e) => tracing::warn!("Failed to watch editor blur: {:?}", e),
    }
}

fn call(target: &JsValue, method: &str, args: &Array) -> Result<JsValue, JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    function.apply(target, args)
}
