use std::rc::Rc;

use crate::dom::FieldElement;
use crate::transform::{self, Normalization};

/// Optional rich-text editor runtime present on the page.
///
/// Editors are registered under the field's id (or name when there is no id).
pub trait EditorRuntime {
    fn has_instance(&self, key: &str) -> bool;

    fn content(&self, key: &str) -> Option<String>;

    /// Returns false when no editor took the write.
    fn set_content(&self, key: &str, value: &str) -> bool;

    /// Register `callback` for "editor lost focus", including on editors
    /// attached after this call. The callback receives the editor key.
    fn subscribe_blur(&self, callback: Box<dyn Fn(&str)>);
}

/// Routes field reads and writes through an active editor, or straight to the
/// field value when none is attached.
///
/// Assigning the raw value of an editor-backed textarea desyncs the editor's
/// document model, so every read and write goes through here.
#[derive(Clone, Default)]
pub struct EditorAdapter {
    runtime: Option<Rc<dyn EditorRuntime>>,
}

impl EditorAdapter {
    pub fn new(runtime: Option<Rc<dyn EditorRuntime>>) -> Self {
        Self { runtime }
    }

    /// Adapter for pages without any editor runtime.
    pub fn plain() -> Self {
        Self { runtime: None }
    }

    pub fn runtime(&self) -> Option<&Rc<dyn EditorRuntime>> {
        self.runtime.as_ref()
    }

    pub fn has_active_editor(&self, field: &dyn FieldElement) -> bool {
        self.active_key(field).is_some()
    }

    pub fn get_content(&self, field: &dyn FieldElement) -> String {
        self.active_key(field)
            .and_then(|key| self.runtime.as_ref()?.content(&key))
            .unwrap_or_else(|| field.value())
    }

    pub fn set_content(&self, field: &dyn FieldElement, value: &str) {
        if let (Some(key), Some(runtime)) = (self.active_key(field), self.runtime.as_ref()) {
            if runtime.set_content(&key, value) {
                return;
            }
            tracing::debug!(key = %key, "editor rejected write, falling back to field value");
        }
        field.set_value(value);
    }

    /// Whether `normalization` has to be written back to `field`.
    ///
    /// An active editor wraps whatever it is given in its own block markup, so
    /// its content never equals the plain normalized string. For those fields
    /// only the rendered text is compared.
    pub fn needs_write(&self, field: &dyn FieldElement, normalization: &Normalization) -> bool {
        if !normalization.changed {
            return false;
        }
        if self.has_active_editor(field) {
            return transform::strip_html(&normalization.original) != normalization.normalized;
        }
        true
    }

    fn active_key(&self, field: &dyn FieldElement) -> Option<String> {
        let runtime = self.runtime.as_ref()?;
        let identity = field.identity();
        let key = identity.editor_key()?;
        runtime.has_instance(key).then(|| key.to_string())
    }
}
