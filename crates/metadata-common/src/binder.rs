use std::rc::Rc;

use crate::change::ChangeTrigger;
use crate::classifier::{FieldClassifier, FieldKind};
use crate::dom::{FieldElement, FieldRole};
use crate::editor::EditorAdapter;
use crate::transform::{self, Normalization};

/// Handlers behind the document-level "field left" listeners.
///
/// Normalization is synchronous: each handler reads, normalizes and writes
/// back before it returns, so a field is never left half-processed between
/// two blur events. Every handler returns `None` when the field is not its
/// kind, and `Some` with the computed result otherwise, written or not.
pub struct EventBinder {
    classifier: Rc<FieldClassifier>,
    editor: EditorAdapter,
    trigger: Rc<dyn ChangeTrigger>,
}

impl EventBinder {
    pub fn new(
        classifier: Rc<FieldClassifier>,
        editor: EditorAdapter,
        trigger: Rc<dyn ChangeTrigger>,
    ) -> Self {
        Self {
            classifier,
            editor,
            trigger,
        }
    }

    pub fn editor(&self) -> &EditorAdapter {
        &self.editor
    }

    /// Title and abstract fields, read and written through the editor adapter.
    pub fn on_text_field_left(&self, field: &dyn FieldElement) -> Option<Normalization> {
        let kind = self.classifier.classify(&field.identity())?;
        if !matches!(kind, FieldKind::Title | FieldKind::Abstract) {
            return None;
        }

        let current = self.editor.get_content(field);
        let normalization = kind.normalize(&current);
        if self.editor.needs_write(field, &normalization) {
            self.editor.set_content(field, &normalization.normalized);
            self.trigger.fire(field);
            tracing::debug!(?kind, id = ?field.identity().id, "normalized field");
        }
        Some(normalization)
    }

    /// Legacy keyword fields: split, dedup and rejoin with `", "`, written
    /// straight to the field value.
    ///
    /// A textarea owned by a rich-text editor is skipped; the editor would
    /// overwrite the value on its next save.
    pub fn on_keywords_field_left(&self, field: &dyn FieldElement) -> Option<Normalization> {
        if field.role() == FieldRole::RichText
            || !self
                .classifier
                .matches_kind(&field.identity(), FieldKind::Keywords)
        {
            return None;
        }

        let current = field.value();
        let keywords = transform::normalize_keywords(&current);
        let normalization = Normalization::new(current, transform::join_keywords(&keywords));
        if normalization.changed {
            field.set_value(&normalization.normalized);
            self.trigger.fire(field);
            tracing::debug!(count = keywords.len(), "normalized keyword field");
        }
        Some(normalization)
    }

    /// Blur reported by the rich-text runtime rather than the DOM.
    pub fn on_editor_left(&self, field: &dyn FieldElement) -> Option<Normalization> {
        self.on_text_field_left(field)
    }
}
