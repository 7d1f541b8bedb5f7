use crate::dom::FieldElement;

/// Tells host-side listeners that a field's value was rewritten.
///
/// Host forms track dirty state and run validation from user-driven change
/// events only, so every write-back is followed by a synthetic one.
pub trait ChangeTrigger {
    fn fire(&self, field: &dyn FieldElement);
}

/// Dispatches the element's own bubbling change event.
#[derive(Clone, Copy, Debug, Default)]
pub struct BubblingChange;

impl ChangeTrigger for BubblingChange {
    fn fire(&self, field: &dyn FieldElement) {
        tracing::trace!(field = ?field.identity().id, "dispatching change");
        field.dispatch_change();
    }
}
