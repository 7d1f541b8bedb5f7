/// How a form field is rendered on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldRole {
    #[default]
    Input,
    Textarea,
    /// Textarea whose editing surface is owned by a rich-text editor.
    RichText,
}

/// Identity attributes the classifier matches patterns against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldIdentity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub classes: Vec<String>,
}

impl FieldIdentity {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Build from raw DOM attributes. Empty strings count as absent and the
    /// class attribute is split on whitespace.
    pub fn from_attributes(id: &str, name: Option<&str>, class_attr: &str) -> Self {
        Self {
            id: Some(id).filter(|s| !s.is_empty()).map(str::to_string),
            name: name.filter(|s| !s.is_empty()).map(str::to_string),
            classes: class_attr.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Key the rich-text runtime registers editors under: the id, else the name.
    pub fn editor_key(&self) -> Option<&str> {
        self.id.as_deref().or(self.name.as_deref())
    }
}

/// A form field owned by the host page.
///
/// Implementations are cheap handles; writes go straight to the element.
pub trait FieldElement {
    fn identity(&self) -> FieldIdentity;

    fn role(&self) -> FieldRole;

    /// Current raw value of the underlying input or textarea.
    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    /// Dispatch a bubbling "value changed" notification on the element.
    fn dispatch_change(&self);
}

/// Deferred execution on the host's event loop.
///
/// Tasks are fire-and-forget: nothing cancels them, and a page unload simply
/// drops whatever is still pending.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}
