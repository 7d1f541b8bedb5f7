use regex::Regex;

use crate::config::PatternTable;
use crate::dom::FieldIdentity;
use crate::error::{Error, Result};
use crate::transform::{self, Normalization};

/// What a form field holds, as far as normalization is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Title, prefix and subtitle fields.
    Title,
    Abstract,
    /// Legacy plain-text keyword field holding a separated list.
    Keywords,
    /// Container of a tag-input widget.
    TagInput,
}

impl FieldKind {
    /// Normalize `raw` with this kind's rules. Keyword kinds are joined back
    /// into the stored `", "`-separated form.
    pub fn normalize(self, raw: &str) -> Normalization {
        let normalized = match self {
            FieldKind::Title => transform::normalize_title(raw),
            FieldKind::Abstract => transform::normalize_abstract(raw),
            FieldKind::Keywords | FieldKind::TagInput => {
                transform::join_keywords(&transform::normalize_keywords(raw))
            }
        };
        Normalization::new(raw, normalized)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Id,
    Name,
    Class,
    IdOrName,
}

/// Glob-like pattern over one identity attribute.
///
/// Syntax is `id:<glob>`, `name:<glob>`, `class:<glob>` or a bare `<glob>`
/// matched against the id or the name. `*` matches any run of characters and
/// `?` exactly one.
#[derive(Clone, Debug)]
pub struct SelectorPattern {
    source: String,
    target: Target,
    matcher: Option<Regex>,
}

impl SelectorPattern {
    pub fn compile(source: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: source.to_string(),
            reason: reason.to_string(),
        };

        let (target, glob) = match source.split_once(':') {
            Some(("id", glob)) => (Target::Id, glob),
            Some(("name", glob)) => (Target::Name, glob),
            Some(("class", glob)) => (Target::Class, glob),
            Some((prefix, _)) => return Err(invalid(&format!("unknown target {prefix:?}"))),
            None => (Target::IdOrName, source),
        };
        if glob.is_empty() {
            return Err(invalid("empty glob"));
        }

        let matcher = glob_to_regex(glob).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            target,
            matcher: Some(matcher),
        })
    }

    /// Like [`compile`](Self::compile), but a broken pattern is logged and
    /// kept as one that never matches.
    pub fn parse(source: &str) -> Self {
        match Self::compile(source) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!("{}", e);
                Self {
                    source: source.to_string(),
                    target: Target::IdOrName,
                    matcher: None,
                }
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }

    pub fn matches(&self, identity: &FieldIdentity) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };
        let hit = |value: &Option<String>| value.as_deref().is_some_and(|v| matcher.is_match(v));
        match self.target {
            Target::Id => hit(&identity.id),
            Target::Name => hit(&identity.name),
            Target::Class => identity.classes.iter().any(|c| matcher.is_match(c)),
            Target::IdOrName => hit(&identity.id) || hit(&identity.name),
        }
    }
}

fn glob_to_regex(glob: &str) -> std::result::Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(glob.len() + 8);
    pattern.push('^');
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');
    Regex::new(&pattern)
}

/// Maps field identities to a [`FieldKind`] using a static pattern table.
#[derive(Clone, Debug)]
pub struct FieldClassifier {
    rules: Vec<(FieldKind, Vec<SelectorPattern>)>,
}

impl FieldClassifier {
    pub fn new(table: &PatternTable) -> Self {
        let compile = |sources: &[String]| -> Vec<SelectorPattern> {
            sources.iter().map(|s| SelectorPattern::parse(s)).collect()
        };
        Self {
            rules: vec![
                (FieldKind::Title, compile(&table.title)),
                (FieldKind::Abstract, compile(&table.abstract_)),
                (FieldKind::Keywords, compile(&table.keywords)),
                (FieldKind::TagInput, compile(&table.tag_input)),
            ],
        }
    }

    /// First kind whose patterns match, checked in declaration order.
    pub fn classify(&self, identity: &FieldIdentity) -> Option<FieldKind> {
        self.rules
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| p.matches(identity)))
            .map(|(kind, _)| *kind)
    }

    /// Whether `identity` matches the patterns of `kind`, regardless of any
    /// kind declared before it.
    pub fn matches_kind(&self, identity: &FieldIdentity, kind: FieldKind) -> bool {
        self.rules
            .iter()
            .filter(|(k, _)| *k == kind)
            .any(|(_, patterns)| patterns.iter().any(|p| p.matches(identity)))
    }
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new(&PatternTable::default())
    }
}

/// Rendering context the host hands over once per page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageContext {
    pub template: String,
    pub base_url: String,
}

impl PageContext {
    pub fn new(template: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            base_url: base_url.into(),
        }
    }

    /// Coarse page filter: true if the template identifier contains any entry
    /// of `allow_list`. It only decides whether listeners get attached.
    pub fn is_applicable(&self, allow_list: &[String]) -> bool {
        !self.template.is_empty()
            && allow_list
                .iter()
                .any(|entry| !entry.is_empty() && self.template.contains(entry.as_str()))
    }

    /// Resolve an asset path against the host's base URL.
    pub fn asset_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
