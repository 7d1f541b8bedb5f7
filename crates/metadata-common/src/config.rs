use serde::Deserialize;

use crate::error::Result;

/// Template identifiers of pages that carry metadata forms.
pub const DEFAULT_TEMPLATES: &[&str] = &[
    "submission",
    "workflow",
    "authorDashboard",
    "publication",
    "metadata",
    "wizard",
];

/// Delays after initial load before rescanning for late-mounted widgets (milliseconds).
pub const DEFAULT_SETTLE_DELAYS_MS: &[u32] = &[500, 1_500];

/// Gap between two replayed tag commits (milliseconds).
pub const DEFAULT_TAG_STEP_DELAY_MS: u32 = 100;

/// Selector patterns per field kind. See [`SelectorPattern`](crate::classifier::SelectorPattern)
/// for the syntax.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatternTable {
    pub title: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_: Vec<String>,
    pub keywords: Vec<String>,
    pub tag_input: Vec<String>,
}

impl Default for PatternTable {
    fn default() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            title: owned(&[
                "name:title*",
                "name:prefix*",
                "name:subtitle*",
                "id:title-*",
                "id:prefix-*",
                "id:subtitle-*",
                "id:*-title-control*",
                "id:*-prefix-control*",
                "id:*-subtitle-control*",
            ]),
            abstract_: owned(&[
                "name:abstract*",
                "id:abstract-*",
                "id:*-abstract-control*",
            ]),
            keywords: owned(&["name:keywords*", "id:keywords-*"]),
            tag_input: owned(&[
                "class:tagit",
                "class:pkpAutosuggest__inputWrapper",
                "class:vue-tags-input",
            ]),
        }
    }
}

/// Normalizer settings, optionally supplied by the host as JSON.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizerConfig {
    pub templates: Vec<String>,
    pub patterns: PatternTable,
    pub settle_delays_ms: Vec<u32>,
    pub tag_step_delay_ms: u32,
    pub log_level: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect(),
            patterns: PatternTable::default(),
            settle_delays_ms: DEFAULT_SETTLE_DELAYS_MS.to_vec(),
            tag_step_delay_ms: DEFAULT_TAG_STEP_DELAY_MS,
            log_level: "info".to_string(),
        }
    }
}

impl NormalizerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse `json` if present, falling back to defaults on absent, blank or
    /// invalid input.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
