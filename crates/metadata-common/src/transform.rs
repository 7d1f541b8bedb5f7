use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use unicode_normalization::UnicodeNormalization;

/// Characters mapped to a Latin comma before keywords are split.
pub const KEYWORD_SEPARATORS: &[char] = &[
    '\u{060C}', // Arabic comma
    '\u{061B}', // Arabic semicolon
    '\u{FF0C}', // fullwidth comma
    ';',
    '\n',
    '\r',
    '\t',
];

/// Block-level tags that separate sentences in rich-text abstracts.
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*(?:p|li|ul|ol|br|div|h[1-6]|blockquote)\b[^>]*>").unwrap()
});

/// Outcome of normalizing one field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalization {
    pub original: String,
    pub normalized: String,
    pub changed: bool,
}

impl Normalization {
    pub fn new(original: impl Into<String>, normalized: impl Into<String>) -> Self {
        let original = original.into();
        let normalized = normalized.into();
        let changed = normalized != original;
        Self {
            original,
            normalized,
            changed,
        }
    }
}

/// Text content of `input` parsed as an HTML fragment: tags and attributes
/// dropped, entity references decoded. Unbalanced markup still yields its text.
pub fn strip_html(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if !input.contains(|c: char| c == '<' || c == '&') {
        return input.to_string();
    }
    let fragment = Html::parse_fragment(input);
    fragment.root_element().text().collect()
}

/// Single-line title: no markup, no control characters, single spaces, trimmed.
pub fn normalize_title(input: &str) -> String {
    settle(input, title_pass)
}

/// Single-line abstract. Block-level tags become a space before stripping so
/// adjacent paragraphs never run together.
pub fn normalize_abstract(input: &str) -> String {
    settle(input, abstract_pass)
}

/// Split a keyword string on every known separator, trim, drop empties and
/// dedup case-insensitively. The first spelling seen wins and order is kept.
pub fn normalize_keywords(input: &str) -> Vec<String> {
    let unified: String = input
        .chars()
        .map(|c| if KEYWORD_SEPARATORS.contains(&c) { ',' } else { c })
        .collect();

    let mut seen = HashSet::new();
    unified
        .split(',')
        .map(collapse_whitespace)
        .filter(|keyword| !keyword.is_empty())
        .filter(|keyword| seen.insert(dedup_key(keyword)))
        .collect()
}

/// Join keywords the way the legacy keyword field stores them.
pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(", ")
}

/// True if `input` holds a Latin comma or any other keyword separator.
pub fn contains_separator(input: &str) -> bool {
    input.contains(|c: char| c == ',' || KEYWORD_SEPARATORS.contains(&c))
}

fn title_pass(input: &str) -> String {
    collapse_whitespace(&strip_html(input))
}

fn abstract_pass(input: &str) -> String {
    let unblocked = BLOCK_TAG_RE.replace_all(input, " ");
    collapse_whitespace(&strip_html(&unblocked))
}

/// Re-apply `pass` until its output stops changing. Decoding can surface new
/// markup (`&lt;b&gt;`), and a single pass would not be idempotent.
///
/// After the first pass, every pass that changes its input drops at least one
/// character, so the fixed point is reached within `chars().count()` passes.
fn settle(input: &str, pass: fn(&str) -> String) -> String {
    let mut current = pass(input);
    for _ in 0..=current.chars().count() {
        let next = pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Collapse line breaks, whitespace and control characters into single spaces
/// and trim. Byte-order marks and zero-width spaces are dropped outright.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        if matches!(c, '\u{FEFF}' | '\u{200B}') {
            continue;
        }
        if c.is_whitespace() || c.is_control() {
            if !prev_space {
                result.push(' ');
                prev_space = true;
            }
        } else {
            result.push(c);
            prev_space = false;
        }
    }
    result.trim().to_string()
}

fn dedup_key(keyword: &str) -> String {
    keyword.nfc().collect::<String>().to_lowercase()
}
