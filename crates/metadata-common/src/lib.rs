//! Field normalization engine for free-text submission metadata.
//!
//! Cleans copy-paste artifacts out of title, abstract and keyword fields:
//! HTML markup, stray line breaks, locale-specific separators and duplicate
//! keywords. The text rules in [`transform`] are pure; the remaining modules
//! decide when and on which element to apply them, behind small traits so the
//! browser layer can be swapped for fakes.

pub mod binder;
pub mod change;
pub mod classifier;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod tags;
pub mod transform;
pub mod watcher;
