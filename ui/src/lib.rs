//! Browser front-end of the metadata cleaner.
//!
//! The host page calls [`init`] once per rendered view. Everything that
//! touches the DOM lives here; the normalization rules and the decisions about
//! when to apply them come from `metadata-common`.

mod dom;
mod editor;
mod listeners;
mod observer;
mod tags;

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use metadata_common::binder::EventBinder;
use metadata_common::change::BubblingChange;
use metadata_common::classifier::{FieldClassifier, PageContext};
use metadata_common::config::NormalizerConfig;
use metadata_common::dom::Scheduler;
use metadata_common::editor::{EditorAdapter, EditorRuntime};
use metadata_common::tags::TagInputBridge;
use metadata_common::watcher::DomWatcher;
use wasm_bindgen::prelude::*;

use dom::{DomNode, DomTagWidget};
use editor::TinyMceRuntime;
use observer::BodyMutations;
use tags::{KeyboardCommitter, TimeoutScheduler};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Attach the normalizer to the current page.
///
/// `template` is the host's template identifier for the rendered view and
/// `config_json` an optional JSON [`NormalizerConfig`]. Calling it again is a
/// no-op. Failures are logged, never thrown into the host page.
#[wasm_bindgen]
pub fn init(template: String, base_url: String, config_json: Option<String>) {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    let (config, config_error) = match config_json.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => match NormalizerConfig::from_json(json) {
            Ok(config) => (config, None),
            Err(e) => (NormalizerConfig::default(), Some(e)),
        },
        _ => (NormalizerConfig::default(), None),
    };
    init_logging(&config.log_level);
    if let Some(e) = config_error {
        tracing::warn!("{}, using defaults", e);
    }

    let page = PageContext::new(template, base_url);
    if !page.is_applicable(&config.templates) {
        tracing::debug!("Template {:?} has no metadata form, not attaching", page.template);
        return;
    }

    match attach(&config) {
        Ok(()) => tracing::info!("Metadata cleaner attached on {:?}", page.template),
        Err(e) => tracing::warn!("Metadata cleaner not attached: {:?}", e),
    }
}

/// Resolve a plugin asset path against the host's base URL.
#[wasm_bindgen]
pub fn asset_url(base_url: String, path: String) -> String {
    PageContext::new(String::new(), base_url).asset_url(&path)
}

fn init_logging(level: &str) {
    let level = level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    // Another module on the page may already own the global subscriber.
    let _ = dioxus_logger::init(level);
}

fn attach(config: &NormalizerConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(JsValue::from_str("no window"))?;
    let document = window.document().ok_or(JsValue::from_str("no document"))?;
    let body = document.body().ok_or(JsValue::from_str("no body"))?;

    let classifier = Rc::new(FieldClassifier::new(&config.patterns));
    let runtime = TinyMceRuntime::detect().map(|r| Rc::new(r) as Rc<dyn EditorRuntime>);
    if runtime.is_none() {
        tracing::debug!("No rich-text editor runtime, using plain field values");
    }
    let binder = Rc::new(EventBinder::new(
        Rc::clone(&classifier),
        EditorAdapter::new(runtime),
        Rc::new(BubblingChange),
    ));
    listeners::bind_document_listeners(&document, Rc::clone(&binder))?;
    listeners::bind_editor_blur(&binder);

    let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);
    let bridge: Rc<TagInputBridge<DomTagWidget>> = Rc::new(TagInputBridge::new(
        Rc::new(KeyboardCommitter),
        Rc::clone(&scheduler),
        config.tag_step_delay_ms,
    ));
    let watcher = Rc::new(DomWatcher::new(classifier, move |node: &DomNode| {
        listeners::bind_tag_widget(node, Rc::clone(&bridge))
    }));

    let root = DomNode::new(body.into());
    let bound = watcher.scan(std::slice::from_ref(&root));
    tracing::debug!("Bound {} tag inputs present at load", bound);
    watcher.start(&BodyMutations::new(root.element().clone().into()));
    watcher.schedule_settle_scans(scheduler.as_ref(), root, &config.settle_delays_ms);
    Ok(())
}
