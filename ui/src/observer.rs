use js_sys::Array;
use metadata_common::watcher::MutationSource;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MutationObserver, MutationObserverInit, MutationRecord, Node};

use crate::dom::DomNode;

/// Subtree mutation observer on a single root, normally `document.body`.
pub struct BodyMutations {
    root: Node,
}

impl BodyMutations {
    pub fn new(root: Node) -> Self {
        Self { root }
    }
}

impl MutationSource<DomNode> for BodyMutations {
    fn subscribe(&self, mut sink: Box<dyn FnMut(Vec<DomNode>)>) {
        let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |records: Array, _observer: MutationObserver| {
                let added = added_elements(&records);
                if !added.is_empty() {
                    sink(added);
                }
            },
        );

        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                tracing::warn!("Failed to create MutationObserver: {:?}", e);
                return;
            }
        };
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(e) = observer.observe_with_options(&self.root, &init) {
            tracing::warn!("Failed to observe document: {:?}", e);
            return;
        }
        // Observation lasts for the page's lifetime.
        callback.forget();
    }
}

fn added_elements(records: &Array) -> Vec<DomNode> {
    records
        .iter()
        .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
        .flat_map(|record| {
            let nodes = record.added_nodes();
            (0..nodes.length()).filter_map(move |i| nodes.get(i))
        })
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(DomNode::new)
        .collect()
}
