use std::iter;
use std::rc::Rc;

use crate::classifier::{FieldClassifier, FieldKind};
use crate::dom::{FieldIdentity, Scheduler};

/// Element node as seen by the watcher.
pub trait WatchedNode: Clone + 'static {
    fn identity(&self) -> FieldIdentity;

    /// Element descendants in document order.
    fn descendants(&self) -> Vec<Self>;

    /// Whether the node embeds a text input a listener can be bound to.
    fn has_text_input(&self) -> bool;

    fn is_bound(&self) -> bool;

    fn mark_bound(&self);
}

/// Dynamic-attachment interface: reports batches of nodes added anywhere
/// under the observed root for as long as the page lives.
pub trait MutationSource<N> {
    fn subscribe(&self, sink: Box<dyn FnMut(Vec<N>)>);
}

/// Binds tag-input containers that are rendered after the initial page load.
pub struct DomWatcher<N> {
    classifier: Rc<FieldClassifier>,
    bind: Box<dyn Fn(&N)>,
}

impl<N: WatchedNode> DomWatcher<N> {
    /// `bind` is called once per newly found container.
    pub fn new(classifier: Rc<FieldClassifier>, bind: impl Fn(&N) + 'static) -> Self {
        Self {
            classifier,
            bind: Box::new(bind),
        }
    }

    /// Scan each added node and its descendants. Returns how many containers
    /// were bound by this call.
    pub fn scan(&self, added: &[N]) -> usize {
        added
            .iter()
            .flat_map(|node| iter::once(node.clone()).chain(node.descendants()))
            .filter(|candidate| self.try_bind(candidate))
            .count()
    }

    /// Subscribe to `source` for the lifetime of the page.
    pub fn start(self: &Rc<Self>, source: &dyn MutationSource<N>) {
        let watcher = Rc::clone(self);
        source.subscribe(Box::new(move |added: Vec<N>| {
            let bound = watcher.scan(&added);
            if bound > 0 {
                tracing::debug!(bound, "bound late-rendered tag inputs");
            }
        }));
    }

    /// Best-effort rescans of `root` after each of `delays_ms`, for widgets a
    /// framework mounts after the initial mutation burst.
    pub fn schedule_settle_scans(self: &Rc<Self>, scheduler: &dyn Scheduler, root: N, delays_ms: &[u32]) {
        for &delay in delays_ms {
            let watcher = Rc::clone(self);
            let root = root.clone();
            scheduler.schedule(
                delay,
                Box::new(move || {
                    let bound = watcher.scan(std::slice::from_ref(&root));
                    tracing::debug!(delay, bound, "settle rescan finished");
                }),
            );
        }
    }

    fn try_bind(&self, node: &N) -> bool {
        if !self.classifier.matches_kind(&node.identity(), FieldKind::TagInput) {
            return false;
        }
        if node.is_bound() {
            return false;
        }
        if !node.has_text_input() {
            tracing::debug!("tag container without embedded input, skipping");
            return false;
        }
        node.mark_bound();
        (self.bind)(node);
        true
    }
}
