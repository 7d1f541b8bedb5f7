#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use metadata_common::dom::{FieldElement, FieldIdentity, FieldRole, Scheduler};
use metadata_common::editor::EditorRuntime;
use metadata_common::tags::{TagCommitter, TagWidget};
use metadata_common::watcher::{MutationSource, WatchedNode};

/// In-memory form field that counts writes and change notifications.
pub struct FakeField {
    pub identity: FieldIdentity,
    pub role: FieldRole,
    pub value: RefCell<String>,
    pub writes: Cell<usize>,
    pub changes: Cell<usize>,
}

impl FakeField {
    pub fn new(identity: FieldIdentity, value: &str) -> Self {
        Self {
            identity,
            role: FieldRole::Input,
            value: RefCell::new(value.to_string()),
            writes: Cell::new(0),
            changes: Cell::new(0),
        }
    }

    pub fn named(name: &str, value: &str) -> Self {
        Self::new(FieldIdentity::with_name(name), value)
    }

    pub fn with_id(id: &str, value: &str) -> Self {
        Self::new(FieldIdentity::with_id(id), value)
    }

    pub fn current(&self) -> String {
        self.value.borrow().clone()
    }
}

impl FieldElement for FakeField {
    fn identity(&self) -> FieldIdentity {
        self.identity.clone()
    }

    fn role(&self) -> FieldRole {
        self.role
    }

    fn value(&self) -> String {
        self.current()
    }

    fn set_value(&self, value: &str) {
        self.writes.set(self.writes.get() + 1);
        *self.value.borrow_mut() = value.to_string();
    }

    fn dispatch_change(&self) {
        self.changes.set(self.changes.get() + 1);
    }
}

/// Editor runtime that, like real WYSIWYG editors, wraps content it is given
/// in a paragraph.
#[derive(Default)]
pub struct FakeEditor {
    pub documents: RefCell<HashMap<String, String>>,
    pub writes: Cell<usize>,
    pub reject_writes: Cell<bool>,
    pub blur_callbacks: RefCell<Vec<Box<dyn Fn(&str)>>>,
}

impl FakeEditor {
    pub fn with_document(key: &str, content: &str) -> Self {
        let editor = Self::default();
        editor
            .documents
            .borrow_mut()
            .insert(key.to_string(), content.to_string());
        editor
    }

    pub fn document(&self, key: &str) -> Option<String> {
        self.documents.borrow().get(key).cloned()
    }

    pub fn blur(&self, key: &str) {
        for callback in self.blur_callbacks.borrow().iter() {
            callback(key);
        }
    }
}

impl EditorRuntime for FakeEditor {
    fn has_instance(&self, key: &str) -> bool {
        self.documents.borrow().contains_key(key)
    }

    fn content(&self, key: &str) -> Option<String> {
        self.document(key)
    }

    fn set_content(&self, key: &str, value: &str) -> bool {
        if self.reject_writes.get() {
            return false;
        }
        let mut documents = self.documents.borrow_mut();
        match documents.get_mut(key) {
            Some(doc) => {
                self.writes.set(self.writes.get() + 1);
                *doc = format!("<p>{value}</p>");
                true
            }
            None => false,
        }
    }

    fn subscribe_blur(&self, callback: Box<dyn Fn(&str)>) {
        self.blur_callbacks.borrow_mut().push(callback);
    }
}

/// Collects scheduled tasks and runs them on demand in delay order.
#[derive(Default)]
pub struct ManualScheduler {
    pub tasks: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn delays(&self) -> Vec<u32> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn run_all(&self) {
        let mut tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        tasks.sort_by_key(|(delay, _)| *delay);
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay_ms, task));
    }
}

/// Tag widget whose embedded input holds `text`; `None` models a container
/// without an input.
pub struct FakeWidget {
    pub text: RefCell<Option<String>>,
    pub clears: Cell<usize>,
}

impl FakeWidget {
    pub fn typed(text: &str) -> Rc<Self> {
        Rc::new(Self {
            text: RefCell::new(Some(text.to_string())),
            clears: Cell::new(0),
        })
    }

    pub fn without_input() -> Rc<Self> {
        Rc::new(Self {
            text: RefCell::new(None),
            clears: Cell::new(0),
        })
    }
}

impl TagWidget for FakeWidget {
    fn input_text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    fn clear_input(&self) {
        self.clears.set(self.clears.get() + 1);
        if let Some(text) = self.text.borrow_mut().as_mut() {
            text.clear();
        }
    }
}

#[derive(Default)]
pub struct RecordingCommitter {
    pub commits: RefCell<Vec<String>>,
}

impl<W: TagWidget + ?Sized> TagCommitter<W> for RecordingCommitter {
    fn commit_one_tag(&self, _widget: &W, text: &str) {
        self.commits.borrow_mut().push(text.to_string());
    }
}

/// Element tree node with a shared "bound" marker, like a data attribute.
#[derive(Clone)]
pub struct FakeNode {
    pub identity: FieldIdentity,
    pub children: Vec<FakeNode>,
    pub has_input: bool,
    pub bound: Rc<Cell<bool>>,
}

impl FakeNode {
    pub fn element(identity: FieldIdentity, children: Vec<FakeNode>) -> Self {
        Self {
            identity,
            children,
            has_input: false,
            bound: Rc::new(Cell::new(false)),
        }
    }

    pub fn tag_container(class: &str) -> Self {
        Self {
            identity: FieldIdentity::from_attributes("", None, class),
            children: Vec::new(),
            has_input: true,
            bound: Rc::new(Cell::new(false)),
        }
    }
}

impl WatchedNode for FakeNode {
    fn identity(&self) -> FieldIdentity {
        self.identity.clone()
    }

    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        for child in &self.children {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }

    fn has_text_input(&self) -> bool {
        self.has_input
    }

    fn is_bound(&self) -> bool {
        self.bound.get()
    }

    fn mark_bound(&self) {
        self.bound.set(true);
    }
}

/// Mutation emitter standing in for a document observer.
#[derive(Default)]
pub struct FakeMutations {
    pub sinks: RefCell<Vec<Box<dyn FnMut(Vec<FakeNode>)>>>,
}

impl FakeMutations {
    pub fn emit(&self, added: Vec<FakeNode>) {
        for sink in self.sinks.borrow_mut().iter_mut() {
            sink(added.clone());
        }
    }
}

impl MutationSource<FakeNode> for FakeMutations {
    fn subscribe(&self, sink: Box<dyn FnMut(Vec<FakeNode>)>) {
        self.sinks.borrow_mut().push(sink);
    }
}
