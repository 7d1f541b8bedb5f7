use std::rc::Rc;

use crate::dom::Scheduler;
use crate::transform;

/// A rendered tag-input widget: a container with an embedded text input.
pub trait TagWidget {
    /// Text typed into the embedded input, or `None` when the container has
    /// no embedded input.
    fn input_text(&self) -> Option<String>;

    fn clear_input(&self);
}

/// Drives the widget's own "commit one tag" interaction.
///
/// The widget keeps its tags in an internal model, so assigning the input's
/// value in bulk would leave that model out of sync with the DOM.
pub trait TagCommitter<W: ?Sized> {
    fn commit_one_tag(&self, widget: &W, text: &str);
}

/// What happened when a tag input was left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The container had no embedded input; nothing was touched.
    NoInput,
    /// Zero or one keyword, or no separator: the widget handles it as is.
    Clean,
    /// This many commits were scheduled.
    Replayed(usize),
}

/// Keywords to replay for `raw`, or `None` when the text is already in the
/// one-tag shape the widget expects.
pub fn plan_replay(raw: &str) -> Option<Vec<String>> {
    if !transform::contains_separator(raw) {
        return None;
    }
    let keywords = transform::normalize_keywords(raw);
    (keywords.len() >= 2).then_some(keywords)
}

/// Splits pasted keyword lists typed into a tag widget into discrete tags.
pub struct TagInputBridge<W> {
    committer: Rc<dyn TagCommitter<W>>,
    scheduler: Rc<dyn Scheduler>,
    step_delay_ms: u32,
}

impl<W: TagWidget + 'static> TagInputBridge<W> {
    pub fn new(
        committer: Rc<dyn TagCommitter<W>>,
        scheduler: Rc<dyn Scheduler>,
        step_delay_ms: u32,
    ) -> Self {
        Self {
            committer,
            scheduler,
            step_delay_ms,
        }
    }

    /// Clear the input and replay one commit per keyword, each `step_delay_ms`
    /// after the previous, so the widget's asynchronous tag creation settles
    /// between commits.
    pub fn on_widget_left(&self, widget: Rc<W>) -> ReplayOutcome {
        let Some(raw) = widget.input_text() else {
            tracing::debug!("tag container without embedded input, skipping");
            return ReplayOutcome::NoInput;
        };
        let Some(keywords) = plan_replay(&raw) else {
            return ReplayOutcome::Clean;
        };

        widget.clear_input();
        let count = keywords.len();
        tracing::debug!(count, "replaying keyword commits");
        for (step, keyword) in keywords.into_iter().enumerate() {
            let committer = Rc::clone(&self.committer);
            let widget = Rc::clone(&widget);
            let delay = self.step_delay_ms.saturating_mul(step as u32);
            self.scheduler.schedule(
                delay,
                Box::new(move || committer.commit_one_tag(widget.as_ref(), &keyword)),
            );
        }
        ReplayOutcome::Replayed(count)
    }
}
