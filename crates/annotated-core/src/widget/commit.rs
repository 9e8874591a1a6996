//! Deferred commits and the commit pipeline.

use super::AnnotatedWidget;
use crate::host::Node;
use crate::input::{Duration, Instant};
use kurbo::Point;
use serde_json::Value;

/// Delay between a value change and its commit.
pub const COMMIT_DELAY: Duration = Duration::from_millis(20);

/// Handle to a scheduled commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitHandle(u64);

#[derive(Debug, Clone, Copy)]
struct PendingCommit {
    handle: CommitHandle,
    due: Instant,
    position: Point,
}

/// Commits scheduled by a widget.
///
/// Every value change schedules its own entry; nothing is coalesced. The
/// queue belongs to the widget, so dropping the widget cancels whatever is
/// still pending.
#[derive(Debug)]
pub struct CommitQueue {
    pending: Vec<PendingCommit>,
    next_id: u64,
}

impl Default for CommitQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule a commit [`COMMIT_DELAY`] after `now`.
    pub fn schedule(&mut self, now: Instant, position: Point) -> CommitHandle {
        let handle = CommitHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingCommit {
            handle,
            due: now + COMMIT_DELAY,
            position,
        });
        handle
    }

    /// Cancel a pending commit. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: CommitHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|commit| commit.handle != handle);
        self.pending.len() != before
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending commits.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Handles of pending commits in schedule order.
    pub fn pending(&self) -> Vec<CommitHandle> {
        self.pending.iter().map(|commit| commit.handle).collect()
    }

    /// Whether `handle` is still pending.
    pub fn contains(&self, handle: CommitHandle) -> bool {
        self.pending.iter().any(|commit| commit.handle == handle)
    }

    /// Earliest due time.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|commit| commit.due).min()
    }

    /// Remove and return the positions of commits due at `now`, in schedule order.
    fn take_due(&mut self, now: Instant) -> Vec<Point> {
        let mut due = Vec::new();
        self.pending.retain(|commit| {
            if commit.due <= now {
                due.push(commit.position);
                false
            } else {
                true
            }
        });
        due
    }
}

impl Drop for CommitQueue {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Dropping {} pending commit(s)", self.pending.len());
        }
    }
}

impl AnnotatedWidget {
    pub(crate) fn schedule_commit(&mut self, now: Instant, position: Point) -> CommitHandle {
        let handle = self.commits.schedule(now, position);
        log::trace!("Scheduled commit {:?} for {:?}", handle, self.name);
        handle
    }

    /// Run every commit due at `now`. Returns how many ran.
    ///
    /// A commit carries the widget value at the time it runs, so a burst of
    /// changes commits the settled value each time.
    pub fn poll_commits(&mut self, now: Instant, node: &mut dyn Node) -> usize {
        let due = self.commits.take_due(now);
        for position in &due {
            let value = self.value;
            self.commit(value, node, *position);
        }
        due.len()
    }

    /// Store `value`, mirror it into the node property and run the callback.
    ///
    /// A property missing from the node is skipped silently.
    pub fn commit(&mut self, value: f64, node: &mut dyn Node, position: Point) {
        self.value = value;
        if let Some(key) = self.options.property.as_deref() {
            if node.has_property(key) {
                node.set_property(key, Value::from(value));
            }
        }
        log::debug!("Committed {:?} = {}", self.name, value);
        self.run_callback(value, node, position);
    }

    /// The wrapped callback.
    ///
    /// A raw value of exactly zero is ignored. Without a `mod` anchor the raw
    /// value goes to the original callback; with one, the value is quantized
    /// and stored directly instead.
    pub fn run_callback(&mut self, raw: f64, node: &mut dyn Node, position: Point) {
        if raw == 0.0 {
            return;
        }
        match self.options.quantize(raw) {
            Some(quantized) => self.value = quantized,
            None => {
                if let Some(callback) = self.callback_orig.as_mut() {
                    callback(raw, node, position);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{InputDescriptor, WidgetStub, make_annotated};
    use crate::host::PropertyNode;
    use crate::options::WidgetOptions;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn widget_with(options: WidgetOptions) -> AnnotatedWidget {
        make_annotated(
            WidgetStub::new("gain").with_options(options),
            InputDescriptor::new("FLOAT", WidgetOptions::new()),
        )
    }

    fn recording_widget(options: WidgetOptions) -> (AnnotatedWidget, Rc<RefCell<Vec<f64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let widget = make_annotated(
            WidgetStub::new("gain")
                .with_options(options)
                .with_callback(move |value, _node, _pos| sink.borrow_mut().push(value)),
            InputDescriptor::new("FLOAT", WidgetOptions::new()),
        );
        (widget, seen)
    }

    #[test]
    fn test_queue_schedule_and_due() {
        let start = Instant::now();
        let mut queue = CommitQueue::new();
        let first = queue.schedule(start, Point::new(1.0, 0.0));
        let second = queue.schedule(start + Duration::from_millis(5), Point::new(2.0, 0.0));
        assert_ne!(first, second);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.next_due(), Some(start + COMMIT_DELAY));

        assert!(queue.take_due(start + Duration::from_millis(10)).is_empty());
        let due = queue.take_due(start + Duration::from_millis(20));
        assert_eq!(due, vec![Point::new(1.0, 0.0)]);
        assert!(queue.contains(second));
        assert!(!queue.contains(first));
    }

    #[test]
    fn test_queue_cancel() {
        let start = Instant::now();
        let mut queue = CommitQueue::new();
        let handle = queue.schedule(start, Point::ZERO);
        let other = queue.schedule(start, Point::ZERO);
        assert_eq!(queue.pending(), vec![handle, other]);
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert_eq!(queue.pending(), vec![other]);
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.take_due(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_commit_writes_existing_property() {
        let mut widget = widget_with(WidgetOptions::new().with_property("gain"));
        let mut node = PropertyNode::new(200.0).with_property("gain", 1.0);

        widget.commit(0.25, &mut node, Point::ZERO);
        assert!((widget.value - 0.25).abs() < f64::EPSILON);
        assert_eq!(node.number("gain"), Some(0.25));
    }

    #[test]
    fn test_commit_skips_missing_property() {
        let mut widget = widget_with(WidgetOptions::new().with_property("gain"));
        let mut node = PropertyNode::new(200.0);

        widget.commit(0.25, &mut node, Point::ZERO);
        assert!(!node.has_property("gain"));
        assert!((widget.value - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut widget = widget_with(WidgetOptions::new());
        let mut node = PropertyNode::new(200.0).with_property("other", 3.0);

        widget.commit(4.0, &mut node, Point::ZERO);
        let after_first = node.clone();
        widget.commit(4.0, &mut node, Point::ZERO);
        assert_eq!(node, after_first);
        assert!((widget.value - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_callback_receives_value() {
        let (mut widget, seen) = recording_widget(WidgetOptions::new());
        let mut node = PropertyNode::new(200.0);

        widget.commit(1.5, &mut node, Point::ZERO);
        assert_eq!(*seen.borrow(), vec![1.5]);
    }

    #[test]
    fn test_callback_ignores_zero() {
        let (mut widget, seen) = recording_widget(WidgetOptions::new());
        let mut node = PropertyNode::new(200.0);

        widget.commit(0.0, &mut node, Point::ZERO);
        assert!(seen.borrow().is_empty());
        assert!(widget.value.abs() < f64::EPSILON);
    }

    #[test]
    fn test_callback_quantizes_with_mod() {
        let (mut widget, seen) =
            recording_widget(WidgetOptions::new().with_modulus(2.0).with_step(10.0));
        let mut node = PropertyNode::new(200.0);

        widget.commit(7.6, &mut node, Point::ZERO);
        assert!((widget.value - 8.0).abs() < 1e-9);
        // the original callback is bypassed when quantizing
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_poll_commits_uses_current_value() {
        let (mut widget, seen) = recording_widget(WidgetOptions::new());
        let mut node = PropertyNode::new(200.0);
        let start = Instant::now();

        widget.value = 1.0;
        widget.schedule_commit(start, Point::ZERO);
        widget.value = 2.0;
        widget.schedule_commit(start + Duration::from_millis(5), Point::ZERO);

        assert_eq!(widget.poll_commits(start + Duration::from_millis(19), &mut node), 0);
        assert_eq!(widget.poll_commits(start + Duration::from_millis(30), &mut node), 2);
        assert_eq!(*seen.borrow(), vec![2.0, 2.0]);
        assert!(widget.commits().is_empty());
    }

    #[test]
    fn test_cancelled_commit_does_not_run() {
        let (mut widget, seen) = recording_widget(WidgetOptions::new());
        let mut node = PropertyNode::new(200.0);
        let start = Instant::now();

        widget.value = 3.0;
        let handle = widget.schedule_commit(start, Point::ZERO);
        assert!(widget.cancel_commit(handle));
        assert_eq!(widget.poll_commits(start + Duration::from_secs(1), &mut node), 0);
        assert!(seen.borrow().is_empty());
    }
}
