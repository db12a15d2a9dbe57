//! Nested progress composition over a fixed linear scale.
//!
//! A batch (and any sub-task it spawns) reports local 0–100% progress; the
//! tracker maps those onto a single 0..=10000 scale by keeping a stack of
//! nested ranges. Hosts subscribe to [`ProgressEvent`]s instead of polling.

use tokio::sync::broadcast;

/// Width of the global progress scale.
pub const PROGRESS_SCALE: i32 = 10_000;

const READY_STATUS: &str = "Ready!";
const PROCESSING_STATUS: &str = "Processing...";

/// Events emitted as tracked work advances.
///
/// Multiple subscribers can listen simultaneously; send errors (no active
/// subscriber) are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The outermost task began and the displayed value reset to zero.
    Started { status: String },

    /// The displayed value or status text changed.
    Updated { value: i32, status: String },

    /// The outermost task ended and the tracker returned to idle.
    Finished { value: i32 },
}

/// One nested progress window on the global scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProgressRange {
    start: i32,
    end: i32,
}

/// Maps nested sub-task percentages onto the global 0..=10000 scale.
///
/// The stack is empty while idle; `start` pushes the root range and every
/// `start_sub`/`end` pair nests inside it. All operations on an idle tracker
/// are silent no-ops, so partial or cancelled flows never need cleanup
/// beyond their own matched `end` calls.
pub struct ProgressTracker {
    stack: Vec<ProgressRange>,
    value: i32,
    status: String,
    events: broadcast::Sender<ProgressEvent>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            stack: Vec::new(),
            value: 0,
            status: READY_STATUS.to_string(),
            events,
        }
    }

    /// Subscribe to progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    /// Current displayed value on the global scale.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Current status text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// True when no task is being tracked.
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }

    /// Current nesting depth (0 when idle, 1 for the root task).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Begin the outermost task. Effective only when idle.
    pub fn start(&mut self) {
        if !self.stack.is_empty() {
            return;
        }
        self.value = 0;
        self.stack.push(ProgressRange {
            start: 0,
            end: PROGRESS_SCALE,
        });
        self.status = PROCESSING_STATUS.to_string();
        let _ = self.events.send(ProgressEvent::Started {
            status: self.status.clone(),
        });
    }

    /// Begin a nested sub-task covering `min..max` percent of the active work.
    pub fn start_sub(&mut self, min: i32, max: i32) {
        let Some(innermost) = self.stack.last().copied() else {
            return;
        };
        let root_start = self.stack[0].start;
        // The span is measured from the root start to the innermost end, not
        // the innermost range's own width; at nesting depth > 2 the computed
        // windows drift toward the root scale.
        let range = innermost.end - root_start;
        let min_offset = (min as f32 / 100.0 * range as f32) as i32 + 1;
        let max_offset = (max as f32 / 100.0 * range as f32) as i32 + 1;
        self.stack.push(ProgressRange {
            start: root_start + min_offset,
            end: root_start + max_offset,
        });
    }

    /// Report progress within the innermost active range.
    ///
    /// `percent` keeps sub-percent precision so a cumulative per-item advance
    /// of `100/N` lands each of the N steps on a distinct scale value.
    pub fn update(&mut self, percent: f32, status: &str) {
        let Some(innermost) = self.stack.last().copied() else {
            return;
        };
        let range = innermost.end - innermost.start;
        let offset = (range as f32 * (percent / 100.0)) as i32 + 1;
        self.value = (innermost.start + offset).min(PROGRESS_SCALE);
        self.status = status.to_string();
        let _ = self.events.send(ProgressEvent::Updated {
            value: self.value,
            status: self.status.clone(),
        });
    }

    /// End the innermost active range, snapping the value to its end.
    pub fn end(&mut self) {
        let Some(range) = self.stack.pop() else {
            return;
        };
        self.value = range.end.min(PROGRESS_SCALE);
        if self.stack.is_empty() {
            self.status = READY_STATUS.to_string();
            let _ = self.events.send(ProgressEvent::Finished { value: self.value });
        } else {
            let _ = self.events.send(ProgressEvent::Updated {
                value: self.value,
                status: self.status.clone(),
            });
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
