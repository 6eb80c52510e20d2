//! Step history store - ordered checkpoints with back-navigation.

use crate::history::{Checkpoint, Dialogue};

/// Result of asking the history to step back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoBack<'a> {
    /// The newest checkpoint was dropped; this is the one now current.
    Restored(&'a Checkpoint),
    /// Only the initial checkpoint is left. Nothing changed.
    AtEarliestStep,
}

impl GoBack<'_> {
    pub fn is_restored(&self) -> bool {
        matches!(self, GoBack::Restored(_))
    }
}

/// Ordered checkpoints, oldest first.
///
/// The store is never empty: it starts with the initial checkpoint and
/// [`StepHistory::go_back`] refuses to remove the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct StepHistory {
    checkpoints: Vec<Checkpoint>,
}

impl StepHistory {
    /// Create a history holding only the initial checkpoint.
    pub fn new(initial: Checkpoint) -> Self {
        Self {
            checkpoints: vec![initial],
        }
    }

    /// Build a history from checkpoints, oldest first. Returns `None` for an
    /// empty list.
    pub fn from_checkpoints(checkpoints: Vec<Checkpoint>) -> Option<Self> {
        if checkpoints.is_empty() {
            None
        } else {
            Some(Self { checkpoints })
        }
    }

    /// Append the checkpoint of a step that just finished.
    pub fn record_step(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.push(checkpoint);
    }

    /// Drop the newest checkpoint and return the one beneath it.
    pub fn go_back(&mut self) -> GoBack<'_> {
        if !self.can_go_back() {
            return GoBack::AtEarliestStep;
        }
        self.checkpoints.pop();
        GoBack::Restored(self.current())
    }

    /// The newest checkpoint.
    pub fn current(&self) -> &Checkpoint {
        // Non-empty by construction.
        &self.checkpoints[self.checkpoints.len() - 1]
    }

    /// The checkpoint `go_back` would restore, without removing anything.
    pub fn previous(&self) -> Option<&Checkpoint> {
        let len = self.checkpoints.len();
        if len > 1 {
            self.checkpoints.get(len - 2)
        } else {
            None
        }
    }

    /// The oldest checkpoint still held.
    pub fn initial(&self) -> &Checkpoint {
        &self.checkpoints[0]
    }

    pub fn can_go_back(&self) -> bool {
        self.checkpoints.len() > 1
    }

    /// Number of checkpoints, the initial one included.
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Number of steps recorded on top of the initial checkpoint.
    pub fn steps_recorded(&self) -> usize {
        self.checkpoints.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    /// Checkpoints, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    pub fn as_slice(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Keep at most `max_len` checkpoints by dropping the oldest ones.
    /// Returns how many were dropped. At least one checkpoint is always kept.
    pub fn cap(&mut self, max_len: usize) -> usize {
        let max_len = max_len.max(1);
        let excess = self.checkpoints.len().saturating_sub(max_len);
        self.checkpoints.drain(..excess);
        excess
    }

    /// Dialogue lines shown along the history, oldest first.
    ///
    /// Checkpoints without an open line are skipped. A line that stays open
    /// over consecutive steps is listed once; the same line shown again
    /// after a different one, or after none, is listed again.
    pub fn dialogue_log(&self) -> Vec<&Dialogue> {
        let mut log = Vec::new();
        let mut previous: Option<&Dialogue> = None;
        for checkpoint in &self.checkpoints {
            let current = checkpoint.dialogue.current.as_ref();
            if let Some(dialogue) = current {
                if previous != Some(dialogue) {
                    log.push(dialogue);
                }
            }
            previous = current;
        }
        log
    }

    pub fn into_checkpoints(self) -> Vec<Checkpoint> {
        self.checkpoints
    }
}
