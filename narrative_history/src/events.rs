//! Narrative events - what the runtime tells the history session.

use crate::history::StepPointer;

/// Events the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeEvent {
    /// A script step finished running.
    StepExecuted,
    /// The player asked to go back one step.
    BackRequested,
    QuickSaveRequested,
    QuickLoadRequested,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A checkpoint was recorded for `step`.
    Recorded { step: StepPointer },
    /// The session went back and now sits at `step`.
    WentBack { step: StepPointer },
    /// Going back was unavailable; nothing changed.
    AtEarliestStep,
    QuickSaved,
    /// The quick-save slot was loaded, or was empty.
    QuickLoaded { found: bool },
}
