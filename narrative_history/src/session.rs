//! History session - owns the live canvas, the narrative engine and the step
//! history, and keeps the three in sync.
//!
//! Every operation that loads state decodes it completely before touching
//! anything live. A failed go-back or load leaves the session as it was.

use std::fs;
use std::path::{Path, PathBuf};

use canvas_memory::{Canvas, ElementRegistry};
use tracing::{debug, info, warn};

use crate::config::HistoryConfig;
use crate::events::{EventOutcome, NarrativeEvent};
use crate::history::{Checkpoint, NarrativeState, StepHistory, StepPointer};
use crate::save::{
    build_save_document, parse_save_document, FileSlot, SaveDocument, SaveError, SaveMode,
    SavePayload, SaveSlot, SlotError,
};

/// The interpreter side of a session.
pub trait NarrativeEngine {
    /// Current step, variables and dialogue.
    fn narrative_state(&self) -> NarrativeState;

    /// Replace the interpreter state with `state`.
    fn apply_narrative_state(&mut self, state: &NarrativeState);
}

/// Result of [`HistorySession::go_back`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoBackOutcome {
    /// The session now sits at `step`.
    Restored { step: StepPointer },
    /// Already at the earliest step. Nothing changed.
    AtEarliestStep,
}

/// What a successful load put in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A whole history of `steps` checkpoints replaced the old one.
    History { steps: usize },
    /// A single checkpoint at `step` became current.
    Checkpoint { step: StepPointer },
}

/// Where a loaded quick-save checkpoint goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// On top of the existing history.
    Append,
    /// As the only checkpoint of a new history.
    Replace,
}

/// A running narrative with its step history.
#[derive(Debug)]
pub struct HistorySession<E> {
    config: HistoryConfig,
    registry: ElementRegistry,
    canvas: Canvas,
    engine: E,
    history: StepHistory,
    slots: Box<dyn SaveSlot>,
}

impl<E: NarrativeEngine> HistorySession<E> {
    /// Start a session on an empty canvas with the built-in element variants.
    pub fn new(config: HistoryConfig, engine: E, slots: impl SaveSlot + 'static) -> Self {
        Self::from_parts(
            config,
            ElementRegistry::with_builtin(),
            Canvas::new(),
            engine,
            Box::new(slots),
        )
    }

    /// Start a session from existing parts. The initial checkpoint is taken
    /// from `canvas` and the engine's current state.
    pub fn from_parts(
        config: HistoryConfig,
        registry: ElementRegistry,
        canvas: Canvas,
        engine: E,
        slots: Box<dyn SaveSlot>,
    ) -> Self {
        let initial = Checkpoint::capture(&canvas, &engine.narrative_state());
        debug!(step = %initial.step, "history session started");
        Self {
            config,
            registry,
            canvas,
            engine,
            history: StepHistory::new(initial),
            slots,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The live canvas. Changes are recorded by the next [`Self::step_executed`].
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    pub fn slots(&self) -> &dyn SaveSlot {
        self.slots.as_ref()
    }

    /// Checkpoint of the live state, not yet recorded.
    pub fn capture(&self) -> Checkpoint {
        Checkpoint::capture(&self.canvas, &self.engine.narrative_state())
    }

    /// Dispatch a narrative event.
    pub fn handle_event(&mut self, event: NarrativeEvent) -> Result<EventOutcome, SaveError> {
        let outcome = match event {
            NarrativeEvent::StepExecuted => EventOutcome::Recorded {
                step: self.step_executed().step.clone(),
            },
            NarrativeEvent::BackRequested => match self.go_back()? {
                GoBackOutcome::Restored { step } => EventOutcome::WentBack { step },
                GoBackOutcome::AtEarliestStep => EventOutcome::AtEarliestStep,
            },
            NarrativeEvent::QuickSaveRequested => {
                self.quick_save()?;
                EventOutcome::QuickSaved
            }
            NarrativeEvent::QuickLoadRequested => EventOutcome::QuickLoaded {
                found: self.quick_load()?,
            },
        };
        Ok(outcome)
    }

    /// Record the live state as a new checkpoint.
    pub fn step_executed(&mut self) -> &Checkpoint {
        let checkpoint = self.capture();
        debug!(
            step = %checkpoint.step,
            elements = checkpoint.canvas.len(),
            "recording step"
        );
        self.history.record_step(checkpoint);
        self.enforce_cap();
        self.write_refresh_save();
        self.history.current()
    }

    /// Go back one step, restoring the canvas and the engine.
    pub fn go_back(&mut self) -> Result<GoBackOutcome, SaveError> {
        let Some(target) = self.history.previous() else {
            debug!("go back unavailable at the earliest step");
            return Ok(GoBackOutcome::AtEarliestStep);
        };
        let canvas = Canvas::from_snapshot(&target.canvas, &self.registry)?;
        let state = target.narrative_state();

        self.history.go_back();
        self.canvas = canvas;
        self.engine.apply_narrative_state(&state);
        info!(step = %state.step, "went back one step");

        self.write_refresh_save();
        Ok(GoBackOutcome::Restored { step: state.step })
    }

    /// Encode the history as a save document.
    pub fn export_save(&self, mode: SaveMode) -> Result<String, SaveError> {
        build_save_document(&self.history, mode, self.config.pretty)
    }

    /// Load a save document. A full save replaces the history; a quick save
    /// is appended as the newest step.
    pub fn import_save(&mut self, text: &str) -> Result<LoadOutcome, SaveError> {
        let document = parse_save_document(text)?;
        let outcome = self.apply_document(document, Placement::Append)?;
        self.write_refresh_save();
        Ok(outcome)
    }

    /// Store the current checkpoint in the quick-save slot.
    pub fn quick_save(&mut self) -> Result<(), SaveError> {
        let text = self.export_save(SaveMode::Quick)?;
        self.slots.write(&self.config.quick_slot_key, &text)?;
        info!(step = %self.history.current().step, "quick saved");
        Ok(())
    }

    /// Load the quick-save slot. Returns `false` when it is empty.
    pub fn quick_load(&mut self) -> Result<bool, SaveError> {
        let Some(text) = self.slots.read(&self.config.quick_slot_key)? else {
            debug!("quick save slot is empty");
            return Ok(false);
        };
        self.import_save(&text)?;
        Ok(true)
    }

    /// Write the refresh slot. Failures are logged, never returned.
    pub fn write_refresh_save(&mut self) {
        if !self.config.write_refresh_slot {
            return;
        }
        if let Err(error) = self.try_write_refresh_save() {
            warn!(%error, key = %self.config.refresh_slot_key, "failed to write refresh save");
        }
    }

    fn try_write_refresh_save(&mut self) -> Result<(), SaveError> {
        let text = self.export_save(self.config.refresh_save_mode)?;
        self.slots.write(&self.config.refresh_slot_key, &text)?;
        Ok(())
    }

    /// Restore the state left in the refresh slot, then erase the slot.
    ///
    /// Returns `false` when there is nothing to recover. The slot is read
    /// only once: it is erased even if its content cannot be loaded.
    pub fn recover_refresh_save(&mut self) -> Result<bool, SaveError> {
        let Some(text) = self.slots.take(&self.config.refresh_slot_key)? else {
            return Ok(false);
        };
        let document = parse_save_document(&text)?;
        let outcome = self.apply_document(document, Placement::Replace)?;
        info!(?outcome, "recovered refresh save");
        Ok(true)
    }

    /// Write a full save into `dir`, named after the configured file name.
    pub fn save_to_file(&self, dir: impl AsRef<Path>) -> Result<PathBuf, SaveError> {
        let mut slot = FileSlot::new(dir.as_ref());
        let text = self.export_save(SaveMode::Full)?;
        slot.write(&self.config.save_file_name, &text)?;
        Ok(slot.path_for(&self.config.save_file_name)?)
    }

    /// Load a save document from a file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome, SaveError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SlotError::Io {
            key: path.display().to_string(),
            source,
        })?;
        self.import_save(&text)
    }

    /// Decode everything `document` needs, then swap it in.
    fn apply_document(
        &mut self,
        document: SaveDocument,
        placement: Placement,
    ) -> Result<LoadOutcome, SaveError> {
        if let SavePayload::History(history) = &document.payload {
            for checkpoint in history.iter() {
                Canvas::from_snapshot(&checkpoint.canvas, &self.registry)?;
            }
        }
        let canvas = Canvas::from_snapshot(&document.current().canvas, &self.registry)?;
        let state = document.current().narrative_state();

        let outcome = match document.payload {
            SavePayload::History(history) => {
                let steps = history.len();
                self.history = history;
                LoadOutcome::History { steps }
            }
            SavePayload::Checkpoint(checkpoint) => {
                let step = checkpoint.step.clone();
                match placement {
                    Placement::Append => self.history.record_step(checkpoint),
                    Placement::Replace => self.history = StepHistory::new(checkpoint),
                }
                LoadOutcome::Checkpoint { step }
            }
        };
        self.enforce_cap();
        self.canvas = canvas;
        self.engine.apply_narrative_state(&state);
        info!(?outcome, "save loaded");
        Ok(outcome)
    }

    fn enforce_cap(&mut self) {
        if let Some(max_history) = self.config.max_history {
            let dropped = self.history.cap(max_history);
            if dropped > 0 {
                debug!(dropped, max_history, "dropped oldest checkpoints");
            }
        }
    }
}
