//! Project session model.
//!
//! A [`Project`] is one editing session: a set of instruments, a transport
//! state, and an undo journal. Commands (play, record, ...) are forwarded to
//! the external audio engine; the resulting state is reflected back to the
//! rest of the application by the state bridge.

pub mod instrument;
pub mod undo;

use std::fmt;

use log::debug;

pub use instrument::{AudioEvent, InputChannel, Instrument};
pub use undo::UndoJournal;

use crate::engine::AudioEngine;
use crate::error::Result;

/// Audio state of a project's transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioState {
    /// Transport is stopped (default state).
    #[default]
    Stopped,
    /// Audio is actively playing.
    Playing,
    /// Playback is paused at the current position.
    Paused,
    /// Audio is being recorded.
    Recording,
    /// The project is being mixed down to a file.
    Exporting,
}

impl fmt::Display for AudioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioState::Stopped => write!(f, "Stopped"),
            AudioState::Playing => write!(f, "Playing"),
            AudioState::Paused => write!(f, "Paused"),
            AudioState::Recording => write!(f, "Recording"),
            AudioState::Exporting => write!(f, "Exporting"),
        }
    }
}

/// Position display mode of the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// Positions shown as bars, beats and ticks.
    #[default]
    BarsBeats,
    /// Positions shown as hours, minutes and seconds.
    HoursMinsSecs,
}

/// One editing session.
///
/// At most one project is live at a time; the application shell replaces it
/// wholesale on open/new/close.
pub struct Project {
    /// Project name, shown in the window title.
    pub name: String,
    /// Author metadata.
    pub author: String,
    /// Free-form notes.
    pub notes: String,
    /// All instruments in the session.
    pub instruments: Vec<Instrument>,
    /// Current transport mode.
    pub transport_mode: TransportMode,

    audio_state: AudioState,
    undo_journal: UndoJournal,
    engine: Box<dyn AudioEngine>,
}

impl Project {
    /// Create an empty project driving the given engine.
    pub fn new(name: impl Into<String>, engine: Box<dyn AudioEngine>) -> Self {
        Self {
            name: name.into(),
            author: String::new(),
            notes: String::new(),
            instruments: Vec::new(),
            transport_mode: TransportMode::default(),
            audio_state: AudioState::Stopped,
            undo_journal: UndoJournal::new(),
            engine,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current audio state as last reported/commanded.
    pub fn audio_state(&self) -> AudioState {
        self.audio_state
    }

    /// Instruments currently armed for recording.
    pub fn armed_instruments(&self) -> Vec<&Instrument> {
        self.instruments.iter().filter(|i| i.is_armed).collect()
    }

    /// Instruments currently selected in the editor.
    pub fn selected_instruments(&self) -> Vec<&Instrument> {
        self.instruments.iter().filter(|i| i.is_selected).collect()
    }

    /// Total number of selected events across all instruments.
    pub fn selected_event_count(&self) -> usize {
        self.instruments
            .iter()
            .map(|i| i.selected_event_count())
            .sum()
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        self.undo_journal.can_undo()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        self.undo_journal.can_redo()
    }

    /// Whether the session has edits past the last save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.undo_journal.has_unsaved_changes()
    }

    /// Mutable access to the undo journal, for editing code.
    pub fn undo_journal_mut(&mut self) -> &mut UndoJournal {
        &mut self.undo_journal
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Add an instrument and record the edit in the journal.
    pub fn add_instrument(&mut self, instrument: Instrument) {
        debug!("[PROJECT] add instrument '{}'", instrument.name);
        self.undo_journal
            .push(format!("add instrument '{}'", instrument.name));
        self.instruments.push(instrument);
    }

    /// Mark the project as saved.
    pub fn mark_saved(&mut self) {
        self.undo_journal.mark_saved();
    }

    // ========================================================================
    // Transport commands
    // ========================================================================

    /// Start playback.
    pub fn play(&mut self) -> Result<()> {
        self.engine.play()?;
        self.audio_state = AudioState::Playing;
        debug!("[PROJECT] playing");
        Ok(())
    }

    /// Pause playback.
    pub fn pause(&mut self) -> Result<()> {
        self.engine.pause()?;
        self.audio_state = AudioState::Paused;
        debug!("[PROJECT] paused");
        Ok(())
    }

    /// Stop playback or recording.
    pub fn stop(&mut self) -> Result<()> {
        self.engine.stop()?;
        self.audio_state = AudioState::Stopped;
        debug!("[PROJECT] stopped");
        Ok(())
    }

    /// Begin recording on armed instruments.
    ///
    /// The caller (the state bridge) validates armed-instrument and channel
    /// constraints before issuing this.
    pub fn record(&mut self) -> Result<()> {
        self.engine.record()?;
        self.audio_state = AudioState::Recording;
        debug!("[PROJECT] recording");
        Ok(())
    }

    /// Mix the project down to `path` using the named encoding pipeline.
    ///
    /// The engine performs the actual mixdown; the project only tracks the
    /// exporting state until the engine reports completion through
    /// [`Project::set_audio_state`].
    pub fn export(&mut self, path: &std::path::Path, pipeline: &str) -> Result<()> {
        debug!("[PROJECT] exporting to {}", path.display());
        self.audio_state = AudioState::Exporting;
        self.engine.export(path, pipeline)
    }

    /// Switch the transport's position display mode.
    pub fn set_transport_mode(&mut self, mode: TransportMode) -> Result<()> {
        self.engine.set_transport_mode(mode)?;
        self.transport_mode = mode;
        Ok(())
    }

    /// Record an audio-state notification from the engine.
    ///
    /// Used when the engine changes state on its own (export finished,
    /// recording stopped at end of input).
    pub fn set_audio_state(&mut self, state: AudioState) {
        debug!("[PROJECT] audio state {} -> {}", self.audio_state, state);
        self.audio_state = state;
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("instruments", &self.instruments.len())
            .field("audio_state", &self.audio_state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NullEngine;

    fn test_project() -> Project {
        Project::new("Demo", Box::new(NullEngine))
    }

    #[test]
    fn test_default_state_is_stopped() {
        let project = test_project();
        assert_eq!(project.audio_state(), AudioState::Stopped);
        assert!(!project.can_undo());
        assert!(!project.has_unsaved_changes());
    }

    #[test]
    fn test_transport_commands_update_state() {
        let mut project = test_project();

        project.play().unwrap();
        assert_eq!(project.audio_state(), AudioState::Playing);

        project.pause().unwrap();
        assert_eq!(project.audio_state(), AudioState::Paused);

        project.record().unwrap();
        assert_eq!(project.audio_state(), AudioState::Recording);

        project.stop().unwrap();
        assert_eq!(project.audio_state(), AudioState::Stopped);
    }

    #[test]
    fn test_add_instrument_dirties_project() {
        let mut project = test_project();
        project.add_instrument(Instrument::new("Vocals", InputChannel::new("hw:0", 0)));

        assert!(project.can_undo());
        assert!(project.has_unsaved_changes());

        project.mark_saved();
        assert!(!project.has_unsaved_changes());
    }

    #[test]
    fn test_armed_instruments_query() {
        let mut project = test_project();
        project.add_instrument(Instrument::new("Guitar", InputChannel::new("hw:0", 0)));
        project.add_instrument(Instrument::new("Bass", InputChannel::new("hw:0", 1)));
        project.instruments[1].is_armed = true;

        let armed = project.armed_instruments();
        assert_eq!(armed.len(), 1);
        assert_eq!(armed[0].name, "Bass");
    }

    #[test]
    fn test_set_transport_mode() {
        let mut project = test_project();
        project
            .set_transport_mode(TransportMode::HoursMinsSecs)
            .unwrap();
        assert_eq!(project.transport_mode, TransportMode::HoursMinsSecs);
    }
}
