//! Project state bridge.
//!
//! Translates project lifecycle/audio-state/undo notifications into an
//! explicit [`ControlState`] (what the presentation layer renders), and
//! translates user intent (record/play/stop toggles) into validated commands
//! sent to the project.
//!
//! The presentation layer never reaches into widgets from here; it observes
//! `ControlState` snapshots. Programmatic toggle updates are wrapped in a
//! reentrancy guard so the resulting "user changed the toggle" notification
//! is recognized as self-inflicted and ignored.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};

use crate::error::Result;
use crate::project::{AudioState, Project, TransportMode};

/// Application name used in window titles.
const APP_NAME: &str = "Mixboard";

const RECORD_TIP_IDLE: &str = "Arm an instrument, then click to begin recording";
const RECORD_TIP_ACTIVE: &str = "Stop recording";
const STOP_TIP_IDLE: &str = "Stop playback";
const STOP_TIP_ACTIVE: &str = "Stop recording";

/// Icon shown on the play button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayIcon {
    #[default]
    Play,
    Pause,
}

/// Why a record request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBlocked {
    /// No instruments have been added to the project.
    NoInstruments,
    /// Instruments exist but none are armed.
    NothingArmed,
    /// Two armed instruments share the same input channel.
    ChannelConflict {
        /// Name of the first offending instrument.
        first: String,
        /// Name of the second offending instrument.
        second: String,
    },
}

impl RecordBlocked {
    /// User-facing message for the condition.
    pub fn message(&self) -> String {
        match self {
            RecordBlocked::NoInstruments => {
                "No instruments have been added. You must add an instrument before recording."
                    .to_string()
            }
            RecordBlocked::NothingArmed => {
                "No instruments are armed for recording. You need to arm an instrument before you can begin recording."
                    .to_string()
            }
            RecordBlocked::ChannelConflict { first, second } => format!(
                "The instruments '{first}' and '{second}' both have the same input selected. \
                 Please either disarm one, or connect it to a different input."
            ),
        }
    }
}

/// Result of a record request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Recording was started.
    Started,
    /// The project was already recording; a stop was issued instead.
    StoppedExisting,
    /// The request came from a programmatic toggle update and was ignored.
    Suppressed,
    /// Validation failed; the toggle was reverted and no command issued.
    Blocked(RecordBlocked),
}

/// Explicit UI-control enablement derived from project state.
///
/// `transport_controls_enabled` covers the whole recording-disabled bundle:
/// play/seek buttons, edit menu, instrument menu, toolbar timeline,
/// add-instrument and add-audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub stop_enabled: bool,
    pub record_enabled: bool,
    pub transport_controls_enabled: bool,
    pub undo_enabled: bool,
    pub redo_enabled: bool,
    pub record_toggle_active: bool,
    pub play_icon: PlayIcon,
    pub mode_bars_beats_active: bool,
    pub mode_hours_mins_secs_active: bool,
    pub record_tooltip: &'static str,
    pub stop_tooltip: &'static str,
    pub window_title: String,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            stop_enabled: true,
            record_enabled: true,
            transport_controls_enabled: true,
            undo_enabled: false,
            redo_enabled: false,
            record_toggle_active: false,
            play_icon: PlayIcon::Play,
            mode_bars_beats_active: true,
            mode_hours_mins_secs_active: false,
            record_tooltip: RECORD_TIP_IDLE,
            stop_tooltip: STOP_TIP_IDLE,
            window_title: APP_NAME.to_string(),
        }
    }
}

/// Scoped reentrancy suppression.
///
/// While a guard is alive, toggle-change notifications are treated as
/// self-inflicted and ignored by the request handlers. Dropping the guard
/// releases suppression on every exit path, including early returns.
pub struct SuppressGuard {
    flag: Rc<Cell<bool>>,
}

impl SuppressGuard {
    fn acquire(flag: &Rc<Cell<bool>>) -> Self {
        flag.set(true);
        Self {
            flag: Rc::clone(flag),
        }
    }
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Bridge between a live [`Project`] and the presentation layer.
pub struct StateBridge {
    project: Project,
    controls: ControlState,
    suppress: Rc<Cell<bool>>,

    is_playing: bool,
    is_paused: bool,
    is_recording: bool,

    observer: Option<Box<dyn FnMut(&ControlState)>>,
}

impl StateBridge {
    /// Wrap a project, starting from the default (stopped) control state.
    pub fn new(project: Project) -> Self {
        let mut bridge = Self {
            project,
            controls: ControlState::default(),
            suppress: Rc::new(Cell::new(false)),
            is_playing: false,
            is_paused: false,
            is_recording: false,
            observer: None,
        };
        bridge.on_undo_redo_changed();
        bridge
    }

    /// Register the single control-state observer (the presentation layer).
    pub fn set_observer(&mut self, observer: Box<dyn FnMut(&ControlState)>) {
        self.observer = Some(observer);
    }

    /// Current control state snapshot.
    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// The wrapped project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Mutable access to the wrapped project.
    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    /// Consume the bridge, returning the project (session close).
    pub fn into_project(self) -> Project {
        self.project
    }

    /// Whether programmatic toggle updates are currently in flight.
    pub fn is_suppressed(&self) -> bool {
        self.suppress.get()
    }

    /// Whether the last reported audio state was Playing.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the last reported audio state was Paused.
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Whether the last reported audio state was Recording.
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Acquire the reentrancy guard for external programmatic toggle updates.
    pub fn suppress_scope(&self) -> SuppressGuard {
        SuppressGuard::acquire(&self.suppress)
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.controls);
        }
    }

    // ========================================================================
    // Notifications from the project/engine
    // ========================================================================

    /// React to an audio-state change.
    ///
    /// Pure reflection of external state: recomputes the playing/paused/
    /// recording flags, the enablement booleans and the toggle visuals.
    /// Export start/stop arrive as `Exporting` and `Stopped`.
    pub fn on_audio_state_changed(&mut self, state: AudioState) {
        debug!("[BRIDGE] audio state changed: {}", state);

        self.is_playing = state == AudioState::Playing;
        self.is_paused = state == AudioState::Paused;
        self.is_recording = state == AudioState::Recording;

        // Stop is always clickable.
        self.controls.stop_enabled = true;
        self.controls.record_enabled = !self.is_playing;
        self.controls.transport_controls_enabled = !self.is_recording;

        self.controls.record_tooltip = if self.is_recording {
            RECORD_TIP_ACTIVE
        } else {
            RECORD_TIP_IDLE
        };
        self.controls.stop_tooltip = if self.is_recording {
            STOP_TIP_ACTIVE
        } else {
            STOP_TIP_IDLE
        };

        // Reconcile toggle visuals without re-triggering the request handlers.
        let _guard = SuppressGuard::acquire(&self.suppress);
        self.controls.record_toggle_active = self.is_recording;
        self.controls.play_icon = if self.is_playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        };
        self.notify();
    }

    /// React to a change of the project's undo/redo stacks.
    ///
    /// The undo/redo affordances are exactly the project's reported
    /// capability flags, never tracked independently.
    pub fn on_undo_redo_changed(&mut self) {
        self.controls.undo_enabled = self.project.can_undo();
        self.controls.redo_enabled = self.project.can_redo();

        self.controls.window_title = if self.project.has_unsaved_changes() {
            format!("*{} - {}", self.project.name, APP_NAME)
        } else {
            format!("{} - {}", self.project.name, APP_NAME)
        };
        self.notify();
    }

    /// React to a transport display-mode change.
    pub fn on_transport_mode_changed(&mut self, mode: TransportMode) {
        if self.suppress.get() {
            return;
        }
        let _guard = SuppressGuard::acquire(&self.suppress);
        self.controls.mode_bars_beats_active = mode == TransportMode::BarsBeats;
        self.controls.mode_hours_mins_secs_active = mode == TransportMode::HoursMinsSecs;
        self.notify();
    }

    // ========================================================================
    // User intent
    // ========================================================================

    /// Handle the record toggle.
    ///
    /// Validates that at least one instrument is armed and that no two armed
    /// instruments share an input channel before issuing `record()`. On a
    /// validation failure the toggle is reverted under the reentrancy guard
    /// and the condition is returned for the presentation layer to report;
    /// it is never fatal. If already recording, a stop is issued instead.
    pub fn request_record(&mut self) -> Result<RecordOutcome> {
        if self.suppress.get() {
            // The toggle changed because we set it ourselves.
            return Ok(RecordOutcome::Suppressed);
        }

        if self.is_recording {
            self.project.stop()?;
            let state = self.project.audio_state();
            self.on_audio_state_changed(state);
            return Ok(RecordOutcome::StoppedExisting);
        }

        if let Some(reason) = self.validate_record() {
            warn!("[BRIDGE] record blocked: {}", reason.message());
            let _guard = SuppressGuard::acquire(&self.suppress);
            self.controls.record_toggle_active = false;
            self.notify();
            return Ok(RecordOutcome::Blocked(reason));
        }

        debug!("[BRIDGE] record request accepted");
        self.project.record()?;
        let state = self.project.audio_state();
        self.on_audio_state_changed(state);
        Ok(RecordOutcome::Started)
    }

    /// Handle the play toggle: play when stopped/paused, pause when playing.
    ///
    /// The play/pause icon is flipped before the command is issued
    /// (optimistic update); the following audio-state notification settles it.
    pub fn request_play_toggle(&mut self) -> Result<()> {
        if self.suppress.get() {
            return Ok(());
        }

        let will_play = !self.is_playing;
        {
            let _guard = SuppressGuard::acquire(&self.suppress);
            self.controls.play_icon = if will_play {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            };
            self.notify();
        }

        if will_play {
            self.project.play()?;
        } else {
            self.project.pause()?;
        }
        let state = self.project.audio_state();
        self.on_audio_state_changed(state);
        Ok(())
    }

    /// Handle the stop button. Always legal.
    pub fn request_stop(&mut self) -> Result<()> {
        self.project.stop()?;
        let state = self.project.audio_state();
        self.on_audio_state_changed(state);
        Ok(())
    }

    /// Handle a display-mode toggle from the user.
    pub fn request_transport_mode(&mut self, mode: TransportMode) -> Result<()> {
        if self.suppress.get() {
            return Ok(());
        }
        self.project.set_transport_mode(mode)?;
        self.on_transport_mode_changed(mode);
        Ok(())
    }

    /// Check the armed set for record preconditions.
    ///
    /// The channel check is pairwise over the armed subset and
    /// order-independent; the first conflict found is reported.
    fn validate_record(&self) -> Option<RecordBlocked> {
        if self.project.instruments.is_empty() {
            return Some(RecordBlocked::NoInstruments);
        }

        let armed = self.project.armed_instruments();
        if armed.is_empty() {
            return Some(RecordBlocked::NothingArmed);
        }

        for (i, a) in armed.iter().enumerate() {
            for b in &armed[i + 1..] {
                if a.input == b.input {
                    return Some(RecordBlocked::ChannelConflict {
                        first: a.name.clone(),
                        second: b.name.clone(),
                    });
                }
            }
        }

        None
    }
}
