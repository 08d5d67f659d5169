//! Instruments and the audio events recorded onto them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a recording input: a capture device plus a track on it.
///
/// Two armed instruments must never share the same channel; the bridge
/// checks this before allowing a recording to start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputChannel {
    /// Capture device identifier (e.g. an ALSA device name).
    pub device: String,
    /// Track number within the device.
    pub track: u32,
}

impl InputChannel {
    pub fn new(device: impl Into<String>, track: u32) -> Self {
        Self {
            device: device.into(),
            track,
        }
    }
}

/// An audio clip placed on an instrument's timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioEvent {
    /// Stable identity of the clip.
    pub id: Uuid,
    /// Display name, usually derived from the source file.
    pub name: String,
    /// Whether the clip is currently selected in the editor.
    pub is_selected: bool,
}

impl AudioEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_selected: false,
        }
    }
}

/// A recordable/playable channel within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    /// Display name shown in the instrument list.
    pub name: String,
    /// Whether this instrument will capture audio on the next record.
    pub is_armed: bool,
    /// Whether the instrument is selected in the editor.
    pub is_selected: bool,
    /// The input this instrument records from.
    pub input: InputChannel,
    /// Clips on this instrument's timeline.
    pub events: Vec<AudioEvent>,
}

impl Instrument {
    /// Create an unarmed, unselected instrument on the given input.
    pub fn new(name: impl Into<String>, input: InputChannel) -> Self {
        Self {
            name: name.into(),
            is_armed: false,
            is_selected: false,
            input,
            events: Vec::new(),
        }
    }

    /// Toggle the armed flag.
    pub fn toggle_armed(&mut self) {
        self.is_armed = !self.is_armed;
    }

    /// Number of selected events on this instrument.
    pub fn selected_event_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_selected).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_instrument_is_disarmed() {
        let instr = Instrument::new("Guitar", InputChannel::new("hw:0", 0));
        assert!(!instr.is_armed);
        assert!(!instr.is_selected);
        assert!(instr.events.is_empty());
    }

    #[test]
    fn test_toggle_armed() {
        let mut instr = Instrument::new("Guitar", InputChannel::new("hw:0", 0));
        instr.toggle_armed();
        assert!(instr.is_armed);
        instr.toggle_armed();
        assert!(!instr.is_armed);
    }

    #[test]
    fn test_selected_event_count() {
        let mut instr = Instrument::new("Drums", InputChannel::new("hw:0", 1));
        instr.events.push(AudioEvent::new("take 1"));
        instr.events.push(AudioEvent::new("take 2"));
        instr.events[1].is_selected = true;

        assert_eq!(instr.selected_event_count(), 1);
    }

    #[test]
    fn test_input_channel_equality() {
        assert_eq!(InputChannel::new("hw:0", 2), InputChannel::new("hw:0", 2));
        assert_ne!(InputChannel::new("hw:0", 2), InputChannel::new("hw:0", 3));
        assert_ne!(InputChannel::new("hw:0", 2), InputChannel::new("hw:1", 2));
    }
}
