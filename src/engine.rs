//! Audio engine command interface.
//!
//! The actual playback/recording pipeline lives outside this crate. The
//! session core only issues commands to it through [`AudioEngine`] and reads
//! its state back through project notifications.

use log::debug;

use crate::error::Result;
use crate::project::TransportMode;

/// Command sink for the external audio engine.
///
/// Implementations forward each call to the real pipeline. Engine failures
/// (pipeline refused the command, device unavailable) surface as
/// `MixboardError::EngineError`.
pub trait AudioEngine {
    /// Start or resume playback.
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the playhead position.
    fn pause(&mut self) -> Result<()>;

    /// Stop playback or recording and reset the playhead.
    fn stop(&mut self) -> Result<()>;

    /// Begin recording on all armed inputs.
    fn record(&mut self) -> Result<()>;

    /// Switch the transport's position display mode.
    fn set_transport_mode(&mut self, mode: TransportMode) -> Result<()>;

    /// Mix the project down to a file using the named encoding pipeline.
    fn export(&mut self, path: &std::path::Path, pipeline: &str) -> Result<()>;
}

/// Engine that accepts every command and does nothing.
///
/// Used by the CLI (which never plays audio) and as a stand-in when a
/// project is manipulated without a live pipeline.
#[derive(Debug, Default)]
pub struct NullEngine;

impl AudioEngine for NullEngine {
    fn play(&mut self) -> Result<()> {
        debug!("[ENGINE] play (null)");
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        debug!("[ENGINE] pause (null)");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        debug!("[ENGINE] stop (null)");
        Ok(())
    }

    fn record(&mut self) -> Result<()> {
        debug!("[ENGINE] record (null)");
        Ok(())
    }

    fn set_transport_mode(&mut self, mode: TransportMode) -> Result<()> {
        debug!("[ENGINE] set transport mode {:?} (null)", mode);
        Ok(())
    }

    fn export(&mut self, path: &std::path::Path, pipeline: &str) -> Result<()> {
        debug!("[ENGINE] export to {} via {} (null)", path.display(), pipeline);
        Ok(())
    }
}
