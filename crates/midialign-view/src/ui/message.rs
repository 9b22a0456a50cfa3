//! Application message types
//!
//! All state changes flow through [`Message`] in the single update loop.

use std::path::PathBuf;

use iced::keyboard::{Key, Modifiers};
use midialign_core::{Panel, Visibility};
use midialign_widgets::RollMessage;

/// Which of the two alignment slots a file load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentSlot {
    /// The working alignment under inspection.
    Working,
    /// The ground-truth reference it is verified against.
    GroundTruth,
}

impl AlignmentSlot {
    pub fn label(self) -> &'static str {
        match self {
            AlignmentSlot::Working => "alignment",
            AlignmentSlot::GroundTruth => "ground truth",
        }
    }
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Loading
    /// Open a file dialog for one panel's MIDI file
    PickMidi(Panel),
    /// Dialog result with raw SMF bytes (None = cancelled)
    MidiPicked(Panel, Option<(PathBuf, Vec<u8>)>),
    /// Open a file dialog for an alignment text file
    PickAlignment(AlignmentSlot),
    /// Dialog result with the file text (None = cancelled)
    AlignmentPicked(AlignmentSlot, Option<(PathBuf, String)>),
    /// Drop all loaded data, selection, and playback; keep pan/zoom
    ClearAll,

    // Canvas and view operations
    /// Pan/zoom/click from the piano-roll canvas
    Roll(RollMessage),
    /// Toolbar time-zoom button, anchored at the panel's horizontal center
    ZoomButton(Panel, f64),
    /// Overlay visibility tri-state
    SetVisibility(Visibility),
    /// Toggle synchronized horizontal scrolling
    ToggleSync,

    // Playback
    /// Start/stop the playback clock on one panel
    TogglePlayback(Panel),
    /// Render tick while playing (playhead + scroll derivation)
    Tick,

    // Keyboard and window
    KeyPressed(Key, Modifiers),
    /// Modifier keys changed (tracked for canvas wheel-zoom routing)
    ModifiersChanged(Modifiers),
    WindowResized(iced::Size),
}
