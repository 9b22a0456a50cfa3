//! Core domain logic for midialign
//!
//! This crate holds everything the UI consumes but that does not depend on
//! iced: the note model with deterministic id assignment, Standard MIDI File
//! ingestion, alignment parsing and the derived alignment index, per-panel
//! viewport math, and the playback clock.

pub mod alignment;
pub mod midi;
pub mod note;
pub mod playback;
pub mod view;

pub use alignment::{parse_alignment, AlignmentIndex, AlignmentTuple, MatchClass, NO_ID};
pub use midi::{decode_midi, MidiIngestError};
pub use note::{Note, NoteCollection, Panel, SelectedNote, ONSET_EPSILON};
pub use playback::{PlaybackClock, ANCHOR_X};
pub use view::{Axis, ViewState, Visibility};
