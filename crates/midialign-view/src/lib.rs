//! midialign - inspect MIDI-to-MIDI alignments on stacked piano rolls
//!
//! Loads a score MIDI, a performance MIDI, a working alignment, and an
//! optional ground-truth alignment, then renders both sequences as
//! independently pannable/zoomable piano rolls with the alignment drawn
//! as cross-panel edges. A playback clock can scrub either panel, with
//! optional counterpart-synced scrolling of the other.

pub mod keybindings;
pub mod loader;
pub mod ui;
