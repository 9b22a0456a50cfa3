//! Ingestion message handlers
//!
//! Handles: PickMidi, MidiPicked, PickAlignment, AlignmentPicked, ClearAll
//!
//! Dialogs and reads run in Task::perform futures; decoding happens here
//! so a failure surfaces in the status line while prior state stays
//! untouched.

use std::path::PathBuf;
use std::sync::Arc;

use iced::Task;
use midialign_core::{decode_midi, parse_alignment, Panel};

use super::super::app::MidialignApp;
use super::super::message::{AlignmentSlot, Message};
use crate::loader;

impl MidialignApp {
    /// Handle PickMidi message
    pub fn handle_pick_midi(&mut self, panel: Panel) -> Task<Message> {
        Task::perform(loader::pick_midi(), move |result| {
            Message::MidiPicked(panel, result)
        })
    }

    /// Handle MidiPicked message
    pub fn handle_midi_picked(
        &mut self,
        panel: Panel,
        result: Option<(PathBuf, Vec<u8>)>,
    ) -> Task<Message> {
        let Some((path, bytes)) = result else {
            return Task::none();
        };
        let name = loader::display_name(&path);

        match decode_midi(&bytes) {
            Ok(collection) => {
                log::info!(
                    "loaded {} notes ({:.2}s) into {} from {:?}",
                    collection.len(),
                    collection.total_duration(),
                    panel.label(),
                    path
                );
                self.status = format!("{}: {} notes", name, collection.len());

                match panel {
                    Panel::Score => {
                        self.score = Some(Arc::new(collection));
                        self.score_name = Some(name);
                    }
                    Panel::Perf => {
                        self.perf = Some(Arc::new(collection));
                        self.perf_name = Some(name);
                    }
                }

                // The selection referenced the replaced collection's ids.
                if self.selection.map(|s| s.panel) == Some(panel) {
                    self.selection = None;
                }
                self.rebuild_index();
            }
            Err(e) => {
                log::warn!("MIDI decode failed for {:?}: {}", path, e);
                self.status = format!("Failed to load {}: {}", name, e);
            }
        }

        Task::none()
    }

    /// Handle PickAlignment message
    pub fn handle_pick_alignment(&mut self, slot: AlignmentSlot) -> Task<Message> {
        Task::perform(loader::pick_alignment(), move |result| {
            Message::AlignmentPicked(slot, result)
        })
    }

    /// Handle AlignmentPicked message
    pub fn handle_alignment_picked(
        &mut self,
        slot: AlignmentSlot,
        result: Option<(PathBuf, String)>,
    ) -> Task<Message> {
        let Some((path, text)) = result else {
            return Task::none();
        };

        let tuples = parse_alignment(&text);
        log::info!(
            "loaded {} {} tuples from {:?}",
            tuples.len(),
            slot.label(),
            path
        );
        self.status = format!(
            "{}: {} {} tuples",
            loader::display_name(&path),
            tuples.len(),
            slot.label()
        );

        match slot {
            AlignmentSlot::Working => self.working = tuples,
            AlignmentSlot::GroundTruth => self.ground_truth = tuples,
        }
        self.rebuild_index();

        Task::none()
    }

    /// Handle ClearAll message
    ///
    /// Drops data, selection, and playback. Pan/zoom survive so a
    /// reload lands in the same place.
    pub fn handle_clear_all(&mut self) -> Task<Message> {
        self.score = None;
        self.perf = None;
        self.score_name = None;
        self.perf_name = None;
        self.working.clear();
        self.ground_truth.clear();
        self.selection = None;
        self.clock.stop();
        self.playhead = None;
        self.rebuild_index();
        self.status = String::from("Cleared");
        log::info!("cleared all loaded data");

        Task::none()
    }
}
