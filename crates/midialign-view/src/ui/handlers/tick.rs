//! Tick handler for the playback render loop
//!
//! Runs ~60 times per second while the clock is playing. All scroll
//! derivation flows one way from the clock position: the driving panel
//! is pinned to the anchor column, and in sync mode the paired panel
//! follows the counterpart of the note sounding now.

use std::time::Instant;

use iced::Task;
use midialign_core::{Panel, PlaybackClock};

use super::super::app::MidialignApp;
use super::super::message::Message;

impl MidialignApp {
    /// Handle Tick message
    pub fn handle_tick(&mut self) -> Task<Message> {
        let Some(panel) = self.clock.active_panel() else {
            self.playhead = None;
            return Task::none();
        };
        let Some(position) = self.clock.position_at(Instant::now()) else {
            self.playhead = None;
            return Task::none();
        };

        self.playhead = Some((panel, position));

        // Keep the playhead visually pinned at the anchor column.
        let zoom_x = self.view_state(panel).zoom_x;
        self.view_state_mut(panel).scroll_x = PlaybackClock::pinned_scroll_x(position, zoom_x);

        if self.sync_enabled {
            self.sync_follow(panel, position);
        }

        Task::none()
    }

    /// Pin the paired panel's anchor to the counterpart of the note
    /// sounding at `position` on the driving panel. No containing note,
    /// no counterpart, or a sentinel mapping all mean no movement.
    fn sync_follow(&mut self, panel: Panel, position: f64) {
        let Some(note_id) = self
            .collection(panel)
            .and_then(|c| c.note_at_time(position))
            .map(|n| n.id)
        else {
            return;
        };
        let Some(counterpart_id) = self.index.counterpart(panel, note_id) else {
            return;
        };

        let other = panel.other();
        let Some(counterpart_start) = self
            .collection(other)
            .and_then(|c| c.get(counterpart_id))
            .map(|n| n.start)
        else {
            return;
        };

        let zoom_x = self.view_state(other).zoom_x;
        self.view_state_mut(other).scroll_x =
            PlaybackClock::pinned_scroll_x(counterpart_start, zoom_x);
    }
}
