//! Playback message handlers
//!
//! Handles: TogglePlayback

use std::time::Instant;

use iced::Task;
use midialign_core::Panel;

use super::super::app::MidialignApp;
use super::super::message::Message;

impl MidialignApp {
    /// Handle TogglePlayback message
    ///
    /// Same panel while playing stops; anything else starts (or
    /// switches to) that panel from the time under its anchor column.
    pub fn handle_toggle_playback(&mut self, panel: Panel) -> Task<Message> {
        let view = *self.view_state(panel);
        match self.clock.toggle(panel, &view, Instant::now()) {
            Some(offset) => {
                self.playhead = Some((panel, offset));
                log::info!("playback started on {} at {:.3}s", panel.label(), offset);
            }
            None => {
                self.playhead = None;
                log::info!("playback stopped");
            }
        }

        Task::none()
    }
}
