//! Canvas and view-operation message handlers
//!
//! Handles: Roll (pan/zoom/click), ZoomButton

use iced::Task;
use midialign_core::{Axis, Panel, SelectedNote};
use midialign_widgets::RollMessage;

use super::super::app::MidialignApp;
use super::super::message::Message;

impl MidialignApp {
    /// Handle a message published by the piano-roll canvas
    pub fn handle_roll(&mut self, message: RollMessage) -> Task<Message> {
        match message {
            RollMessage::Pan { panel, dx, dy } => {
                // The driving panel's horizontal position belongs to the
                // clock while playing; vertical pans stay live.
                let driving = self.clock.active_panel() == Some(panel);
                let dx = if driving { 0.0 } else { dx };
                self.view_state_mut(panel).pan(dx, dy);

                // Sync mirrors the horizontal component only, and only
                // while playback is inactive.
                if self.sync_enabled && !self.clock.is_playing() {
                    self.view_state_mut(panel.other()).pan(dx, 0.0);
                }
            }
            RollMessage::Zoom {
                panel,
                axis,
                factor,
                anchor_px,
            } => {
                self.view_state_mut(panel).zoom(axis, factor, anchor_px);
            }
            RollMessage::NoteClicked { panel, id, pitch } => {
                let clicked = SelectedNote { panel, id, pitch };
                // Clicking the selected note again deselects it.
                self.selection = if self.selection == Some(clicked) {
                    None
                } else {
                    Some(clicked)
                };
            }
            RollMessage::BlankClicked => {
                self.selection = None;
            }
        }

        Task::none()
    }

    /// Handle ZoomButton message (toolbar time zoom, centered)
    pub fn handle_zoom_button(&mut self, panel: Panel, factor: f64) -> Task<Message> {
        let center = self.window_size.width as f64 / 2.0;
        self.view_state_mut(panel).zoom(Axis::X, factor, center);
        Task::none()
    }
}
