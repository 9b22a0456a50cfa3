//! Keyboard input message handlers
//!
//! Handles: KeyPressed, ModifiersChanged

use iced::{keyboard, Task};
use midialign_core::{Panel, SelectedNote};

use super::super::app::MidialignApp;
use super::super::message::Message;
use crate::keybindings::{self, ViewerKeybindings};

impl MidialignApp {
    /// Handle KeyPressed message
    pub fn handle_key_pressed(
        &mut self,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        // Canvas wheel routing reads the modifier state from here.
        self.modifiers = modifiers;

        let key_str = keybindings::key_to_string(&key, &modifiers);
        if key_str.is_empty() {
            return Task::none();
        }

        let bindings = &self.keybindings.viewer;

        if ViewerKeybindings::matches(&bindings.sync_toggle, &key_str) {
            return self.update(Message::ToggleSync);
        }

        if ViewerKeybindings::matches(&bindings.play_pause, &key_str) {
            let panel = self.clock.active_panel().unwrap_or(Panel::Score);
            return self.update(Message::TogglePlayback(panel));
        }

        if ViewerKeybindings::matches(&bindings.select_prev, &key_str) {
            self.step_selection(-1);
            return Task::none();
        }
        if ViewerKeybindings::matches(&bindings.select_next, &key_str) {
            self.step_selection(1);
            return Task::none();
        }

        Task::none()
    }

    /// Handle ModifiersChanged message
    pub fn handle_modifiers_changed(&mut self, modifiers: keyboard::Modifiers) -> Task<Message> {
        self.modifiers = modifiers;
        Task::none()
    }

    /// Move the selection to the adjacent id within the same collection.
    /// Bounds are checked before any note lookup; at either end this is
    /// a no-op rather than a clamp or wrap.
    fn step_selection(&mut self, delta: i64) {
        let Some(sel) = self.selection else {
            return;
        };
        let Some(collection) = self.collection(sel.panel) else {
            return;
        };

        let next = sel.id as i64 + delta;
        if next < 0 || next as usize >= collection.len() {
            return;
        }

        let id = next as usize;
        if let Some(note) = collection.get(id) {
            self.selection = Some(SelectedNote {
                panel: sel.panel,
                id,
                pitch: note.pitch,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midialign_core::note::NoteEvent;
    use midialign_core::NoteCollection;
    use std::sync::Arc;

    fn app_with_score(n: usize) -> MidialignApp {
        let (mut app, _) = MidialignApp::new();
        app.score = Some(Arc::new(NoteCollection::from_events(
            (0..n)
                .map(|i| NoteEvent {
                    pitch: 60 + i as u8,
                    start: i as f64,
                    duration: 0.5,
                    velocity: 80,
                })
                .collect(),
        )));
        app
    }

    #[test]
    fn test_step_selection_moves_and_updates_pitch() {
        let mut app = app_with_score(3);
        app.selection = Some(SelectedNote {
            panel: Panel::Score,
            id: 0,
            pitch: 60,
        });

        app.step_selection(1);
        let sel = app.selection.unwrap();
        assert_eq!(sel.id, 1);
        assert_eq!(sel.pitch, 61);
    }

    #[test]
    fn test_step_selection_no_op_at_bounds() {
        let mut app = app_with_score(3);
        app.selection = Some(SelectedNote {
            panel: Panel::Score,
            id: 0,
            pitch: 60,
        });

        app.step_selection(-1);
        assert_eq!(app.selection.unwrap().id, 0);

        app.selection = Some(SelectedNote {
            panel: Panel::Score,
            id: 2,
            pitch: 62,
        });
        app.step_selection(1);
        assert_eq!(app.selection.unwrap().id, 2);
    }

    #[test]
    fn test_step_selection_without_collection() {
        let (mut app, _) = MidialignApp::new();
        app.selection = Some(SelectedNote {
            panel: Panel::Perf,
            id: 0,
            pitch: 60,
        });
        // No perf collection loaded: selection stays put.
        app.step_selection(1);
        assert_eq!(app.selection.unwrap().id, 0);
    }
}
