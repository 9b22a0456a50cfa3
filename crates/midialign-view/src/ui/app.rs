//! Main application state and iced implementation

use std::sync::Arc;

use iced::widget::{canvas, column};
use iced::{keyboard, Element, Length, Size, Subscription, Task, Theme};

use midialign_core::{
    AlignmentIndex, AlignmentTuple, NoteCollection, Panel, PlaybackClock, SelectedNote, ViewState,
    Visibility,
};
use midialign_widgets::DualRollCanvas;

use super::message::Message;
use super::{status_bar, toolbar};
use crate::keybindings::{self, KeybindingsConfig};

/// Full application state. Collections are immutable once built and
/// swapped wholesale behind `Arc`; the alignment index is re-derived
/// whenever notes or tuples change.
pub struct MidialignApp {
    /// Reference sequence (top panel)
    pub score: Option<Arc<NoteCollection>>,
    /// Performance sequence (bottom panel)
    pub perf: Option<Arc<NoteCollection>>,
    /// Display names of the loaded MIDI files
    pub score_name: Option<String>,
    pub perf_name: Option<String>,

    /// Working alignment under inspection
    pub working: Vec<AlignmentTuple>,
    /// Optional ground-truth reference
    pub ground_truth: Vec<AlignmentTuple>,
    /// Derived sets and lookups over the above
    pub index: AlignmentIndex,

    /// Independent viewports per panel
    pub score_view: ViewState,
    pub perf_view: ViewState,

    pub selection: Option<SelectedNote>,
    pub visibility: Visibility,
    /// Mirror horizontal pans (and playback) to the paired panel
    pub sync_enabled: bool,

    pub clock: PlaybackClock,
    /// Published playhead, refreshed per tick while playing
    pub playhead: Option<(Panel, f64)>,

    /// Last seen modifier state, forwarded to the canvas for wheel routing
    pub modifiers: keyboard::Modifiers,
    /// Last known window size (zoom-button anchor)
    pub window_size: Size,

    /// One-line ingestion status shown in the footer
    pub status: String,
    pub keybindings: KeybindingsConfig,
}

impl MidialignApp {
    pub fn new() -> (Self, Task<Message>) {
        let keybindings = keybindings::load_keybindings(&keybindings::default_keybindings_path());

        let app = Self {
            score: None,
            perf: None,
            score_name: None,
            perf_name: None,
            working: Vec::new(),
            ground_truth: Vec::new(),
            index: AlignmentIndex::default(),
            score_view: ViewState::default(),
            perf_view: ViewState::default(),
            selection: None,
            visibility: Visibility::Full,
            sync_enabled: false,
            clock: PlaybackClock::default(),
            playhead: None,
            modifiers: keyboard::Modifiers::default(),
            window_size: Size::new(1400.0, 900.0),
            status: String::new(),
            keybindings,
        };

        (app, Task::none())
    }

    pub fn view_state(&self, panel: Panel) -> &ViewState {
        match panel {
            Panel::Score => &self.score_view,
            Panel::Perf => &self.perf_view,
        }
    }

    pub fn view_state_mut(&mut self, panel: Panel) -> &mut ViewState {
        match panel {
            Panel::Score => &mut self.score_view,
            Panel::Perf => &mut self.perf_view,
        }
    }

    pub fn collection(&self, panel: Panel) -> Option<&NoteCollection> {
        match panel {
            Panel::Score => self.score.as_deref(),
            Panel::Perf => self.perf.as_deref(),
        }
    }

    /// Rebuild the derived alignment index after notes or tuples change.
    pub fn rebuild_index(&mut self) {
        let empty = NoteCollection::from_events(Vec::new());
        self.index = AlignmentIndex::build(
            &self.working,
            &self.ground_truth,
            self.collection(Panel::Score).unwrap_or(&empty),
            self.collection(Panel::Perf).unwrap_or(&empty),
        );
    }

    /// Update state based on message
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickMidi(panel) => self.handle_pick_midi(panel),
            Message::MidiPicked(panel, result) => self.handle_midi_picked(panel, result),
            Message::PickAlignment(slot) => self.handle_pick_alignment(slot),
            Message::AlignmentPicked(slot, result) => self.handle_alignment_picked(slot, result),
            Message::ClearAll => self.handle_clear_all(),

            Message::Roll(roll) => self.handle_roll(roll),
            Message::ZoomButton(panel, factor) => self.handle_zoom_button(panel, factor),
            Message::SetVisibility(visibility) => {
                self.visibility = visibility;
                Task::none()
            }
            Message::ToggleSync => {
                self.sync_enabled = !self.sync_enabled;
                log::info!(
                    "sync scrolling {}",
                    if self.sync_enabled { "enabled" } else { "disabled" }
                );
                Task::none()
            }

            Message::TogglePlayback(panel) => self.handle_toggle_playback(panel),
            Message::Tick => self.handle_tick(),

            Message::KeyPressed(key, modifiers) => self.handle_key_pressed(key, modifiers),
            Message::ModifiersChanged(modifiers) => self.handle_modifiers_changed(modifiers),
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let roll = canvas(DualRollCanvas {
            score: self.score.as_deref(),
            perf: self.perf.as_deref(),
            score_view: &self.score_view,
            perf_view: &self.perf_view,
            working: &self.working,
            ground_truth: &self.ground_truth,
            index: &self.index,
            selection: self.selection,
            visibility: self.visibility,
            playhead: self.playhead,
            modifiers: self.modifiers,
        })
        .width(Length::Fill)
        .height(Length::Fill);

        column![
            toolbar::view(self),
            Element::from(roll).map(Message::Roll),
            status_bar::view(self),
        ]
        .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Keyboard/window events always; render tick only while playing
    pub fn subscription(&self) -> Subscription<Message> {
        use iced::time;
        use std::time::Duration;

        let events = iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                Some(Message::KeyPressed(key, modifiers))
            }
            iced::Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                Some(Message::ModifiersChanged(modifiers))
            }
            iced::Event::Window(iced::window::Event::Resized(size)) => {
                Some(Message::WindowResized(size))
            }
            _ => None,
        });

        if self.clock.is_playing() {
            Subscription::batch([
                events,
                time::every(Duration::from_millis(16)).map(|_| Message::Tick),
            ])
        } else {
            events
        }
    }
}
