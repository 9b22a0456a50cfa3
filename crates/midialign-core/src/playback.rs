//! Wall-clock playback state machine
//!
//! At most one panel drives the playhead. The clock never mutates view
//! state itself; each tick the application derives the active panel's
//! scroll (and, in sync mode, the paired panel's) from the published
//! position, so cross-panel synchronization stays a one-directional
//! computation from a single source of truth.

use std::time::Instant;

use crate::note::Panel;
use crate::view::ViewState;

/// Fixed pixel column where the playhead is pinned while playing, and
/// where the dashed anchor marker is drawn at all times.
pub const ANCHOR_X: f64 = 100.0;

/// Playback clock: stopped, or running against one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackClock {
    Stopped,
    Playing {
        panel: Panel,
        started: Instant,
        /// Domain time that was under the anchor column when playback
        /// started on `panel`.
        start_offset: f64,
    },
}

impl Default for PlaybackClock {
    fn default() -> Self {
        PlaybackClock::Stopped
    }
}

impl PlaybackClock {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackClock::Playing { .. })
    }

    pub fn active_panel(&self) -> Option<Panel> {
        match self {
            PlaybackClock::Playing { panel, .. } => Some(*panel),
            PlaybackClock::Stopped => None,
        }
    }

    /// Play/pause request on `panel`.
    ///
    /// Same panel while playing: stop. Otherwise: start (or switch) on
    /// `panel`, deriving the offset from the time currently under its
    /// anchor column. Switching panels never resumes the old position.
    /// Returns the new playhead position, if playing.
    pub fn toggle(&mut self, panel: Panel, view: &ViewState, now: Instant) -> Option<f64> {
        match self {
            PlaybackClock::Playing { panel: active, .. } if *active == panel => {
                *self = PlaybackClock::Stopped;
                None
            }
            _ => {
                let start_offset = view.anchor_time(ANCHOR_X);
                *self = PlaybackClock::Playing {
                    panel,
                    started: now,
                    start_offset,
                };
                Some(start_offset)
            }
        }
    }

    pub fn stop(&mut self) {
        *self = PlaybackClock::Stopped;
    }

    /// Playhead position at `now`, if playing.
    pub fn position_at(&self, now: Instant) -> Option<f64> {
        match self {
            PlaybackClock::Playing {
                started,
                start_offset,
                ..
            } => Some(start_offset + now.duration_since(*started).as_secs_f64()),
            PlaybackClock::Stopped => None,
        }
    }

    /// Scroll that keeps `position` visually pinned at the anchor column.
    pub fn pinned_scroll_x(position: f64, zoom_x: f64) -> f64 {
        position - ANCHOR_X / zoom_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_playback_pin_scenario() {
        // anchor 100 px, zoom 100 px/s, scroll 0 => offset 1.0s.
        let view = ViewState {
            zoom_x: 100.0,
            zoom_y: 15.0,
            scroll_x: 0.0,
            scroll_y: 60.0,
        };
        let start = Instant::now();
        let mut clock = PlaybackClock::default();

        let offset = clock.toggle(Panel::Score, &view, start).unwrap();
        assert!((offset - 1.0).abs() < 1e-9);

        let later = start + Duration::from_millis(500);
        let position = clock.position_at(later).unwrap();
        assert!((position - 1.5).abs() < 1e-9);

        let scroll = PlaybackClock::pinned_scroll_x(position, view.zoom_x);
        assert!((scroll - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_same_panel_stops() {
        let view = ViewState::default();
        let now = Instant::now();
        let mut clock = PlaybackClock::default();

        clock.toggle(Panel::Perf, &view, now);
        assert_eq!(clock.active_panel(), Some(Panel::Perf));
        clock.toggle(Panel::Perf, &view, now);
        assert!(!clock.is_playing());
        assert!(clock.position_at(now).is_none());
    }

    #[test]
    fn test_switching_panels_rederives_offset() {
        let score_view = ViewState {
            scroll_x: 0.0,
            ..ViewState::default()
        };
        let perf_view = ViewState {
            scroll_x: 7.0,
            ..ViewState::default()
        };
        let start = Instant::now();
        let mut clock = PlaybackClock::default();

        clock.toggle(Panel::Score, &score_view, start);

        // A play request on the other panel switches drivers and derives
        // the offset from that panel's view, not the old position.
        let later = start + Duration::from_secs(3);
        let offset = clock.toggle(Panel::Perf, &perf_view, later).unwrap();
        assert_eq!(clock.active_panel(), Some(Panel::Perf));
        assert!((offset - 8.0).abs() < 1e-9);
        let position = clock.position_at(later + Duration::from_secs(1)).unwrap();
        assert!((position - 9.0).abs() < 1e-9);
    }
}
