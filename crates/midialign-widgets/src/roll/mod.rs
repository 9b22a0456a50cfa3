//! Dual piano-roll canvas with the alignment overlay drawn on top
//!
//! Both panels and the overlay render into one canvas Program. Wheel
//! gestures and clicks are resolved to the panel under the cursor and
//! published as [`RollMessage`] values for the application to apply.

mod canvas;

pub use canvas::{DualRollCanvas, RollInteraction};

use iced::Point;
use midialign_core::{Axis, Note, Panel, ViewState};

/// Multiplier per wheel notch for anchored zooming.
pub const ZOOM_WHEEL_FACTOR: f64 = 1.1;

/// Multiplier for the toolbar zoom buttons.
pub const ZOOM_BUTTON_FACTOR: f64 = 1.2;

/// Pixels represented by one line of `ScrollDelta::Lines`.
pub const SCROLL_PIXELS_PER_LINE: f64 = 20.0;

/// Floor on rendered note width so short notes stay clickable targets.
pub const MIN_NOTE_WIDTH: f32 = 4.0;

/// Corner radius of note rectangles.
pub const NOTE_CORNER_RADIUS: f32 = 3.0;

/// Id labels appear above this vertical zoom, or on the selected note.
pub const LABEL_ZOOM_THRESHOLD: f64 = 20.0;

/// Overlay edges attach slightly after the onset so they read as leaving
/// the note body rather than its left border.
pub const EDGE_ONSET_OFFSET: f64 = 0.05;

/// Edges with either endpoint outside this pixel range are skipped.
pub const EDGE_CULL_MIN_X: f64 = -1000.0;
pub const EDGE_CULL_MAX_X: f64 = 5000.0;

/// Dash patterns for the anchor column and ground-truth-missed edges.
pub const ANCHOR_DASH: [f32; 2] = [5.0, 5.0];
pub const GT_MISSED_DASH: [f32; 2] = [6.0, 4.0];

/// Messages published by the canvas for the application update loop.
#[derive(Debug, Clone, Copy)]
pub enum RollMessage {
    /// Wheel pan, already converted to domain units (seconds, semitones).
    Pan { panel: Panel, dx: f64, dy: f64 },
    /// Anchored zoom on one axis of one panel.
    Zoom {
        panel: Panel,
        axis: Axis,
        factor: f64,
        anchor_px: f64,
    },
    /// Left click landed on a note body.
    NoteClicked { panel: Panel, id: usize, pitch: u8 },
    /// Left click landed on empty roll area.
    BlankClicked,
}

/// The first four black keys per octave land on pitch classes 1, 3, 6,
/// 8, 10; their rows get the darker fill.
pub fn is_black_key(pitch: i32) -> bool {
    matches!(pitch.rem_euclid(12), 1 | 3 | 6 | 8 | 10)
}

/// Whether an edge endpoint x coordinate is close enough to the viewport
/// to be worth stroking.
pub fn edge_in_range(x: f32) -> bool {
    ((EDGE_CULL_MIN_X as f32)..=(EDGE_CULL_MAX_X as f32)).contains(&x)
}

/// Overlay edge endpoint for a note, in panel-local pixels: just past the
/// onset, vertically centered on the pitch row.
pub fn edge_endpoint(view: &ViewState, note: &Note, panel_height: f64) -> Point {
    let x = view.time_to_x(note.start + EDGE_ONSET_OFFSET);
    let y = view.pitch_to_y(note.pitch as f64, panel_height) + view.zoom_y / 2.0;
    Point::new(x as f32, y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: u8, start: f64) -> Note {
        Note {
            id: 0,
            pitch,
            start,
            duration: 0.5,
            velocity: 80,
        }
    }

    #[test]
    fn test_black_key_pattern() {
        let black: Vec<i32> = (0..12).filter(|&p| is_black_key(p)).collect();
        assert_eq!(black, vec![1, 3, 6, 8, 10]);
        // Pattern repeats across octaves.
        assert!(is_black_key(61));
        assert!(!is_black_key(60));
    }

    #[test]
    fn test_edge_culling_range() {
        assert!(edge_in_range(0.0));
        assert!(edge_in_range(-999.0));
        assert!(edge_in_range(4999.0));
        assert!(!edge_in_range(-1001.0));
        assert!(!edge_in_range(5001.0));
    }

    #[test]
    fn test_edge_endpoint_centers_on_row() {
        let view = ViewState::default();
        let n = note(60, 1.0);
        let p = edge_endpoint(&view, &n, 300.0);

        // x sits EDGE_ONSET_OFFSET seconds past the onset.
        let expected_x = view.time_to_x(1.0 + EDGE_ONSET_OFFSET);
        assert!((p.x as f64 - expected_x).abs() < 1e-6);

        // y lands midway between the row's top and bottom edges.
        let top = view.pitch_to_y(60.0, 300.0);
        assert!((p.y as f64 - (top + view.zoom_y / 2.0)).abs() < 1e-6);
    }
}
