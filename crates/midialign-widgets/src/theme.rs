//! Shared color palette for the piano-roll panels and alignment overlay

use iced::Color;
use midialign_core::MatchClass;

/// Panel background.
pub const BACKGROUND: Color = Color::from_rgb(0.031, 0.031, 0.039);

/// Pitch row fills, keyed by the 12-tone keyboard pattern.
pub const ROW_WHITE_KEY: Color = Color::from_rgb(0.055, 0.055, 0.067);
pub const ROW_BLACK_KEY: Color = Color::from_rgb(0.031, 0.031, 0.039);

/// Row separators and one-second grid lines.
pub const GRID_LINE: Color = Color::from_rgb(0.094, 0.094, 0.106);

/// Emphasized octave boundary (pitch % 12 == 0).
pub const OCTAVE_LINE: Color = Color::from_rgb(0.153, 0.153, 0.165);

/// Dashed static anchor column marker.
pub const ANCHOR_LINE: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.55);

/// Note rectangles.
pub const NOTE_FILL: Color = Color::from_rgb(0.204, 0.827, 0.600);
pub const NOTE_STROKE: Color = Color::from_rgb(0.020, 0.588, 0.412);
pub const NOTE_FILL_SELECTED: Color = Color::from_rgb(0.376, 0.647, 0.980);
pub const NOTE_STROKE_SELECTED: Color = Color::WHITE;

/// Note id labels.
pub const NOTE_LABEL: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.7);
pub const NOTE_LABEL_SELECTED: Color = Color::WHITE;

/// Moving playhead (red accent).
pub const PLAYHEAD_COLOR: Color = Color::from_rgb(0.973, 0.443, 0.443);

/// Panel name label in the top-left corner.
pub const PANEL_LABEL: Color = Color::from_rgb(0.44, 0.44, 0.48);

/// Alignment edge colors by classification.
pub const EDGE_CORRECT: Color = Color::from_rgb(0.063, 0.725, 0.506);
pub const EDGE_INCORRECT: Color = Color::from_rgb(0.980, 0.800, 0.082);
pub const EDGE_UNVERIFIED: Color = Color::from_rgb(0.290, 0.871, 0.502);

/// Dashed marker for a ground-truth pair the working alignment misses.
pub const EDGE_GT_MISSED: Color = Color::from_rgb(0.937, 0.267, 0.267);

/// Edge stroke color for a classified pair.
pub fn edge_color(class: MatchClass) -> Color {
    match class {
        MatchClass::Correct => EDGE_CORRECT,
        MatchClass::Incorrect => EDGE_INCORRECT,
        MatchClass::Unverified => EDGE_UNVERIFIED,
    }
}
