//! Per-panel viewport state and the time/pitch to pixel transform
//!
//! All panel navigation funnels through [`ViewState::pan`] and
//! [`ViewState::zoom`]; nothing else mutates the viewport. The transform
//! itself is pure: x depends only on zoom_x/scroll_x, y additionally on the
//! panel pixel height because pitch grows upward while pixels grow downward.

/// Horizontal zoom bounds in pixels per second.
pub const MIN_ZOOM_X: f64 = 10.0;
pub const MAX_ZOOM_X: f64 = 5000.0;

/// Vertical zoom bounds in pixels per semitone.
pub const MIN_ZOOM_Y: f64 = 2.0;
pub const MAX_ZOOM_Y: f64 = 100.0;

/// Global opacity control for the alignment overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Full,
    Half,
    None,
}

impl Visibility {
    /// Base stroke opacity, or `None` when the overlay is suppressed.
    pub fn opacity(self) -> Option<f32> {
        match self {
            Visibility::Full => Some(1.0),
            Visibility::Half => Some(0.3),
            Visibility::None => None,
        }
    }
}

/// Zoom axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Time (horizontal).
    X,
    /// Pitch (vertical).
    Y,
}

/// Pan/zoom parameters for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Pixels per second.
    pub zoom_x: f64,
    /// Pixels per semitone.
    pub zoom_y: f64,
    /// Left edge of the view in seconds. May be negative.
    pub scroll_x: f64,
    /// Bottom edge of the view in semitones.
    pub scroll_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_x: 100.0,
            zoom_y: 15.0,
            scroll_x: 0.0,
            scroll_y: 60.0,
        }
    }
}

impl ViewState {
    /// Shift the view by domain-unit deltas. Scroll is intentionally
    /// unclamped; panels may scroll to any time or pitch.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.scroll_x += dx;
        self.scroll_y += dy;
    }

    /// Anchor-preserving zoom: the domain value under `anchor_px` stays at
    /// the same pixel after the zoom. The factor is applied first and
    /// clamped to the axis bounds, then scroll is recomputed from the
    /// pre-zoom anchor value.
    pub fn zoom(&mut self, axis: Axis, factor: f64, anchor_px: f64) {
        match axis {
            Axis::X => {
                let new_zoom = (self.zoom_x * factor).clamp(MIN_ZOOM_X, MAX_ZOOM_X);
                let center_time = self.scroll_x + anchor_px / self.zoom_x;
                self.zoom_x = new_zoom;
                self.scroll_x = center_time - anchor_px / new_zoom;
            }
            Axis::Y => {
                let new_zoom = (self.zoom_y * factor).clamp(MIN_ZOOM_Y, MAX_ZOOM_Y);
                let center_pitch = self.scroll_y + anchor_px / self.zoom_y;
                self.zoom_y = new_zoom;
                self.scroll_y = center_pitch - anchor_px / new_zoom;
            }
        }
    }

    pub fn time_to_x(&self, time: f64) -> f64 {
        (time - self.scroll_x) * self.zoom_x
    }

    pub fn x_to_time(&self, x: f64) -> f64 {
        x / self.zoom_x + self.scroll_x
    }

    /// Pixel y of the TOP edge of the row for `pitch`, in a panel of
    /// `height` pixels. Pitch rows grow upward from the bottom edge.
    pub fn pitch_to_y(&self, pitch: f64, height: f64) -> f64 {
        height - (pitch - self.scroll_y + 1.0) * self.zoom_y
    }

    pub fn y_to_pitch(&self, y: f64, height: f64) -> f64 {
        self.scroll_y + (height - y) / self.zoom_y
    }

    /// Domain time currently under a fixed pixel column.
    pub fn anchor_time(&self, anchor_px: f64) -> f64 {
        self.scroll_x + anchor_px / self.zoom_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_transform_round_trip() {
        let view = ViewState {
            zoom_x: 137.0,
            zoom_y: 11.5,
            scroll_x: -3.25,
            scroll_y: 48.0,
        };
        let height = 431.0;

        for &(x, y) in &[(0.0, 0.0), (100.0, 215.5), (799.0, 430.0)] {
            assert!((view.time_to_x(view.x_to_time(x)) - x).abs() < TOL);
            assert!((view.pitch_to_y(view.y_to_pitch(y, height), height) - y).abs() < TOL);
        }
    }

    #[test]
    fn test_zoom_anchor_invariance() {
        for &(axis, factor) in &[
            (Axis::X, 1.1),
            (Axis::X, 1.0 / 1.1),
            (Axis::Y, 1.3),
            (Axis::Y, 0.5),
        ] {
            let mut view = ViewState::default();
            let anchor = 240.0;
            let before = match axis {
                Axis::X => view.scroll_x + anchor / view.zoom_x,
                Axis::Y => view.scroll_y + anchor / view.zoom_y,
            };
            view.zoom(axis, factor, anchor);
            let after = match axis {
                Axis::X => view.scroll_x + anchor / view.zoom_x,
                Axis::Y => view.scroll_y + anchor / view.zoom_y,
            };
            assert!((before - after).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zoom_composition() {
        let anchor = 123.0;

        let mut twice = ViewState::default();
        twice.zoom(Axis::X, 1.2, anchor);
        twice.zoom(Axis::X, 1.2, anchor);

        let mut once = ViewState::default();
        once.zoom(Axis::X, 1.44, anchor);

        assert!((twice.zoom_x - once.zoom_x).abs() < 1e-6);
        assert!((twice.scroll_x - once.scroll_x).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamps_before_scroll_recompute() {
        let mut view = ViewState::default();
        view.zoom(Axis::X, 1e6, 100.0);
        assert_eq!(view.zoom_x, MAX_ZOOM_X);
        // Anchor still preserved against the clamped zoom.
        let under_anchor = view.scroll_x + 100.0 / view.zoom_x;
        assert!((under_anchor - 1.0).abs() < 1e-6);

        let mut view = ViewState::default();
        view.zoom(Axis::Y, 0.0001, 50.0);
        assert_eq!(view.zoom_y, MIN_ZOOM_Y);
    }

    #[test]
    fn test_pan_is_unclamped() {
        let mut view = ViewState::default();
        view.pan(-1000.0, -500.0);
        assert_eq!(view.scroll_x, -1000.0);
        assert_eq!(view.scroll_y, -440.0);
    }
}
