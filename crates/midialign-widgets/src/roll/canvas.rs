//! Canvas Program for the stacked score/performance piano rolls
//!
//! A single `Frame` renders both panels plus the alignment overlay, with
//! explicit y offsets per panel region. Events are routed to the panel
//! under the cursor and published as [`RollMessage`] values.

use iced::alignment::{Horizontal, Vertical};
use iced::keyboard;
use iced::widget::canvas::stroke::{self, LineDash};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, Color, Font, Point, Rectangle, Size, Theme};

use midialign_core::{
    AlignmentIndex, AlignmentTuple, Axis, NoteCollection, Panel, SelectedNote, ViewState,
    Visibility, ANCHOR_X,
};

use super::{
    edge_endpoint, edge_in_range, is_black_key, RollMessage, ANCHOR_DASH, GT_MISSED_DASH,
    LABEL_ZOOM_THRESHOLD, MIN_NOTE_WIDTH, NOTE_CORNER_RADIUS, SCROLL_PIXELS_PER_LINE,
    ZOOM_WHEEL_FACTOR,
};
use crate::theme;

/// Canvas interaction state. The roll has no drag gestures; clicks and
/// wheel events resolve immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollInteraction;

/// Both piano rolls and the alignment overlay in one canvas program.
///
/// Score occupies the top half of the bounds, performance the bottom
/// half. Borrows everything from the application state; rebuilt per frame.
pub struct DualRollCanvas<'a> {
    pub score: Option<&'a NoteCollection>,
    pub perf: Option<&'a NoteCollection>,
    pub score_view: &'a ViewState,
    pub perf_view: &'a ViewState,
    pub working: &'a [AlignmentTuple],
    pub ground_truth: &'a [AlignmentTuple],
    pub index: &'a AlignmentIndex,
    pub selection: Option<SelectedNote>,
    pub visibility: Visibility,
    pub playhead: Option<(Panel, f64)>,
    pub modifiers: keyboard::Modifiers,
}

/// Which panel a canvas-local y coordinate falls in, plus the
/// panel-local y.
fn panel_at(y: f32, panel_height: f32) -> (Panel, f32) {
    if y < panel_height {
        (Panel::Score, y)
    } else {
        (Panel::Perf, y - panel_height)
    }
}

impl<'a> DualRollCanvas<'a> {
    fn view(&self, panel: Panel) -> &ViewState {
        match panel {
            Panel::Score => self.score_view,
            Panel::Perf => self.perf_view,
        }
    }

    fn collection(&self, panel: Panel) -> Option<&NoteCollection> {
        match panel {
            Panel::Score => self.score,
            Panel::Perf => self.perf,
        }
    }

    fn is_selected(&self, panel: Panel, id: usize) -> bool {
        self.selection
            .map(|sel| sel.panel == panel && sel.id == id)
            .unwrap_or(false)
    }

    fn draw_panel(&self, frame: &mut Frame, panel: Panel, y_off: f32, width: f32, panel_h: f32) {
        let view = self.view(panel);
        let h = panel_h as f64;

        frame.fill_rectangle(
            Point::new(0.0, y_off),
            Size::new(width, panel_h),
            theme::BACKGROUND,
        );

        // Pitch rows and horizontal grid.
        let start_pitch = view.scroll_y.floor() as i32;
        let end_pitch = (view.scroll_y + h / view.zoom_y).ceil() as i32;
        for pitch in start_pitch..=end_pitch {
            let row_top = y_off + view.pitch_to_y(pitch as f64, h) as f32;
            let top = row_top.max(y_off);
            let bottom = (row_top + view.zoom_y as f32).min(y_off + panel_h);
            if bottom <= top {
                continue;
            }

            let fill = if is_black_key(pitch) {
                theme::ROW_BLACK_KEY
            } else {
                theme::ROW_WHITE_KEY
            };
            frame.fill_rectangle(Point::new(0.0, top), Size::new(width, bottom - top), fill);

            if row_top >= y_off && row_top <= y_off + panel_h {
                let (color, line_width) = if pitch.rem_euclid(12) == 0 {
                    (theme::OCTAVE_LINE, 1.0)
                } else {
                    (theme::GRID_LINE, 0.5)
                };
                frame.stroke(
                    &Path::line(Point::new(0.0, row_top), Point::new(width, row_top)),
                    Stroke::default().with_color(color).with_width(line_width),
                );
            }
        }

        // One-second vertical grid.
        let start_time = view.scroll_x.floor() as i64;
        let end_time = (view.scroll_x + width as f64 / view.zoom_x).ceil() as i64;
        for t in start_time..=end_time {
            let x = view.time_to_x(t as f64) as f32;
            frame.stroke(
                &Path::line(Point::new(x, y_off), Point::new(x, y_off + panel_h)),
                Stroke::default()
                    .with_color(theme::GRID_LINE)
                    .with_width(1.0),
            );
        }

        // Static anchor column.
        frame.stroke(
            &Path::line(
                Point::new(ANCHOR_X as f32, y_off),
                Point::new(ANCHOR_X as f32, y_off + panel_h),
            ),
            Stroke {
                style: stroke::Style::Solid(theme::ANCHOR_LINE),
                width: 1.2,
                line_dash: LineDash {
                    segments: &ANCHOR_DASH,
                    offset: 0,
                },
                ..Stroke::default()
            },
        );

        if let Some(collection) = self.collection(panel) {
            for note in collection.notes() {
                let x = view.time_to_x(note.start) as f32;
                let w = (note.duration * view.zoom_x) as f32;
                if x + w < 0.0 || x > width {
                    continue;
                }

                let note_top = y_off + view.pitch_to_y(note.pitch as f64, h) as f32;
                let note_h = (view.zoom_y - 1.0) as f32;
                let top = note_top.max(y_off);
                let bottom = (note_top + note_h).min(y_off + panel_h);
                if bottom <= top {
                    continue;
                }

                let selected = self.is_selected(panel, note.id);
                let (fill, border, border_width) = if selected {
                    (theme::NOTE_FILL_SELECTED, theme::NOTE_STROKE_SELECTED, 2.5)
                } else {
                    (theme::NOTE_FILL, theme::NOTE_STROKE, 0.5)
                };

                let rect = Path::rounded_rectangle(
                    Point::new(x, top),
                    Size::new(w.max(MIN_NOTE_WIDTH), bottom - top),
                    NOTE_CORNER_RADIUS.into(),
                );
                frame.fill(&rect, fill);
                frame.stroke(
                    &rect,
                    Stroke::default().with_color(border).with_width(border_width),
                );

                if selected || view.zoom_y > LABEL_ZOOM_THRESHOLD {
                    frame.fill_text(Text {
                        content: format!("{}", note.id),
                        position: Point::new(x + 5.0, top + 2.0),
                        size: 10.0.into(),
                        color: if selected {
                            theme::NOTE_LABEL_SELECTED
                        } else {
                            theme::NOTE_LABEL
                        },
                        font: Font::MONOSPACE,
                        align_x: Horizontal::Left.into(),
                        align_y: Vertical::Top.into(),
                        ..Text::default()
                    });
                }
            }
        }

        // Moving playhead, only on the panel that drives playback.
        if let Some((active, time)) = self.playhead {
            if active == panel {
                let px = view.time_to_x(time) as f32;
                if (0.0..=width).contains(&px) {
                    frame.stroke(
                        &Path::line(Point::new(px, y_off), Point::new(px, y_off + panel_h)),
                        Stroke::default()
                            .with_color(theme::PLAYHEAD_COLOR)
                            .with_width(2.5),
                    );
                }
            }
        }

        frame.fill_text(Text {
            content: panel.label().to_string(),
            position: Point::new(12.0, y_off + 10.0),
            size: 10.0.into(),
            color: theme::PANEL_LABEL,
            font: Font::MONOSPACE,
            align_x: Horizontal::Left.into(),
            align_y: Vertical::Top.into(),
            ..Text::default()
        });
    }

    fn draw_overlay(&self, frame: &mut Frame, panel_h: f32) {
        let (Some(score), Some(perf)) = (self.score, self.perf) else {
            return;
        };
        let Some(base_opacity) = self.visibility.opacity() else {
            return;
        };
        let h = panel_h as f64;

        for tuple in self.working.iter().filter(|t| t.is_mapped()) {
            let (Some(s_note), Some(p_note)) = (
                score.get(tuple.score_id as usize),
                perf.get(tuple.perf_id as usize),
            ) else {
                continue;
            };

            let p1 = edge_endpoint(self.score_view, s_note, h);
            let mut p2 = edge_endpoint(self.perf_view, p_note, h);
            p2.y += panel_h;

            if !edge_in_range(p1.x) || !edge_in_range(p2.x) {
                continue;
            }

            let selected = self.is_selected(Panel::Score, tuple.score_id as usize)
                || self.is_selected(Panel::Perf, tuple.perf_id as usize);
            let color = theme::edge_color(self.index.classify(tuple.score_id, tuple.perf_id));
            let (opacity, line_width) = if selected {
                (1.0, 3.0)
            } else {
                (base_opacity * 0.45, 1.0)
            };

            frame.stroke(
                &Path::line(p1, p2),
                Stroke::default()
                    .with_color(Color {
                        a: color.a * opacity,
                        ..color
                    })
                    .with_width(line_width),
            );
        }

        // A ground-truth pair the working alignment misses, for the
        // selected note only.
        if let Some(sel) = self.selection {
            if let Some(gt) =
                self.index
                    .ground_truth_only_pair_for(self.ground_truth, sel.panel, sel.id)
            {
                let (Some(s_note), Some(p_note)) = (
                    score.get(gt.score_id as usize),
                    perf.get(gt.perf_id as usize),
                ) else {
                    return;
                };

                let p1 = edge_endpoint(self.score_view, s_note, h);
                let mut p2 = edge_endpoint(self.perf_view, p_note, h);
                p2.y += panel_h;

                frame.stroke(
                    &Path::line(p1, p2),
                    Stroke {
                        style: stroke::Style::Solid(theme::EDGE_GT_MISSED),
                        width: 3.0,
                        line_dash: LineDash {
                            segments: &GT_MISSED_DASH,
                            offset: 0,
                        },
                        ..Stroke::default()
                    },
                );
            }
        }
    }
}

impl<'a> Program<RollMessage> for DualRollCanvas<'a> {
    type State = RollInteraction;

    fn update(
        &self,
        _interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<RollMessage>> {
        let position = cursor.position_in(bounds)?;
        let panel_h = bounds.height / 2.0;
        let (panel, local_y) = panel_at(position.y, panel_h);
        let view = self.view(panel);

        match event {
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let (dx_px, dy_px) = match *delta {
                    mouse::ScrollDelta::Lines { x, y } => (
                        x as f64 * SCROLL_PIXELS_PER_LINE,
                        y as f64 * SCROLL_PIXELS_PER_LINE,
                    ),
                    mouse::ScrollDelta::Pixels { x, y } => (x as f64, y as f64),
                };

                let zooming =
                    self.modifiers.alt() || self.modifiers.control() || self.modifiers.logo();
                if zooming {
                    let factor = if dy_px > 0.0 {
                        ZOOM_WHEEL_FACTOR
                    } else {
                        1.0 / ZOOM_WHEEL_FACTOR
                    };
                    // Alt zooms the pitch axis anchored at the cursor row;
                    // ctrl/cmd zooms time anchored at the cursor column.
                    let message = if self.modifiers.alt() {
                        RollMessage::Zoom {
                            panel,
                            axis: Axis::Y,
                            factor,
                            anchor_px: (panel_h - local_y) as f64,
                        }
                    } else {
                        RollMessage::Zoom {
                            panel,
                            axis: Axis::X,
                            factor,
                            anchor_px: position.x as f64,
                        }
                    };
                    Some(canvas::Action::publish(message))
                } else {
                    Some(canvas::Action::publish(RollMessage::Pan {
                        panel,
                        dx: -dx_px / view.zoom_x,
                        dy: dy_px / view.zoom_y,
                    }))
                }
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let collection = self.collection(panel)?;
                let time = view.x_to_time(position.x as f64);
                let pitch = view.y_to_pitch(local_y as f64, panel_h as f64);

                let message = match collection.hit_test(time, pitch) {
                    Some(note) => RollMessage::NoteClicked {
                        panel,
                        id: note.id,
                        pitch: note.pitch,
                    },
                    None => RollMessage::BlankClicked,
                };
                Some(canvas::Action::publish(message))
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };

        let panel_h = bounds.height / 2.0;
        let (panel, local_y) = panel_at(position.y, panel_h);

        let over_note = self.collection(panel).is_some_and(|collection| {
            let view = self.view(panel);
            let time = view.x_to_time(position.x as f64);
            let pitch = view.y_to_pitch(local_y as f64, panel_h as f64);
            collection.hit_test(time, pitch).is_some()
        });

        if over_note {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::Crosshair
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let width = bounds.width;
        let panel_h = bounds.height / 2.0;

        self.draw_panel(&mut frame, Panel::Score, 0.0, width, panel_h);
        self.draw_panel(&mut frame, Panel::Perf, panel_h, width, panel_h);

        // Seam between the two panels.
        frame.stroke(
            &Path::line(Point::new(0.0, panel_h), Point::new(width, panel_h)),
            Stroke::default()
                .with_color(theme::OCTAVE_LINE)
                .with_width(1.0),
        );

        self.draw_overlay(&mut frame, panel_h);

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_routing() {
        assert_eq!(panel_at(0.0, 300.0), (Panel::Score, 0.0));
        assert_eq!(panel_at(299.9, 300.0), (Panel::Score, 299.9));
        assert_eq!(panel_at(300.0, 300.0), (Panel::Perf, 0.0));
        assert_eq!(panel_at(450.0, 300.0), (Panel::Perf, 150.0));
    }
}
