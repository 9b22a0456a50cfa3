//! Top toolbar: file pickers, overlay visibility, sync, playback, zoom

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length};

use midialign_core::{Panel, Visibility};
use midialign_widgets::roll::ZOOM_BUTTON_FACTOR;

use super::app::MidialignApp;
use super::message::{AlignmentSlot, Message};

pub fn view(app: &MidialignApp) -> Element<'_, Message> {
    let score_label = app.score_name.as_deref().unwrap_or("Score MIDI");
    let score_btn = button(text(score_label).size(12))
        .on_press(Message::PickMidi(Panel::Score))
        .padding(6)
        .style(if app.score.is_some() {
            button::primary
        } else {
            button::secondary
        });

    let perf_label = app.perf_name.as_deref().unwrap_or("Perf MIDI");
    let perf_btn = button(text(perf_label).size(12))
        .on_press(Message::PickMidi(Panel::Perf))
        .padding(6)
        .style(if app.perf.is_some() {
            button::primary
        } else {
            button::secondary
        });

    let align_btn = button(text("Align Map").size(12))
        .on_press(Message::PickAlignment(AlignmentSlot::Working))
        .padding(6)
        .style(if app.working.is_empty() {
            button::secondary
        } else {
            button::primary
        });

    let gt_btn = button(text("GT Reference").size(12))
        .on_press(Message::PickAlignment(AlignmentSlot::GroundTruth))
        .padding(6)
        .style(if app.ground_truth.is_empty() {
            button::secondary
        } else {
            button::primary
        });

    let clear_btn = button(text("Clear").size(12))
        .on_press(Message::ClearAll)
        .padding(6)
        .style(button::secondary);

    let visibility = row![
        text("Edges").size(11),
        visibility_btn(app, "On", Visibility::Full),
        visibility_btn(app, "50%", Visibility::Half),
        visibility_btn(app, "Off", Visibility::None),
    ]
    .spacing(3)
    .align_y(Alignment::Center);

    let sync_btn = button(text("SYNC [V]").size(12))
        .on_press(Message::ToggleSync)
        .padding(6)
        .style(if app.sync_enabled {
            button::primary
        } else {
            button::secondary
        });

    row![
        score_btn,
        perf_btn,
        Space::new().width(10),
        align_btn,
        gt_btn,
        Space::new().width(10),
        visibility,
        sync_btn,
        clear_btn,
        Space::new().width(Length::Fill),
        transport(app, Panel::Score),
        Space::new().width(10),
        transport(app, Panel::Perf),
    ]
    .spacing(5)
    .padding(8)
    .align_y(Alignment::Center)
    .into()
}

fn visibility_btn<'a>(
    app: &MidialignApp,
    label: &'a str,
    value: Visibility,
) -> Element<'a, Message> {
    button(text(label).size(11))
        .on_press(Message::SetVisibility(value))
        .padding(4)
        .style(if app.visibility == value {
            button::primary
        } else {
            button::secondary
        })
        .into()
}

/// Per-panel play/pause and time-zoom buttons.
fn transport(app: &MidialignApp, panel: Panel) -> Element<'_, Message> {
    let playing = app.clock.active_panel() == Some(panel);
    let play_label = if playing { "⏸" } else { "▶" };

    let play_btn = button(text(play_label).size(14))
        .on_press(Message::TogglePlayback(panel))
        .padding(6)
        .style(if playing {
            button::primary
        } else {
            button::secondary
        });

    let zoom_out = button(text("−").size(14))
        .on_press(Message::ZoomButton(panel, 1.0 / ZOOM_BUTTON_FACTOR))
        .padding(6)
        .style(button::secondary);

    let zoom_in = button(text("+").size(14))
        .on_press(Message::ZoomButton(panel, ZOOM_BUTTON_FACTOR))
        .padding(6)
        .style(button::secondary);

    row![
        text(panel.label()).size(11),
        play_btn,
        zoom_out,
        zoom_in,
    ]
    .spacing(3)
    .align_y(Alignment::Center)
    .into()
}
