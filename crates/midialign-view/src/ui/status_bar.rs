//! Bottom status bar: anchor times, selection readout, GT state, hints

use iced::widget::{row, text, Space};
use iced::{Alignment, Element, Length};

use midialign_core::ANCHOR_X;

use super::app::MidialignApp;
use super::message::Message;

pub fn view(app: &MidialignApp) -> Element<'_, Message> {
    let score_anchor = app.score_view.anchor_time(ANCHOR_X);
    let perf_anchor = app.perf_view.anchor_time(ANCHOR_X);
    let anchors = text(format!(
        "SCORE {:.4}s | PERF {:.4}s",
        score_anchor, perf_anchor
    ))
    .size(11);

    let selection: Element<Message> = match app.selection {
        Some(sel) => {
            let mut readout = format!("{} Note ID-{}, MIDI-{}", sel.panel.label(), sel.id, sel.pitch);
            if app.index.is_unmapped(sel.panel, sel.id) {
                readout.push_str("  [UNMAPPED]");
            }
            text(readout).size(11).into()
        }
        None => text("No note selected").size(11).into(),
    };

    let gt_state = if app.index.has_ground_truth() {
        "GT REF: ACTIVE"
    } else {
        "GT REF: IDLE"
    };

    let hints = text("scroll+ALT: pitch zoom | scroll+CMD: time zoom | V: sync | ←/→: next id")
        .size(10);

    let status: Element<Message> = if app.status.is_empty() {
        Space::new().width(0).into()
    } else {
        text(&app.status).size(11).into()
    };

    row![
        anchors,
        Space::new().width(15),
        selection,
        Space::new().width(15),
        text(gt_state).size(11),
        Space::new().width(15),
        status,
        Space::new().width(Length::Fill),
        hints,
    ]
    .spacing(5)
    .padding(6)
    .align_y(Alignment::Center)
    .into()
}
