//! midialign - MIDI alignment visualizer entry point

use midialign_view::ui::MidialignApp;

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("midialign starting up");

    iced::application(MidialignApp::new, MidialignApp::update, MidialignApp::view)
        .subscription(MidialignApp::subscription)
        .theme(MidialignApp::theme)
        .title("midialign - MIDI Alignment Visualizer")
        .window_size(iced::Size::new(1400.0, 900.0))
        .run()
}
