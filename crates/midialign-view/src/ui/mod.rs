//! User interface modules for midialign

pub mod app;
pub mod handlers;
pub mod message;
pub mod status_bar;
pub mod toolbar;

pub use app::MidialignApp;
pub use message::Message;
