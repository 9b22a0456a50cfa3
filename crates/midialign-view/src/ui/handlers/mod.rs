//! Message handlers organized by feature domain
//!
//! Each sub-module provides handler methods on MidialignApp, keeping the
//! update() dispatch itself a flat match.

pub mod keyboard;
pub mod loading;
pub mod playback;
pub mod roll;
pub mod tick;
