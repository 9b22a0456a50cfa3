//! iced canvas widgets for midialign
//!
//! Following iced 0.14 patterns: state lives at the application level,
//! canvas `Program`s consume references and translate raw pointer events
//! into messages the application maps onto its own message type.
//!
//! Both piano-roll panels and the cross-panel alignment overlay are drawn
//! by a single canvas program ([`DualRollCanvas`]): stacking two canvases
//! plus an overlay does not render reliably (iced bug #3040), and the
//! overlay pass needs both panels' transforms in one place anyway.

pub mod roll;
pub mod theme;

pub use roll::{DualRollCanvas, RollInteraction, RollMessage};
pub use theme::{edge_color, EDGE_GT_MISSED, NOTE_FILL, NOTE_FILL_SELECTED, PLAYHEAD_COLOR};
