//! Stage module
//!
//! The orchestration layer on top of the scene/animation runtime:
//! - Selection: which canned animation (if any) should currently play
//! - StageHost: loads the character asset once, anchors entities at the
//!   world origin and starts/stops playback as the selection changes

pub mod host;
pub mod selection;

pub use host::{
    JUMP_DOWN_MODEL, JUMP_FLOAT_MODEL, JUMP_UP_MODEL, StageHost, StageStatus, WAVE_MODEL,
};
pub use selection::{Selection, SelectionCell};
