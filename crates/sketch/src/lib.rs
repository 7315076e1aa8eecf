//! Sketchpad capture core - strokes, simplification and session state
//!
//! This crate provides the pieces of the sketch capture pipeline:
//! - [`types::Point`] - A timestamped surface coordinate (GPU-compatible with bytemuck)
//! - [`simplify`] - Two-stage Ramer-Douglas-Peucker polyline simplification
//! - [`stroke`] - Stroke buffer with deduplication and front eviction
//! - [`store`] - Committed strokes, undo/clear and length-cap eviction
//! - [`interaction`] - Change-only log of per-frame input state
//! - [`session`] - Per-frame capture driver tying the above together
//! - [`shared`] - Thread-safe session with event listeners
//! - [`render`] - Draw requests and length status for a rendering layer
//! - [`export`] - JSON export records

pub mod error;
pub mod events;
pub mod export;
pub mod interaction;
pub mod render;
pub mod session;
pub mod shared;
pub mod simplify;
pub mod store;
pub mod stroke;
pub mod types;

pub use error::*;
pub use events::*;
pub use export::*;
pub use interaction::*;
pub use render::*;
pub use session::*;
pub use shared::*;
pub use simplify::*;
pub use store::*;
pub use stroke::*;
pub use types::*;

pub use sketchpad_config::{CapPolicy, ConfigError, SimplifyMode, SketchConfig};
