//! Chunk registry, per-chunk lifecycle stages, and the streaming controller.
#![forbid(unsafe_code)]

mod registry;
mod stage;
mod streaming;
mod trees;

pub use registry::{ChunkEntry, ChunkRegistry};
pub use stage::ChunkStage;
pub use streaming::{StreamingController, required_square};
pub use trees::generate_structures;
