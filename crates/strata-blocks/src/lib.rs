//! Block and voxel types plus the texture atlas layout.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod types;

pub use atlas::{V_SCALE, atlas_row, v_offset};
pub use types::{Block, LogAxis, Voxel};
