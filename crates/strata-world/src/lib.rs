//! World sampling: seeded noise, generation config, column profiles, biomes.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod noise;
pub mod world;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use noise::NoiseContext;
pub use world::{Biome, ColumnProfile, World};
pub use worldgen::WorldGenConfig;

/// Fixed chunk dimensions: 16 wide, 128 tall, 16 deep.
pub const CHUNK_SIZE_X: usize = 16;
pub const CHUNK_SIZE_Y: usize = 128;
pub const CHUNK_SIZE_Z: usize = 16;
