//! Chunk voxel grid and terrain generation.
#![forbid(unsafe_code)]

use strata_blocks::{Block, Voxel};
use strata_world::{ChunkCoord, World};

/// Dense voxel storage for one chunk column. Dimensions are fixed at
/// construction; indexing is row-major `x + sx*(y + sy*z)` and unchecked
/// beyond the slice's own bounds panic.
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    voxels: Vec<Voxel>,
}

impl ChunkGrid {
    pub fn new(coord: ChunkCoord, sx: usize, sy: usize, sz: usize) -> Self {
        Self {
            coord,
            sx,
            sy,
            sz,
            voxels: vec![Voxel::AIR; sx * sy * sz],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.sx * (y + self.sy * z)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: Block) {
        let i = self.idx(x, y, z);
        self.voxels[i].block = block;
    }

    #[inline]
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, v: Voxel) {
        let i = self.idx(x, y, z);
        self.voxels[i] = v;
    }

    /// Topmost non-air y in a column, or `None` for an all-air column.
    pub fn top_solid_y(&self, x: usize, z: usize) -> Option<usize> {
        (0..self.sy).rev().find(|&y| !self.get(x, y, z).is_air())
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.voxels.iter().any(|v| !v.is_air())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkOccupancy {
    Empty,
    Populated,
}

impl ChunkOccupancy {
    #[inline]
    pub fn has_blocks(self) -> bool {
        matches!(self, ChunkOccupancy::Populated)
    }
}

#[derive(Clone, Debug)]
pub struct ChunkGenerateResult {
    pub grid: ChunkGrid,
    pub occupancy: ChunkOccupancy,
}

/// Fills a fresh grid from the world sampler. Column profiles are sampled
/// once per (x,z) and reused for every y-level. Deterministic and idempotent
/// per (seed, coord).
pub fn generate_chunk_grid(world: &World, coord: ChunkCoord) -> ChunkGenerateResult {
    let sx = world.chunk_size_x;
    let sy = world.chunk_size_y;
    let sz = world.chunk_size_z;
    let mut grid = ChunkGrid::new(coord, sx, sy, sz);
    let (base_x, base_z) = coord.base();
    for x in 0..sx {
        for z in 0..sz {
            let wx = base_x + x as i32;
            let wz = base_z + z as i32;
            let profile = world.column_profile(wx, wz);
            for y in 0..sy {
                grid.set_voxel(x, y, z, world.block_for(&profile, wx, y as i32, wz));
            }
        }
    }
    let occupancy = if grid.has_non_air() {
        ChunkOccupancy::Populated
    } else {
        ChunkOccupancy::Empty
    };
    ChunkGenerateResult { grid, occupancy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_world::WorldGenConfig;

    #[test]
    fn generation_is_idempotent_per_coord() {
        let world = World::new(2024, WorldGenConfig::default());
        let coord = ChunkCoord::new(-3, 5);
        let a = generate_chunk_grid(&world, coord);
        let b = generate_chunk_grid(&world, coord);
        assert_eq!(a.occupancy, b.occupancy);
        for x in 0..a.grid.sx {
            for y in 0..a.grid.sy {
                for z in 0..a.grid.sz {
                    assert_eq!(a.grid.get(x, y, z), b.grid.get(x, y, z));
                }
            }
        }
    }

    #[test]
    fn generated_terrain_is_populated_and_air_capped() {
        let world = World::new(7, WorldGenConfig::default());
        let res = generate_chunk_grid(&world, ChunkCoord::new(0, 0));
        assert!(res.occupancy.has_blocks());
        // Heights clamp below sy, so the top level is always air.
        for x in 0..res.grid.sx {
            for z in 0..res.grid.sz {
                assert!(res.grid.get(x, res.grid.sy - 1, z).is_air());
            }
        }
    }

    #[test]
    fn top_solid_matches_world_surface_height() {
        let world = World::new(99, WorldGenConfig::default());
        let coord = ChunkCoord::new(4, -2);
        let res = generate_chunk_grid(&world, coord);
        let (base_x, base_z) = coord.base();
        for x in 0..res.grid.sx {
            for z in 0..res.grid.sz {
                let wx = base_x + x as i32;
                let wz = base_z + z as i32;
                let expect = world.surface_height(wx, wz);
                assert_eq!(res.grid.top_solid_y(x, z), Some(expect as usize));
            }
        }
    }
}
