//! Synchronous structure pass: grows trees onto generated terrain.

use strata_blocks::{Block, LogAxis};
use strata_world::{ChunkCoord, World};

use crate::registry::ChunkRegistry;

fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

fn rand01(world_seed: u32, ix: i32, iz: i32, salt: u32) -> f32 {
    let h = hash2(ix, iz, (world_seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

/// Places a leaf voxel, but only into air. Writes route through the world
/// setter so overhang into a neighbor chunk resolves (or skips) there.
fn place_leaf(registry: &mut ChunkRegistry, wx: i32, y: i32, wz: i32) {
    match registry.get_block_world(wx, y, wz) {
        Some(v) if v.is_air() => {
            registry.set_block_world(wx, y, wz, Block::Leaves, LogAxis::Y);
        }
        _ => {}
    }
}

/// Grows trees for one chunk. Decisions read a terrain snapshot of the
/// chunk's own grid, so spawn placement never depends on structures grown
/// earlier in the pass, in this chunk or in any neighbor. Canopy voxels
/// may land in neighboring chunks; those writes are skipped while the
/// neighbor's terrain is still pending, and every touched chunk comes out
/// mesh-dirty via the world setter.
pub fn generate_structures(coord: ChunkCoord, world: &World, registry: &mut ChunkRegistry) {
    let Some(grid) = registry.get(coord).and_then(|e| e.grid().cloned()) else {
        return;
    };
    let t = &world.cfg.trees;
    let margin = t.margin;
    let (base_x, base_z) = coord.base();

    for x in margin..(grid.sx as i32 - margin) {
        for z in margin..(grid.sz as i32 - margin) {
            let wx = base_x + x;
            let wz = base_z + z;

            let chance = world.tree_chance(world.biome(wx, wz));
            if rand01(world.seed, wx, wz, 0xA53F9) >= chance {
                continue;
            }

            let Some(surface) = grid.top_solid_y(x as usize, z as usize) else {
                continue;
            };
            if surface == 0 || grid.get(x as usize, surface, z as usize).block != Block::Grass {
                continue;
            }
            let y = surface as i32;

            let span = (t.trunk_max - t.trunk_min).max(0) as u32;
            let trunk_height = t.trunk_min + (hash2(wx, wz, world.seed ^ 0x0051_F0A7) % (span + 1)) as i32;
            let leaf_start = y + trunk_height - 2;
            let actual_trunk = (trunk_height - 1).max(1);

            for ty in 1..=actual_trunk {
                if y + ty >= grid.sy as i32 {
                    break;
                }
                registry.set_block_world(wx, y + ty, wz, Block::Wood, LogAxis::Y);
            }

            // Main canopy: 5x5 footprint across two levels.
            for lx in -2..=2 {
                for lz in -2..=2 {
                    for ly in 0..=1 {
                        place_leaf(registry, wx + lx, leaf_start + ly, wz + lz);
                    }
                }
            }

            // Tapered topper: center plus the four orthogonal offsets.
            let topper_base = y + actual_trunk + 1;
            for dy in 0..=1 {
                let by = topper_base + dy;
                place_leaf(registry, wx, by, wz);
                for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                    place_leaf(registry, wx + dx, by, wz + dz);
                }
            }
        }
    }
}
