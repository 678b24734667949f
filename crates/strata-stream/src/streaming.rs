//! Per-tick streaming pass: drain completions, reshape the registry around
//! the observer, and advance every chunk's stage.

use std::sync::Arc;

use hashbrown::HashSet;
use log::debug;
use strata_mesh_cpu::NeighborGrids;
use strata_runtime::{MeshJobOut, Runtime, TerrainJobOut};
use strata_world::{ChunkCoord, World};

use crate::registry::ChunkRegistry;
use crate::stage::ChunkStage;
use crate::trees::generate_structures;

/// Chunks kept beyond the visible radius so borders mesh against real
/// neighbors before they scroll into view.
const STREAM_PAD: i32 = 1;

/// The full coordinate square of side `2*extent+1` around `center`.
pub fn required_square(center: ChunkCoord, extent: i32) -> Vec<ChunkCoord> {
    let mut out = Vec::with_capacity(((2 * extent + 1) * (2 * extent + 1)) as usize);
    for dx in -extent..=extent {
        for dz in -extent..=extent {
            out.push(center.offset(dx, dz));
        }
    }
    out
}

/// Drives the chunk lifecycle. Owns the worker runtime; the registry is
/// passed in per tick so the embedding loop keeps ownership of world state.
pub struct StreamingController {
    world: Arc<World>,
    runtime: Runtime,
}

impl StreamingController {
    pub fn new(world: Arc<World>, runtime: Runtime) -> Self {
        Self { world, runtime }
    }

    #[inline]
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// One streaming tick. Returns the coordinates whose mesh was refreshed
    /// this tick; the embedding renderer uploads those entries' buffers.
    pub fn update_chunks(
        &mut self,
        registry: &mut ChunkRegistry,
        observer: (f32, f32, f32),
        radius: i32,
    ) -> Vec<ChunkCoord> {
        apply_terrain_results(registry, self.runtime.drain_terrain_results());

        let center = ChunkCoord::from_world_pos(observer.0, observer.2);
        let required: HashSet<ChunkCoord> =
            required_square(center, radius + STREAM_PAD).into_iter().collect();

        evict_out_of_range(registry, &required);

        for &coord in &required {
            if registry.get(coord).is_none() {
                registry.insert_new(coord);
            }
        }

        // Terrain pass: all unscheduled records, including any stragglers
        // kept alive outside the required set.
        let unscheduled: Vec<ChunkCoord> = registry
            .coords()
            .filter(|&c| registry.get(c).is_some_and(|e| e.stage() == ChunkStage::New))
            .collect();
        for coord in unscheduled {
            if let Some(entry) = registry.get_mut(coord) {
                entry.set_stage(ChunkStage::TerrainQueued);
                self.runtime.submit_terrain(coord);
            }
        }

        // Structure pass runs synchronously on this thread; cross-chunk
        // writes stay serialized with every other write path.
        let structure_ready: Vec<ChunkCoord> = registry
            .coords()
            .filter(|&c| {
                registry
                    .get(c)
                    .is_some_and(|e| e.stage() == ChunkStage::TerrainReady)
            })
            .collect();
        for coord in structure_ready {
            generate_structures(coord, &self.world, registry);
            if let Some(entry) = registry.get_mut(coord) {
                entry.set_stage(ChunkStage::StructuresReady);
                entry.mark_dirty();
            }
        }

        // Mesh pass: only chunks in the required set, once their own terrain
        // and structures are done. Neighbors are snapshotted as-is; a missing
        // one reads as air and heals on the dirty remesh.
        for &coord in &required {
            let Some(entry) = registry.get(coord) else {
                continue;
            };
            let wants_mesh = match entry.stage() {
                ChunkStage::StructuresReady => true,
                ChunkStage::MeshReady => entry.mesh_dirty(),
                _ => false,
            };
            if !wants_mesh {
                continue;
            }
            let Some(grid) = entry.grid().cloned() else {
                continue;
            };
            let neighbors = NeighborGrids {
                xn: registry.get(coord.offset(-1, 0)).and_then(|e| e.grid().cloned()),
                xp: registry.get(coord.offset(1, 0)).and_then(|e| e.grid().cloned()),
                zn: registry.get(coord.offset(0, -1)).and_then(|e| e.grid().cloned()),
                zp: registry.get(coord.offset(0, 1)).and_then(|e| e.grid().cloned()),
            };
            if let Some(entry) = registry.get_mut(coord) {
                entry.clear_dirty();
                entry.set_stage(ChunkStage::MeshQueued);
                self.runtime.submit_mesh(coord, grid, neighbors);
            }
        }

        apply_mesh_results(registry, self.runtime.drain_mesh_results())
    }
}

/// Installs finished terrain. A result whose record is gone is dropped: jobs
/// reference chunks by coordinate only, so an eviction that raced submission
/// (possible only for stages with nothing in flight) costs one wasted grid.
pub(crate) fn apply_terrain_results(registry: &mut ChunkRegistry, results: Vec<TerrainJobOut>) {
    for out in results {
        match registry.get_mut(out.coord) {
            Some(entry) if entry.stage() == ChunkStage::TerrainQueued => {
                debug!(
                    "terrain ready for {:?} in {}ms (empty={})",
                    out.coord,
                    out.t_gen_ms,
                    !out.occupancy.has_blocks()
                );
                entry.install_grid(out.grid);
            }
            Some(entry) => debug!(
                "terrain result for {:?} ignored at stage {:?}",
                out.coord,
                entry.stage()
            ),
            None => debug!("terrain result for evicted chunk {:?} dropped", out.coord),
        }
    }
}

/// Stores finished meshes and reports which chunks the renderer should
/// (re)upload.
pub(crate) fn apply_mesh_results(
    registry: &mut ChunkRegistry,
    results: Vec<MeshJobOut>,
) -> Vec<ChunkCoord> {
    let mut uploads = Vec::with_capacity(results.len());
    for out in results {
        match registry.get_mut(out.coord) {
            Some(entry) if entry.stage() == ChunkStage::MeshQueued => {
                debug!(
                    "mesh ready for {:?}: {} vertices in {}ms",
                    out.coord,
                    out.mesh.vertex_count(),
                    out.t_mesh_ms
                );
                entry.install_mesh(out.mesh);
                uploads.push(out.coord);
            }
            Some(entry) => debug!(
                "mesh result for {:?} ignored at stage {:?}",
                out.coord,
                entry.stage()
            ),
            None => debug!("mesh result for evicted chunk {:?} dropped", out.coord),
        }
    }
    uploads
}

/// Removes records outside the required set, keeping anything a background
/// job still references by coordinate.
pub(crate) fn evict_out_of_range(
    registry: &mut ChunkRegistry,
    required: &HashSet<ChunkCoord>,
) -> usize {
    let to_remove: Vec<ChunkCoord> = registry
        .coords()
        .filter(|c| !required.contains(c))
        .filter(|&c| registry.get(c).is_some_and(|e| !e.stage().in_flight()))
        .collect();
    let removed = to_remove.len();
    for coord in to_remove {
        debug!("evicting chunk {:?}", coord);
        registry.remove(coord);
    }
    removed
}
