use std::sync::Arc;

use hashbrown::HashMap;
use strata_blocks::{Block, LogAxis, Voxel};
use strata_chunk::ChunkGrid;
use strata_mesh_cpu::ChunkMeshCPU;
use strata_world::ChunkCoord;

use crate::stage::ChunkStage;

/// One streamed chunk: lifecycle stage, voxel grid once terrain has run, and
/// the latest built mesh. The grid sits behind an `Arc` so mesh jobs snapshot
/// it cheaply; controller-side writes go through `Arc::make_mut` and only
/// copy while a snapshot is still alive.
pub struct ChunkEntry {
    pub coord: ChunkCoord,
    stage: ChunkStage,
    grid: Option<Arc<ChunkGrid>>,
    mesh_dirty: bool,
    mesh: Option<ChunkMeshCPU>,
}

impl ChunkEntry {
    fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            stage: ChunkStage::New,
            grid: None,
            mesh_dirty: true,
            mesh: None,
        }
    }

    #[inline]
    pub fn stage(&self) -> ChunkStage {
        self.stage
    }

    #[inline]
    pub fn grid(&self) -> Option<&Arc<ChunkGrid>> {
        self.grid.as_ref()
    }

    #[inline]
    pub fn mesh(&self) -> Option<&ChunkMeshCPU> {
        self.mesh.as_ref()
    }

    #[inline]
    pub fn mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.mesh_dirty = true;
    }

    pub(crate) fn set_stage(&mut self, stage: ChunkStage) {
        self.stage = stage;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.mesh_dirty = false;
    }

    pub(crate) fn install_grid(&mut self, grid: ChunkGrid) {
        self.grid = Some(Arc::new(grid));
        self.stage = ChunkStage::TerrainReady;
        self.mesh_dirty = true;
    }

    pub(crate) fn install_mesh(&mut self, mesh: ChunkMeshCPU) {
        self.mesh = Some(mesh);
        self.stage = ChunkStage::MeshReady;
    }
}

/// Sole owner of all chunk records, keyed by chunk coordinate. Background
/// jobs never hold a reference in here; completions re-resolve by coordinate
/// and tolerate a record that has since been evicted.
#[derive(Default)]
pub struct ChunkRegistry {
    chunks: HashMap<ChunkCoord, ChunkEntry>,
}

impl ChunkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkEntry> {
        self.chunks.get(&coord)
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkEntry> {
        self.chunks.get_mut(&coord)
    }

    pub(crate) fn insert_new(&mut self, coord: ChunkCoord) -> &mut ChunkEntry {
        self.chunks
            .entry(coord)
            .or_insert_with(|| ChunkEntry::new(coord))
    }

    pub(crate) fn remove(&mut self, coord: ChunkCoord) {
        self.chunks.remove(&coord);
    }

    /// Voxel at a world coordinate, or `None` when the owning chunk is
    /// absent, its terrain is still pending, or y is out of range. Callers
    /// treat `None` as air.
    pub fn get_block_world(&self, wx: i32, y: i32, wz: i32) -> Option<Voxel> {
        let entry = self.get(ChunkCoord::from_world(wx, wz))?;
        let grid = entry.grid()?;
        if y < 0 || y >= grid.sy as i32 {
            return None;
        }
        let (base_x, base_z) = grid.coord.base();
        let lx = (wx - base_x) as usize;
        let lz = (wz - base_z) as usize;
        Some(grid.get(lx, y as usize, lz))
    }

    /// Editor hook: writes one voxel and dirties the owning chunk plus any
    /// chunk sharing the touched border. Silently ignores writes into
    /// absent or terrain-pending chunks and out-of-range y.
    pub fn set_block_world(&mut self, wx: i32, y: i32, wz: i32, block: Block, axis: LogAxis) {
        let coord = ChunkCoord::from_world(wx, wz);
        let Some(entry) = self.get_mut(coord) else {
            return;
        };
        let Some(grid) = entry.grid.as_mut() else {
            return;
        };
        if y < 0 || y >= grid.sy as i32 {
            return;
        }
        let (base_x, base_z) = grid.coord.base();
        let lx = (wx - base_x) as usize;
        let lz = (wz - base_z) as usize;
        let sx = grid.sx;
        let sz = grid.sz;
        Arc::make_mut(grid).set_voxel(lx, y as usize, lz, Voxel::with_axis(block, axis));
        entry.mark_dirty();

        let mut sides: [Option<ChunkCoord>; 4] = [None; 4];
        if lx == 0 {
            sides[0] = Some(coord.offset(-1, 0));
        }
        if lx == sx - 1 {
            sides[1] = Some(coord.offset(1, 0));
        }
        if lz == 0 {
            sides[2] = Some(coord.offset(0, -1));
        }
        if lz == sz - 1 {
            sides[3] = Some(coord.offset(0, 1));
        }
        for ncoord in sides.into_iter().flatten() {
            if let Some(neighbor) = self.get_mut(ncoord) {
                neighbor.mark_dirty();
            }
        }
    }
}
