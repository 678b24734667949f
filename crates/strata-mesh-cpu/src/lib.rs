//! CPU surface mesher: per-face visibility culling into a flat vertex list.
#![forbid(unsafe_code)]

mod face;

use std::sync::Arc;

use strata_blocks::{Block, LogAxis, V_SCALE, Voxel, v_offset};
use strata_chunk::ChunkGrid;
use strata_world::ChunkCoord;

pub use face::{FACE_VERTS, Face};

/// Interleaved layout: position (3) + texture coordinates (2).
pub const FLOATS_PER_VERTEX: usize = 5;

/// Finished chunk mesh: triangle-list vertices in world space.
#[derive(Clone, Debug, Default)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub vertices: Vec<f32>,
}

impl ChunkMeshCPU {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Snapshots of the four lateral neighbors, taken on the controller thread
/// when the mesh job is submitted. A missing neighbor reads as air, so border
/// faces stay visible until the neighbor generates and both sides remesh.
#[derive(Clone, Debug, Default)]
pub struct NeighborGrids {
    pub xn: Option<Arc<ChunkGrid>>,
    pub xp: Option<Arc<ChunkGrid>>,
    pub zn: Option<Arc<ChunkGrid>>,
    pub zp: Option<Arc<ChunkGrid>>,
}

impl NeighborGrids {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[inline]
fn is_air_at(grid: &ChunkGrid, neighbors: &NeighborGrids, x: i32, y: i32, z: i32) -> bool {
    if y < 0 || y >= grid.sy as i32 {
        return true;
    }
    let y = y as usize;
    if x < 0 {
        return neighbors
            .xn
            .as_ref()
            .map(|n| n.get(n.sx - 1, y, z as usize).is_air())
            .unwrap_or(true);
    }
    if x >= grid.sx as i32 {
        return neighbors
            .xp
            .as_ref()
            .map(|n| n.get(0, y, z as usize).is_air())
            .unwrap_or(true);
    }
    if z < 0 {
        return neighbors
            .zn
            .as_ref()
            .map(|n| n.get(x as usize, y, n.sz - 1).is_air())
            .unwrap_or(true);
    }
    if z >= grid.sz as i32 {
        return neighbors
            .zp
            .as_ref()
            .map(|n| n.get(x as usize, y, 0).is_air())
            .unwrap_or(true);
    }
    grid.get(x as usize, y, z as usize).is_air()
}

fn append_face(out: &mut Vec<f32>, face: Face, wx: f32, wy: f32, wz: f32, voxel: Voxel) {
    let verts = &FACE_VERTS[face.index()];
    let v_off = v_offset(voxel.block, face.index());
    for i in 0..6 {
        let mut u = verts[i * 5 + 3];
        let mut v = verts[i * 5 + 4];
        if voxel.block == Block::Wood && face.is_lateral() {
            match voxel.axis {
                LogAxis::X => std::mem::swap(&mut u, &mut v),
                LogAxis::Z => u = 1.0 - u,
                LogAxis::Y => {}
            }
        }
        out.push(verts[i * 5] + wx);
        out.push(verts[i * 5 + 1] + wy);
        out.push(verts[i * 5 + 2] + wz);
        out.push(u);
        out.push(v * V_SCALE + v_off);
    }
}

/// Builds the visible-surface mesh for one chunk. Pure over the snapshots it
/// is given; safe to run concurrently for different chunks.
pub fn build_chunk_vertices(grid: &ChunkGrid, neighbors: &NeighborGrids) -> ChunkMeshCPU {
    let (base_x, base_z) = grid.coord.base();
    let mut vertices = Vec::new();
    for x in 0..grid.sx {
        for y in 0..grid.sy {
            for z in 0..grid.sz {
                let voxel = grid.get(x, y, z);
                if voxel.is_air() {
                    continue;
                }
                let wx = (base_x + x as i32) as f32;
                let wy = y as f32;
                let wz = (base_z + z as i32) as f32;
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    if is_air_at(grid, neighbors, x as i32 + dx, y as i32 + dy, z as i32 + dz) {
                        append_face(&mut vertices, face, wx, wy, wz, voxel);
                    }
                }
            }
        }
    }
    ChunkMeshCPU {
        coord: grid.coord,
        vertices,
    }
}
