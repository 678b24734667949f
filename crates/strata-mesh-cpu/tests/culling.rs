use std::sync::Arc;

use strata_blocks::{Block, LogAxis, V_SCALE, Voxel, v_offset};
use strata_chunk::ChunkGrid;
use strata_mesh_cpu::{FLOATS_PER_VERTEX, NeighborGrids, build_chunk_vertices};
use strata_world::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkCoord};

fn empty_grid(coord: ChunkCoord) -> ChunkGrid {
    ChunkGrid::new(coord, CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z)
}

#[test]
fn lone_stone_voxel_emits_six_faces() {
    let mut grid = empty_grid(ChunkCoord::new(0, 0));
    grid.set(8, 64, 8, Block::Stone);
    let mesh = build_chunk_vertices(&grid, &NeighborGrids::empty());
    assert_eq!(mesh.vertex_count(), 36);
    assert_eq!(mesh.vertices.len(), 36 * FLOATS_PER_VERTEX);
}

#[test]
fn fully_buried_voxel_emits_nothing() {
    // Plus-shape: a center voxel with all six neighbors solid. The center
    // contributes zero faces; each arm exposes five.
    let mut grid = empty_grid(ChunkCoord::new(0, 0));
    grid.set(8, 64, 8, Block::Stone);
    grid.set(7, 64, 8, Block::Stone);
    grid.set(9, 64, 8, Block::Stone);
    grid.set(8, 63, 8, Block::Stone);
    grid.set(8, 65, 8, Block::Stone);
    grid.set(8, 64, 7, Block::Stone);
    grid.set(8, 64, 9, Block::Stone);
    let mesh = build_chunk_vertices(&grid, &NeighborGrids::empty());
    assert_eq!(mesh.vertex_count(), 6 * 5 * 6);
}

#[test]
fn missing_neighbor_reads_as_air() {
    let mut grid = empty_grid(ChunkCoord::new(0, 0));
    grid.set(0, 10, 4, Block::Stone);
    let mesh = build_chunk_vertices(&grid, &NeighborGrids::empty());
    // Border face toward the absent -X neighbor stays visible.
    assert_eq!(mesh.vertex_count(), 36);
}

#[test]
fn solid_neighbor_chunk_culls_border_face() {
    let mut grid = empty_grid(ChunkCoord::new(0, 0));
    grid.set(0, 10, 4, Block::Stone);

    let mut west = empty_grid(ChunkCoord::new(-1, 0));
    west.set(CHUNK_SIZE_X - 1, 10, 4, Block::Stone);

    let neighbors = NeighborGrids {
        xn: Some(Arc::new(west)),
        ..NeighborGrids::empty()
    };
    let mesh = build_chunk_vertices(&grid, &neighbors);
    assert_eq!(mesh.vertex_count(), 30);
}

#[test]
fn world_floor_emits_bottom_face() {
    // y < 0 is treated as air, so a voxel at y = 0 shows its underside.
    let mut grid = empty_grid(ChunkCoord::new(0, 0));
    grid.set(5, 0, 5, Block::Stone);
    let mesh = build_chunk_vertices(&grid, &NeighborGrids::empty());
    assert_eq!(mesh.vertex_count(), 36);
}

#[test]
fn positions_are_world_space() {
    let coord = ChunkCoord::new(2, -1);
    let mut grid = empty_grid(coord);
    grid.set(0, 0, 0, Block::Stone);
    let mesh = build_chunk_vertices(&grid, &NeighborGrids::empty());
    let (base_x, base_z) = coord.base();
    for vert in mesh.vertices.chunks_exact(FLOATS_PER_VERTEX) {
        assert!((vert[0] - base_x as f32).abs() <= 0.5);
        assert!((vert[2] - base_z as f32).abs() <= 0.5);
    }
}

#[test]
fn wood_lateral_uvs_follow_log_axis() {
    let mut upright = empty_grid(ChunkCoord::new(0, 0));
    upright.set_voxel(4, 4, 4, Voxel::with_axis(Block::Wood, LogAxis::Y));
    let mut sideways = empty_grid(ChunkCoord::new(0, 0));
    sideways.set_voxel(4, 4, 4, Voxel::with_axis(Block::Wood, LogAxis::X));

    let m_y = build_chunk_vertices(&upright, &NeighborGrids::empty());
    let m_x = build_chunk_vertices(&sideways, &NeighborGrids::empty());
    assert_eq!(m_y.vertex_count(), m_x.vertex_count());

    let side_off = v_offset(Block::Wood, 0);
    // First emitted face is -Z (lateral); its third vertex carries raw
    // (u, v) = (1, 0), so an axis-X swap is observable.
    let uv_y = (m_y.vertices[13], m_y.vertices[14]);
    let uv_x = (m_x.vertices[13], m_x.vertices[14]);
    let raw_y = (uv_y.0, (uv_y.1 - side_off) / V_SCALE);
    let raw_x = (uv_x.0, (uv_x.1 - side_off) / V_SCALE);
    assert!((raw_y.0 - raw_x.1).abs() < 1e-5);
    assert!((raw_y.1 - raw_x.0).abs() < 1e-5);

    // Top faces are unaffected by orientation: compare the +Y face slice.
    let per_face = 6 * FLOATS_PER_VERTEX;
    let top_y = &m_y.vertices[5 * per_face..6 * per_face];
    let top_x = &m_x.vertices[5 * per_face..6 * per_face];
    assert_eq!(top_y, top_x);
}
