use proptest::prelude::*;
use strata_blocks::{Block, Voxel};
use strata_chunk::ChunkGrid;
use strata_world::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkCoord};

fn arb_cell() -> impl Strategy<Value = (usize, usize, usize)> {
    (0..CHUNK_SIZE_X, 0..CHUNK_SIZE_Y, 0..CHUNK_SIZE_Z)
}

proptest! {
    // set(x,y,z,T) is observable at exactly that cell and nowhere else.
    #[test]
    fn set_then_get_roundtrips_without_bleed(
        (x, y, z) in arb_cell(),
        (ox, oy, oz) in arb_cell(),
    ) {
        let mut grid = ChunkGrid::new(
            ChunkCoord::new(0, 0),
            CHUNK_SIZE_X,
            CHUNK_SIZE_Y,
            CHUNK_SIZE_Z,
        );
        grid.set(x, y, z, Block::Brick);
        prop_assert_eq!(grid.get(x, y, z).block, Block::Brick);
        if (ox, oy, oz) != (x, y, z) {
            prop_assert_eq!(grid.get(ox, oy, oz), Voxel::AIR);
        }
    }

    // The row-major index maps every in-range cell to a distinct slot.
    #[test]
    fn index_is_injective_over_cells(
        a in arb_cell(),
        b in arb_cell(),
    ) {
        let grid = ChunkGrid::new(
            ChunkCoord::new(0, 0),
            CHUNK_SIZE_X,
            CHUNK_SIZE_Y,
            CHUNK_SIZE_Z,
        );
        let ia = grid.idx(a.0, a.1, a.2);
        let ib = grid.idx(b.0, b.1, b.2);
        prop_assert_eq!(ia == ib, a == b);
        prop_assert!(ia < CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z);
    }
}
