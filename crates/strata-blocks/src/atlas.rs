//! Vertically stacked texture atlas layout.
//!
//! The atlas image itself lives with the renderer; this module only knows
//! which row a block face samples from. Faces are indexed the way the mesher
//! orders them: 0 = -Z, 1 = +Z, 2 = -X, 3 = +X, 4 = -Y, 5 = +Y.

use crate::types::Block;

/// Fraction of the atlas one face slot occupies along V.
pub const V_SCALE: f32 = 1.0 / 6.0;

/// Atlas row for a block face. Kinds without art fall back to row 0.
pub fn atlas_row(block: Block, face_index: usize) -> u32 {
    match block {
        Block::Grass => {
            // Sides and bottom share the dirt-edged tile; only the top differs.
            if face_index == 5 { 10 } else { 9 }
        }
        Block::Dirt | Block::CoarseDirt => 9,
        Block::Stone => 8,
        Block::Wood => {
            if face_index >= 4 { 6 } else { 7 }
        }
        Block::Leaves => 5,
        Block::Snow => 4,
        Block::Andesite => 3,
        Block::Diorite => 2,
        Block::Granite => 1,
        Block::Tuff => 0,
        Block::Air | Block::Cobblestone | Block::Gravel | Block::Brick => 0,
    }
}

/// V offset applied to a face's local texture coordinates.
#[inline]
pub fn v_offset(block: Block, face_index: usize) -> f32 {
    atlas_row(block, face_index) as f32 * V_SCALE
}
