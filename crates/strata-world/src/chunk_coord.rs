use serde::{Deserialize, Serialize};

use crate::{CHUNK_SIZE_X, CHUNK_SIZE_Z};

/// Key of a chunk on the horizontal streaming grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// Chunk owning the given world voxel column.
    #[inline]
    pub fn from_world(wx: i32, wz: i32) -> Self {
        Self {
            cx: wx.div_euclid(CHUNK_SIZE_X as i32),
            cz: wz.div_euclid(CHUNK_SIZE_Z as i32),
        }
    }

    /// Chunk under a continuous world position.
    #[inline]
    pub fn from_world_pos(x: f32, z: f32) -> Self {
        Self {
            cx: (x / CHUNK_SIZE_X as f32).floor() as i32,
            cz: (z / CHUNK_SIZE_Z as f32).floor() as i32,
        }
    }

    /// World coordinate of this chunk's minimum corner.
    #[inline]
    pub fn base(self) -> (i32, i32) {
        (
            self.cx * CHUNK_SIZE_X as i32,
            self.cz * CHUNK_SIZE_Z as i32,
        )
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
