/// Closed set of block kinds the generator can place.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Block {
    #[default]
    Air,
    Grass,
    Dirt,
    CoarseDirt,
    Gravel,
    Stone,
    Cobblestone,
    Andesite,
    Diorite,
    Granite,
    Tuff,
    Brick,
    Wood,
    Leaves,
    Snow,
}

impl Block {
    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, Block::Air)
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }
}

/// Principal axis a log's bark texture is aligned to. Only meaningful for
/// `Block::Wood`; everything else carries the `Y` default.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LogAxis {
    #[default]
    Y,
    X,
    Z,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Voxel {
    pub block: Block,
    pub axis: LogAxis,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        block: Block::Air,
        axis: LogAxis::Y,
    };

    #[inline]
    pub const fn new(block: Block) -> Self {
        Self {
            block,
            axis: LogAxis::Y,
        }
    }

    #[inline]
    pub const fn with_axis(block: Block, axis: LogAxis) -> Self {
        Self { block, axis }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.block.is_air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_voxel_is_air_with_y_axis() {
        let v = Voxel::default();
        assert!(v.is_air());
        assert_eq!(v.axis, LogAxis::Y);
    }

    #[test]
    fn new_voxel_defaults_axis_to_y() {
        let v = Voxel::new(Block::Stone);
        assert_eq!(v.axis, LogAxis::Y);
        assert!(v.block.is_solid());
    }
}
