/// Cube face, ordered the way the face tables and atlas rows expect:
/// 0 = -Z, 1 = +Z, 2 = -X, 3 = +X, 4 = -Y, 5 = +Y.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    NegZ = 0,
    PosZ = 1,
    NegX = 2,
    PosX = 3,
    NegY = 4,
    PosY = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::NegZ,
        Face::PosZ,
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Offset toward the voxel this face looks at.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::NegZ => (0, 0, -1),
            Face::PosZ => (0, 0, 1),
            Face::NegX => (-1, 0, 0),
            Face::PosX => (1, 0, 0),
            Face::NegY => (0, -1, 0),
            Face::PosY => (0, 1, 0),
        }
    }

    #[inline]
    pub fn is_lateral(self) -> bool {
        self.index() < 4
    }
}

/// Unit-cube face geometry: 6 vertices of 5 floats (x, y, z, u, v), two
/// counter-clockwise triangles per face, centered on the voxel origin.
pub const FACE_VERTS: [[f32; 30]; 6] = [
    // -Z
    [
        -0.5, -0.5, -0.5, 0.0, 0.0, //
        0.5, 0.5, -0.5, 1.0, 1.0, //
        0.5, -0.5, -0.5, 1.0, 0.0, //
        0.5, 0.5, -0.5, 1.0, 1.0, //
        -0.5, -0.5, -0.5, 0.0, 0.0, //
        -0.5, 0.5, -0.5, 0.0, 1.0,
    ],
    // +Z
    [
        -0.5, -0.5, 0.5, 0.0, 0.0, //
        0.5, -0.5, 0.5, 1.0, 0.0, //
        0.5, 0.5, 0.5, 1.0, 1.0, //
        0.5, 0.5, 0.5, 1.0, 1.0, //
        -0.5, 0.5, 0.5, 0.0, 1.0, //
        -0.5, -0.5, 0.5, 0.0, 0.0,
    ],
    // -X
    [
        -0.5, -0.5, -0.5, 0.0, 0.0, //
        -0.5, 0.5, 0.5, 1.0, 1.0, //
        -0.5, 0.5, -0.5, 0.0, 1.0, //
        -0.5, -0.5, -0.5, 0.0, 0.0, //
        -0.5, -0.5, 0.5, 1.0, 0.0, //
        -0.5, 0.5, 0.5, 1.0, 1.0,
    ],
    // +X
    [
        0.5, -0.5, -0.5, 0.0, 0.0, //
        0.5, 0.5, -0.5, 0.0, 1.0, //
        0.5, 0.5, 0.5, 1.0, 1.0, //
        0.5, 0.5, 0.5, 1.0, 1.0, //
        0.5, -0.5, 0.5, 1.0, 0.0, //
        0.5, -0.5, -0.5, 0.0, 0.0,
    ],
    // -Y
    [
        -0.5, -0.5, -0.5, 0.0, 0.0, //
        0.5, -0.5, -0.5, 1.0, 0.0, //
        0.5, -0.5, 0.5, 1.0, 1.0, //
        0.5, -0.5, 0.5, 1.0, 1.0, //
        -0.5, -0.5, 0.5, 0.0, 1.0, //
        -0.5, -0.5, -0.5, 0.0, 0.0,
    ],
    // +Y
    [
        -0.5, 0.5, -0.5, 0.0, 0.0, //
        0.5, 0.5, 0.5, 1.0, 1.0, //
        0.5, 0.5, -0.5, 1.0, 0.0, //
        0.5, 0.5, 0.5, 1.0, 1.0, //
        -0.5, 0.5, -0.5, 0.0, 0.0, //
        -0.5, 0.5, 0.5, 0.0, 1.0,
    ],
];
