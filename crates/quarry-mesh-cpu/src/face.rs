use quarry_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

/// Candidate order for view culling. `NegY` stays last; the grid has no
/// floor underside to render and extraction skips it unconditionally.
pub(crate) const DIRECTIONS: [Face; 6] = [
    Face::PosZ,
    Face::NegZ,
    Face::NegX,
    Face::PosX,
    Face::PosY,
    Face::NegY,
];

impl Face {
    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosY => Vec3::new(0.0, 1.0, 0.0),
            Face::NegY => Vec3::new(0.0, -1.0, 0.0),
            Face::PosX => Vec3::new(1.0, 0.0, 0.0),
            Face::NegX => Vec3::new(-1.0, 0.0, 0.0),
            Face::PosZ => Vec3::new(0.0, 0.0, 1.0),
            Face::NegZ => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// The four corners of this face of the unit cube at `p`, wound
    /// counter-clockwise when viewed along the outward normal.
    #[inline]
    pub fn corners(self, p: Vec3) -> [Vec3; 4] {
        let v = |x: f32, y: f32, z: f32| Vec3::new(p.x + x, p.y + y, p.z + z);
        match self {
            Face::PosZ => [v(0.0, 0.0, 1.0), v(1.0, 0.0, 1.0), v(1.0, 1.0, 1.0), v(0.0, 1.0, 1.0)],
            Face::NegZ => [v(1.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0)],
            Face::NegX => [v(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0), v(0.0, 1.0, 1.0), v(0.0, 1.0, 0.0)],
            Face::PosX => [v(1.0, 0.0, 1.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(1.0, 1.0, 1.0)],
            Face::PosY => [v(0.0, 1.0, 1.0), v(1.0, 1.0, 1.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0)],
            Face::NegY => [v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 0.0, 1.0), v(0.0, 0.0, 1.0)],
        }
    }
}
