use quarry_geom::Vec3;

use crate::face::Face;

/// Fixed UV quad shared by every face.
const BASE_UV: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Extracted chunk geometry: interleaved vertex streams plus one `u32`
/// index list per registered block kind. The second UV channel carries the
/// cell's damage progress (`health / strength`) in `x` for shader-driven
/// crack overlays.
#[derive(Default, Clone)]
pub struct ChunkMesh {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub uv2: Vec<f32>,
    pub submeshes: Vec<Vec<u32>>,
}

impl ChunkMesh {
    pub fn new(submesh_count: usize) -> Self {
        Self {
            pos: Vec::new(),
            norm: Vec::new(),
            uv: Vec::new(),
            uv2: Vec::new(),
            submeshes: vec![Vec::new(); submesh_count],
        }
    }

    /// Appends one quad (4 vertices, 2 triangles) for the given face of the
    /// unit cube at `origin`, indexed into `submesh`.
    pub fn add_face(&mut self, face: Face, origin: Vec3, damage_progress: f32, submesh: usize) {
        let base = (self.pos.len() / 3) as u32;
        let n = face.normal();
        for (i, corner) in face.corners(origin).into_iter().enumerate() {
            self.pos.extend_from_slice(&[corner.x, corner.y, corner.z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            let (u, v) = BASE_UV[i];
            self.uv.extend_from_slice(&[u, v]);
            self.uv2.extend_from_slice(&[damage_progress, 0.0]);
        }
        self.submeshes[submesh].extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertex_count() / 4
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.len() / 3).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }
}
