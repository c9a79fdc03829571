use std::collections::HashSet;

use quarry_blocks::BlockRegistry;
use quarry_chunk::{Cell, VoxelGrid};
use quarry_geom::Vec3;

use crate::face::{DIRECTIONS, Face};
use crate::mesh_build::ChunkMesh;

/// The face directions worth emitting for a given view direction: every
/// direction not strongly back-facing (`dot >= -0.5`), with `NegY` always
/// excluded since the grid's underside is never rendered.
pub fn visible_faces(view_dir: Vec3) -> Vec<Face> {
    DIRECTIONS
        .iter()
        .copied()
        .filter(|&f| f != Face::NegY && view_dir.dot(f.normal()) >= -0.5)
        .collect()
}

/// Walks the finished grid once and emits every visible face into per-kind
/// submeshes. `exclude` supports partial remeshing by skipping cells wholesale.
pub fn extract_mesh(
    grid: &VoxelGrid,
    registry: &BlockRegistry,
    exclude: Option<&HashSet<(usize, usize, usize)>>,
    view_dir: Vec3,
) -> ChunkMesh {
    let mut mesh = ChunkMesh::new(registry.len());
    let faces = visible_faces(view_dir);

    for x in 0..grid.width {
        for y in 0..grid.height {
            for z in 0..grid.length {
                if let Some(skip) = exclude {
                    if skip.contains(&(x, y, z)) {
                        continue;
                    }
                }
                let Some(cell) = grid.get(x, y, z) else {
                    continue;
                };
                if cell.is_destroyed() {
                    continue;
                }
                let progress = registry
                    .get(cell.kind)
                    .map(|k| cell.health as f32 / k.strength.max(1) as f32)
                    .unwrap_or(1.0);
                let origin = Vec3::new(x as f32, y as f32, z as f32);
                for &face in &faces {
                    if face_occluded(grid, cell, x, y, z, face) {
                        continue;
                    }
                    mesh.add_face(face, origin, progress, cell.kind.index());
                }
            }
        }
    }

    log::debug!(
        target: "mesh",
        "extracted {} faces, {} vertices, {} submeshes",
        mesh.face_count(),
        mesh.vertex_count(),
        mesh.submeshes.len()
    );
    mesh
}

/// Face visibility against the neighbor one step out of `face`.
///
/// Out-of-bounds, empty, and destroyed neighbors never occlude. A live
/// neighbor occludes unless it is transparent while the current cell is
/// not: the opaque side of an opaque/transparent boundary draws its face,
/// the transparent side looking back at it does not, and two transparent
/// cells cull their shared face.
fn face_occluded(grid: &VoxelGrid, cell: &Cell, x: usize, y: usize, z: usize, face: Face) -> bool {
    let (dx, dy, dz) = face.delta();
    match grid.get_at(x as i32 + dx, y as i32 + dy, z as i32 + dz) {
        Some(neighbor) if !neighbor.is_destroyed() => {
            !(neighbor.transparent && !cell.transparent)
        }
        _ => false,
    }
}
