use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use quarry_blocks::{BlockKind, BlockRegistry, KindId, RegistryBuilder};
use quarry_chunk::{Cell, VoxelGrid};
use quarry_geom::Vec3;
use quarry_mesh_cpu::{ChunkMesh, Face, extract_mesh, visible_faces};

fn kind(name: &str, strength: i32, transparent: bool) -> Arc<BlockKind> {
    Arc::new(BlockKind {
        name: name.into(),
        strength,
        transparent,
    })
}

/// Registry with an opaque "stone" (id 0) and a transparent "glass" (id 1).
fn registry() -> (BlockRegistry, Arc<BlockKind>, Arc<BlockKind>) {
    let stone = kind("stone", 4, false);
    let glass = kind("glass", 1, true);
    let mut b = RegistryBuilder::new();
    b.ensure(&stone);
    b.ensure(&glass);
    (b.freeze(), stone, glass)
}

fn place(grid: &mut VoxelGrid, x: usize, y: usize, z: usize, id: u16, proto: &BlockKind) {
    grid.set(x, y, z, Cell::new(KindId(id), proto));
}

/// Per-face (normal, vertex quad) pairs decoded from the flat streams.
fn faces_of(mesh: &ChunkMesh) -> Vec<([f32; 3], [[f32; 3]; 4])> {
    let mut out = Vec::new();
    for f in 0..mesh.face_count() {
        let n = [
            mesh.norm[f * 12],
            mesh.norm[f * 12 + 1],
            mesh.norm[f * 12 + 2],
        ];
        let mut quad = [[0.0f32; 3]; 4];
        for (v, corner) in quad.iter_mut().enumerate() {
            let base = (f * 4 + v) * 3;
            *corner = [mesh.pos[base], mesh.pos[base + 1], mesh.pos[base + 2]];
        }
        out.push((n, quad));
    }
    out
}

#[test]
fn isolated_opaque_cell_emits_five_faces() {
    let (reg, stone, _) = registry();
    let mut grid = VoxelGrid::new(3, 3, 3);
    place(&mut grid, 1, 1, 1, 0, &stone);

    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    assert_eq!(mesh.face_count(), 5);
    assert_eq!(mesh.vertex_count(), 20);
    assert_eq!(mesh.submeshes[0].len(), 30);

    // All but the downward face, each wound consistently with its normal.
    let mut seen = HashSet::new();
    for (n, quad) in faces_of(&mesh) {
        assert_ne!(n, [0.0, -1.0, 0.0]);
        seen.insert((n[0] as i32, n[1] as i32, n[2] as i32));
        for tri in [[0usize, 1, 2], [2, 3, 0]] {
            let e1: Vec<f32> = (0..3).map(|i| quad[tri[1]][i] - quad[tri[0]][i]).collect();
            let e2: Vec<f32> = (0..3).map(|i| quad[tri[2]][i] - quad[tri[0]][i]).collect();
            let cross = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let dot = cross[0] * n[0] + cross[1] * n[1] + cross[2] * n[2];
            assert!(dot > 0.0, "triangle wound against its normal {n:?}");
        }
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn adjacent_opaque_cells_cull_the_shared_face_on_both_sides() {
    let (reg, stone, _) = registry();
    let mut grid = VoxelGrid::new(4, 3, 3);
    place(&mut grid, 1, 1, 1, 0, &stone);
    place(&mut grid, 2, 1, 1, 0, &stone);

    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    // 5 faces each, minus the internal +x/-x pair.
    assert_eq!(mesh.face_count(), 8);
    for (n, quad) in faces_of(&mesh) {
        // No face may sit on the internal x=2 plane.
        if n == [1.0, 0.0, 0.0] || n == [-1.0, 0.0, 0.0] {
            assert!(quad.iter().all(|c| c[0] != 2.0));
        }
    }
}

#[test]
fn opaque_transparent_boundary_is_drawn_from_the_opaque_side_only() {
    let (reg, stone, glass) = registry();
    let mut grid = VoxelGrid::new(4, 3, 3);
    place(&mut grid, 1, 1, 1, 0, &stone);
    place(&mut grid, 2, 1, 1, 1, &glass);

    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    let on_boundary: Vec<_> = faces_of(&mesh)
        .into_iter()
        .filter(|(_, quad)| quad.iter().all(|c| c[0] == 2.0))
        .collect();
    // Exactly one face on the x=2 plane: the stone cell's +x face.
    assert_eq!(on_boundary.len(), 1);
    assert_eq!(on_boundary[0].0, [1.0, 0.0, 0.0]);

    // The stone face lives in stone's submesh, and the glass cell still
    // contributes its own outer faces to its submesh.
    assert!(!mesh.submeshes[0].is_empty());
    assert!(!mesh.submeshes[1].is_empty());
}

#[test]
fn adjacent_transparent_cells_cull_their_shared_face() {
    let (reg, _, glass) = registry();
    let mut grid = VoxelGrid::new(4, 3, 3);
    place(&mut grid, 1, 1, 1, 1, &glass);
    place(&mut grid, 2, 1, 1, 1, &glass);

    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    assert_eq!(mesh.face_count(), 8);
}

#[test]
fn damage_progress_rides_the_second_uv_channel() {
    let (reg, stone, _) = registry();
    let mut grid = VoxelGrid::new(3, 3, 3);
    place(&mut grid, 1, 1, 1, 0, &stone);

    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    assert!(mesh.uv2.chunks(2).all(|uv| uv == [1.0, 0.0]));

    assert!(!grid.apply_damage(1, 1, 1, 1));
    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    assert!(mesh.uv2.chunks(2).all(|uv| uv == [0.75, 0.0]));

    // A destroyed cell disappears from the mesh entirely.
    assert!(grid.apply_damage(1, 1, 1, 3));
    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    assert!(mesh.is_empty());
}

#[test]
fn excluded_cells_are_skipped_but_still_occlude_neighbors() {
    let (reg, stone, _) = registry();
    let mut grid = VoxelGrid::new(4, 3, 3);
    place(&mut grid, 1, 1, 1, 0, &stone);
    place(&mut grid, 2, 1, 1, 0, &stone);

    let skip: HashSet<_> = [(2usize, 1usize, 1usize)].into_iter().collect();
    let mesh = extract_mesh(&grid, &reg, Some(&skip), Vec3::UP);
    // Only the first cell emits, and its +x face stays culled by the
    // excluded-but-present neighbor.
    assert_eq!(mesh.face_count(), 4);
    assert!(
        faces_of(&mesh)
            .iter()
            .all(|(n, _)| *n != [1.0, 0.0, 0.0])
    );
}

#[test]
fn back_facing_directions_are_dropped_by_the_view_test() {
    let (reg, stone, _) = registry();
    let mut grid = VoxelGrid::new(3, 3, 3);
    place(&mut grid, 1, 1, 1, 0, &stone);

    // Looking along +x: the -x face fails dot >= -0.5, down is always out.
    let mesh = extract_mesh(&grid, &reg, None, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(mesh.face_count(), 4);
    assert!(
        faces_of(&mesh)
            .iter()
            .all(|(n, _)| *n != [-1.0, 0.0, 0.0] && *n != [0.0, -1.0, 0.0])
    );
}

#[test]
fn faces_bucket_into_their_kind_submesh() {
    let (reg, stone, glass) = registry();
    let mut grid = VoxelGrid::new(4, 3, 3);
    place(&mut grid, 0, 0, 0, 0, &stone);
    place(&mut grid, 3, 0, 2, 1, &glass);

    let mesh = extract_mesh(&grid, &reg, None, Vec3::UP);
    assert_eq!(mesh.submeshes.len(), 2);
    assert_eq!(mesh.submeshes[0].len(), 5 * 6);
    assert_eq!(mesh.submeshes[1].len(), 5 * 6);
    // Every index is in range for the shared vertex streams.
    let max = mesh.vertex_count() as u32;
    assert!(mesh.submeshes.iter().flatten().all(|&i| i < max));
}

proptest! {
    // The downward face never survives view culling, whatever the view.
    #[test]
    fn visible_faces_never_include_down(
        x in -1.0f32..1.0,
        y in -1.0f32..1.0,
        z in -1.0f32..1.0,
    ) {
        let dirs = visible_faces(Vec3::new(x, y, z).normalized());
        prop_assert!(!dirs.contains(&Face::NegY));
        prop_assert!(dirs.len() <= 5);
        for f in dirs {
            prop_assert!(Vec3::new(x, y, z).normalized().dot(f.normal()) >= -0.5);
        }
    }
}
