use proptest::prelude::*;
use quarry_blocks::{BlockKind, KindId};
use quarry_chunk::{Cell, VoxelGrid};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn kind(strength: i32) -> BlockKind {
    BlockKind {
        name: "stone".into(),
        strength,
        transparent: false,
    }
}

proptest! {
    // idx maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(w in dim(), h in dim(), l in dim()) {
        let grid = VoxelGrid::new(w, h, l);
        let expect = w * h * l;
        let mut seen = vec![false; expect];
        for y in 0..h { for z in 0..l { for x in 0..w {
            let i = grid.idx(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // in_bounds matches the declared dimensions and get_at agrees with it
    #[test]
    fn bounds_and_get_at_agree(w in dim(), h in dim(), l in dim()) {
        let mut grid = VoxelGrid::new(w, h, l);
        let proto = kind(4);
        for y in 0..h { for z in 0..l { for x in 0..w {
            grid.set(x, y, z, Cell::new(KindId(0), &proto));
        }}}
        let candidates = [
            (0, 0, 0),
            (w as i32 - 1, h as i32 - 1, l as i32 - 1),
            (-1, 0, 0),
            (w as i32, 0, 0),
            (0, -1, 0),
            (0, h as i32, 0),
            (0, 0, -1),
            (0, 0, l as i32),
        ];
        for (x, y, z) in candidates {
            let inside = x >= 0 && y >= 0 && z >= 0
                && (x as usize) < w && (y as usize) < h && (z as usize) < l;
            prop_assert_eq!(grid.in_bounds(x, y, z), inside);
            prop_assert_eq!(grid.get_at(x, y, z).is_some(), inside);
        }
    }
}

#[test]
fn damage_clamps_at_zero_and_reports_destruction_once() {
    let mut grid = VoxelGrid::new(2, 2, 2);
    let proto = kind(3);
    grid.set(1, 0, 1, Cell::new(KindId(0), &proto));

    assert!(!grid.apply_damage(1, 0, 1, 2));
    assert_eq!(grid.get(1, 0, 1).unwrap().health, 1);

    // The killing blow reports destruction; later hits are no-ops.
    assert!(grid.apply_damage(1, 0, 1, 5));
    assert_eq!(grid.get(1, 0, 1).unwrap().health, 0);
    assert!(!grid.apply_damage(1, 0, 1, 5));

    // Destroyed reads as non-solid but the slot is still placed.
    assert!(!grid.is_solid(1, 0, 1));
    assert!(grid.get(1, 0, 1).is_some());
}

#[test]
fn damage_outside_grid_or_empty_has_no_effect() {
    let mut grid = VoxelGrid::new(2, 2, 2);
    assert!(!grid.apply_damage(-1, 0, 0, 1));
    assert!(!grid.apply_damage(0, 5, 0, 1));
    assert!(!grid.apply_damage(0, 0, 0, 1)); // empty slot
}

#[test]
fn world_space_hit_floors_with_inward_bias() {
    let mut grid = VoxelGrid::new(4, 4, 4);
    let proto = kind(1);
    grid.set(1, 2, 3, Cell::new(KindId(0), &proto));

    // A point exactly on the +x face of the cell resolves into the cell.
    let p = quarry_geom::Vec3::new(2.0, 2.5, 3.5);
    assert!(grid.apply_damage_at_world(p, 1));
    assert!(grid.get(1, 2, 3).unwrap().is_destroyed());

    // Misses outside the grid are a definite no-effect.
    assert!(!grid.apply_damage_at_world(quarry_geom::Vec3::new(-3.0, 0.0, 0.0), 1));
}
