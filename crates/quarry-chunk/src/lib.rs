//! Dense voxel grid, per-cell state, and damage application.
//!
//! Indexing convention, used everywhere in this workspace: `x` runs along
//! the grid width, `y` is vertical (height), `z` runs along the length, and
//! cells flatten as `(y * length + z) * width + x`. Callers never re-derive
//! this arithmetic; they go through [`VoxelGrid::idx`] or the accessors.
#![forbid(unsafe_code)]

use quarry_blocks::{BlockKind, KindId};
use quarry_geom::Vec3;

/// Mutable per-position state of one placed block.
///
/// A cell with `health <= 0` is destroyed: invisible to meshing and inert to
/// further hits, but still distinct from a never-placed (`None`) slot during
/// generation bookkeeping. Both read as "empty" to neighbor queries.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub kind: KindId,
    pub health: i32,
    pub transparent: bool,
}

impl Cell {
    /// A freshly placed cell at full health, transparency taken from the kind.
    pub fn new(kind: KindId, proto: &BlockKind) -> Self {
        Self {
            kind,
            health: proto.strength,
            transparent: proto.transparent,
        }
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

/// Per-column surface elevations, one entry per `(x, z)`; immutable once the
/// height synthesis pass has produced it.
#[derive(Clone, Debug)]
pub struct HeightField {
    pub width: usize,
    pub length: usize,
    data: Vec<i32>,
}

impl HeightField {
    pub fn new(width: usize, length: usize) -> Self {
        Self {
            width,
            length,
            data: vec![0; width * length],
        }
    }

    pub fn from_fn(width: usize, length: usize, mut f: impl FnMut(usize, usize) -> i32) -> Self {
        let mut hf = Self::new(width, length);
        for z in 0..length {
            for x in 0..width {
                hf.data[z * width + x] = f(x, z);
            }
        }
        hf
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> i32 {
        self.data[z * self.width + x]
    }
}

/// Dense `width * length * height` grid of optional cells, exclusively owned
/// by one chunk. Generation passes take it `&mut`; meshing reads it shared.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    pub width: usize,
    pub height: usize,
    pub length: usize,
    cells: Vec<Option<Cell>>,
}

impl VoxelGrid {
    pub fn new(width: usize, height: usize, length: usize) -> Self {
        Self {
            width,
            height,
            length,
            cells: vec![None; width * length * height],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.length + z) * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&Cell> {
        self.cells[self.idx(x, y, z)].as_ref()
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, cell: Cell) {
        let i = self.idx(x, y, z);
        self.cells[i] = Some(cell);
    }

    #[inline]
    pub fn clear(&mut self, x: usize, y: usize, z: usize) {
        let i = self.idx(x, y, z);
        self.cells[i] = None;
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.length
    }

    /// Bounds-guarded read; `None` outside the grid or at an empty slot.
    #[inline]
    pub fn get_at(&self, x: i32, y: i32, z: i32) -> Option<&Cell> {
        if !self.in_bounds(x, y, z) {
            return None;
        }
        self.get(x as usize, y as usize, z as usize)
    }

    /// True when a live (placed, not destroyed) cell sits at the position.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        matches!(self.get_at(x, y, z), Some(c) if !c.is_destroyed())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Applies a damage hit to the cell at the position, clamping health at
    /// zero. Returns `true` iff the cell became destroyed by this hit.
    /// Out-of-bounds, empty, and already-destroyed targets are no-ops.
    pub fn apply_damage(&mut self, x: i32, y: i32, z: i32, amount: i32) -> bool {
        if !self.in_bounds(x, y, z) {
            return false;
        }
        let i = self.idx(x as usize, y as usize, z as usize);
        match &mut self.cells[i] {
            Some(cell) if !cell.is_destroyed() => {
                cell.health = (cell.health - amount).max(0);
                cell.is_destroyed()
            }
            _ => false,
        }
    }

    /// Damage entrypoint for continuous world-space positions (e.g. a
    /// raycast hit point): biases the point slightly inward so face-exact
    /// hits land in the cell in front of the surface, then floors to grid
    /// coordinates.
    pub fn apply_damage_at_world(&mut self, p: Vec3, amount: i32) -> bool {
        let x = (p.x - 0.01).floor() as i32;
        let y = (p.y - 0.01).floor() as i32;
        let z = (p.z - 0.01).floor() as i32;
        self.apply_damage(x, y, z, amount)
    }
}
