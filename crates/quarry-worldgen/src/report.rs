use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use quarry_blocks::BlockKind;

/// Grid position a structure instance was stamped at: `(x, z)` is the trial
/// center column, `y` the base the template's anchor row landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedStructure {
    pub x: usize,
    pub y: i32,
    pub z: usize,
}

/// One ore kind's placements across the chunk.
#[derive(Clone, Debug)]
pub struct OreEntry {
    pub kind: Arc<BlockKind>,
    pub coords: Vec<(usize, usize, usize)>,
}

/// Per-kind ledger of placed ore cells, in first-declaration order so the
/// report is stable across runs of the same configuration.
#[derive(Clone, Debug, Default)]
pub struct OreLedger {
    entries: Vec<OreEntry>,
    by_name: HashMap<String, usize>,
}

impl OreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a kind with a zero count if unseen; returns its slot.
    pub(crate) fn declare(&mut self, kind: &Arc<BlockKind>) -> usize {
        if let Some(&i) = self.by_name.get(&kind.name) {
            return i;
        }
        let i = self.entries.len();
        self.by_name.insert(kind.name.clone(), i);
        self.entries.push(OreEntry {
            kind: Arc::clone(kind),
            coords: Vec::new(),
        });
        i
    }

    pub(crate) fn record(&mut self, kind: &Arc<BlockKind>, x: usize, y: usize, z: usize) {
        let i = self.declare(kind);
        self.entries[i].coords.push((x, y, z));
    }

    /// Placed count for an ore kind; totals are shared by every rule that
    /// targets the same kind.
    pub fn count(&self, name: &str) -> usize {
        self.by_name
            .get(name)
            .map(|&i| self.entries[i].coords.len())
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[OreEntry] {
        &self.entries
    }
}

/// Informational summary of one generation run; not consumed by the core.
#[derive(Clone, Debug)]
pub struct ChunkReport {
    pub seed: u64,
    pub structures: Vec<PlacedStructure>,
    pub ores: OreLedger,
}

impl ChunkReport {
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Chunk report (seed {})", self.seed);
        let _ = writeln!(out, "Structures: {}", self.structures.len());
        for s in &self.structures {
            let _ = writeln!(out, "- ({}, {}, {})", s.x, s.y, s.z);
        }
        let _ = writeln!(out, "Ore veins:");
        for entry in self.ores.entries() {
            let _ = writeln!(out, "  {}: {} blocks", entry.kind.name, entry.coords.len());
            for (x, y, z) in &entry.coords {
                let _ = writeln!(out, "    ({x}, {y}, {z})");
            }
        }
        out
    }
}
