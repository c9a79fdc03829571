/// Immutable identity of a block material: never mutated after the catalog
/// is built, shared by `Arc` across cells, layers, ores, and templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockKind {
    pub name: String,
    /// Maximum health of a cell of this kind.
    pub strength: i32,
    pub transparent: bool,
}

/// Index into the global block registry. Doubles as the submesh/material
/// slot a cell's faces are bucketed into during mesh extraction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct KindId(pub u16);

impl KindId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
