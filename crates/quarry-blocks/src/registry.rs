use std::collections::HashMap;
use std::sync::Arc;

use super::types::{BlockKind, KindId};

/// Growable kind-to-index mapping used while a chunk is being generated.
///
/// Index assignment is first-come: given an identical configuration scan
/// order, the same kinds always land on the same ids, which keeps submesh
/// order stable across regenerations. Frozen into a [`BlockRegistry`] once
/// structure placement completes, before any mesh extraction.
#[derive(Default, Debug)]
pub struct RegistryBuilder {
    kinds: Vec<Arc<BlockKind>>,
    by_name: HashMap<String, KindId>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `kind`, registering it if unseen.
    pub fn ensure(&mut self, kind: &Arc<BlockKind>) -> KindId {
        if let Some(&id) = self.by_name.get(&kind.name) {
            return id;
        }
        let id = KindId(self.kinds.len() as u16);
        self.by_name.insert(kind.name.clone(), id);
        self.kinds.push(Arc::clone(kind));
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn freeze(self) -> BlockRegistry {
        BlockRegistry {
            kinds: self.kinds,
            by_name: self.by_name,
        }
    }
}

/// Immutable registry handed to mesh extraction and the renderer: one
/// entry per distinct kind, in registration order (one submesh each).
#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    kinds: Vec<Arc<BlockKind>>,
    by_name: HashMap<String, KindId>,
}

impl BlockRegistry {
    #[inline]
    pub fn get(&self, id: KindId) -> Option<&BlockKind> {
        self.kinds.get(id.index()).map(|k| k.as_ref())
    }

    pub fn id_by_name(&self, name: &str) -> Option<KindId> {
        self.by_name.get(name).copied()
    }

    /// Kinds in registration order; the renderer binds one material per slot.
    pub fn kinds(&self) -> impl Iterator<Item = &BlockKind> {
        self.kinds.iter().map(|k| k.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str) -> Arc<BlockKind> {
        Arc::new(BlockKind {
            name: name.into(),
            strength: 5,
            transparent: false,
        })
    }

    #[test]
    fn ensure_assigns_contiguous_ids_in_first_seen_order() {
        let mut b = RegistryBuilder::new();
        assert_eq!(b.ensure(&kind("grass")), KindId(0));
        assert_eq!(b.ensure(&kind("stone")), KindId(1));
        assert_eq!(b.ensure(&kind("grass")), KindId(0));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn freeze_preserves_order_and_lookup() {
        let mut b = RegistryBuilder::new();
        b.ensure(&kind("grass"));
        b.ensure(&kind("iron_ore"));
        let reg = b.freeze();
        assert_eq!(reg.id_by_name("iron_ore"), Some(KindId(1)));
        let names: Vec<&str> = reg.kinds().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["grass", "iron_ore"]);
        assert_eq!(reg.get(KindId(0)).unwrap().name, "grass");
        assert!(reg.get(KindId(7)).is_none());
    }
}
