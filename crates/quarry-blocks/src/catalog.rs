use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::types::BlockKind;

/// One authored block entry as it appears in the config file.
#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub strength: i32,
    #[serde(default)]
    pub transparent: bool,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate block name {0:?}")]
    DuplicateName(String),
    #[error("block {name:?} has non-positive strength {strength}")]
    InvalidStrength { name: String, strength: i32 },
}

/// The set of authored block kinds, looked up by name when resolving
/// layers, ore rules, and structure palettes.
#[derive(Default, Clone, Debug)]
pub struct BlockCatalog {
    kinds: Vec<Arc<BlockKind>>,
    by_name: HashMap<String, usize>,
}

impl BlockCatalog {
    pub fn from_defs(defs: &[BlockDef]) -> Result<Self, CatalogError> {
        let mut catalog = BlockCatalog::default();
        for def in defs {
            if catalog.by_name.contains_key(&def.name) {
                return Err(CatalogError::DuplicateName(def.name.clone()));
            }
            if def.strength <= 0 {
                return Err(CatalogError::InvalidStrength {
                    name: def.name.clone(),
                    strength: def.strength,
                });
            }
            catalog.by_name.insert(def.name.clone(), catalog.kinds.len());
            catalog.kinds.push(Arc::new(BlockKind {
                name: def.name.clone(),
                strength: def.strength,
                transparent: def.transparent,
            }));
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<BlockKind>> {
        self.by_name.get(name).map(|&i| &self.kinds[i])
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
