//! Authored structure templates and their placement rules.
#![forbid(unsafe_code)]

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use quarry_blocks::{BlockCatalog, BlockKind};

/// A structure template as authored in the config file. `matrix` is a flat
/// `size.x * size.y * size.z` array in `x + sx * (y + sy * z)` order; `0`
/// means empty, `n` is a 1-based index into `palette`.
#[derive(Clone, Debug, Deserialize)]
pub struct TemplateDef {
    pub size: [i32; 3],
    pub anchor: [i32; 3],
    pub palette: Vec<String>,
    pub matrix: Vec<u16>,
    #[serde(default = "default_flatten_ground")]
    pub flatten_ground: bool,
}

fn default_flatten_ground() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template size {0:?} has a non-positive axis")]
    InvalidSize([i32; 3]),
    #[error("template anchor {anchor:?} lies outside size {size:?}")]
    AnchorOutOfRange { anchor: [i32; 3], size: [i32; 3] },
    #[error("template matrix holds {got} cells, size {size:?} requires {want}")]
    MatrixSize {
        got: usize,
        want: usize,
        size: [i32; 3],
    },
    #[error("template matrix value {value} exceeds palette of {palette_len} entries")]
    MatrixValue { value: u16, palette_len: usize },
    #[error("template palette references unknown block {0:?}")]
    UnknownBlock(String),
}

/// Immutable, validated voxel template. The anchor is the template-local
/// cell treated as the placement origin: X/Z anchor the footprint around a
/// trial center, Y aligns with the column's surface height.
#[derive(Clone, Debug)]
pub struct StructureTemplate {
    pub size: [i32; 3],
    pub anchor: [i32; 3],
    pub palette: Vec<Arc<BlockKind>>,
    matrix: Vec<u16>,
    pub flatten_ground: bool,
}

impl StructureTemplate {
    pub fn from_def(def: &TemplateDef, catalog: &BlockCatalog) -> Result<Self, TemplateError> {
        let [sx, sy, sz] = def.size;
        if sx <= 0 || sy <= 0 || sz <= 0 {
            return Err(TemplateError::InvalidSize(def.size));
        }
        let [ax, ay, az] = def.anchor;
        if ax < 0 || ay < 0 || az < 0 || ax >= sx || ay >= sy || az >= sz {
            return Err(TemplateError::AnchorOutOfRange {
                anchor: def.anchor,
                size: def.size,
            });
        }
        let want = (sx * sy * sz) as usize;
        if def.matrix.len() != want {
            return Err(TemplateError::MatrixSize {
                got: def.matrix.len(),
                want,
                size: def.size,
            });
        }
        if let Some(&value) = def.matrix.iter().find(|&&v| v as usize > def.palette.len()) {
            return Err(TemplateError::MatrixValue {
                value,
                palette_len: def.palette.len(),
            });
        }
        let palette = def
            .palette
            .iter()
            .map(|name| {
                catalog
                    .get(name)
                    .cloned()
                    .ok_or_else(|| TemplateError::UnknownBlock(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            size: def.size,
            anchor: def.anchor,
            palette,
            matrix: def.matrix.clone(),
            flatten_ground: def.flatten_ground,
        })
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        (x + self.size[0] * (y + self.size[1] * z)) as usize
    }

    /// Raw matrix value at a template-local cell (0 = empty).
    #[inline]
    pub fn value(&self, x: i32, y: i32, z: i32) -> u16 {
        self.matrix[self.index(x, y, z)]
    }

    /// Kind for a template-local cell, `None` when the cell is empty.
    #[inline]
    pub fn kind_at(&self, x: i32, y: i32, z: i32) -> Option<&Arc<BlockKind>> {
        match self.value(x, y, z) {
            0 => None,
            v => Some(&self.palette[v as usize - 1]),
        }
    }

    /// Whether the `(x, z)` template column holds any block at all; columns
    /// that do receive foundation backfill beneath a placed instance.
    pub fn column_has_blocks(&self, x: i32, z: i32) -> bool {
        (0..self.size[1]).any(|y| self.value(x, y, z) != 0)
    }
}

/// How many instances of a template to place and under what constraints.
#[derive(Clone, Debug)]
pub struct StructureRule {
    pub template: StructureTemplate,
    pub min_count: u32,
    pub max_count: u32,
    /// Independent per-trial acceptance probability in `[0, 1]`.
    pub spawn_chance: f32,
    /// Minimum 2D center-to-center distance between instances of this rule.
    pub min_distance: f32,
}
