use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use quarry_blocks::{BlockCatalog, BlockDef, BlockKind, CatalogError};
use quarry_structures::{StructureRule, StructureTemplate, TemplateDef, TemplateError};

/// Raw chunk configuration as deserialized from TOML, before name
/// resolution and validation.
#[derive(Clone, Debug, Deserialize)]
pub struct ChunkConfigFile {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_max_height")]
    pub max_height: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_randomize_seed")]
    pub randomize_seed: bool,
    #[serde(default)]
    pub terrain: TerrainParams,
    #[serde(default)]
    pub caves: CaveParams,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub layers: Vec<LayerCfg>,
    #[serde(default)]
    pub structures: Vec<StructureRuleCfg>,
}

fn default_width() -> usize {
    16
}
fn default_length() -> usize {
    16
}
fn default_max_height() -> usize {
    64
}
fn default_seed() -> u64 {
    12345
}
fn default_randomize_seed() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainParams {
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default)]
    pub offset: [f32; 2],
    #[serde(default = "default_max_terrain_height")]
    pub max_terrain_height: i32,
    #[serde(default = "default_zero_height")]
    pub zero_height: i32,
    #[serde(default = "default_max_down")]
    pub max_down: i32,
}

fn default_scale() -> f32 {
    16.0
}
fn default_octaves() -> u32 {
    4
}
fn default_persistence() -> f32 {
    0.5
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_max_terrain_height() -> i32 {
    32
}
fn default_zero_height() -> i32 {
    16
}
fn default_max_down() -> i32 {
    8
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            octaves: default_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            offset: [0.0, 0.0],
            max_terrain_height: default_max_terrain_height(),
            zero_height: default_zero_height(),
            max_down: default_max_down(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CaveParams {
    #[serde(default)]
    pub enable: bool,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_cave_octaves")]
    pub octaves: u32,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default = "default_cave_threshold")]
    pub threshold: f32,
    #[serde(default = "default_cave_min_depth")]
    pub min_depth: i32,
}

fn default_cave_octaves() -> u32 {
    3
}
fn default_cave_threshold() -> f32 {
    0.6
}
fn default_cave_min_depth() -> i32 {
    2
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            enable: false,
            scale: default_scale(),
            octaves: default_cave_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            offset: [0.0, 0.0, 0.0],
            threshold: default_cave_threshold(),
            min_depth: default_cave_min_depth(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LayerCfg {
    pub block: String,
    pub thickness: i32,
    #[serde(default)]
    pub ores: Vec<OreRuleCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OreRuleCfg {
    pub block: String,
    #[serde(default = "default_ore_chance")]
    pub chance: f32,
    #[serde(default = "default_ore_min_total")]
    pub min_total: u32,
    #[serde(default = "default_ore_max_total")]
    pub max_total: u32,
    #[serde(default = "default_ore_cluster_size")]
    pub cluster_size: u32,
    #[serde(default = "default_ore_noise_scale")]
    pub noise_scale: f32,
}

fn default_ore_chance() -> f32 {
    0.01
}
fn default_ore_min_total() -> u32 {
    1
}
fn default_ore_max_total() -> u32 {
    3
}
fn default_ore_cluster_size() -> u32 {
    4
}
fn default_ore_noise_scale() -> f32 {
    8.0
}

#[derive(Clone, Debug, Deserialize)]
pub struct StructureRuleCfg {
    pub min_count: u32,
    pub max_count: u32,
    pub spawn_chance: f32,
    pub min_distance: f32,
    pub template: TemplateDef,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("{0} must be non-zero")]
    ZeroDimension(&'static str),
    #[error("layer list is empty but max_height is {0}")]
    EmptyLayers(usize),
    #[error("layer {block:?} has non-positive thickness {thickness}")]
    BadThickness { block: String, thickness: i32 },
    #[error("{context} references unknown block {name:?}")]
    UnknownBlock { context: &'static str, name: String },
    #[error("{context} probability {value} is outside [0, 1]")]
    BadProbability { context: &'static str, value: f32 },
    #[error("{context} has min {min} greater than max {max}")]
    BadCountRange { context: &'static str, min: u32, max: u32 },
    #[error("{context} noise scale must be positive")]
    BadScale { context: &'static str },
    #[error("{context} octave count must be at least 1")]
    BadOctaves { context: &'static str },
    #[error("ore rule cluster size must be at least 1")]
    BadClusterSize,
    #[error("cave min_depth {0} is negative")]
    BadCaveDepth(i32),
    #[error(
        "elevation bounds invalid: floor {floor} (zero_height - max_down), \
         ceiling {ceiling} (max_terrain_height), grid height {height}"
    )]
    ElevationBounds {
        floor: i32,
        ceiling: i32,
        height: usize,
    },
    #[error("structure rule min_distance {0} is negative")]
    BadMinDistance(f32),
}

/// A stratification layer after name resolution.
#[derive(Clone, Debug)]
pub struct Layer {
    pub block: Arc<BlockKind>,
    pub thickness: i32,
    pub ores: Vec<OreRule>,
}

/// Per-layer ore spawning rule after name resolution. Totals are counted
/// per ore kind across the whole chunk.
#[derive(Clone, Debug)]
pub struct OreRule {
    pub block: Arc<BlockKind>,
    pub chance: f32,
    pub min_total: u32,
    pub max_total: u32,
    pub cluster_size: u32,
    /// Authored but not consumed by the placement logic; preserved for
    /// configuration compatibility.
    pub noise_scale: f32,
}

/// Fully validated chunk configuration: every block name resolved against
/// the catalog, every template checked, all numeric ranges sane.
#[derive(Clone, Debug)]
pub struct ChunkConfig {
    pub width: usize,
    pub length: usize,
    pub max_height: usize,
    pub seed: u64,
    pub randomize_seed: bool,
    pub terrain: TerrainParams,
    pub caves: CaveParams,
    pub catalog: BlockCatalog,
    pub layers: Vec<Layer>,
    pub structures: Vec<StructureRule>,
}

impl ChunkConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ChunkConfigFile = toml::from_str(s)?;
        Self::from_file(file)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_file(file: ChunkConfigFile) -> Result<Self, ConfigError> {
        if file.width == 0 {
            return Err(ConfigError::ZeroDimension("width"));
        }
        if file.length == 0 {
            return Err(ConfigError::ZeroDimension("length"));
        }
        if file.max_height == 0 {
            return Err(ConfigError::ZeroDimension("max_height"));
        }
        if file.layers.is_empty() {
            return Err(ConfigError::EmptyLayers(file.max_height));
        }
        validate_terrain(&file.terrain, file.max_height)?;
        validate_caves(&file.caves)?;

        let catalog = BlockCatalog::from_defs(&file.blocks)?;

        let mut layers = Vec::with_capacity(file.layers.len());
        for layer in &file.layers {
            if layer.thickness <= 0 {
                return Err(ConfigError::BadThickness {
                    block: layer.block.clone(),
                    thickness: layer.thickness,
                });
            }
            let block = resolve(&catalog, "layer", &layer.block)?;
            let mut ores = Vec::with_capacity(layer.ores.len());
            for ore in &layer.ores {
                if !(0.0..=1.0).contains(&ore.chance) {
                    return Err(ConfigError::BadProbability {
                        context: "ore rule",
                        value: ore.chance,
                    });
                }
                if ore.min_total > ore.max_total {
                    return Err(ConfigError::BadCountRange {
                        context: "ore rule",
                        min: ore.min_total,
                        max: ore.max_total,
                    });
                }
                if ore.cluster_size == 0 {
                    return Err(ConfigError::BadClusterSize);
                }
                ores.push(OreRule {
                    block: resolve(&catalog, "ore rule", &ore.block)?,
                    chance: ore.chance,
                    min_total: ore.min_total,
                    max_total: ore.max_total,
                    cluster_size: ore.cluster_size,
                    noise_scale: ore.noise_scale,
                });
            }
            layers.push(Layer {
                block,
                thickness: layer.thickness,
                ores,
            });
        }

        let mut structures = Vec::with_capacity(file.structures.len());
        for rule in &file.structures {
            if rule.min_count > rule.max_count {
                return Err(ConfigError::BadCountRange {
                    context: "structure rule",
                    min: rule.min_count,
                    max: rule.max_count,
                });
            }
            if !(0.0..=1.0).contains(&rule.spawn_chance) {
                return Err(ConfigError::BadProbability {
                    context: "structure rule",
                    value: rule.spawn_chance,
                });
            }
            if rule.min_distance < 0.0 {
                return Err(ConfigError::BadMinDistance(rule.min_distance));
            }
            structures.push(StructureRule {
                template: StructureTemplate::from_def(&rule.template, &catalog)?,
                min_count: rule.min_count,
                max_count: rule.max_count,
                spawn_chance: rule.spawn_chance,
                min_distance: rule.min_distance,
            });
        }

        Ok(ChunkConfig {
            width: file.width,
            length: file.length,
            max_height: file.max_height,
            seed: file.seed,
            randomize_seed: file.randomize_seed,
            terrain: file.terrain,
            caves: file.caves,
            catalog,
            layers,
            structures,
        })
    }
}

fn resolve(
    catalog: &BlockCatalog,
    context: &'static str,
    name: &str,
) -> Result<Arc<BlockKind>, ConfigError> {
    catalog
        .get(name)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownBlock {
            context,
            name: name.to_string(),
        })
}

fn validate_terrain(terrain: &TerrainParams, max_height: usize) -> Result<(), ConfigError> {
    if terrain.octaves == 0 {
        return Err(ConfigError::BadOctaves { context: "terrain" });
    }
    if terrain.scale <= 0.0 {
        return Err(ConfigError::BadScale { context: "terrain" });
    }
    let floor = terrain.zero_height - terrain.max_down;
    let ceiling = terrain.max_terrain_height;
    if floor < 0 || ceiling < floor || ceiling > max_height as i32 {
        return Err(ConfigError::ElevationBounds {
            floor,
            ceiling,
            height: max_height,
        });
    }
    Ok(())
}

fn validate_caves(caves: &CaveParams) -> Result<(), ConfigError> {
    if caves.octaves == 0 {
        return Err(ConfigError::BadOctaves { context: "caves" });
    }
    if caves.scale <= 0.0 {
        return Err(ConfigError::BadScale { context: "caves" });
    }
    if caves.min_depth < 0 {
        return Err(ConfigError::BadCaveDepth(caves.min_depth));
    }
    Ok(())
}
