mod caves;
mod heightfield;
mod strata;
mod structures;

use quarry_blocks::{BlockRegistry, RegistryBuilder};
use quarry_chunk::VoxelGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ChunkConfig;
use crate::report::ChunkReport;

/// Everything one generation run produces. The frozen registry is part of
/// the result because mesh extraction buckets faces by its kind order.
pub struct ChunkGeneration {
    pub grid: VoxelGrid,
    pub max_height: usize,
    pub registry: BlockRegistry,
    pub report: ChunkReport,
}

/// Generates a chunk from the configured seed, or from fresh entropy when
/// `randomize_seed` is set. The seed actually used is recorded in the report.
pub fn generate(cfg: &ChunkConfig) -> ChunkGeneration {
    let seed = if cfg.randomize_seed {
        rand::rng().random()
    } else {
        cfg.seed
    };
    generate_seeded(cfg, seed)
}

/// Deterministic entrypoint: the same config and seed produce an identical
/// chunk, report included.
pub fn generate_seeded(cfg: &ChunkConfig, seed: u64) -> ChunkGeneration {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Fixed registration scan so kind ids (and submesh slots) are stable
    // across regenerations: layers, then template palettes, then layer ores.
    let mut registry = RegistryBuilder::new();
    for layer in &cfg.layers {
        registry.ensure(&layer.block);
    }
    for rule in &cfg.structures {
        for kind in &rule.template.palette {
            registry.ensure(kind);
        }
    }
    for layer in &cfg.layers {
        for ore in &layer.ores {
            registry.ensure(&ore.block);
        }
    }

    let noise = heightfield::perlin(seed as i32);
    let heights = heightfield::synthesize(&cfg.terrain, cfg.width, cfg.length, &noise, &mut rng);

    let mut grid = VoxelGrid::new(cfg.width, cfg.max_height, cfg.length);
    let ores = strata::stratify(&mut grid, &heights, &cfg.layers, &mut registry, &mut rng);
    if cfg.caves.enable {
        caves::carve(&mut grid, &cfg.caves, cfg.terrain.zero_height, &noise, &mut rng);
    }
    let placements = structures::place(
        &mut grid,
        &heights,
        &cfg.structures,
        &cfg.layers,
        &mut registry,
        &mut rng,
    );

    let registry = registry.freeze();
    let report = ChunkReport {
        seed,
        structures: placements,
        ores,
    };
    log::info!(
        target: "worldgen",
        "generated {}x{}x{} chunk: {} kinds, {} cells, {} structures",
        cfg.width,
        cfg.max_height,
        cfg.length,
        registry.len(),
        grid.occupied_count(),
        report.structures.len()
    );
    ChunkGeneration {
        grid,
        max_height: cfg.max_height,
        registry,
        report,
    }
}
