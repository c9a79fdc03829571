use quarry_blocks::{KindId, RegistryBuilder};
use quarry_chunk::{Cell, HeightField, VoxelGrid};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::{Layer, OreRule};
use crate::report::OreLedger;

/// Walks every column top-down, assigning layer materials by configured
/// thickness and seeding ore clusters in the same pass, then backfills any
/// ore rule still under its minimum quota.
pub(super) fn stratify(
    grid: &mut VoxelGrid,
    heights: &HeightField,
    layers: &[Layer],
    registry: &mut RegistryBuilder,
    rng: &mut ChaCha8Rng,
) -> OreLedger {
    let mut ledger = OreLedger::new();
    for layer in layers {
        for ore in &layer.ores {
            ledger.declare(&ore.block);
        }
    }
    let depth_offsets = depth_offsets(layers);

    for x in 0..grid.width {
        for z in 0..grid.length {
            let mut y = heights.get(x, z) - 1;
            for (li, layer) in layers.iter().enumerate() {
                if y < 0 {
                    break;
                }
                let layer_id = registry.ensure(&layer.block);
                let count = layer.thickness.min(y + 1);
                for _ in 0..count {
                    grid.set(x, y as usize, z, Cell::new(layer_id, &layer.block));
                    for ore in &layer.ores {
                        try_seed_cluster(
                            grid,
                            heights,
                            layer,
                            layer_id,
                            depth_offsets[li],
                            ore,
                            x,
                            y,
                            z,
                            registry,
                            rng,
                            &mut ledger,
                        );
                    }
                    y -= 1;
                }
            }
        }
    }

    backfill_quotas(grid, heights, layers, &depth_offsets, registry, rng, &mut ledger);
    ledger
}

/// Cumulative thickness of the layers above each layer; offsets a layer's
/// depth span below a column's surface.
fn depth_offsets(layers: &[Layer]) -> Vec<i32> {
    let mut offsets = Vec::with_capacity(layers.len());
    let mut acc = 0;
    for layer in layers {
        offsets.push(acc);
        acc += layer.thickness;
    }
    offsets
}

/// The `[bottom, top]` y-span a layer occupies in the given column, or
/// `None` when the column's surface is too low to reach the layer at all.
fn layer_span(
    heights: &HeightField,
    thickness: i32,
    depth_offset: i32,
    x: usize,
    z: usize,
) -> Option<(i32, i32)> {
    let top = heights.get(x, z) - 1 - depth_offset;
    if top < 0 {
        return None;
    }
    Some(((top - thickness + 1).max(0), top))
}

#[allow(clippy::too_many_arguments)]
fn try_seed_cluster(
    grid: &mut VoxelGrid,
    heights: &HeightField,
    layer: &Layer,
    layer_id: KindId,
    depth_offset: i32,
    ore: &OreRule,
    x: usize,
    y: i32,
    z: usize,
    registry: &mut RegistryBuilder,
    rng: &mut ChaCha8Rng,
    ledger: &mut OreLedger,
) {
    if ledger.count(&ore.block.name) as u32 >= ore.max_total {
        return;
    }
    if rng.random::<f32>() >= ore.chance {
        return;
    }
    for _ in 0..ore.cluster_size {
        if ledger.count(&ore.block.name) as u32 >= ore.max_total {
            break;
        }
        let dx = (x as i32 + rng.random_range(-1..=1)).clamp(0, grid.width as i32 - 1) as usize;
        let dz = (z as i32 + rng.random_range(-1..=1)).clamp(0, grid.length as i32 - 1) as usize;
        let Some((bottom, top)) = layer_span(heights, layer.thickness, depth_offset, dx, dz) else {
            continue;
        };
        let dy = (y + rng.random_range(-1..=1)).clamp(bottom, top) as usize;
        // Only cells still holding this layer's own material may be
        // replaced; anything else would overwrite across strata.
        let replaceable = matches!(grid.get(dx, dy, dz), Some(c) if c.kind == layer_id);
        if !replaceable {
            continue;
        }
        let ore_id = registry.ensure(&ore.block);
        grid.set(dx, dy, dz, Cell::new(ore_id, &ore.block));
        ledger.record(&ore.block, dx, dy, dz);
    }
}

/// Rejection-samples placements for every ore rule still under its minimum,
/// up to 100 attempts per missing instance. Shortfall after that is
/// tolerated; the chunk stays valid.
fn backfill_quotas(
    grid: &mut VoxelGrid,
    heights: &HeightField,
    layers: &[Layer],
    depth_offsets: &[i32],
    registry: &mut RegistryBuilder,
    rng: &mut ChaCha8Rng,
    ledger: &mut OreLedger,
) {
    for (li, layer) in layers.iter().enumerate() {
        let layer_id = registry.ensure(&layer.block);
        for ore in &layer.ores {
            let have = ledger.count(&ore.block.name) as u32;
            let need = ore.min_total.saturating_sub(have);
            for _ in 0..need {
                for _attempt in 0..100 {
                    let cx = rng.random_range(0..grid.width);
                    let cz = rng.random_range(0..grid.length);
                    let Some((bottom, top)) =
                        layer_span(heights, layer.thickness, depth_offsets[li], cx, cz)
                    else {
                        continue;
                    };
                    let cy = rng.random_range(bottom..=top) as usize;
                    let hit = matches!(grid.get(cx, cy, cz), Some(c) if c.kind == layer_id);
                    if hit {
                        let ore_id = registry.ensure(&ore.block);
                        grid.set(cx, cy, cz, Cell::new(ore_id, &ore.block));
                        ledger.record(&ore.block, cx, cy, cz);
                        break;
                    }
                }
            }
            if (ledger.count(&ore.block.name) as u32) < ore.min_total {
                log::debug!(
                    target: "worldgen",
                    "ore quota underfilled for {}: {} of {}",
                    ore.block.name,
                    ledger.count(&ore.block.name),
                    ore.min_total
                );
            }
        }
    }
}
