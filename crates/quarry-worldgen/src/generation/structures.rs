use quarry_blocks::RegistryBuilder;
use quarry_chunk::{Cell, HeightField, VoxelGrid};
use quarry_structures::{StructureRule, StructureTemplate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::Layer;
use crate::report::PlacedStructure;

/// Stamps template instances onto the terrain. Trial centers are drawn
/// without replacement from the full set of columns; a trial is rejected by
/// a failed spawn-chance draw, proximity to an earlier instance of the same
/// rule, a footprint or vertical window leaving the grid, or any collision
/// with an occupied cell. Acceptance stamps the template and backfills the
/// ground beneath it down to bedrock.
pub(super) fn place(
    grid: &mut VoxelGrid,
    heights: &HeightField,
    rules: &[StructureRule],
    layers: &[Layer],
    registry: &mut RegistryBuilder,
    rng: &mut ChaCha8Rng,
) -> Vec<PlacedStructure> {
    let mut placements = Vec::new();
    for rule in rules {
        let to_place = rng.random_range(rule.min_count..=rule.max_count);
        let template = &rule.template;
        let [sx, sy, sz] = template.size;
        let [ax, ay, az] = template.anchor;

        let mut candidates: Vec<(usize, usize)> = (0..grid.width)
            .flat_map(|cx| (0..grid.length).map(move |cz| (cx, cz)))
            .collect();
        let mut centers: Vec<(usize, usize)> = Vec::new();

        while (centers.len() as u32) < to_place && !candidates.is_empty() {
            let pick = rng.random_range(0..candidates.len());
            let (cx, cz) = candidates.swap_remove(pick);

            if rng.random::<f32>() > rule.spawn_chance {
                continue;
            }
            let too_close = centers.iter().any(|&(px, pz)| {
                let dx = px as f32 - cx as f32;
                let dz = pz as f32 - cz as f32;
                (dx * dx + dz * dz).sqrt() < rule.min_distance
            });
            if too_close {
                continue;
            }

            let ox = cx as i32 - ax;
            let oz = cz as i32 - az;
            if ox < 0 || oz < 0 || ox + sx > grid.width as i32 || oz + sz > grid.length as i32 {
                continue;
            }
            let by = heights.get(cx, cz) - ay;
            if by < 0 || by + sy > grid.height as i32 {
                continue;
            }
            if collides(grid, template, ox, by, oz) {
                continue;
            }

            stamp(grid, template, ox, by, oz, registry);
            fill_foundation(grid, template, ox, by, oz, layers, registry);
            placements.push(PlacedStructure { x: cx, y: by, z: cz });
            centers.push((cx, cz));
        }
        if (centers.len() as u32) < rule.min_count {
            log::debug!(
                target: "worldgen",
                "structure rule placed {} of requested {}..{}",
                centers.len(),
                rule.min_count,
                rule.max_count
            );
        }
    }
    placements
}

/// True when any non-empty template cell overlaps an already-occupied grid
/// cell. The check is authoritative: stamping never overwrites.
fn collides(grid: &VoxelGrid, template: &StructureTemplate, ox: i32, by: i32, oz: i32) -> bool {
    let [sx, sy, sz] = template.size;
    for x in 0..sx {
        for y in 0..sy {
            for z in 0..sz {
                if template.value(x, y, z) != 0
                    && grid
                        .get((ox + x) as usize, (by + y) as usize, (oz + z) as usize)
                        .is_some()
                {
                    return true;
                }
            }
        }
    }
    false
}

fn stamp(
    grid: &mut VoxelGrid,
    template: &StructureTemplate,
    ox: i32,
    by: i32,
    oz: i32,
    registry: &mut RegistryBuilder,
) {
    let [sx, sy, sz] = template.size;
    for x in 0..sx {
        for y in 0..sy {
            for z in 0..sz {
                let Some(kind) = template.kind_at(x, y, z) else {
                    continue;
                };
                let id = registry.ensure(kind);
                grid.set(
                    (ox + x) as usize,
                    (by + y) as usize,
                    (oz + z) as usize,
                    Cell::new(id, kind),
                );
            }
        }
    }
}

/// Fills the gap beneath a stamped structure down to bedrock, for every
/// footprint column the template actually occupies. Empty cells take the
/// ordinary layer stack, the last layer's material past its end.
fn fill_foundation(
    grid: &mut VoxelGrid,
    template: &StructureTemplate,
    ox: i32,
    by: i32,
    oz: i32,
    layers: &[Layer],
    registry: &mut RegistryBuilder,
) {
    let [sx, _, sz] = template.size;
    for x in 0..sx {
        for z in 0..sz {
            if !template.column_has_blocks(x, z) {
                continue;
            }
            fill_column(
                grid,
                layers,
                registry,
                (ox + x) as usize,
                (oz + z) as usize,
                by - 1,
            );
        }
    }
}

fn fill_column(
    grid: &mut VoxelGrid,
    layers: &[Layer],
    registry: &mut RegistryBuilder,
    wx: usize,
    wz: usize,
    start_y: i32,
) {
    let mut fy = start_y;
    for layer in layers {
        if fy < 0 {
            return;
        }
        let id = registry.ensure(&layer.block);
        let mut placed = 0;
        while placed < layer.thickness && fy >= 0 {
            if grid.get(wx, fy as usize, wz).is_none() {
                grid.set(wx, fy as usize, wz, Cell::new(id, &layer.block));
            }
            fy -= 1;
            placed += 1;
        }
    }
    if let Some(last) = layers.last() {
        let id = registry.ensure(&last.block);
        while fy >= 0 {
            if grid.get(wx, fy as usize, wz).is_none() {
                grid.set(wx, fy as usize, wz, Cell::new(id, &last.block));
            }
            fy -= 1;
        }
    }
}
