use fastnoise_lite::FastNoiseLite;
use quarry_chunk::VoxelGrid;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::CaveParams;

use super::heightfield::noise01;

/// Carves caves by thresholding pseudo-3D octave noise: three pairwise 2D
/// samples (xy, yz, zx planes) averaged per octave approximate an isotropic
/// 3D field. Cells between `min_depth` and the `zero_height` ceiling whose
/// density exceeds the threshold are cleared in place.
pub(super) fn carve(
    grid: &mut VoxelGrid,
    params: &CaveParams,
    zero_height: i32,
    noise: &FastNoiseLite,
    rng: &mut ChaCha8Rng,
) {
    let offsets: Vec<[f32; 3]> = (0..params.octaves)
        .map(|_| {
            [
                rng.random_range(-100_000..100_000) as f32 + params.offset[0],
                rng.random_range(-100_000..100_000) as f32 + params.offset[1],
                rng.random_range(-100_000..100_000) as f32 + params.offset[2],
            ]
        })
        .collect();

    let ceiling = (grid.height as i32).min(zero_height);
    let mut carved = 0usize;
    for x in 0..grid.width {
        for z in 0..grid.length {
            for y in params.min_depth..ceiling {
                let mut n = 0.0;
                let mut amp = 1.0;
                let mut freq = 1.0;
                let mut sum = 0.0;
                for off in &offsets {
                    let nx = (x as f32 + off[0]) / params.scale * freq;
                    let ny = (y as f32 + off[1]) / params.scale * freq;
                    let nz = (z as f32 + off[2]) / params.scale * freq;
                    n += (noise01(noise, nx, ny) + noise01(noise, ny, nz) + noise01(noise, nz, nx))
                        / 3.0
                        * amp;
                    sum += amp;
                    amp *= params.persistence;
                    freq *= params.lacunarity;
                }
                n /= sum;
                if n > params.threshold && grid.get(x, y as usize, z).is_some() {
                    grid.clear(x, y as usize, z);
                    carved += 1;
                }
            }
        }
    }
    log::debug!(target: "worldgen", "cave pass cleared {} cells", carved);
}
