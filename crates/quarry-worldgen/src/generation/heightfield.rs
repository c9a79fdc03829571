use fastnoise_lite::{FastNoiseLite, NoiseType};
use quarry_chunk::HeightField;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::TerrainParams;

pub(super) fn perlin(seed: i32) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed);
    n.set_noise_type(Some(NoiseType::Perlin));
    // Sampling coordinates are pre-scaled by the caller; keep the generator
    // at unit frequency.
    n.set_frequency(Some(1.0));
    n
}

/// 2D sample remapped to `[0, 1]`.
#[inline]
pub(super) fn noise01(n: &FastNoiseLite, x: f32, y: f32) -> f32 {
    (n.get_noise_2d(x, y) + 1.0) * 0.5
}

/// Synthesizes the per-column surface elevation map from layered octave
/// noise. Consumes one 2D offset draw per octave from `rng` before any
/// sampling; has no other side effects.
pub(super) fn synthesize(
    params: &TerrainParams,
    width: usize,
    length: usize,
    noise: &FastNoiseLite,
    rng: &mut ChaCha8Rng,
) -> HeightField {
    let offsets: Vec<[f32; 2]> = (0..params.octaves)
        .map(|_| {
            [
                rng.random_range(-100_000..100_000) as f32 + params.offset[0],
                rng.random_range(-100_000..100_000) as f32 + params.offset[1],
            ]
        })
        .collect();

    let mut raw = vec![0.0f32; width * length];
    let mut min_n = f32::MAX;
    let mut max_n = f32::MIN;
    for x in 0..width {
        for z in 0..length {
            let mut n = 0.0;
            let mut amp = 1.0;
            let mut freq = 1.0;
            let mut sum = 0.0;
            for off in &offsets {
                let sx = (x as f32 + off[0]) / params.scale * freq;
                let sz = (z as f32 + off[1]) / params.scale * freq;
                n += (noise01(noise, sx, sz) * 2.0 - 1.0) * amp;
                sum += amp;
                amp *= params.persistence;
                freq *= params.lacunarity;
            }
            n /= sum;
            raw[z * width + x] = n;
            min_n = min_n.min(n);
            max_n = max_n.max(n);
        }
    }

    // A nearly flat raw field would blow up the remap below; widen the
    // observed range to at least 0.5, symmetric around its midpoint.
    if max_n - min_n < 0.5 {
        let mid = (max_n + min_n) * 0.5;
        min_n = mid - 0.25;
        max_n = mid + 0.25;
    }

    let floor = params.zero_height - params.max_down;
    let span = (params.max_terrain_height - floor) as f32;
    HeightField::from_fn(width, length, |x, z| {
        let t = inverse_lerp(min_n, max_n, raw[z * width + x]);
        (floor + (t * span).round() as i32).clamp(floor, params.max_terrain_height)
    })
}

#[inline]
fn inverse_lerp(lo: f32, hi: f32, v: f32) -> f32 {
    if hi - lo <= f32::EPSILON {
        0.0
    } else {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}
