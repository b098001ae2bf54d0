//! # Dusk Scene Background
//!
//! Paints the full card background at base resolution in eight ordered
//! passes. Each pass overwrites what came before; none reads pixels that a
//! later pass writes.
//!
//! ```text
//! 1. horizon     fixed fraction of the height
//! 2. sky         keyframe gradient per row + faint dither toward a lighter tone
//! 3. clouds      seeded horizontal streaks, dithered toward a light blend
//! 4. sun         solid core → blended ring → dithered halo fading with distance
//! 5. mountains   far ridge, then near ridge, 8x8 checker shading down to the horizon
//! 6. lake        warm → navy gradient with a darker ripple band every few rows
//! 7. reflection  band under the sun, narrowing and fading with depth
//! 8. foreground  low two-sine silhouette forced to navy
//! ```
//!
//! Output is fully determined by `(config, params, seed)`. The seed feeds a
//! generator scoped to this call, so cards render identically in any order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use super::canvas::Canvas;
use super::color::{darken, gradient, lighten, mix};
use super::dither::pick;
use super::ridge::{RidgeParams, ridge};
use crate::config::{Palette, RenderConfig};

/// Shape of one mountain layer, relative to the canvas height.
#[derive(Debug, Clone, Copy)]
pub struct RidgeShape {
    /// Amplitude as a fraction of the canvas height.
    pub amplitude: f32,
    pub freq1: f32,
    pub freq2: f32,
}

/// Scene tuning. Radii and amplitudes are fractions of the canvas height.
#[derive(Debug, Clone)]
pub struct Params {
    /// Sun center X as fraction of width. Default: 0.72
    pub sun_x: f32,
    /// Sun center Y as fraction of the horizon row. Default: 0.5
    pub sun_y: f32,
    pub sun_core: f32,
    pub sun_ring: f32,
    pub sun_halo: f32,
    /// Halo dither amount at the ring edge, fading to zero at the halo edge.
    pub halo_strength: f32,
    /// Fraction of sky pixels lifted toward the lighter tone.
    pub sky_texture: f32,
    pub sky_lighten: f32,
    pub cloud_amount: f32,
    pub cloud_mix: f32,
    pub far: RidgeShape,
    pub near: RidgeShape,
    /// Checker block size for mountain shading.
    pub checker: usize,
    pub mountain_shade: f32,
    /// Blend from the lowest sky keyframe toward navy for the top of the lake.
    pub lake_warm_mix: f32,
    pub ripple_every: usize,
    pub ripple_darken: f32,
    pub reflection_amount: f32,
    /// How much the reflection narrows by the bottom row (0 = not at all).
    pub reflection_shrink: f32,
    pub foreground_amplitude: f32,
    pub foreground_freq1: f32,
    pub foreground_freq2: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            sun_x: 0.72,
            sun_y: 0.5,
            sun_core: 0.09,
            sun_ring: 0.13,
            sun_halo: 0.28,
            halo_strength: 0.55,
            sky_texture: 0.12,
            sky_lighten: 0.06,
            cloud_amount: 0.45,
            cloud_mix: 0.6,
            far: RidgeShape {
                amplitude: 0.30,
                freq1: 0.045,
                freq2: 0.11,
            },
            near: RidgeShape {
                amplitude: 0.42,
                freq1: 0.07,
                freq2: 0.16,
            },
            checker: 8,
            mountain_shade: 0.12,
            lake_warm_mix: 0.35,
            ripple_every: 3,
            ripple_darken: 0.10,
            reflection_amount: 0.6,
            reflection_shrink: 0.7,
            foreground_amplitude: 0.09,
            foreground_freq1: 0.09,
            foreground_freq2: 0.21,
        }
    }
}

/// Geometry shared by the passes, derived once per render.
#[derive(Debug, Clone)]
struct Scene {
    width: usize,
    height: usize,
    horizon: usize,
    sun_cx: f32,
    sun_cy: f32,
    core_r: f32,
    ring_r: f32,
    halo_r: f32,
    far_phase: f32,
    near_phase: f32,
    foreground_phase: f32,
}

impl Scene {
    fn new(config: &RenderConfig, params: &Params, rng: &mut StdRng) -> Self {
        let width = config.base_width as usize;
        let height = config.base_height as usize;
        let horizon = config.horizon_row().min(height);
        let hf = height as f32;
        Self {
            width,
            height,
            horizon,
            sun_cx: (width as f32 * params.sun_x).round(),
            sun_cy: (horizon as f32 * params.sun_y).round(),
            core_r: hf * params.sun_core,
            ring_r: hf * params.sun_ring,
            halo_r: hf * params.sun_halo,
            far_phase: rng.random_range(0.0..TAU),
            near_phase: rng.random_range(0.0..TAU),
            foreground_phase: rng.random_range(0.0..TAU),
        }
    }
}

/// Render the background with default scene parameters.
pub fn render(config: &RenderConfig, seed: u64) -> Canvas {
    paint(config, &Params::default(), seed)
}

/// Render the background with explicit scene parameters.
pub fn paint(config: &RenderConfig, params: &Params, seed: u64) -> Canvas {
    let mut rng = StdRng::seed_from_u64(seed);
    let scene = Scene::new(config, params, &mut rng);
    let palette = &config.palette;
    let mut canvas = Canvas::new(config.base_width, config.base_height);

    sky(&mut canvas, &scene, params, palette);
    clouds(&mut canvas, &scene, params, palette, config.cloud_count, &mut rng);
    sun(&mut canvas, &scene, params, palette);
    mountains(&mut canvas, &scene, params, palette);
    lake(&mut canvas, &scene, params, palette);
    reflection(&mut canvas, &scene, params, palette);
    foreground(&mut canvas, &scene, params, palette);

    log::debug!("background painted ({}x{}, seed {})", scene.width, scene.height, seed);
    canvas
}

fn sky(canvas: &mut Canvas, scene: &Scene, params: &Params, palette: &Palette) {
    let span = scene.horizon.saturating_sub(1).max(1) as f32;
    for y in 0..scene.horizon {
        let base = gradient(&palette.sky, y as f32 / span);
        let light = lighten(base, params.sky_lighten);
        canvas.map_span(y, 0..scene.width, |x, _| {
            pick(base, light, x, y, params.sky_texture)
        });
    }
}

fn clouds(
    canvas: &mut Canvas,
    scene: &Scene,
    params: &Params,
    palette: &Palette,
    count: usize,
    rng: &mut StdRng,
) {
    if scene.width == 0 || scene.horizon < 2 {
        return;
    }
    let max_row = ((scene.horizon as f32 * 0.6) as usize).max(3);
    for _ in 0..count {
        let row = rng.random_range(2..max_row);
        let col = rng.random_range(0..scene.width);
        let len = rng.random_range(14..48usize);

        let streaks = [
            (row, col..col + len),
            (row + 1, col + len / 4..col + len * 3 / 4),
        ];
        for (y, xs) in streaks {
            if y >= scene.horizon {
                continue;
            }
            canvas.map_span(y, xs, |x, px| {
                let blend = mix(px, palette.cloud, params.cloud_mix);
                pick(px, blend, x, y, params.cloud_amount)
            });
        }
    }
}

fn sun(canvas: &mut Canvas, scene: &Scene, params: &Params, palette: &Palette) {
    let reach = scene.halo_r.ceil() as i64;
    let cx = scene.sun_cx as i64;
    let cy = scene.sun_cy as i64;
    let y0 = (cy - reach).max(0) as usize;
    let y1 = ((cy + reach + 1).max(0) as usize).min(scene.horizon);
    let x0 = (cx - reach).max(0) as usize;
    let x1 = ((cx + reach + 1).max(0) as usize).min(scene.width);
    let ring_width = (scene.ring_r - scene.core_r).max(f32::EPSILON);
    let halo_width = (scene.halo_r - scene.ring_r).max(f32::EPSILON);

    for y in y0..y1 {
        canvas.map_span(y, x0..x1, |x, px| {
            let d = (x as f32 - scene.sun_cx).hypot(y as f32 - scene.sun_cy);
            if d <= scene.core_r {
                palette.sun_core
            } else if d <= scene.ring_r {
                mix(palette.sun_core, palette.sun_orange, (d - scene.core_r) / ring_width)
            } else if d <= scene.halo_r {
                let fade = 1.0 - (d - scene.ring_r) / halo_width;
                pick(px, palette.sun_glow, x, y, params.halo_strength * fade)
            } else {
                px
            }
        });
    }
}

fn mountain_layer(
    canvas: &mut Canvas,
    scene: &Scene,
    params: &Params,
    shape: &RidgeShape,
    phase: f32,
    base: image::Rgba<u8>,
    shade: f32,
) {
    let tops = ridge(
        scene.width,
        scene.height,
        &RidgeParams {
            base_y: scene.horizon as f32,
            amplitude: scene.height as f32 * shape.amplitude,
            freq1: shape.freq1,
            freq2: shape.freq2,
            phase,
        },
    );
    let dark = darken(base, shade);
    let block = params.checker.max(1);
    for (x, &top) in tops.iter().enumerate() {
        for y in top..scene.horizon {
            let color = if (x / block + y / block) % 2 == 0 { base } else { dark };
            canvas.put(x, y, color);
        }
    }
}

fn mountains(canvas: &mut Canvas, scene: &Scene, params: &Params, palette: &Palette) {
    mountain_layer(
        canvas,
        scene,
        params,
        &params.far,
        scene.far_phase,
        palette.mountain_far,
        params.mountain_shade,
    );
    mountain_layer(
        canvas,
        scene,
        params,
        &params.near,
        scene.near_phase,
        palette.mountain_near,
        params.mountain_shade,
    );
}

/// Depth below the horizon in [0, 1].
fn depth(scene: &Scene, y: usize) -> f32 {
    let span = scene.height.saturating_sub(1).saturating_sub(scene.horizon).max(1) as f32;
    (y - scene.horizon) as f32 / span
}

fn lake(canvas: &mut Canvas, scene: &Scene, params: &Params, palette: &Palette) {
    let warm = mix(palette.sky[2], palette.navy, params.lake_warm_mix);
    let every = params.ripple_every.max(1);
    for y in scene.horizon..scene.height {
        let mut color = mix(warm, palette.navy, depth(scene, y));
        if (y - scene.horizon) % every == every - 1 {
            color = darken(color, params.ripple_darken);
        }
        canvas.fill_span(y, 0..scene.width, color);
    }
}

fn reflection(canvas: &mut Canvas, scene: &Scene, params: &Params, palette: &Palette) {
    let cx = scene.sun_cx as i64;
    for y in scene.horizon..scene.height {
        let t = depth(scene, y);
        let half = (scene.ring_r * (1.0 - params.reflection_shrink * t)).round().max(1.0) as i64;
        let amount = params.reflection_amount * (1.0 - t);
        let x0 = (cx - half).max(0) as usize;
        let x1 = (cx + half + 1).max(0) as usize;
        canvas.map_span(y, x0..x1, |x, px| pick(px, palette.sun_orange, x, y, amount));
    }
}

/// Top row of the foreground silhouette per column.
fn foreground_edge(scene: &Scene, params: &Params) -> Vec<usize> {
    let amp = scene.height as f32 * params.foreground_amplitude;
    let bottom = scene.height.saturating_sub(1) as f32;
    let p = scene.foreground_phase;
    (0..scene.width)
        .map(|x| {
            let xf = x as f32;
            let n = 0.5
                + 0.3 * (xf * params.foreground_freq1 + p).sin()
                + 0.2 * (xf * params.foreground_freq2 + 1.7 * p).sin();
            (bottom - amp * n).round().clamp(0.0, bottom) as usize
        })
        .collect()
}

fn foreground(canvas: &mut Canvas, scene: &Scene, params: &Params, palette: &Palette) {
    for (x, top) in foreground_edge(scene, params).into_iter().enumerate() {
        for y in top..scene.height {
            canvas.put(x, y, palette.navy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(config: &RenderConfig, params: &Params) -> Scene {
        Scene::new(config, params, &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_deterministic() {
        let config = RenderConfig::default();
        assert_eq!(render(&config, 100), render(&config, 100));
    }

    #[test]
    fn test_seed_changes_scene() {
        let config = RenderConfig::default();
        assert_ne!(render(&config, 100).as_raw(), render(&config, 101).as_raw());
    }

    #[test]
    fn test_fully_opaque() {
        let canvas = render(&RenderConfig::default(), 7);
        assert!(canvas.as_raw().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_bottom_row_is_foreground() {
        let config = RenderConfig::default();
        let canvas = render(&config, 3);
        let bottom = canvas.height() - 1;
        for x in 0..canvas.width() {
            assert_eq!(canvas.get(x, bottom), config.palette.navy);
        }
    }

    #[test]
    fn test_sky_top_row_uses_first_keyframe() {
        let config = RenderConfig::default();
        let params = Params::default();
        let scene = scene(&config, &params);
        let mut canvas = Canvas::new(config.base_width, config.base_height);
        sky(&mut canvas, &scene, &params, &config.palette);

        let top = config.palette.sky[0];
        let light = lighten(top, params.sky_lighten);
        let lifted = (0..canvas.width()).filter(|&x| canvas.get(x, 0) == light).count();
        assert!((0..canvas.width()).all(|x| canvas.get(x, 0) == top || canvas.get(x, 0) == light));
        // Row 0 of the matrix has one level (0) under the texture amount
        assert_eq!(lifted, canvas.width().div_ceil(4));
    }

    #[test]
    fn test_sun_core_is_solid() {
        let config = RenderConfig::default();
        let params = Params::default();
        let scene = scene(&config, &params);
        let mut canvas = Canvas::new(config.base_width, config.base_height);
        sky(&mut canvas, &scene, &params, &config.palette);
        sun(&mut canvas, &scene, &params, &config.palette);

        let (cx, cy) = (scene.sun_cx as usize, scene.sun_cy as usize);
        assert_eq!(canvas.get(cx, cy), config.palette.sun_core);
        assert_eq!(canvas.get(cx + 1, cy), config.palette.sun_core);
        // Far outside the halo the sky is untouched
        assert_eq!(canvas.get(0, cy), {
            let mut sky_only = Canvas::new(config.base_width, config.base_height);
            sky(&mut sky_only, &scene, &params, &config.palette);
            sky_only.get(0, cy)
        });
    }

    #[test]
    fn test_mountains_stop_at_horizon() {
        let config = RenderConfig::default();
        let params = Params::default();
        let scene = scene(&config, &params);
        let mut canvas = Canvas::new(config.base_width, config.base_height);
        mountains(&mut canvas, &scene, &params, &config.palette);

        let near = config.palette.mountain_near;
        let near_dark = darken(near, params.mountain_shade);
        let far = config.palette.mountain_far;
        let far_dark = darken(far, params.mountain_shade);
        let shades = [near, near_dark, far, far_dark];
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let px = canvas.get(x, y);
                if y >= scene.horizon {
                    assert_eq!(px[3], 0, "mountain pixel below horizon at ({}, {})", x, y);
                } else if px[3] != 0 {
                    assert!(shades.contains(&px));
                }
            }
        }
    }

    #[test]
    fn test_mountain_checker_blocks() {
        let config = RenderConfig::default();
        let params = Params::default();
        let scene = scene(&config, &params);
        let mut canvas = Canvas::new(config.base_width, config.base_height);
        mountains(&mut canvas, &scene, &params, &config.palette);

        let near = config.palette.mountain_near;
        let near_dark = darken(near, params.mountain_shade);
        let y = scene.horizon - 1;
        for x in 0..canvas.width() {
            let px = canvas.get(x, y);
            if px == near || px == near_dark {
                let expect = if (x / 8 + y / 8) % 2 == 0 { near } else { near_dark };
                assert_eq!(px, expect);
            }
        }
    }

    #[test]
    fn test_lake_ripple_rows_darker() {
        let config = RenderConfig::default();
        let params = Params::default();
        let scene = scene(&config, &params);
        let mut canvas = Canvas::new(config.base_width, config.base_height);
        lake(&mut canvas, &scene, &params, &config.palette);

        let plain = canvas.get(0, scene.horizon + 1);
        let ripple = canvas.get(0, scene.horizon + 2);
        let sum = |c: image::Rgba<u8>| c[0] as u32 + c[1] as u32 + c[2] as u32;
        assert!(sum(ripple) < sum(plain));
        assert_eq!(canvas.get(0, scene.height - 1), {
            let bottom = mix(
                mix(config.palette.sky[2], config.palette.navy, params.lake_warm_mix),
                config.palette.navy,
                1.0,
            );
            if (scene.height - 1 - scene.horizon) % 3 == 2 {
                darken(bottom, params.ripple_darken)
            } else {
                bottom
            }
        });
    }

    #[test]
    fn test_reflection_stays_under_sun() {
        let config = RenderConfig::default();
        let params = Params::default();
        let scene = scene(&config, &params);
        let mut canvas = Canvas::new(config.base_width, config.base_height);
        lake(&mut canvas, &scene, &params, &config.palette);
        let before = canvas.clone();
        reflection(&mut canvas, &scene, &params, &config.palette);

        let reach = scene.ring_r.round() as usize + 1;
        for y in scene.horizon..scene.height {
            for x in 0..canvas.width() {
                if x + reach < scene.sun_cx as usize || x > scene.sun_cx as usize + reach {
                    assert_eq!(canvas.get(x, y), before.get(x, y));
                }
            }
        }
        assert_ne!(canvas, before);
    }

    #[test]
    fn test_foreground_edge_in_lower_band() {
        let config = RenderConfig::default();
        let params = Params::default();
        let scene = scene(&config, &params);
        let amp = (scene.height as f32 * params.foreground_amplitude).ceil() as usize;
        for top in foreground_edge(&scene, &params) {
            assert!(top < scene.height);
            assert!(top + amp + 1 >= scene.height - 1);
        }
    }
}
