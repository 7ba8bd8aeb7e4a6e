//! Tone mapping, gradient lookup and final compositing.

use crate::math::{mix, mix3, Vec3};

use super::settings::{BlendMode, GradientPalette, RenderParams, PALETTE_STOPS};

const LUMA_WEIGHTS: Vec3 = Vec3::new(0.299, 0.587, 0.114);
const TONE_POWER: f64 = 1.5;
const SEGMENTS: usize = PALETTE_STOPS - 1;

/// `sqrt(pow(vol, 1.5))` per channel. Negative input is treated as 0.
pub fn tone_map(volume: Vec3) -> Vec3 {
    volume.map(|c| c.max(0.0).powf(TONE_POWER).sqrt())
}

pub fn luminance(color: Vec3) -> f64 {
    color.dot(LUMA_WEIGHTS)
}

/// Piecewise-linear lookup across the 6 palette segments. `t` is clamped to
/// `[0, 1]` first, so out-of-range input returns the nearest end color.
pub fn gradient(t: f64, palette: &GradientPalette) -> Vec3 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * SEGMENTS as f64;
    let segment = (scaled.floor() as usize).min(SEGMENTS - 1);
    let local = scaled - segment as f64;
    mix3(palette.stop(segment), palette.stop(segment + 1), local)
}

pub fn apply_contrast(color: Vec3, contrast: f64) -> Vec3 {
    ((color - Vec3::splat(0.5)) * contrast.max(0.0)) + Vec3::splat(0.5)
}

/// Mixes from the color's own luminance toward the color; 0 is gray, 1 is
/// unchanged, above 1 over-saturates.
pub fn apply_saturation(color: Vec3, saturation: f64) -> Vec3 {
    let gray = luminance(color);
    Vec3::new(
        mix(gray, color.x, saturation),
        mix(gray, color.y, saturation),
        mix(gray, color.z, saturation),
    )
}

pub fn blend(background: Vec3, color: Vec3, mode: BlendMode) -> Vec3 {
    match mode {
        BlendMode::Normal => color,
        BlendMode::Additive => background + color,
        BlendMode::Multiply => background * color,
        BlendMode::Screen => Vec3::ONE - ((Vec3::ONE - background) * (Vec3::ONE - color)),
    }
}

/// Gradient, intensity, contrast, saturation, blend, clamp, in that order.
pub fn composite(luma: f64, params: &RenderParams) -> Vec3 {
    let color = gradient(luma, &params.gradient_palette) * params.intensity_multiplier;
    let color = apply_contrast(color, params.contrast);
    let color = apply_saturation(color, params.saturation);
    blend(params.background_color, color, params.blend_mode).clamp01()
}
