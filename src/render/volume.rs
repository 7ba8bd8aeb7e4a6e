use crate::math::{Ray, Vec2, Vec3};
use crate::noise::{noise2, noise3};
use crate::scene::OceanField;

use super::shadow::trace_shadow;
use super::settings::RenderParams;

const LIGHT_POSITION: Vec3 = Vec3::new(-0.2, 0.15, -0.8);
const TURBULENCE_DRIFT: Vec3 = Vec3::new(1.0, -1.0, -1.0);
const HEIGHT_FALLOFF: f64 = 0.85;
const DENSITY_GAIN: f64 = 0.001;
const DENSITY_LIMIT: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeSample {
    /// Accumulated light; unclamped, may exceed 1.
    pub color: Vec3,
    pub density: f64,
    pub steps: u32,
    pub max_shadow_steps: u32,
}

/// Flips the view ray vertically and turns it about Y by the fixed
/// `[[0.8, -0.6], [0.6, 0.8]]` rotation before marching.
pub fn orient_ray(ray: Ray) -> Ray {
    let d = ray.direction;
    let x = (0.8 * d.x) - (0.6 * d.z);
    let z = (0.6 * d.x) + (0.8 * d.z);
    Ray {
        origin: ray.origin,
        direction: Vec3::new(x, -d.y, z),
    }
}

/// Marches the oriented view ray through the turbulence volume.
///
/// The start distance is seeded from 2D noise at `frag + ndc`, so neighbouring
/// pixels start out of phase. Stops after `steps` iterations or once the
/// accumulated density passes 1.
pub fn march_volume(
    ray: Ray,
    seed: Vec2,
    field: OceanField,
    params: &RenderParams,
    steps: u32,
) -> VolumeSample {
    let ray = orient_ray(ray);
    let drift = TURBULENCE_DRIFT * (2.0 * field.time);

    let mut distance = noise2(seed, params.noise_scale, params.noise_frequency);
    let mut volume = Vec3::ZERO;
    let mut density = 0.0;
    let mut executed = 0;
    let mut max_shadow_steps = 0;

    for _ in 0..steps {
        executed += 1;
        let pos = ray.at(distance);
        let light_dir = (LIGHT_POSITION - pos).normalize_or(Vec3::Y);
        let shadow = trace_shadow(field, pos, light_dir, light_dir.length());
        max_shadow_steps = max_shadow_steps.max(shadow.iterations);

        let turbulence = noise3(pos + drift, params.noise_scale, params.noise_frequency)
            * (-HEIGHT_FALLOFF * pos.y).exp()
            * params.noise_amplitude;
        density += turbulence * DENSITY_GAIN;
        volume = volume + (Vec3::ONE * shadow.factor) * density;

        if density > DENSITY_LIMIT {
            break;
        }
        distance += params.step_size;
    }

    VolumeSample {
        color: volume,
        density,
        steps: executed,
        max_shadow_steps,
    }
}
