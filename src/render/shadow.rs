use crate::math::Vec3;
use crate::scene::OceanField;

pub const SHADOW_STEPS: u32 = 16;
const SHADOW_CUTOFF: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSample {
    pub factor: f64,
    pub iterations: u32,
}

/// Soft shadow along `direction`, at most [`SHADOW_STEPS`] density samples.
///
/// Keeps the running minimum of `max_distance * h / t`. At `t == 0` the ratio
/// is taken as its limit (`+inf` above the surface, `-inf` on or below it)
/// instead of dividing by zero.
pub fn trace_shadow(
    field: OceanField,
    origin: Vec3,
    direction: Vec3,
    max_distance: f64,
) -> ShadowSample {
    let mut r: f64 = 1.0;
    let mut t = 0.0;
    let mut iterations = 0;

    for _ in 0..SHADOW_STEPS {
        iterations += 1;
        let h = field.density(origin + (direction * t));
        let ratio = if t > 0.0 {
            max_distance * h / t
        } else if h > 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
        r = r.min(ratio);
        if r < SHADOW_CUTOFF || t > max_distance {
            break;
        }
        t += h;
    }

    ShadowSample {
        factor: r.clamp(0.0, 1.0),
        iterations,
    }
}
