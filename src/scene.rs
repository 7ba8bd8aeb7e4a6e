use crate::math::{Vec2, Vec3};
use crate::noise::noise2;
use crate::render::RenderParams;

const OCTAVE_FREQUENCIES: [f64; 3] = [1.0, 2.1, 3.9];
const OCTAVE_WEIGHTS: [f64; 3] = [0.5, 0.25, 0.125];
// Third drift direction is (1, 1), not normalized.
const OCTAVE_DRIFT: [Vec2; 3] = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)];

const SURFACE_OFFSET: f64 = 0.5;
const HEIGHT_FIELD_SCALE: f64 = 0.08;
const HEIGHT_GAIN: f64 = 3.0;

/// Animated ocean surface sampled by the shadow and volume marchers.
#[derive(Clone, Copy, Debug)]
pub struct OceanField {
    /// Scene time (elapsed seconds times `time_scale`).
    pub time: f64,
    pub speed: f64,
    pub wave_amplitude: f64,
    pub noise_scale: f64,
    pub noise_frequency: f64,
}

impl OceanField {
    pub fn from_params(params: &RenderParams, elapsed_time: f64) -> Self {
        Self {
            time: params.scene_time(elapsed_time),
            speed: params.animation_speed,
            wave_amplitude: params.wave_amplitude,
            noise_scale: params.noise_scale,
            noise_frequency: params.noise_frequency,
        }
    }

    /// Three drifting octaves of 2D noise with a cubic smoothstep on the sum.
    /// Nominally in `[0, 1]`, not clamped.
    pub fn height(self, p: Vec2) -> f64 {
        let drift = self.time * self.speed;
        let mut f = 0.0;
        for octave in 0..3 {
            let q = (p * OCTAVE_FREQUENCIES[octave]) + (OCTAVE_DRIFT[octave] * drift);
            f += OCTAVE_WEIGHTS[octave] * noise2(q, self.noise_scale, self.noise_frequency);
        }
        (3.0 - 2.0 * f) * f * f
    }

    /// Pseudo-distance to the wavy plane near `y = -0.5`. Not a true SDF.
    pub fn density(self, p: Vec3) -> f64 {
        let wave = self.height(p.xz() * (HEIGHT_FIELD_SCALE * self.noise_scale));
        p.y + SURFACE_OFFSET + (wave * HEIGHT_GAIN * self.wave_amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(time: f64) -> OceanField {
        OceanField::from_params(&RenderParams::default(), time)
    }

    #[test]
    fn height_is_deterministic() {
        let p = Vec2::new(0.7, -3.2);
        assert_eq!(field(1.5).height(p), field(1.5).height(p));
    }

    #[test]
    fn height_stays_near_unit_range() {
        for i in 0..64 {
            let p = Vec2::new(i as f64 * 0.37, i as f64 * -0.53);
            let h = field(0.25 * i as f64).height(p);
            assert!((0.0..=1.0).contains(&h), "height {h} at {p:?}");
        }
    }

    #[test]
    fn height_drifts_with_time() {
        let p = Vec2::new(0.3, 0.9);
        assert_ne!(field(0.0).height(p), field(0.75).height(p));
    }

    #[test]
    fn density_tracks_height_above_surface() {
        let f = field(0.0);
        let low = f.density(Vec3::new(2.0, -10.0, 5.0));
        let high = f.density(Vec3::new(2.0, 10.0, 5.0));
        assert!((high - low - 20.0).abs() < 1e-9);
    }

    #[test]
    fn wave_amplitude_scales_surface_displacement() {
        let mut f = field(0.0);
        let p = Vec3::new(4.0, 0.0, -6.0);
        f.wave_amplitude = 0.0;
        assert_eq!(f.density(p), 0.5);
        f.wave_amplitude = 2.0;
        let wave = f.height(p.xz() * HEIGHT_FIELD_SCALE);
        assert!((f.density(p) - (0.5 + wave * 6.0)).abs() < 1e-12);
    }
}
