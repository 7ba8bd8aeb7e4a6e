use crate::error::ConfigError;
use crate::math::Vec3;

use super::settings::{FrameContext, RenderParams};

pub fn validate_frame(frame: &FrameContext) -> Result<(), ConfigError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(ConfigError::InvalidResolution {
            width: frame.width,
            height: frame.height,
        });
    }
    if !frame.elapsed_time.is_finite() || frame.elapsed_time < 0.0 {
        return Err(ConfigError::InvalidElapsedTime(frame.elapsed_time));
    }
    Ok(())
}

pub fn validate_params(params: &RenderParams) -> Result<(), ConfigError> {
    if params.ray_march_steps <= 0 {
        return Err(ConfigError::InvalidRayMarchSteps(params.ray_march_steps));
    }

    let scalars = [
        ("noiseScale", params.noise_scale),
        ("noiseFrequency", params.noise_frequency),
        ("noiseAmplitude", params.noise_amplitude),
        ("waveAmplitude", params.wave_amplitude),
        ("animationSpeed", params.animation_speed),
        ("timeScale", params.time_scale),
        ("rotationAngle", params.rotation_angle),
        ("fieldOfView", params.field_of_view),
        ("intensityMultiplier", params.intensity_multiplier),
        ("contrast", params.contrast),
        ("saturation", params.saturation),
        ("stepSize", params.step_size),
    ];
    for (field, value) in scalars {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field, value });
        }
    }

    if params.contrast < 0.0 {
        return Err(ConfigError::NegativeContrast(params.contrast));
    }

    validate_color_finite(params.background_color, "backgroundColor")?;
    for stop in params.gradient_palette.stops() {
        validate_color_finite(*stop, "gradientColors")?;
    }

    Ok(())
}

fn validate_color_finite(color: Vec3, field: &'static str) -> Result<(), ConfigError> {
    for value in [color.x, color.y, color.z] {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field, value });
        }
    }
    Ok(())
}
