use serde::Deserialize;
use std::path::Path;

use crate::driver::FrameClock;
use crate::error::{AuroraError, ConfigError, Result};
use crate::render::settings::{parse_hex_color, DEFAULT_GRADIENT_HEX};
use crate::render::validation::{validate_frame, validate_params};
use crate::render::{BlendMode, FrameContext, GradientPalette, RenderParams};

/// Upper bound on `frameCount` for one animation config.
pub const MAX_ANIMATION_FRAMES: u32 = 100_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    #[serde(default)]
    pub elapsed_time: f64,
    #[serde(flatten)]
    pub params: ParamsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchConfig {
    pub frames: Vec<FrameConfig>,
}

/// Fixed-rate sequence; `{frame}` in `output_pattern` becomes the
/// zero-padded frame index.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    pub output_pattern: String,
    pub frame_count: u32,
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default)]
    pub start_time: f64,
    #[serde(flatten)]
    pub params: ParamsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Batch(RenderBatchConfig),
    Animation(AnimationConfig),
    Single(FrameConfig),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BlendModeConfig {
    Index(i64),
    Name(String),
}

impl BlendModeConfig {
    pub fn resolve(&self) -> BlendMode {
        match self {
            Self::Index(index) => BlendMode::from_index(*index),
            Self::Name(name) => BlendMode::parse(name),
        }
    }
}

impl Default for BlendModeConfig {
    fn default() -> Self {
        Self::Name(BlendMode::Normal.as_str().to_string())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamsConfig {
    pub animation_speed: f64,
    pub wave_amplitude: f64,
    pub noise_scale: f64,
    pub rotation_angle: f64,
    pub field_of_view: f64,
    pub blend_mode: BlendModeConfig,
    pub intensity_multiplier: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub ray_march_steps: i32,
    pub step_size: f64,
    pub time_scale: f64,
    pub noise_frequency: f64,
    pub noise_amplitude: f64,
    pub gradient_colors: Vec<String>,
    pub background_color: String,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        let defaults = RenderParams::default();
        Self {
            animation_speed: defaults.animation_speed,
            wave_amplitude: defaults.wave_amplitude,
            noise_scale: defaults.noise_scale,
            rotation_angle: defaults.rotation_angle,
            field_of_view: defaults.field_of_view,
            blend_mode: BlendModeConfig::default(),
            intensity_multiplier: defaults.intensity_multiplier,
            contrast: defaults.contrast,
            saturation: defaults.saturation,
            ray_march_steps: defaults.ray_march_steps,
            step_size: defaults.step_size,
            time_scale: defaults.time_scale,
            noise_frequency: defaults.noise_frequency,
            noise_amplitude: defaults.noise_amplitude,
            gradient_colors: DEFAULT_GRADIENT_HEX.iter().map(|c| c.to_string()).collect(),
            background_color: "#000000".to_string(),
        }
    }
}

impl ParamsConfig {
    pub fn to_params(&self) -> Result<RenderParams, ConfigError> {
        let params = RenderParams {
            noise_scale: self.noise_scale,
            noise_frequency: self.noise_frequency,
            noise_amplitude: self.noise_amplitude,
            wave_amplitude: self.wave_amplitude,
            animation_speed: self.animation_speed,
            time_scale: self.time_scale,
            rotation_angle: self.rotation_angle,
            field_of_view: self.field_of_view,
            blend_mode: self.blend_mode.resolve(),
            intensity_multiplier: self.intensity_multiplier,
            contrast: self.contrast,
            saturation: self.saturation,
            ray_march_steps: self.ray_march_steps,
            step_size: self.step_size,
            gradient_palette: GradientPalette::from_hex(&self.gradient_colors)?,
            background_color: parse_hex_color(&self.background_color)?,
        };
        validate_params(&params)?;
        Ok(params)
    }
}

#[derive(Clone, Debug)]
pub struct FrameJob {
    pub width: u32,
    pub height: u32,
    pub elapsed_time: f64,
    pub output_path: String,
    pub params: RenderParams,
}

pub fn parse_config(raw: &str) -> Result<IncomingConfig> {
    Ok(serde_json::from_str(raw)?)
}

/// Flattens any config shape into validated frame jobs.
pub fn plan_jobs(config: IncomingConfig) -> Result<Vec<FrameJob>> {
    let jobs = match config {
        IncomingConfig::Single(frame) => vec![frame_job(frame)?],
        IncomingConfig::Batch(batch) => batch
            .frames
            .into_iter()
            .map(frame_job)
            .collect::<Result<Vec<_>>>()?,
        IncomingConfig::Animation(animation) => animation_jobs(animation)?,
    };
    if jobs.is_empty() {
        return Err(AuroraError::Usage("frames array must not be empty".into()));
    }
    Ok(jobs)
}

fn frame_job(frame: FrameConfig) -> Result<FrameJob> {
    validate_frame(&FrameContext::new(
        frame.width,
        frame.height,
        frame.elapsed_time,
    ))?;
    validate_output_path(&frame.output_path)?;
    Ok(FrameJob {
        width: frame.width,
        height: frame.height,
        elapsed_time: frame.elapsed_time,
        output_path: frame.output_path,
        params: frame.params.to_params()?,
    })
}

fn animation_jobs(animation: AnimationConfig) -> Result<Vec<FrameJob>> {
    if animation.frame_count > MAX_ANIMATION_FRAMES {
        return Err(AuroraError::Usage(format!(
            "frameCount {} exceeds the limit of {MAX_ANIMATION_FRAMES}",
            animation.frame_count
        )));
    }
    let params = animation.params.to_params()?;
    let mut clock = FrameClock::new(animation.start_time, animation.fps)?;
    validate_frame(&FrameContext::new(
        animation.width,
        animation.height,
        clock.peek(),
    ))?;
    let digits = animation.frame_count.max(1).to_string().len().max(4);

    let mut jobs = Vec::with_capacity(animation.frame_count as usize);
    for index in 0..animation.frame_count {
        let output_path = animation
            .output_pattern
            .replace("{frame}", &format!("{index:0digits$}"));
        validate_output_path(&output_path)?;
        jobs.push(FrameJob {
            width: animation.width,
            height: animation.height,
            elapsed_time: clock.tick(),
            output_path,
            params,
        });
    }
    Ok(jobs)
}

fn validate_output_path(output_path: &str) -> Result<()> {
    if output_path.trim().is_empty() {
        return Err(AuroraError::Usage("outputPath must not be empty".into()));
    }
    let parent = Path::new(output_path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        return Err(AuroraError::Usage(format!(
            "output directory does not exist: {}",
            parent.display()
        )));
    }
    Ok(())
}

const fn default_fps() -> f64 {
    30.0
}
