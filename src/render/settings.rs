use tracing::debug;

use crate::error::ConfigError;
use crate::math::Vec3;

/// Hard cap on primary march iterations per pixel, whatever `ray_march_steps` says.
pub const MAX_MARCH_STEPS: u32 = 128;

pub const PALETTE_STOPS: usize = 7;

pub const DEFAULT_GRADIENT_HEX: [&str; PALETTE_STOPS] = [
    "#FEFAF6", "#FFBB8D", "#F99C87", "#C88AB2", "#6F70CC", "#453DE0", "#453DE0",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    #[default]
    Normal,
    Additive,
    Multiply,
    Screen,
}

impl BlendMode {
    /// Case-insensitive name lookup; anything unrecognised is `Normal`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("additive") || value.eq_ignore_ascii_case("add") {
            return Self::Additive;
        }
        if value.eq_ignore_ascii_case("multiply") {
            return Self::Multiply;
        }
        if value.eq_ignore_ascii_case("screen") {
            return Self::Screen;
        }
        Self::Normal
    }

    /// Integer encoding used by the original control panel (0..=3).
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Self::Additive,
            2 => Self::Multiply,
            3 => Self::Screen,
            _ => Self::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Additive => "additive",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
        }
    }
}

/// Seven evenly spaced color stops keyed by luminance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientPalette {
    stops: [Vec3; PALETTE_STOPS],
}

impl GradientPalette {
    pub const fn new(stops: [Vec3; PALETTE_STOPS]) -> Self {
        Self { stops }
    }

    pub fn from_slice(stops: &[Vec3]) -> Result<Self, ConfigError> {
        let stops: [Vec3; PALETTE_STOPS] = stops
            .try_into()
            .map_err(|_| ConfigError::PaletteLength(stops.len()))?;
        Ok(Self { stops })
    }

    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, ConfigError> {
        if colors.len() != PALETTE_STOPS {
            return Err(ConfigError::PaletteLength(colors.len()));
        }
        let parsed = colors
            .iter()
            .map(|color| parse_hex_color(color.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slice(&parsed)
    }

    pub fn stops(&self) -> &[Vec3; PALETTE_STOPS] {
        &self.stops
    }

    pub fn stop(&self, index: usize) -> Vec3 {
        self.stops[index.min(PALETTE_STOPS - 1)]
    }
}

impl Default for GradientPalette {
    fn default() -> Self {
        Self::new([
            rgb8(0xFE, 0xFA, 0xF6),
            rgb8(0xFF, 0xBB, 0x8D),
            rgb8(0xF9, 0x9C, 0x87),
            rgb8(0xC8, 0x8A, 0xB2),
            rgb8(0x6F, 0x70, 0xCC),
            rgb8(0x45, 0x3D, 0xE0),
            rgb8(0x45, 0x3D, 0xE0),
        ])
    }
}

fn rgb8(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

/// Parses `#RRGGBB` (the `#` is optional) into channels in `[0, 1]`.
pub fn parse_hex_color(raw: &str) -> Result<Vec3, ConfigError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidHexColor(raw.to_string()));
    }
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| ConfigError::InvalidHexColor(raw.to_string()))?;
    Ok(rgb8(
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    pub noise_scale: f64,
    pub noise_frequency: f64,
    pub noise_amplitude: f64,
    pub wave_amplitude: f64,
    pub animation_speed: f64,
    pub time_scale: f64,
    /// Radians.
    pub rotation_angle: f64,
    /// Degrees.
    pub field_of_view: f64,
    pub blend_mode: BlendMode,
    pub intensity_multiplier: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub ray_march_steps: i32,
    pub step_size: f64,
    pub gradient_palette: GradientPalette,
    pub background_color: Vec3,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            noise_scale: 1.0,
            noise_frequency: 1.0,
            noise_amplitude: 1.0,
            wave_amplitude: 1.0,
            animation_speed: 1.0,
            time_scale: 1.0,
            rotation_angle: 1.2,
            field_of_view: 45.0,
            blend_mode: BlendMode::Normal,
            intensity_multiplier: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            ray_march_steps: 32,
            step_size: 1.0,
            gradient_palette: GradientPalette::default(),
            background_color: Vec3::ZERO,
        }
    }
}

impl RenderParams {
    /// Primary march iterations actually executed: the configured count,
    /// clamped to [`MAX_MARCH_STEPS`].
    pub fn effective_steps(&self) -> u32 {
        let configured = self.ray_march_steps.max(0) as u32;
        if configured > MAX_MARCH_STEPS {
            debug!(
                configured,
                cap = MAX_MARCH_STEPS,
                "rayMarchSteps above cap, clamping"
            );
        }
        configured.min(MAX_MARCH_STEPS)
    }

    pub fn scene_time(&self, elapsed_time: f64) -> f64 {
        elapsed_time * self.time_scale
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub width: u32,
    pub height: u32,
    pub elapsed_time: f64,
}

impl FrameContext {
    pub const fn new(width: u32, height: u32, elapsed_time: f64) -> Self {
        Self {
            width,
            height,
            elapsed_time,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Slider range the original control panel offers for a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Informational only; the renderer accepts values outside these ranges.
pub const PARAM_RANGES: &[ParamRange] = &[
    ParamRange { name: "animationSpeed", min: 0.1, max: 5.0, step: 0.1 },
    ParamRange { name: "waveAmplitude", min: 0.1, max: 5.0, step: 0.1 },
    ParamRange { name: "noiseScale", min: 0.1, max: 5.0, step: 0.1 },
    ParamRange { name: "rotationAngle", min: 0.0, max: 6.28, step: 0.01 },
    ParamRange { name: "fieldOfView", min: 30.0, max: 90.0, step: 1.0 },
    ParamRange { name: "intensityMultiplier", min: 0.0, max: 5.0, step: 0.1 },
    ParamRange { name: "contrast", min: 0.0, max: 5.0, step: 0.1 },
    ParamRange { name: "saturation", min: 0.0, max: 2.0, step: 0.1 },
    ParamRange { name: "rayMarchSteps", min: 8.0, max: 128.0, step: 1.0 },
    ParamRange { name: "stepSize", min: 0.1, max: 10.0, step: 0.1 },
    ParamRange { name: "timeScale", min: 0.1, max: 5.0, step: 0.1 },
    ParamRange { name: "noiseFrequency", min: 0.1, max: 10.0, step: 0.1 },
    ParamRange { name: "noiseAmplitude", min: 0.1, max: 5.0, step: 0.1 },
];

pub fn param_range(name: &str) -> Option<ParamRange> {
    PARAM_RANGES
        .iter()
        .copied()
        .find(|range| range.name.eq_ignore_ascii_case(name))
}
