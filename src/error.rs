use thiserror::Error;

/// A frame configuration the renderer refuses to shade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("resolution must be at least 1x1, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("rayMarchSteps must be positive, got {0}")]
    InvalidRayMarchSteps(i32),

    #[error("contrast must be >= 0, got {0}")]
    NegativeContrast(f64),

    #[error("gradient palette needs exactly 7 colors, got {0}")]
    PaletteLength(usize),

    #[error("invalid hex color '{0}', expected #RRGGBB")]
    InvalidHexColor(String),

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("elapsed time must be finite and >= 0, got {0}")]
    InvalidElapsedTime(f64),

    #[error("fps must be finite and > 0, got {0}")]
    InvalidFrameRate(f64),
}

#[derive(Error, Debug)]
pub enum AuroraError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T, E = AuroraError> = std::result::Result<T, E>;
