//! Per-pixel renderer for an animated volumetric aurora over a noise-driven
//! ocean.
//!
//! [`cpu::FrameShader`] is the pure shading function for one frame snapshot;
//! [`cpu::render_frame`] applies it to every pixel in parallel. The
//! [`driver`] module supplies frame times and parameter snapshots, and
//! [`config`] reads both from JSON.

pub mod config;
pub mod cpu;
pub mod driver;
pub mod error;
pub mod math;
pub mod noise;
pub mod render;
pub mod scene;

pub use cpu::{render_frame, shade, FrameBuffer, FrameShader};
pub use error::{AuroraError, ConfigError};
pub use math::{Vec2, Vec3};
pub use render::{BlendMode, FrameContext, GradientPalette, RenderParams};
