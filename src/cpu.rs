use std::path::Path;
use std::time::Instant;

use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::math::{Vec2, Vec3};
use crate::render::color::{composite, luminance, tone_map};
use crate::render::validation::{validate_frame, validate_params};
use crate::render::view::{fragment_to_ndc, Camera};
use crate::render::volume::{march_volume, VolumeSample};
use crate::render::{FrameContext, RenderParams};
use crate::scene::OceanField;

/// Validated snapshot of everything one frame needs. Shared read-only by all
/// workers.
#[derive(Clone, Copy, Debug)]
pub struct FrameShader {
    frame: FrameContext,
    params: RenderParams,
    camera: Camera,
    field: OceanField,
    steps: u32,
}

impl FrameShader {
    pub fn new(frame: FrameContext, params: RenderParams) -> Result<Self> {
        validate_frame(&frame)?;
        validate_params(&params)?;
        Ok(Self {
            frame,
            params,
            camera: Camera::aurora(params.rotation_angle, params.field_of_view),
            field: OceanField::from_params(&params, frame.elapsed_time),
            steps: params.effective_steps(),
        })
    }

    pub fn frame(&self) -> &FrameContext {
        &self.frame
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Final color at a bottom-left-origin fragment coordinate (pixel centers
    /// sit at `.5`).
    pub fn shade(&self, frag: Vec2) -> Vec3 {
        let volume = self.march(frag);
        let luma = luminance(tone_map(volume.color));
        composite(luma, &self.params)
    }

    pub fn march(&self, frag: Vec2) -> VolumeSample {
        let ndc = fragment_to_ndc(frag, self.frame.width, self.frame.height);
        let ray = self.camera.ray(ndc, self.frame.aspect_ratio());
        march_volume(ray, frag + ndc, self.field, &self.params, self.steps)
    }

    /// Fragment coordinate of buffer pixel `(x, y)`, where row 0 is the top.
    /// `None` outside the frame.
    pub fn pixel_center(&self, x: u32, y: u32) -> Option<Vec2> {
        if x >= self.frame.width || y >= self.frame.height {
            return None;
        }
        Some(Vec2::new(
            x as f64 + 0.5,
            (self.frame.height - 1 - y) as f64 + 0.5,
        ))
    }
}

pub fn shade(frag: Vec2, frame: FrameContext, params: RenderParams) -> Result<Vec3> {
    Ok(FrameShader::new(frame, params)?.shade(frag))
}

/// Row-major RGBA floats, row 0 at the top, alpha always 1.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[f32; 4]>,
}

impl FrameBuffer {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize * self.width as usize) + x as usize)
            .copied()
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        for (slot, pixel) in image.pixels_mut().zip(&self.pixels) {
            *slot = to_rgba8(*pixel);
        }
        image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_rgba_image().save(path.as_ref())?;
        Ok(())
    }
}

pub fn render_frame(frame: FrameContext, params: RenderParams) -> Result<FrameBuffer> {
    let shader = FrameShader::new(frame, params)?;
    Ok(render_with(&shader))
}

pub fn render_with(shader: &FrameShader) -> FrameBuffer {
    let started = Instant::now();
    let frame = shader.frame();
    let width = frame.width as usize;
    let mut pixels = vec![[0.0, 0.0, 0.0, 1.0]; frame.pixel_count()];

    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                if let Some(frag) = shader.pixel_center(x as u32, y as u32) {
                    let color = shader.shade(frag);
                    *slot = [color.x as f32, color.y as f32, color.z as f32, 1.0];
                }
            }
        });

    debug!(
        width = frame.width,
        height = frame.height,
        elapsed_time = frame.elapsed_time,
        steps = shader.steps(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered frame"
    );

    FrameBuffer {
        width: frame.width,
        height: frame.height,
        pixels,
    }
}

fn to_rgba8(pixel: [f32; 4]) -> Rgba<u8> {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.999) as u8;
    Rgba([
        channel(pixel[0]),
        channel(pixel[1]),
        channel(pixel[2]),
        channel(pixel[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuroraError, ConfigError};

    #[test]
    fn buffer_is_row_major_with_opaque_alpha() {
        let buffer = render_frame(FrameContext::new(5, 3, 0.5), RenderParams::default()).unwrap();
        assert_eq!(buffer.pixels.len(), 15);
        assert!(buffer.pixels.iter().all(|p| p[3] == 1.0));
        assert!(buffer.pixel(5, 0).is_none());
        assert!(buffer.pixel(0, 3).is_none());
    }

    #[test]
    fn buffer_pixels_match_direct_shading() {
        let frame = FrameContext::new(6, 4, 1.25);
        let params = RenderParams::default();
        let shader = FrameShader::new(frame, params).unwrap();
        let buffer = render_with(&shader);
        for y in 0..4 {
            for x in 0..6 {
                let color = shader.shade(shader.pixel_center(x, y).unwrap());
                let pixel = buffer.pixel(x, y).unwrap();
                assert_eq!(pixel[0], color.x as f32);
                assert_eq!(pixel[1], color.y as f32);
                assert_eq!(pixel[2], color.z as f32);
            }
        }
    }

    #[test]
    fn top_row_maps_to_highest_fragment() {
        let shader = FrameShader::new(FrameContext::new(4, 4, 0.0), RenderParams::default())
            .unwrap();
        assert_eq!(shader.pixel_center(0, 0), Some(Vec2::new(0.5, 3.5)));
        assert_eq!(shader.pixel_center(3, 3), Some(Vec2::new(3.5, 0.5)));
    }

    #[test]
    fn pixel_center_outside_frame_is_none() {
        let shader = FrameShader::new(FrameContext::new(4, 3, 0.0), RenderParams::default())
            .unwrap();
        assert_eq!(shader.pixel_center(0, 3), None);
        assert_eq!(shader.pixel_center(4, 0), None);
        assert_eq!(shader.pixel_center(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn extreme_finite_params_stay_in_unit_range() {
        let params = RenderParams {
            intensity_multiplier: 1e308,
            contrast: 5.0,
            ..RenderParams::default()
        };
        let buffer = render_frame(FrameContext::new(4, 4, 0.0), params).unwrap();
        for pixel in &buffer.pixels {
            for channel in &pixel[..3] {
                assert!((0.0..=1.0).contains(channel), "channel {channel} out of range");
            }
        }
    }

    #[test]
    fn invalid_params_are_rejected_before_rendering() {
        let params = RenderParams {
            ray_march_steps: 0,
            ..RenderParams::default()
        };
        let err = render_frame(FrameContext::new(4, 4, 0.0), params).unwrap_err();
        assert!(matches!(
            err,
            AuroraError::InvalidConfiguration(ConfigError::InvalidRayMarchSteps(0))
        ));
    }

    #[test]
    fn one_by_one_frame_renders() {
        let buffer = render_frame(FrameContext::new(1, 1, 0.0), RenderParams::default()).unwrap();
        assert_eq!(buffer.pixels.len(), 1);
    }

    #[test]
    fn rgba8_conversion_saturates() {
        assert_eq!(to_rgba8([0.0, 0.5, 1.0, 1.0]), Rgba([0, 127, 255, 255]));
        assert_eq!(to_rgba8([-1.0, 2.0, 0.25, 1.0]), Rgba([0, 255, 63, 255]));
    }

    #[test]
    fn image_export_has_frame_dimensions() {
        let buffer = render_frame(FrameContext::new(7, 2, 0.0), RenderParams::default()).unwrap();
        let image = buffer.to_rgba_image();
        assert_eq!(image.dimensions(), (7, 2));
        assert_eq!(image.get_pixel(0, 0)[3], 255);
    }
}
