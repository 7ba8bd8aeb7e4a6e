//! End-to-end reference scenario: 4x4 frame, t = 0, default parameters.

use aurora_engine::cpu::FrameShader;
use aurora_engine::render::settings::DEFAULT_GRADIENT_HEX;
use aurora_engine::{render_frame, shade, FrameContext, GradientPalette, RenderParams, Vec2, Vec3};

const TOLERANCE: f64 = 1e-4;

// Captured from a reference evaluation of the shading pipeline in double
// precision.
const CENTER_RGB: [f64; 3] = [0.977_529_239_700_779, 0.617_234_405_120_692, 0.530_470_416_171_367];
const CORNER_RGB: [f64; 3] = [0.997_387_043_900_384, 0.897_949_567_609_125, 0.827_301_566_930_241];
const CORNER_LATE_RGB: [f64; 3] = [0.884_030_672_662_471, 0.577_807_185_876_010, 0.610_532_506_943_258];

fn default_params() -> RenderParams {
    RenderParams {
        gradient_palette: GradientPalette::from_hex(&DEFAULT_GRADIENT_HEX).unwrap(),
        ..RenderParams::default()
    }
}

fn assert_close(actual: Vec3, expected: [f64; 3]) {
    let actual = [actual.x, actual.y, actual.z];
    for (channel, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < TOLERANCE,
            "channel {channel}: got {a}, expected {e}"
        );
    }
}

#[test]
fn center_pixel_matches_reference() {
    let color = shade(Vec2::new(2.0, 2.0), FrameContext::new(4, 4, 0.0), default_params()).unwrap();
    assert_close(color, CENTER_RGB);
}

#[test]
fn off_center_fragments_match_reference() {
    let frame = FrameContext::new(4, 4, 0.0);
    let color = shade(Vec2::new(0.5, 0.5), frame, default_params()).unwrap();
    assert_close(color, CORNER_RGB);

    let later = FrameContext::new(4, 4, 2.5);
    let color = shade(Vec2::new(3.5, 1.5), later, default_params()).unwrap();
    assert_close(color, CORNER_LATE_RGB);
}

#[test]
fn bottom_left_buffer_pixel_matches_reference() {
    let buffer = render_frame(FrameContext::new(4, 4, 0.0), default_params()).unwrap();
    // Row 3 is the bottom row, whose center sits at fragment (0.5, 0.5).
    let pixel = buffer.pixel(0, 3).unwrap();
    assert_close(
        Vec3::new(pixel[0] as f64, pixel[1] as f64, pixel[2] as f64),
        CORNER_RGB,
    );
    assert_eq!(pixel[3], 1.0);
}

#[test]
fn shading_is_deterministic() {
    let shader = FrameShader::new(FrameContext::new(4, 4, 0.0), default_params()).unwrap();
    let frag = Vec2::new(2.0, 2.0);
    assert_eq!(shader.shade(frag), shader.shade(frag));

    let a = render_frame(FrameContext::new(9, 5, 3.25), default_params()).unwrap();
    let b = render_frame(FrameContext::new(9, 5, 3.25), default_params()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn output_channels_stay_in_unit_range() {
    let buffer = render_frame(FrameContext::new(12, 8, 7.0), default_params()).unwrap();
    for pixel in &buffer.pixels {
        for channel in pixel {
            assert!((0.0..=1.0).contains(channel));
        }
    }
}
