pub mod color;
pub mod settings;
pub mod shadow;
pub mod validation;
pub mod view;
pub mod volume;

pub use settings::{
    BlendMode, FrameContext, GradientPalette, RenderParams, MAX_MARCH_STEPS, PALETTE_STOPS,
};
pub use view::Camera;
