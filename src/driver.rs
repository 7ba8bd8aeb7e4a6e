use tracing::warn;

use crate::cpu::{render_with, FrameBuffer, FrameShader};
use crate::error::{ConfigError, Result};
use crate::render::validation::{validate_frame, validate_params};
use crate::render::{FrameContext, RenderParams};

/// Fixed-step clock. Time only moves forward until [`FrameClock::restart`].
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start_time: f64,
    fps: f64,
    frame: u64,
}

impl FrameClock {
    pub fn new(start_time: f64, fps: f64) -> Result<Self, ConfigError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(fps));
        }
        if !start_time.is_finite() || start_time < 0.0 {
            return Err(ConfigError::InvalidElapsedTime(start_time));
        }
        Ok(Self {
            start_time,
            fps,
            frame: 0,
        })
    }

    /// Elapsed time for the next frame, then advances.
    pub fn tick(&mut self) -> f64 {
        let time = self.peek();
        self.frame += 1;
        time
    }

    pub fn peek(&self) -> f64 {
        self.start_time + (self.frame as f64 / self.fps)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    pub fn restart(&mut self) {
        self.frame = 0;
    }
}

/// Owns the render loop state: a clock and the current parameter snapshot.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    width: u32,
    height: u32,
    clock: FrameClock,
    params: RenderParams,
}

impl AnimationDriver {
    pub fn new(width: u32, height: u32, clock: FrameClock, params: RenderParams) -> Result<Self> {
        validate_frame(&FrameContext::new(width, height, clock.peek()))?;
        validate_params(&params)?;
        Ok(Self {
            width,
            height,
            clock,
            params,
        })
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Replaces the snapshot used from the next frame on. A rejected update
    /// keeps the previous parameters.
    pub fn set_params(&mut self, params: RenderParams) -> Result<()> {
        if let Err(error) = validate_params(&params) {
            warn!(%error, "rejected parameter update, keeping previous snapshot");
            return Err(error.into());
        }
        self.params = params;
        Ok(())
    }

    pub fn restart(&mut self) {
        self.clock.restart();
    }

    pub fn frame_index(&self) -> u64 {
        self.clock.frame_index()
    }

    /// Renders the next frame with a by-value copy of the current params.
    pub fn next_frame(&mut self) -> Result<FrameBuffer> {
        let frame = FrameContext::new(self.width, self.height, self.clock.peek());
        let shader = FrameShader::new(frame, self.params)?;
        self.clock.tick();
        Ok(render_with(&shader))
    }
}
