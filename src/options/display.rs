use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Render-loop settings handed to the host renderer.
pub struct DisplayOptions {
    /// Upper bound on the device pixel ratio used for the backbuffer.
    #[schemars(title = "Max Pixel Ratio", range(min = 0.5, max = 4.0), extend("step" = 0.25))]
    pub max_pixel_ratio: f32,
    /// Frame cap (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
    /// Transparent canvas background.
    #[schemars(skip)]
    pub alpha: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            target_fps: 0,
            alpha: true,
        }
    }
}

impl DisplayOptions {
    /// Clamp a device pixel ratio to the configured maximum.
    #[must_use]
    pub fn pixel_ratio(&self, device_ratio: f32) -> f32 {
        device_ratio.min(self.max_pixel_ratio)
    }
}
