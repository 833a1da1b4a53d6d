use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Highlight", inline)]
#[serde(default)]
/// Override appearance of the hovered entity.
pub struct HighlightOptions {
    /// Highlight color (linear RGB).
    #[schemars(skip)]
    pub color: [f32; 3],
    /// Highlight opacity.
    #[schemars(title = "Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub opacity: f32,
    /// Blend the highlight with the base render.
    #[schemars(skip)]
    pub transparent: bool,
    /// Depth-test the highlight. Off draws it through occluding geometry.
    #[schemars(title = "Depth Test")]
    pub depth_test: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            transparent: true,
            depth_test: false,
        }
    }
}
