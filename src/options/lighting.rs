use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient plus one directional light, passed through to the renderer.
pub struct LightingOptions {
    /// Shared light color (linear RGB).
    #[schemars(skip)]
    pub color: [f32; 3],
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Directional light intensity.
    #[schemars(title = "Sun", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Directional light position.
    #[schemars(skip)]
    pub directional_position: [f32; 3],
    /// Point the directional light aims at.
    #[schemars(skip)]
    pub directional_target: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.5,
            directional_intensity: 1.0,
            directional_position: [0.0, 10.0, 0.0],
            directional_target: [-5.0, 0.0, 0.0],
        }
    }
}
