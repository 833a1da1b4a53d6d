use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial camera placement and projection parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Look-at target the host's navigation orbits around.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Camera up vector. Must not be parallel to the view direction.
    #[schemars(skip)]
    pub up: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 2000.0,
            eye: [8.0, 13.0, 15.0],
            target: [-2.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}
