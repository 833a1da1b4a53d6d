use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Helpers", inline)]
#[serde(default)]
/// Non-pickable decoration geometry: ground grid and axes.
pub struct HelperOptions {
    /// Draw the ground grid.
    #[schemars(title = "Grid")]
    pub show_grid: bool,
    /// Grid edge length in world units.
    #[schemars(skip)]
    pub grid_size: f32,
    /// Number of grid cells along each edge.
    #[schemars(skip)]
    pub grid_divisions: u32,
    /// Draw the world axes.
    #[schemars(title = "Axes")]
    pub show_axes: bool,
    /// Axis line length in world units.
    #[schemars(skip)]
    pub axes_size: f32,
}

impl Default for HelperOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_size: 50.0,
            grid_divisions: 30,
            show_axes: true,
            axes_size: 1.0,
        }
    }
}
