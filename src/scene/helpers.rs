use glam::Vec3;

use crate::options::{HelperOptions, LightingOptions};

// ---------------------------------------------------------------------------
// Lights
// ---------------------------------------------------------------------------

/// A scene light handed to the renderer as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light from every direction.
    Ambient {
        /// Linear RGB color.
        color: Vec3,
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Parallel light aimed from `position` toward `target`.
    Directional {
        /// Linear RGB color.
        color: Vec3,
        /// Intensity multiplier.
        intensity: f32,
        /// Light position.
        position: Vec3,
        /// Aim point.
        target: Vec3,
    },
}

impl Light {
    /// Ambient and directional lights described by `options`.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Vec<Self> {
        let color = Vec3::from_array(options.color);
        vec![
            Self::Ambient {
                color,
                intensity: options.ambient_intensity,
            },
            Self::Directional {
                color,
                intensity: options.directional_intensity,
                position: Vec3::from_array(options.directional_position),
                target: Vec3::from_array(options.directional_target),
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decoration geometry. Never part of the pick candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneHelper {
    /// Square grid in the XZ plane centered on the origin.
    Grid {
        /// Edge length.
        size: f32,
        /// Cells per edge.
        divisions: u32,
    },
    /// X/Y/Z axis lines from the origin, drawn over everything.
    Axes {
        /// Line length.
        size: f32,
    },
}

impl SceneHelper {
    /// Helpers enabled by `options`.
    #[must_use]
    pub fn from_options(options: &HelperOptions) -> Vec<Self> {
        let mut helpers = Vec::new();
        if options.show_grid && options.grid_divisions > 0 {
            helpers.push(Self::Grid {
                size: options.grid_size,
                divisions: options.grid_divisions,
            });
        }
        if options.show_axes {
            helpers.push(Self::Axes {
                size: options.axes_size,
            });
        }
        helpers
    }

    /// Whether the renderer should depth-test this helper.
    #[must_use]
    pub fn depth_test(&self) -> bool {
        matches!(self, Self::Grid { .. })
    }

    /// Line segments making up the helper.
    #[must_use]
    pub fn line_segments(&self) -> Vec<[Vec3; 2]> {
        match *self {
            Self::Grid { size, divisions } => {
                let half = size * 0.5;
                let step = size / divisions as f32;
                (0..=divisions)
                    .flat_map(|i| {
                        let k = -half + i as f32 * step;
                        [
                            [Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k)],
                            [Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half)],
                        ]
                    })
                    .collect()
            }
            Self::Axes { size } => vec![
                [Vec3::ZERO, Vec3::X * size],
                [Vec3::ZERO, Vec3::Y * size],
                [Vec3::ZERO, Vec3::Z * size],
            ],
        }
    }
}
