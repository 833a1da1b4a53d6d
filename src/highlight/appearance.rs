use crate::options::HighlightOptions;

/// Key for an override material. Overlays keep one subset per
/// (model, material) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Material used for hover pre-selection.
    pub const PRESELECT: Self = Self(0);
}

/// Override appearance for highlighted geometry.
///
/// One instance is created per session and reused for every highlight
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightAppearance {
    /// Overlay key.
    pub material: MaterialId,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Alpha-blend with the base render.
    pub transparent: bool,
    /// Depth-test against the base render.
    pub depth_test: bool,
}

impl HighlightAppearance {
    /// Pre-selection appearance from options.
    #[must_use]
    pub fn from_options(options: &HighlightOptions) -> Self {
        Self {
            material: MaterialId::PRESELECT,
            color: options.color,
            opacity: options.opacity.clamp(0.0, 1.0),
            transparent: options.transparent,
            depth_test: options.depth_test,
        }
    }

    /// GPU-ready form of this appearance.
    #[must_use]
    pub fn uniform(&self) -> HighlightUniform {
        HighlightUniform {
            color: [self.color[0], self.color[1], self.color[2], self.opacity],
            flags: u32::from(self.transparent)
                | (u32::from(self.depth_test) << 1),
            _pad: [0; 3],
        }
    }
}

impl Default for HighlightAppearance {
    fn default() -> Self {
        Self::from_options(&HighlightOptions::default())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Uniform block for the overlay pass.
pub struct HighlightUniform {
    /// RGBA color; alpha is the opacity.
    pub color: [f32; 4],
    /// Bit 0: transparent. Bit 1: depth test.
    pub flags: u32,
    /// Padding to 16-byte alignment.
    pub(crate) _pad: [u32; 3],
}
