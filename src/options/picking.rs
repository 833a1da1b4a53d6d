use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::picking::bvh::DEFAULT_LEAF_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
/// Hover picking behavior.
pub struct PickingOptions {
    /// Enable hover highlighting.
    #[schemars(title = "Hover Highlight")]
    pub hover: bool,
    /// Clear the highlight when the pointer leaves the canvas.
    #[schemars(title = "Clear On Leave")]
    pub clear_on_leave: bool,
    /// Maximum triangles per bounds-tree leaf, applied at model load.
    #[schemars(skip)]
    pub leaf_size: usize,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            hover: true,
            clear_on_leave: true,
            leaf_size: DEFAULT_LEAF_SIZE,
        }
    }
}
