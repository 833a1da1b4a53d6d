//! Hover highlight: the two-state machine and the subset overlay it drives.
//!
//! The [`Highlighter`] is the only writer of highlight state. It talks to a
//! [`SubsetOverlay`], which draws the chosen entity's triangles again with a
//! single shared [`HighlightAppearance`].

mod appearance;
mod overlay;
mod state;

pub use appearance::{HighlightAppearance, HighlightUniform, MaterialId};
pub use overlay::{Subset, SubsetOverlay, SubsetStore};
pub use state::{HighlightChange, HighlightState, Highlighter};
