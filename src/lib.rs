// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Pointer picking and hover highlighting for building-model viewers.
//!
//! The crate turns a cursor position over a canvas into a highlighted entity
//! of a loaded building model. A pointer event is projected through the
//! camera into a world-space ray, the ray is tested against every loaded
//! model's bounds tree, the nearest triangle is resolved to the entity that
//! owns it, and that entity is shown through a subset overlay drawn on top
//! of the unmodified model.
//!
//! # Key entry points
//!
//! - [`ViewerSession`] - scene, hover pipeline and event subscription
//! - [`scene::Scene`] - camera, lights, helpers and loaded models
//! - [`picking::Picker`] - ray to nearest entity
//! - [`highlight::Highlighter`] - the single-entity highlight state machine
//! - [`input::PointerHub`] - where the host publishes pointer events
//! - [`options::Options`] - runtime configuration
//!
//! Intersection, entity resolution and the overlay are traits
//! ([`picking::SpatialIntersector`], [`picking::EntityResolver`],
//! [`highlight::SubsetOverlay`]) so a host can swap any of them.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod session;
pub mod util;

#[cfg(test)]
mod test_support;

pub use error::HoverError;
pub use session::{Frame, ViewerSession};
