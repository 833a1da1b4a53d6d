//! Crate-level error types.

use std::fmt;

use crate::scene::ModelId;

/// Errors produced by the ifc-hover crate.
///
/// Picking itself never fails: empty space, unmapped geometry and degenerate
/// canvases all degrade to "nothing highlighted". These variants cover the
/// configuration and registration paths around it.
#[derive(Debug)]
pub enum HoverError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// Mesh buffers are inconsistent (index out of range, bad lengths).
    InvalidMesh(String),
    /// A model with this id is already registered with the scene.
    DuplicateModel(ModelId),
    /// The viewer session was re-entered while it was handling an event.
    SessionBusy,
}

impl fmt::Display for HoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidMesh(msg) => write!(f, "invalid mesh: {msg}"),
            Self::DuplicateModel(id) => {
                write!(f, "model {id} is already loaded")
            }
            Self::SessionBusy => write!(f, "viewer session is busy"),
        }
    }
}

impl std::error::Error for HoverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HoverError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
