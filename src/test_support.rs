//! Shared fixtures for unit tests.

use rustc_hash::FxHashMap;

use crate::highlight::{HighlightAppearance, SubsetOverlay};
use crate::picking::EntityId;
use crate::scene::ModelId;

/// One call received by [`RecordingOverlay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OverlayCall {
    Create(ModelId, Vec<EntityId>),
    Clear(ModelId),
}

/// Overlay that records calls and tracks what would be on screen.
#[derive(Debug, Default)]
pub(crate) struct RecordingOverlay {
    pub calls: Vec<OverlayCall>,
    pub live: FxHashMap<ModelId, Vec<EntityId>>,
    /// Largest number of highlighted entities ever live at once.
    pub max_live: usize,
}

impl RecordingOverlay {
    pub fn live_entities(&self) -> usize {
        self.live.values().map(Vec::len).sum()
    }

    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, OverlayCall::Clear(_)))
            .count()
    }
}

impl SubsetOverlay for RecordingOverlay {
    fn create_or_replace(
        &mut self,
        model: ModelId,
        entities: &[EntityId],
        _appearance: &HighlightAppearance,
    ) {
        self.calls.push(OverlayCall::Create(model, entities.to_vec()));
        let _ = self.live.insert(model, entities.to_vec());
        self.max_live = self.max_live.max(self.live_entities());
    }

    fn clear(&mut self, model: ModelId, _appearance: &HighlightAppearance) {
        self.calls.push(OverlayCall::Clear(model));
        let _ = self.live.remove(&model);
    }
}
