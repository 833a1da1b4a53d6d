use super::{HighlightAppearance, SubsetOverlay};
use crate::picking::EntityRef;

/// What is currently emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    /// Nothing highlighted.
    #[default]
    Idle,
    /// Exactly one entity highlighted.
    Highlighting(EntityRef),
}

impl HighlightState {
    /// The highlighted entity, if any.
    #[must_use]
    pub fn entity(&self) -> Option<EntityRef> {
        match *self {
            Self::Idle => None,
            Self::Highlighting(entity) => Some(entity),
        }
    }

    /// Legacy encoding for shaders and hosts: the entity id, or `-1` when
    /// idle. Ids above `i32::MAX` saturate so they never read as idle.
    #[must_use]
    pub fn as_entity_i32(&self) -> i32 {
        self.entity()
            .map_or(-1, |e| i32::try_from(e.entity).unwrap_or(i32::MAX))
    }
}

/// Outcome of feeding one pick result to the [`Highlighter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightChange {
    /// State and overlay untouched.
    Unchanged,
    /// `Idle` → `Highlighting`.
    Created(EntityRef),
    /// Highlight moved from one entity to another.
    Replaced {
        /// Entity highlighted before.
        previous: EntityRef,
        /// Entity highlighted now.
        current: EntityRef,
    },
    /// `Highlighting` → `Idle`.
    Cleared(EntityRef),
}

impl HighlightChange {
    /// Whether the overlay was touched.
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Two-state hover highlight machine. Sole writer of [`HighlightState`] and,
/// through it, of the overlay's pre-selection subset.
#[derive(Debug, Clone)]
pub struct Highlighter {
    state: HighlightState,
    appearance: HighlightAppearance,
}

impl Highlighter {
    /// Start idle, highlighting with `appearance` from now on.
    #[must_use]
    pub fn new(appearance: HighlightAppearance) -> Self {
        Self {
            state: HighlightState::Idle,
            appearance,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> HighlightState {
        self.state
    }

    /// The shared override appearance.
    #[must_use]
    pub fn appearance(&self) -> &HighlightAppearance {
        &self.appearance
    }

    /// Apply one pick result.
    ///
    /// Re-picking the current entity does nothing. Moving to an entity in a
    /// different model clears the old model's subset first so the overlay
    /// never shows two entities.
    pub fn update(
        &mut self,
        target: Option<EntityRef>,
        overlay: &mut impl SubsetOverlay,
    ) -> HighlightChange {
        let change = match (self.state, target) {
            (HighlightState::Idle, None) => HighlightChange::Unchanged,
            (HighlightState::Highlighting(previous), Some(current))
                if previous == current =>
            {
                HighlightChange::Unchanged
            }
            (HighlightState::Idle, Some(current)) => {
                overlay.create_or_replace(
                    current.model,
                    &[current.entity],
                    &self.appearance,
                );
                HighlightChange::Created(current)
            }
            (HighlightState::Highlighting(previous), Some(current)) => {
                if previous.model != current.model {
                    overlay.clear(previous.model, &self.appearance);
                }
                overlay.create_or_replace(
                    current.model,
                    &[current.entity],
                    &self.appearance,
                );
                HighlightChange::Replaced { previous, current }
            }
            (HighlightState::Highlighting(previous), None) => {
                overlay.clear(previous.model, &self.appearance);
                HighlightChange::Cleared(previous)
            }
        };
        self.state =
            target.map_or(HighlightState::Idle, HighlightState::Highlighting);
        change
    }

    /// Drop any highlight. Same as feeding `None`.
    pub fn clear(
        &mut self,
        overlay: &mut impl SubsetOverlay,
    ) -> HighlightChange {
        self.update(None, overlay)
    }
}
