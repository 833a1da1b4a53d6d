//! Pointer input: event types and the subscription hub the viewer session
//! listens on.

/// Platform-agnostic input events.
pub mod event;
/// Explicit event subscriptions.
pub mod hub;

pub use event::InputEvent;
pub use hub::{PointerHub, Subscription, SubscriptionId};
