//! Hooks through which the card talks back to its host.

pub mod events;

pub use events::{CardEvent, CardEventListener};
