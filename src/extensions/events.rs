use serde::{Deserialize, Serialize};

/// Events the card raises towards its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CardEvent {
    /// The user activated the condition row; the host should open the entity's details.
    MoreInfo { entity_id: String },
}

/// Host-side observer of card events.
pub trait CardEventListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &CardEvent);
}
