use tracing::debug;

use crate::error::{CardError, CardResult};
use crate::extensions::{CardEvent, CardEventListener};
use crate::render::{ChartRenderer, ChartSurface};

use super::WeatherCard;

impl<R: ChartRenderer, S: ChartSurface> WeatherCard<R, S> {
    /// Registers a listener with a unique identifier.
    pub fn register_listener(&mut self, listener: Box<dyn CardEventListener>) -> CardResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(CardError::InvalidConfig(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.listeners.iter().any(|entry| entry.id() == listener_id) {
            return Err(CardError::DuplicateListener(listener_id));
        }
        self.listeners.push(listener);
        Ok(())
    }

    /// Unregisters a listener by id. Returns `true` when removed.
    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        match self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            Some(position) => {
                self.listeners.remove(position);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The user activated the condition row.
    pub fn request_more_info(&mut self) -> Option<CardEvent> {
        let entity_id = self.config.as_ref()?.entity_id().to_owned();
        let event = CardEvent::MoreInfo { entity_id };
        self.emit(&event);
        Some(event)
    }

    fn emit(&mut self, event: &CardEvent) {
        debug!(?event, listeners = self.listeners.len(), "card event");
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}
