use crossterm::event::Event;

use crate::backend::DocumentHandle;

/// Everything the event loop can be woken up by, apart from its own ticks
/// and render worker results.
#[derive(Debug)]
pub enum DomainEvent {
    Input(Event),
    InputError(String),
    DocumentLoaded(DocumentHandle),
    DocumentFailed(String),
}
