//! Observers and the registry that notifies them.

use std::cell::RefCell;
use std::rc::Rc;

use super::GameEvent;

/// Receives engine notifications.
///
/// Observers are called synchronously, in subscription order, after the
/// state change has been applied. They cannot reach back into the engine.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Subscribed observers. Empty is a normal state.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn GameObserver>>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer. It stays subscribed for the life of the registry.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` to every observer.
    pub fn notify(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }

    /// Deliver a batch of events in order.
    pub fn notify_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.notify(event);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Records every event it sees.
///
/// Clones share the same log, so a host can subscribe one clone and read
/// from another.
///
/// ```
/// use rust_santorini::core::RulesConfig;
/// use rust_santorini::engine::TurnEngine;
/// use rust_santorini::events::{EventLog, GameEvent};
///
/// let log = EventLog::new();
/// let mut engine = TurnEngine::new(RulesConfig::default()).unwrap();
/// engine.subscribe(log.clone());
/// engine.reset(RulesConfig::default()).unwrap();
///
/// let events = log.events();
/// assert_eq!(events.len(), 25);
/// assert!(events.iter().all(|e| matches!(e, GameEvent::CellCreated(_))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_closure_observer() {
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);

        let mut registry = ObserverRegistry::new();
        registry.subscribe(move |_: &GameEvent| *counter.borrow_mut() += 1);
        registry.notify(&GameEvent::DeploymentFinished);
        registry.notify(&GameEvent::NextPlayer { player: PlayerId::new(1) });

        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_event_log_clones_share_storage() {
        let log = EventLog::new();
        let mut registry = ObserverRegistry::new();
        registry.subscribe(log.clone());
        registry.subscribe(log.clone());

        registry.notify_all(&[GameEvent::DeploymentFinished]);

        assert_eq!(registry.len(), 2);
        assert_eq!(log.len(), 2);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = ObserverRegistry::new();
        registry.notify(&GameEvent::DeploymentFinished);
        assert!(registry.is_empty());
        assert_eq!(format!("{registry:?}"), "ObserverRegistry { observers: 0 }");
    }
}
