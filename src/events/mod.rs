//! Engine notifications.
//!
//! - `GameEvent`: what happened, with the values after the change
//! - `GameObserver`: anything that wants to hear about it
//! - `ObserverRegistry`: the engine's subscriber list
//! - `EventLog`: an observer that records everything, for hosts and tests
//!
//! ## Design Philosophy
//!
//! Notifications are emitted only after a request has fully committed. A
//! rejected request emits nothing, so observers never see half an action.

mod event;
mod observer;

pub use event::GameEvent;
pub use observer::{EventLog, GameObserver, ObserverRegistry};
