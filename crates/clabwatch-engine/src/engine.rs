//! Engine facade: ingest → reduce → notify, plus the read-only query
//! surface consumed by UI layers.

use std::collections::HashMap;

use crate::event::{ClassifiedEvent, classify_line};
use crate::hub::{DataChangedFn, NotificationHub, StateChangedFn, Subscription};
use crate::model::{InterfaceSnapshot, LabGroup};
use crate::reducer::{self, ReduceOutcome};
use crate::store::LabStore;

/// Live lab state engine.
///
/// Owns the state store and the notification hub; constructed once per
/// host process. Lines are processed strictly one at a time — classify,
/// reduce, notify — so subscribers always observe a consistent state and
/// two events for the same container are never reduced concurrently.
#[derive(Debug, Default)]
pub struct Engine {
    store: LabStore,
    hub: NotificationHub,
}

impl Engine {
    /// Creates an engine with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line from the event stream into the engine.
    ///
    /// This is the single ingestion entry point, used both by the stream
    /// adapter and by tests. Malformed or irrelevant lines are discarded
    /// silently; this never panics on bad input.
    pub fn ingest_line(&mut self, line: &str) {
        let outcome = match classify_line(line) {
            Some(ClassifiedEvent::Container(payload)) => {
                reducer::apply_container(&mut self.store, &payload)
            }
            Some(ClassifiedEvent::Interface(payload)) => {
                reducer::apply_interface(&mut self.store, &payload)
            }
            None => return,
        };
        self.deliver(outcome);
    }

    fn deliver(&mut self, outcome: ReduceOutcome) {
        if let Some((actor_id, state)) = &outcome.state_change {
            tracing::debug!(actor_id, state = %state, "container state changed");
            self.hub.notify_state_changed(actor_id, state);
        }
        if outcome.data_changed {
            self.hub.notify_data_changed();
        }
    }

    /// Registers a callback fired after any accepted event mutates state.
    pub fn on_data_changed(&self, callback: DataChangedFn) -> Subscription {
        self.hub.on_data_changed(callback)
    }

    /// Registers a callback fired with `(actor_id, new_state)` when a
    /// container's derived state changes value.
    pub fn on_container_state_changed(&self, callback: StateChangedFn) -> Subscription {
        self.hub.on_container_state_changed(callback)
    }

    /// Snapshot of all labs and their containers.
    ///
    /// The returned structure is a deep copy; callers can hold or mutate
    /// it freely without corrupting engine state.
    #[must_use]
    pub fn grouped_containers(&self) -> HashMap<String, LabGroup> {
        self.store.grouped_containers()
    }

    /// Snapshot of one container's tracked interfaces (length 0 or 1).
    #[must_use]
    pub fn interface_snapshot(
        &self,
        actor_id: &str,
        container_name: Option<&str>,
    ) -> Vec<InterfaceSnapshot> {
        self.store.interface_snapshot(actor_id, container_name)
    }

    /// Monotonic interface version counter for a container; 0 for
    /// never-seen actor ids.
    #[must_use]
    pub fn interface_version(&self, actor_id: &str) -> u64 {
        self.store.interface_version(actor_id)
    }

    /// Clears all tracked state. Subscriptions persist across resets.
    pub fn reset(&mut self) {
        self.store.reset();
        tracing::debug!("engine state reset");
    }
}
