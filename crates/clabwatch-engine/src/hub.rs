//! Fan-out of "data changed" and "container state changed" callbacks.
//!
//! A plain observer list: subscribers are invoked synchronously, in
//! registration order, at most once per mutating event. A panicking
//! subscriber is isolated so the remaining subscribers still run and the
//! current event completes. Callbacks must not register or dispose
//! subscriptions from within a notification.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use clabwatch_common::types::ContainerState;

/// Callback invoked after any accepted event mutated the state.
pub type DataChangedFn = Box<dyn FnMut() + Send>;

/// Callback invoked with `(actor_id, new_state)` when a container's
/// derived state actually changed value.
pub type StateChangedFn = Box<dyn FnMut(&str, &ContainerState) + Send>;

struct Registry<F> {
    next_id: u64,
    subscribers: Vec<(u64, F)>,
}

// Derived `Default` would demand `F: Default`, which boxed callbacks
// cannot satisfy.
impl<F> Default for Registry<F> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<F> Registry<F> {
    fn add(&mut self, callback: F) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    fn remove(&mut self, id: u64) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }
}

type SharedRegistry<F> = Arc<Mutex<Registry<F>>>;

fn lock_registry<F>(registry: &SharedRegistry<F>) -> std::sync::MutexGuard<'_, Registry<F>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Disposer handle for one subscription.
///
/// Disposing removes the subscriber; a second `dispose` is a no-op.
/// Dropping the handle without disposing leaves the subscriber registered
/// for the lifetime of the hub.
pub struct Subscription {
    disposer: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new<F: Send + 'static>(registry: &SharedRegistry<F>, id: u64) -> Self {
        let weak: Weak<Mutex<Registry<F>>> = Arc::downgrade(registry);
        Self {
            disposer: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    lock_registry(&registry).remove(id);
                }
            })),
        }
    }

    /// Removes the subscriber. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.disposer.is_none())
            .finish()
    }
}

/// Observer lists for both notification kinds.
#[derive(Default)]
pub struct NotificationHub {
    data_changed: SharedRegistry<DataChangedFn>,
    state_changed: SharedRegistry<StateChangedFn>,
}

impl NotificationHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a "data changed" subscriber.
    pub fn on_data_changed(&self, callback: DataChangedFn) -> Subscription {
        let id = lock_registry(&self.data_changed).add(callback);
        Subscription::new(&self.data_changed, id)
    }

    /// Registers a "container state changed" subscriber.
    pub fn on_container_state_changed(&self, callback: StateChangedFn) -> Subscription {
        let id = lock_registry(&self.state_changed).add(callback);
        Subscription::new(&self.state_changed, id)
    }

    /// Fires all "data changed" subscribers.
    pub fn notify_data_changed(&self) {
        let mut registry = lock_registry(&self.data_changed);
        for (id, callback) in &mut registry.subscribers {
            if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                tracing::warn!(subscriber = *id, "data-changed subscriber panicked");
            }
        }
    }

    /// Fires all "container state changed" subscribers.
    pub fn notify_state_changed(&self, actor_id: &str, state: &ContainerState) {
        let mut registry = lock_registry(&self.state_changed);
        for (id, callback) in &mut registry.subscribers {
            if catch_unwind(AssertUnwindSafe(|| callback(actor_id, state))).is_err() {
                tracing::warn!(subscriber = *id, "state-changed subscriber panicked");
            }
        }
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub").finish_non_exhaustive()
    }
}
