//! Transition function from classified events to store mutations.
//!
//! Given the current store and one classified event, applies the next
//! state and reports what changed so the engine can notify subscribers.
//! Semantic anomalies (destroy of an unknown container, delete of an
//! untracked interface, garbage numeric fields) reduce to no-ops.

use std::collections::BTreeMap;

use clabwatch_common::constants::{LAB_NAME_ATTR, MGMT_INTERFACE_PREFIX, TOPO_FILE_ATTR, UNGROUPED_LAB};
use clabwatch_common::types::ContainerState;

use crate::event::{EventPayload, attr_str};
use crate::model::{ContainerRecord, NetworkSettings};
use crate::store::LabStore;

/// What one reduced event changed.
#[derive(Debug, Default)]
pub struct ReduceOutcome {
    /// The store was mutated; "data changed" subscribers should fire.
    pub data_changed: bool,
    /// The derived container state actually changed value.
    pub state_change: Option<(String, ContainerState)>,
}

impl ReduceOutcome {
    const UNCHANGED: Self = Self {
        data_changed: false,
        state_change: None,
    };
}

/// Applies a container lifecycle event.
pub fn apply_container(store: &mut LabStore, event: &EventPayload) -> ReduceOutcome {
    let Some(actor_id) = event.actor_id.as_deref() else {
        tracing::debug!(action = %event.action, "container event without actor id");
        return ReduceOutcome::UNCHANGED;
    };

    if event.action == "destroy" {
        let removed = store.remove_container(actor_id);
        if removed {
            tracing::debug!(actor_id, "container destroyed");
        }
        return ReduceOutcome {
            data_changed: removed,
            state_change: None,
        };
    }

    // Explicit state attribute wins over the action-implied state.
    let explicit = attr_str(&event.attributes, "state").and_then(ContainerState::parse);
    let derived = explicit.or_else(|| ContainerState::from_action(&event.action));

    if let Some(record) = store.container_mut(actor_id) {
        let previous = record.state.clone();
        let next = derived.unwrap_or_else(|| previous.clone());
        record.state = next.clone();
        record.merge_attributes(&event.attributes);

        let lab_name = store.lab_of(actor_id).unwrap_or(UNGROUPED_LAB).to_owned();
        if let Some(topo_file) = attr_str(&event.attributes, TOPO_FILE_ATTR) {
            store.hoist_topo_file(&lab_name, topo_file);
        }

        let state_change = (next != previous).then(|| (actor_id.to_owned(), next));
        return ReduceOutcome {
            data_changed: true,
            state_change,
        };
    }

    // Unseen container: without a derivable state there is nothing to
    // materialize.
    let Some(state) = derived else {
        tracing::debug!(actor_id, action = %event.action, "ignoring stateless event for unseen container");
        return ReduceOutcome::UNCHANGED;
    };

    let lab_name = attr_str(&event.attributes, LAB_NAME_ATTR)
        .unwrap_or(UNGROUPED_LAB)
        .to_owned();
    let mut record = ContainerRecord {
        short_id: actor_id.to_owned(),
        name: actor_id.to_owned(),
        state: state.clone(),
        network: NetworkSettings::default(),
        labels: BTreeMap::new(),
    };
    record.merge_attributes(&event.attributes);
    store.insert_container(&lab_name, record);
    if let Some(topo_file) = attr_str(&event.attributes, TOPO_FILE_ATTR) {
        store.hoist_topo_file(&lab_name, topo_file);
    }
    tracing::debug!(actor_id, lab = %lab_name, state = %state, "container tracked");

    ReduceOutcome {
        data_changed: true,
        state_change: Some((actor_id.to_owned(), state)),
    }
}

/// Applies an interface add/update/delete event.
pub fn apply_interface(store: &mut LabStore, event: &EventPayload) -> ReduceOutcome {
    let Some(actor_id) = event.actor_id.as_deref() else {
        tracing::debug!(action = %event.action, "interface event without actor id");
        return ReduceOutcome::UNCHANGED;
    };
    let Some(ifname) = attr_str(&event.attributes, "ifname") else {
        return ReduceOutcome::UNCHANGED;
    };
    // Management/overlay plumbing never materializes.
    if ifname.starts_with(MGMT_INTERFACE_PREFIX) {
        return ReduceOutcome::UNCHANGED;
    }

    if event.action == "delete" {
        let removed = store.remove_interface(actor_id, ifname);
        if removed {
            store.bump_version(actor_id);
        }
        return ReduceOutcome {
            data_changed: removed,
            state_change: None,
        };
    }

    store
        .interface_entry(actor_id, ifname)
        .merge_attributes(&event.attributes);
    store.bump_version(actor_id);
    ReduceOutcome {
        data_changed: true,
        state_change: None,
    }
}
