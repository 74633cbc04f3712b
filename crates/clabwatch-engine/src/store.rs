//! In-memory state store keyed by lab name and container actor id.
//!
//! The store is owned by the [`crate::engine::Engine`] instance and is only
//! ever mutated on the single event-processing path, so it needs no
//! interior locking. Interfaces and version counters are keyed by actor id
//! independently of lab grouping, which lets interface data arrive before
//! the owning container event.

use std::collections::{BTreeMap, HashMap};

use crate::model::{ContainerRecord, InterfaceRecord, InterfaceSnapshot, LabGroup};

/// Top-level mutable state: labs, per-container interfaces, and
/// per-container version counters.
#[derive(Debug, Default)]
pub struct LabStore {
    labs: HashMap<String, LabGroup>,
    lab_by_actor: HashMap<String, String>,
    interfaces: HashMap<String, BTreeMap<String, InterfaceRecord>>,
    versions: HashMap<String, u64>,
}

impl LabStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lab a known container belongs to.
    #[must_use]
    pub fn lab_of(&self, actor_id: &str) -> Option<&str> {
        self.lab_by_actor.get(actor_id).map(String::as_str)
    }

    /// Returns a mutable reference to a known container record.
    pub fn container_mut(&mut self, actor_id: &str) -> Option<&mut ContainerRecord> {
        let lab_name = self.lab_by_actor.get(actor_id)?;
        self.labs
            .get_mut(lab_name)?
            .containers
            .iter_mut()
            .find(|c| c.short_id == actor_id)
    }

    /// Returns the display name of a known container.
    #[must_use]
    pub fn container_name(&self, actor_id: &str) -> Option<&str> {
        let lab_name = self.lab_by_actor.get(actor_id)?;
        self.labs
            .get(lab_name)?
            .containers
            .iter()
            .find(|c| c.short_id == actor_id)
            .map(|c| c.name.as_str())
    }

    /// Inserts a new container into the named lab, creating the lab
    /// implicitly on first reference.
    ///
    /// The caller guarantees the actor id is not already tracked.
    pub fn insert_container(&mut self, lab_name: &str, record: ContainerRecord) {
        let _ = self
            .lab_by_actor
            .insert(record.short_id.clone(), lab_name.to_owned());
        self.labs
            .entry(lab_name.to_owned())
            .or_insert_with(|| LabGroup::new(lab_name.to_owned()))
            .containers
            .push(record);
    }

    /// Removes a container and everything keyed to it.
    ///
    /// The lab entry is dropped when its last container goes away, and the
    /// actor's interface collection and version counter are cleared so no
    /// stale state leaks. Returns `false` when the actor was unknown.
    pub fn remove_container(&mut self, actor_id: &str) -> bool {
        let Some(lab_name) = self.lab_by_actor.remove(actor_id) else {
            return false;
        };
        let mut removed = false;
        if let Some(lab) = self.labs.get_mut(&lab_name) {
            let before = lab.containers.len();
            lab.containers.retain(|c| c.short_id != actor_id);
            removed = lab.containers.len() < before;
            if lab.containers.is_empty() {
                let _ = self.labs.remove(&lab_name);
            }
        }
        let _ = self.interfaces.remove(actor_id);
        let _ = self.versions.remove(actor_id);
        removed
    }

    /// Pins the lab's topology file path, first-write-wins.
    pub fn hoist_topo_file(&mut self, lab_name: &str, topo_file: &str) {
        if let Some(lab) = self.labs.get_mut(lab_name) {
            if lab.topo_file.is_none() {
                lab.topo_file = Some(topo_file.to_owned());
            }
        }
    }

    /// Returns the interface record for `(actor_id, name)`, creating an
    /// empty one on first sight.
    pub fn interface_entry(&mut self, actor_id: &str, name: &str) -> &mut InterfaceRecord {
        self.interfaces
            .entry(actor_id.to_owned())
            .or_default()
            .entry(name.to_owned())
            .or_insert_with(|| InterfaceRecord::new(name.to_owned()))
    }

    /// Removes one interface from a container's collection.
    ///
    /// Returns `false` when nothing was tracked under that name.
    pub fn remove_interface(&mut self, actor_id: &str, name: &str) -> bool {
        let Some(map) = self.interfaces.get_mut(actor_id) else {
            return false;
        };
        let removed = map.remove(name).is_some();
        if map.is_empty() {
            let _ = self.interfaces.remove(actor_id);
        }
        removed
    }

    /// Increments the interface version counter for a container.
    pub fn bump_version(&mut self, actor_id: &str) {
        *self.versions.entry(actor_id.to_owned()).or_insert(0) += 1;
    }

    /// Snapshot of all labs and their containers.
    #[must_use]
    pub fn grouped_containers(&self) -> HashMap<String, LabGroup> {
        self.labs.clone()
    }

    /// Snapshot of one container's tracked interfaces.
    ///
    /// Returns an empty vector when the container has no tracked
    /// interfaces, otherwise exactly one group. `container_name` overrides
    /// the stored display name when given; unknown containers fall back to
    /// the actor id so interface-first ordering still yields usable output.
    #[must_use]
    pub fn interface_snapshot(
        &self,
        actor_id: &str,
        container_name: Option<&str>,
    ) -> Vec<InterfaceSnapshot> {
        let Some(map) = self.interfaces.get(actor_id) else {
            return Vec::new();
        };
        let name = container_name
            .or_else(|| self.container_name(actor_id))
            .unwrap_or(actor_id);
        vec![InterfaceSnapshot {
            container_name: name.to_owned(),
            interfaces: map.values().cloned().collect(),
        }]
    }

    /// Current interface version counter for a container (0 when unseen).
    #[must_use]
    pub fn interface_version(&self, actor_id: &str) -> u64 {
        self.versions.get(actor_id).copied().unwrap_or(0)
    }

    /// Clears all tracked state.
    pub fn reset(&mut self) {
        self.labs.clear();
        self.lab_by_actor.clear();
        self.interfaces.clear();
        self.versions.clear();
    }
}
