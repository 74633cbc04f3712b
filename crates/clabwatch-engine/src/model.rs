//! Record types materialized from the event stream.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use clabwatch_common::types::{ContainerState, LinkState};

use crate::event::{attr_str, attr_u32, attr_u64};

/// Management addressing of a container, parsed from `mgmt_ipv4` /
/// `mgmt_ipv6` attributes in CIDR form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// IPv4 management address.
    pub ipv4_addr: Option<String>,
    /// IPv4 prefix length.
    pub ipv4_prefix_len: Option<u8>,
    /// IPv6 management address.
    pub ipv6_addr: Option<String>,
    /// IPv6 prefix length.
    pub ipv6_prefix_len: Option<u8>,
}

/// Splits a CIDR string into address and prefix length.
///
/// A bare address (no `/`) keeps the prefix unset; a non-numeric prefix is
/// dropped rather than rejected.
fn split_cidr(cidr: &str) -> (Option<String>, Option<u8>) {
    let cidr = cidr.trim();
    if cidr.is_empty() {
        return (None, None);
    }
    match cidr.split_once('/') {
        Some((addr, prefix)) => {
            let addr = (!addr.is_empty()).then(|| addr.to_owned());
            (addr, prefix.parse().ok())
        }
        None => (Some(cidr.to_owned()), None),
    }
}

impl NetworkSettings {
    /// Merges `mgmt_ipv4` / `mgmt_ipv6` attributes into this record.
    ///
    /// Absent attributes leave the corresponding fields untouched.
    pub fn merge_attributes(&mut self, attributes: &Map<String, Value>) {
        if let Some(cidr) = attr_str(attributes, "mgmt_ipv4") {
            let (addr, prefix) = split_cidr(cidr);
            if addr.is_some() {
                self.ipv4_addr = addr;
                self.ipv4_prefix_len = prefix;
            }
        }
        if let Some(cidr) = attr_str(attributes, "mgmt_ipv6") {
            let (addr, prefix) = split_cidr(cidr);
            if addr.is_some() {
                self.ipv6_addr = addr;
                self.ipv6_prefix_len = prefix;
            }
        }
    }
}

/// One running/known container within a lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Stable identifier derived from the event actor id.
    pub short_id: String,
    /// Display name as reported by the event attributes.
    pub name: String,
    /// Current derived lifecycle state.
    pub state: ContainerState,
    /// Management addressing.
    pub network: NetworkSettings,
    /// String-valued event attributes, kept verbatim for display.
    pub labels: BTreeMap<String, String>,
}

impl ContainerRecord {
    /// Re-applies the mutable fields of a container event onto this record.
    ///
    /// `name`, network settings, and labels are merged; absent attributes
    /// never clear existing values.
    pub fn merge_attributes(&mut self, attributes: &Map<String, Value>) {
        if let Some(name) = attr_str(attributes, "name") {
            self.name = name.to_owned();
        }
        self.network.merge_attributes(attributes);
        for (key, value) in attributes {
            if let Value::String(s) = value {
                let _ = self.labels.insert(key.clone(), s.clone());
            }
        }
    }
}

/// A named collection of containers belonging to one lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabGroup {
    /// Lab name (empty for the ungrouped bucket).
    pub name: String,
    /// Topology file path, pinned by the first event that carries it.
    pub topo_file: Option<String>,
    /// Containers in arrival order.
    pub containers: Vec<ContainerRecord>,
}

impl LabGroup {
    /// Creates an empty lab group.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            topo_file: None,
            containers: Vec::new(),
        }
    }
}

/// One network interface on a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Interface name (e.g. `eth0`).
    pub name: String,
    /// Link type (e.g. `veth`).
    #[serde(rename = "type")]
    pub if_type: Option<String>,
    /// Link state.
    pub state: LinkState,
    /// MAC address.
    pub mac: Option<String>,
    /// Maximum transmission unit.
    pub mtu: Option<u32>,
    /// Kernel interface index.
    pub index: Option<u32>,
    /// Receive rate in bits per second.
    pub rx_bps: Option<u64>,
    /// Transmit rate in bits per second.
    pub tx_bps: Option<u64>,
    /// Receive rate in packets per second.
    pub rx_pps: Option<u64>,
    /// Transmit rate in packets per second.
    pub tx_pps: Option<u64>,
    /// Total received bytes.
    pub rx_bytes: Option<u64>,
    /// Total transmitted bytes.
    pub tx_bytes: Option<u64>,
    /// Total received packets.
    pub rx_packets: Option<u64>,
    /// Total transmitted packets.
    pub tx_packets: Option<u64>,
    /// Sampling interval the rates were computed over.
    pub stats_interval_seconds: Option<u64>,
}

impl InterfaceRecord {
    /// Creates an empty record for a newly-seen interface name.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            if_type: None,
            state: LinkState::Down,
            mac: None,
            mtu: None,
            index: None,
            rx_bps: None,
            tx_bps: None,
            rx_pps: None,
            tx_pps: None,
            rx_bytes: None,
            tx_bytes: None,
            rx_packets: None,
            tx_packets: None,
            stats_interval_seconds: None,
        }
    }

    /// Merges interface event attributes into this record.
    ///
    /// Fields present in the attributes are copied through; absent fields
    /// are left untouched, never zeroed.
    pub fn merge_attributes(&mut self, attributes: &Map<String, Value>) {
        if let Some(state) = attr_str(attributes, "state").and_then(LinkState::parse) {
            self.state = state;
        }
        if let Some(if_type) = attr_str(attributes, "type") {
            self.if_type = Some(if_type.to_owned());
        }
        if let Some(mac) = attr_str(attributes, "mac") {
            self.mac = Some(mac.to_owned());
        }
        if let Some(mtu) = attr_u32(attributes, "mtu") {
            self.mtu = Some(mtu);
        }
        if let Some(index) = attr_u32(attributes, "index") {
            self.index = Some(index);
        }

        let counters = [
            ("rx_bps", &mut self.rx_bps),
            ("tx_bps", &mut self.tx_bps),
            ("rx_pps", &mut self.rx_pps),
            ("tx_pps", &mut self.tx_pps),
            ("rx_bytes", &mut self.rx_bytes),
            ("tx_bytes", &mut self.tx_bytes),
            ("rx_packets", &mut self.rx_packets),
            ("tx_packets", &mut self.tx_packets),
            ("interval_seconds", &mut self.stats_interval_seconds),
        ];
        for (key, field) in counters {
            if let Some(value) = attr_u64(attributes, key) {
                *field = Some(value);
            }
        }
    }
}

/// Per-container interface group returned by the query surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSnapshot {
    /// Display name of the owning container (actor id when unknown).
    pub container_name: String,
    /// Tracked interfaces, ordered by name.
    pub interfaces: Vec<InterfaceRecord>,
}
