//! Formatted output helpers for CLI commands.

use std::collections::HashMap;

use clabwatch_common::constants::UNGROUPED_LAB;
use clabwatch_engine::Engine;
use clabwatch_engine::model::LabGroup;

/// Returns the display name for a lab key.
#[must_use]
pub fn lab_display_name(name: &str) -> &str {
    if name == UNGROUPED_LAB { "(ungrouped)" } else { name }
}

/// Formats a bit rate into a human-readable string (e.g., "1.5 Mbps").
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_bps(bps: u64) -> String {
    const KBPS: u64 = 1_000;
    const MBPS: u64 = KBPS * 1_000;
    const GBPS: u64 = MBPS * 1_000;

    if bps >= GBPS {
        format!("{:.1} Gbps", bps as f64 / GBPS as f64)
    } else if bps >= MBPS {
        format!("{:.1} Mbps", bps as f64 / MBPS as f64)
    } else if bps >= KBPS {
        format!("{:.1} Kbps", bps as f64 / KBPS as f64)
    } else {
        format!("{bps} bps")
    }
}

/// Prints all labs and their containers in a tabular format.
pub fn print_lab_table(labs: &HashMap<String, LabGroup>) {
    if labs.is_empty() {
        println!("No labs tracked.");
        return;
    }

    println!(
        "{:<20} {:<15} {:<14} {:<10} {:<18}",
        "LAB", "NAME", "CONTAINER ID", "STATE", "MGMT IPV4"
    );
    let mut names: Vec<&String> = labs.keys().collect();
    names.sort();
    for name in names {
        let lab = &labs[name];
        for container in &lab.containers {
            println!(
                "{:<20} {:<15} {:<14} {:<10} {:<18}",
                lab_display_name(name),
                container.name,
                container.short_id,
                container.state,
                container
                    .network
                    .ipv4_addr
                    .as_deref()
                    .unwrap_or("-"),
            );
        }
    }
}

/// Prints the tracked interfaces of every container, grouped per lab.
///
/// Containers without tracked interfaces are skipped.
pub fn print_interface_table(engine: &Engine, labs: &HashMap<String, LabGroup>) {
    let mut names: Vec<&String> = labs.keys().collect();
    names.sort();

    let mut printed_header = false;
    for name in names {
        for container in &labs[name].containers {
            for group in engine.interface_snapshot(&container.short_id, Some(&container.name)) {
                for iface in &group.interfaces {
                    if !printed_header {
                        println!(
                            "\n{:<15} {:<12} {:<6} {:<7} {:<12} {:<12}",
                            "NAME", "INTERFACE", "STATE", "MTU", "RX", "TX"
                        );
                        printed_header = true;
                    }
                    println!(
                        "{:<15} {:<12} {:<6} {:<7} {:<12} {:<12}",
                        group.container_name,
                        iface.name,
                        iface.state,
                        iface.mtu.map_or_else(|| "-".to_string(), |m| m.to_string()),
                        iface.rx_bps.map_or_else(|| "-".to_string(), format_bps),
                        iface.tx_bps.map_or_else(|| "-".to_string(), format_bps),
                    );
                }
            }
        }
    }
}
