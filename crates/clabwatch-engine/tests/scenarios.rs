//! End-to-end scenario tests for the ingestion engine.
//!
//! Every test drives the public `Engine` API through `ingest_line`, the
//! same entry point production uses, and observes state exclusively
//! through the query surface and subscriptions.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use clabwatch_common::types::ContainerState;
use clabwatch_engine::Engine;

fn container_line(action: &str, actor_id: &str, attrs_json: &str) -> String {
    format!(
        r#"{{"type":"container","action":"{action}","actor_id":"{actor_id}","attributes":{attrs_json}}}"#
    )
}

fn interface_line(action: &str, actor_id: &str, attrs_json: &str) -> String {
    format!(
        r#"{{"type":"interface","action":"{action}","actor_id":"{actor_id}","attributes":{attrs_json}}}"#
    )
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn scenario_start_event_yields_running_container() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line(
        "start",
        "c1",
        r#"{"containerlab":"lab1","name":"n1","state":"running"}"#,
    ));

    let labs = engine.grouped_containers();
    assert_eq!(labs.len(), 1);
    let lab = labs.get("lab1").expect("lab1 should exist");
    assert_eq!(lab.containers.len(), 1);
    assert_eq!(lab.containers[0].name, "n1");
    assert_eq!(lab.containers[0].state, ContainerState::Running);
}

#[test]
fn scenario_create_then_destroy_empties_state() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line(
        "create",
        "c1",
        r#"{"containerlab":"lab1","state":"created"}"#,
    ));
    engine.ingest_line(&container_line("destroy", "c1", "{}"));

    assert!(engine.grouped_containers().is_empty());
}

#[test]
fn scenario_interface_update_is_queryable() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line(
        "start",
        "c1",
        r#"{"containerlab":"lab1","name":"n1"}"#,
    ));
    engine.ingest_line(&interface_line(
        "update",
        "c1",
        r#"{"ifname":"eth0","state":"up","rx_bps":1000}"#,
    ));

    let snapshot = engine.interface_snapshot("c1", Some("n1"));
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].container_name, "n1");
    assert_eq!(snapshot[0].interfaces.len(), 1);
    assert_eq!(snapshot[0].interfaces[0].name, "eth0");
    assert_eq!(snapshot[0].interfaces[0].rx_bps, Some(1000));
}

#[test]
fn scenario_management_interface_never_materializes() {
    let mut engine = Engine::new();
    engine.ingest_line(&interface_line(
        "update",
        "c1",
        r#"{"ifname":"clab-mgmt-eth0","state":"up"}"#,
    ));

    assert!(engine.interface_snapshot("c1", None).is_empty());
    assert_eq!(engine.interface_version("c1"), 0);
}

#[test]
fn scenario_pause_unpause_state_sequence() {
    let mut engine = Engine::new();
    let seen: Arc<Mutex<Vec<ContainerState>>> = Arc::new(Mutex::new(Vec::new()));

    let s = Arc::clone(&seen);
    let _sub = engine.on_container_state_changed(Box::new(move |_, state| {
        s.lock().expect("lock").push(state.clone());
    }));

    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));
    engine.ingest_line(&container_line("pause", "c1", "{}"));
    engine.ingest_line(&container_line("unpause", "c1", "{}"));

    assert_eq!(
        *seen.lock().expect("lock"),
        vec![
            ContainerState::Running,
            ContainerState::Paused,
            ContainerState::Running,
        ]
    );
}

// ── Properties ───────────────────────────────────────────────────────

#[test]
fn destroy_is_idempotent() {
    let mut engine = Engine::new();
    let notifications = Arc::new(AtomicUsize::new(0));

    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));

    let n = Arc::clone(&notifications);
    let _sub = engine.on_data_changed(Box::new(move || {
        let _ = n.fetch_add(1, Ordering::SeqCst);
    }));

    engine.ingest_line(&container_line("destroy", "c1", "{}"));
    let after_first = engine.grouped_containers();
    let fired_once = notifications.load(Ordering::SeqCst);

    engine.ingest_line(&container_line("destroy", "c1", "{}"));
    assert_eq!(engine.grouped_containers(), after_first);
    assert_eq!(notifications.load(Ordering::SeqCst), fired_once);
}

#[test]
fn lab_exists_iff_it_has_containers() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));
    engine.ingest_line(&container_line("start", "c2", r#"{"containerlab":"lab1"}"#));

    engine.ingest_line(&container_line("destroy", "c1", "{}"));
    assert!(engine.grouped_containers().contains_key("lab1"));

    engine.ingest_line(&container_line("destroy", "c2", "{}"));
    assert!(!engine.grouped_containers().contains_key("lab1"));
}

#[test]
fn explicit_state_attribute_wins_over_action() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line(
        "die",
        "c1",
        r#"{"containerlab":"lab1","state":"paused"}"#,
    ));
    assert_eq!(
        engine.grouped_containers()["lab1"].containers[0].state,
        ContainerState::Paused
    );
}

#[test]
fn version_counter_strictly_increases_per_accepted_event() {
    let mut engine = Engine::new();
    assert_eq!(engine.interface_version("c1"), 0);

    engine.ingest_line(&interface_line("update", "c1", r#"{"ifname":"eth0"}"#));
    assert_eq!(engine.interface_version("c1"), 1);

    engine.ingest_line(&interface_line("update", "c1", r#"{"ifname":"eth0","mtu":1500}"#));
    assert_eq!(engine.interface_version("c1"), 2);

    // Filtered and no-op events leave the counter alone.
    engine.ingest_line(&interface_line("update", "c1", r#"{"ifname":"clab-x"}"#));
    engine.ingest_line(&interface_line("delete", "c1", r#"{"ifname":"eth9"}"#));
    assert_eq!(engine.interface_version("c1"), 2);

    engine.ingest_line(&interface_line("delete", "c1", r#"{"ifname":"eth0"}"#));
    assert_eq!(engine.interface_version("c1"), 3);
    assert!(engine.interface_snapshot("c1", None).is_empty());
}

#[test]
fn malformed_input_never_changes_state() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));
    let before = engine.grouped_containers();

    for line in [
        "",
        "   ",
        "not json",
        r#"{"type":"container","action":"start"}"#,
        r#"{"action":"start","actor_id":"c9"}"#,
        r#"{"type":"container","action":"exec_start: sh","actor_id":"c9"}"#,
    ] {
        engine.ingest_line(line);
    }
    assert_eq!(engine.grouped_containers(), before);
}

#[test]
fn state_change_fires_exactly_once_per_actual_change() {
    let mut engine = Engine::new();
    let changes = Arc::new(AtomicUsize::new(0));

    let c = Arc::clone(&changes);
    let _sub = engine.on_container_state_changed(Box::new(move |_, _| {
        let _ = c.fetch_add(1, Ordering::SeqCst);
    }));

    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    // Second start on an already-running container: no state change.
    engine.ingest_line(&container_line("start", "c1", "{}"));
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    engine.ingest_line(&container_line("stop", "c1", "{}"));
    assert_eq!(changes.load(Ordering::SeqCst), 2);
}

// ── Edge cases & documented decisions ────────────────────────────────

#[test]
fn ungrouped_bucket_collects_unlabeled_containers() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line("start", "c1", r#"{"name":"loose"}"#));

    let labs = engine.grouped_containers();
    let lab = labs.get("").expect("ungrouped bucket should exist");
    assert_eq!(lab.containers[0].name, "loose");
}

#[test]
fn topo_file_is_first_write_wins() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line(
        "start",
        "c1",
        r#"{"containerlab":"lab1","clab-topo-file":"/labs/first.clab.yml"}"#,
    ));
    engine.ingest_line(&container_line(
        "start",
        "c2",
        r#"{"containerlab":"lab1","clab-topo-file":"/labs/second.clab.yml"}"#,
    ));

    assert_eq!(
        engine.grouped_containers()["lab1"].topo_file.as_deref(),
        Some("/labs/first.clab.yml")
    );
}

#[test]
fn stats_update_preserves_structural_fields() {
    let mut engine = Engine::new();
    engine.ingest_line(&interface_line(
        "update",
        "c1",
        r#"{"ifname":"eth0","state":"up","mac":"aa:bb:cc:dd:ee:ff","mtu":9000}"#,
    ));
    engine.ingest_line(&interface_line(
        "update",
        "c1",
        r#"{"ifname":"eth0","rx_bps":5000,"tx_bps":2500,"interval_seconds":5}"#,
    ));

    let snapshot = engine.interface_snapshot("c1", None);
    let iface = &snapshot[0].interfaces[0];
    assert_eq!(iface.mac.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
    assert_eq!(iface.mtu, Some(9000));
    assert_eq!(iface.rx_bps, Some(5000));
    assert_eq!(iface.tx_bps, Some(2500));
    assert_eq!(iface.stats_interval_seconds, Some(5));
}

#[test]
fn interface_data_may_arrive_before_the_container() {
    let mut engine = Engine::new();
    engine.ingest_line(&interface_line("update", "c1", r#"{"ifname":"eth0","state":"up"}"#));
    engine.ingest_line(&container_line(
        "start",
        "c1",
        r#"{"containerlab":"lab1","name":"n1"}"#,
    ));

    let snapshot = engine.interface_snapshot("c1", None);
    assert_eq!(snapshot[0].container_name, "n1");
    assert_eq!(snapshot[0].interfaces[0].name, "eth0");
}

#[test]
fn destroying_a_container_clears_its_interfaces() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));
    engine.ingest_line(&interface_line("update", "c1", r#"{"ifname":"eth0"}"#));
    assert_eq!(engine.interface_version("c1"), 1);

    engine.ingest_line(&container_line("destroy", "c1", "{}"));
    assert!(engine.interface_snapshot("c1", None).is_empty());
    assert_eq!(engine.interface_version("c1"), 0);
}

#[test]
fn network_settings_are_parsed_from_cidr_attributes() {
    let mut engine = Engine::new();
    engine.ingest_line(&container_line(
        "start",
        "c1",
        r#"{"containerlab":"lab1","mgmt_ipv4":"172.20.20.2/24","mgmt_ipv6":"2001:db8::2/64"}"#,
    ));

    let labs = engine.grouped_containers();
    let net = &labs["lab1"].containers[0].network;
    assert_eq!(net.ipv4_addr.as_deref(), Some("172.20.20.2"));
    assert_eq!(net.ipv4_prefix_len, Some(24));
    assert_eq!(net.ipv6_addr.as_deref(), Some("2001:db8::2"));
    assert_eq!(net.ipv6_prefix_len, Some(64));
}

#[test]
fn panicking_subscriber_does_not_stall_ingestion() {
    let mut engine = Engine::new();
    let count = Arc::new(AtomicUsize::new(0));

    let _bad = engine.on_data_changed(Box::new(|| panic!("subscriber bug")));
    let c = Arc::clone(&count);
    let _good = engine.on_data_changed(Box::new(move || {
        let _ = c.fetch_add(1, Ordering::SeqCst);
    }));

    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));
    engine.ingest_line(&container_line("stop", "c1", "{}"));

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(
        engine.grouped_containers()["lab1"].containers[0].state,
        ContainerState::Exited
    );
}

#[test]
fn disposed_subscription_stops_and_double_dispose_is_noop() {
    let mut engine = Engine::new();
    let count = Arc::new(AtomicUsize::new(0));

    let c = Arc::clone(&count);
    let mut sub = engine.on_data_changed(Box::new(move || {
        let _ = c.fetch_add(1, Ordering::SeqCst);
    }));

    engine.ingest_line(&container_line("start", "c1", r#"{"containerlab":"lab1"}"#));
    sub.dispose();
    sub.dispose();
    engine.ingest_line(&container_line("stop", "c1", "{}"));

    assert_eq!(count.load(Ordering::SeqCst), 1);
}
