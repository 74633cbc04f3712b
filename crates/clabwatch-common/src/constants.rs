//! System-wide constants for event classification and grouping.

/// Program invoked by default to produce the event stream.
pub const DEFAULT_EVENTS_PROGRAM: &str = "containerlab";

/// Default arguments passed to the event program.
pub const DEFAULT_EVENTS_ARGS: &[&str] = &["events", "--format", "json"];

/// Interfaces whose name starts with this prefix are management/overlay
/// plumbing and are never materialized in the state store.
pub const MGMT_INTERFACE_PREFIX: &str = "clab-";

/// Actions with this prefix (`exec_start:*`, `exec_die:*`) are noise and
/// are filtered at classification time.
pub const EXEC_ACTION_PREFIX: &str = "exec_";

/// Attribute key naming the lab a container belongs to.
pub const LAB_NAME_ATTR: &str = "containerlab";

/// Attribute key carrying the topology file path for a lab.
pub const TOPO_FILE_ATTR: &str = "clab-topo-file";

/// Lab key for containers whose events carry no lab-name attribute.
///
/// The empty string is deliberate: it cannot collide with a real lab name
/// (containerlab rejects empty names) and consumers can render it as an
/// "ungrouped" bucket.
pub const UNGROUPED_LAB: &str = "";

/// Application name used in CLI output.
pub const APP_NAME: &str = "clabwatch";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "clabwatch";
