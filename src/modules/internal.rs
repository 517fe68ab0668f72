//! Companion's built-in action and feedback namespace (`internal`).

use serde_json::json;

use super::{ActionMapping, ModuleDescriptor, TableModule};

/// Symbolic action that enables a connection.
pub const CONNECTION_ENABLE: &str = "connection_enable";
/// Symbolic action that disables a connection.
pub const CONNECTION_DISABLE: &str = "connection_disable";
/// Option naming the connection an instance-control action targets, after remap.
pub const INSTANCE_OPTION: &str = "instance_id";
/// Flag injected into instance-control actions.
pub const ENABLE_FLAG: &str = "enable";

/// Pseudo-feedback asking whether a connection is healthy.
///
/// Never sent to the referenced module: it becomes [`CONNECTION_HEALTH_TARGET`].
pub const CONNECTION_HEALTH_FEEDBACK: &str = "connection_ok";
/// Built-in feedback reporting a connection's status.
pub const CONNECTION_HEALTH_TARGET: &str = "instance_status";

/// Descriptor of the built-in namespace.
///
/// It has no configuration; only the action and feedback tables are used.
#[must_use]
pub fn internal_module() -> TableModule {
    TableModule::new(ModuleDescriptor {
        name: "internal",
        action_table: [
            (
                "set_page",
                ActionMapping::fixed("button_page_set").with_remap(&[("page", "page")]),
            ),
            (
                "wait",
                ActionMapping::fixed("action_delay").with_remap(&[("duration_ms", "delay")]),
            ),
            (
                "run_shell_path",
                ActionMapping::fixed("shell_path")
                    .with_defaults(&[("timeout", json!(5000)), ("targetVariable", json!(""))])
                    .with_remap(&[("path", "path")]),
            ),
            (
                "button_step",
                ActionMapping::fixed("button_step").with_remap(&[("step", "step")]),
            ),
            (
                "set_variable",
                ActionMapping::fixed("custom_variable_set_value")
                    .with_remap(&[("variable", "name")]),
            ),
            (
                CONNECTION_ENABLE,
                ActionMapping::fixed("instance_control")
                    .with_remap(&[("connection_id", INSTANCE_OPTION)]),
            ),
            (
                CONNECTION_DISABLE,
                ActionMapping::fixed("instance_control")
                    .with_remap(&[("connection_id", INSTANCE_OPTION)]),
            ),
        ]
        .into_iter()
        .collect(),
        feedback_table: [
            (
                "variable_equals",
                ActionMapping::fixed("variable_value")
                    .with_defaults(&[("op", json!("eq"))])
                    .with_remap(&[("variable", "variable"), ("value", "value")]),
            ),
            (
                "button_step_is",
                ActionMapping::fixed("check_step").with_remap(&[("step", "step")]),
            ),
        ]
        .into_iter()
        .collect(),
        ..ModuleDescriptor::default()
    })
}
