//! Connection resolution: module defaults, declared config, and site overlay.
//!
//! Each connection's final config is built by [`merge_layers`] from, lowest
//! precedence first:
//! 1. the module's complete default config
//! 2. the declared `config` (friendly keys translated)
//! 3. the assigned machine's address (and MAC for modules with a hardware field)
//! 4. the overlay's `connection_settings` entry, minus its `module` key

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::{
    ConnectionSpec, Options, ParametersDoc, INTERNAL_CONNECTION, UNDETERMINED_MODULE,
};
use crate::identity::IdGenerator;
use crate::modules::{overlay, ModuleRegistry};

/// A connection as written into the export's `instances` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConnection {
    pub instance_type: String,
    pub label: String,
    pub config: Options,
    pub enabled: bool,
    #[serde(rename = "isFirstInit")]
    pub is_first_init: bool,
    #[serde(rename = "lastUpgradeIndex")]
    pub last_upgrade_index: i64,
    /// Index of the connection in the declaration list, including skipped ones.
    #[serde(rename = "sortOrder")]
    pub sort_order: usize,
}

/// Every resolved connection plus the lookup maps actions and feedbacks need.
#[derive(Debug, Clone)]
pub struct ConnectionTable {
    /// Opaque identity to resolved connection, in declaration order.
    pub instances: IndexMap<String, ResolvedConnection>,
    /// Author-facing connection name to opaque identity. Always maps
    /// `internal` to itself.
    pub id_map: IndexMap<String, String>,
    /// Author-facing connection name to effective module type.
    pub module_map: IndexMap<String, String>,
}

impl ConnectionTable {
    /// Table holding only the built-in `internal` mapping.
    #[must_use]
    pub fn new() -> Self {
        let mut id_map = IndexMap::new();
        id_map.insert(INTERNAL_CONNECTION.to_string(), INTERNAL_CONNECTION.to_string());
        Self {
            instances: IndexMap::new(),
            id_map,
            module_map: IndexMap::new(),
        }
    }

    /// Opaque identity for a connection name, if it was resolved.
    #[must_use]
    pub fn opaque_id(&self, connection: &str) -> Option<&str> {
        self.id_map.get(connection).map(String::as_str)
    }

    /// Effective module type for a connection name, if it was resolved.
    #[must_use]
    pub fn module_of(&self, connection: &str) -> Option<&str> {
        self.module_map.get(connection).map(String::as_str)
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge config layers; later layers win key by key.
///
/// Key order follows first appearance, so keys from the defaults layer keep
/// their position even when overridden.
#[must_use]
pub fn merge_layers(layers: &[Options]) -> Options {
    layers
        .iter()
        .fold(Options::new(), |merged, layer| overlay(&merged, layer))
}

/// Resolve declared connections against the registry and optional overlay.
///
/// Connections whose effective module is undetermined are skipped but still
/// consume a `sortOrder` slot.
#[instrument(skip_all, fields(declared = connections.len(), overlay = parameters.is_some()))]
pub fn resolve_connections(
    connections: &[ConnectionSpec],
    parameters: Option<&ParametersDoc>,
    registry: &ModuleRegistry,
    ids: &mut dyn IdGenerator,
) -> ConnectionTable {
    let mut table = ConnectionTable::new();

    for (index, spec) in connections.iter().enumerate() {
        let module = parameters
            .and_then(|params| params.module_override(&spec.id))
            .unwrap_or(spec.module.as_str());

        if module == UNDETERMINED_MODULE {
            debug!(connection = %spec.id, "Skipping connection with undetermined module");
            continue;
        }

        let config = build_config(spec, module, parameters, registry);
        let opaque = ids.next_id();
        debug!(connection = %spec.id, module, %opaque, keys = config.len(), "Resolved connection");

        table.id_map.insert(spec.id.clone(), opaque.clone());
        table.module_map.insert(spec.id.clone(), module.to_string());
        table.instances.insert(
            opaque,
            ResolvedConnection {
                instance_type: module.to_string(),
                label: spec.label.clone().unwrap_or_else(|| spec.id.clone()),
                config,
                enabled: spec.enabled,
                is_first_init: false,
                last_upgrade_index: -1,
                sort_order: index,
            },
        );
    }

    table
}

fn build_config(
    spec: &ConnectionSpec,
    module: &str,
    parameters: Option<&ParametersDoc>,
    registry: &ModuleRegistry,
) -> Options {
    let Some(strategy) = registry.get(module) else {
        // Nothing is known about the schema: keep what the author wrote.
        debug!(connection = %spec.id, module, "Module not in registry, keeping declared config");
        let mut layers = vec![spec.config.clone()];
        if let Some(params) = parameters {
            if params.machine_for(&spec.id).is_some() {
                warn!(
                    connection = %spec.id,
                    module, "Machine assignment ignored: module address field is unknown"
                );
            }
            layers.push(params.settings_for(&spec.id));
        }
        return merge_layers(&layers);
    };

    let descriptor = strategy.descriptor();
    let mut layers = vec![
        strategy.build_default_config(),
        descriptor.translate_fields(&spec.config),
    ];

    if let Some(params) = parameters {
        layers.push(machine_layer(spec, params, descriptor.address_field, descriptor.hardware_field));
        layers.push(descriptor.translate_fields(&params.settings_for(&spec.id)));
    }

    merge_layers(&layers)
}

/// Address (and MAC) of the machine assigned to a connection.
fn machine_layer(
    spec: &ConnectionSpec,
    params: &ParametersDoc,
    address_field: &str,
    hardware_field: Option<&str>,
) -> Options {
    let mut layer = Options::new();
    let Some((machine_name, machine)) = params.machine_for(&spec.id) else {
        return layer;
    };
    let Some(machine) = machine else {
        warn!(connection = %spec.id, machine = machine_name, "Assigned machine is not defined");
        return layer;
    };

    layer.insert(address_field.to_string(), Value::String(machine.ip.clone()));
    if let (Some(field), Some(mac)) = (hardware_field, &machine.mac) {
        layer.insert(field.to_string(), Value::String(mac.clone()));
    }
    layer
}
