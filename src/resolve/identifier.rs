//! Symbolic action and feedback names to concrete Companion identifiers.

use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::config::{Options, INTERNAL_CONNECTION};
use crate::modules::{
    internal_module, ModuleRegistry, ModuleStrategy, Resolution, TableModule,
    CONNECTION_DISABLE, CONNECTION_ENABLE, CONNECTION_HEALTH_FEEDBACK, CONNECTION_HEALTH_TARGET,
    ENABLE_FLAG, INSTANCE_OPTION,
};

use super::ConnectionTable;

/// Option naming the target connection of an internal health feedback.
const HEALTH_TARGET_OPTION: &str = "connection_id";

/// A fully concrete action or feedback reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntity {
    /// Opaque connection identity, or `internal`.
    pub connection_id: String,
    pub definition_id: String,
    pub options: Options,
}

/// Resolves symbolic entries against the module registry and a connection table.
#[derive(Debug)]
pub struct IdentifierResolver<'a> {
    registry: &'a ModuleRegistry,
    connections: &'a ConnectionTable,
    internal: TableModule,
}

impl<'a> IdentifierResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a ModuleRegistry, connections: &'a ConnectionTable) -> Self {
        Self {
            registry,
            connections,
            internal: internal_module(),
        }
    }

    /// Resolve one action of a button step.
    #[must_use]
    pub fn resolve_action(&self, connection: &str, name: &str, options: &Options) -> ResolvedEntity {
        if connection == INTERNAL_CONNECTION {
            let mut resolution = self.internal.resolve_action(name, options);
            if let Some(enable) = instance_control_flag(name) {
                self.target_instance(&mut resolution.options);
                resolution
                    .options
                    .insert(ENABLE_FLAG.to_string(), json!(enable.to_string()));
            }
            return self.entity(connection, resolution);
        }

        let resolution = match self.strategy_for(connection) {
            Some(strategy) => strategy.resolve_action(name, options),
            None => Resolution::passthrough(name, options),
        };
        self.entity(connection, resolution)
    }

    /// Resolve one feedback of a button.
    #[must_use]
    pub fn resolve_feedback(
        &self,
        connection: &str,
        name: &str,
        options: &Options,
    ) -> ResolvedEntity {
        if name == CONNECTION_HEALTH_FEEDBACK {
            return self.health_feedback(connection, options);
        }

        if connection == INTERNAL_CONNECTION {
            let resolution = self.internal.resolve_feedback(name, options);
            return self.entity(connection, resolution);
        }

        let resolution = match self.strategy_for(connection) {
            Some(strategy) => strategy.resolve_feedback(name, options),
            None => Resolution::passthrough(name, options),
        };
        self.entity(connection, resolution)
    }

    /// Opaque identity for a connection; unresolved names are kept verbatim.
    #[must_use]
    pub fn opaque_id<'s>(&'s self, connection: &'s str) -> &'s str {
        self.connections.opaque_id(connection).unwrap_or(connection)
    }

    fn strategy_for(&self, connection: &str) -> Option<&dyn ModuleStrategy> {
        let Some(module) = self.connections.module_of(connection) else {
            debug!(connection, "Connection not resolved, passing entry through");
            return None;
        };
        let strategy = self.registry.get(module);
        if strategy.is_none() {
            debug!(connection, module, "Module not in registry, passing entry through");
        }
        strategy
    }

    fn entity(&self, connection: &str, resolution: Resolution) -> ResolvedEntity {
        ResolvedEntity {
            connection_id: self.opaque_id(connection).to_string(),
            definition_id: resolution.concrete_id,
            options: resolution.options,
        }
    }

    /// Swap the connection name in `instance_id` for its opaque identity.
    fn target_instance(&self, options: &mut Options) {
        if let Some(Value::String(target)) = options.get(INSTANCE_OPTION) {
            let opaque = self.opaque_id(target).to_string();
            trace!(target = %target, %opaque, "Substituting instance control target");
            options.insert(INSTANCE_OPTION.to_string(), Value::String(opaque));
        }
    }

    /// `connection_ok` becomes Companion's built-in connection status feedback.
    fn health_feedback(&self, connection: &str, options: &Options) -> ResolvedEntity {
        let target = if connection == INTERNAL_CONNECTION {
            options
                .get(HEALTH_TARGET_OPTION)
                .and_then(Value::as_str)
                .unwrap_or(connection)
        } else {
            connection
        };
        let opaque = self.opaque_id(target);
        trace!(target, opaque, "Rewriting health feedback");

        let mut rewritten = Options::new();
        rewritten.insert(INSTANCE_OPTION.to_string(), json!(opaque));
        ResolvedEntity {
            connection_id: INTERNAL_CONNECTION.to_string(),
            definition_id: CONNECTION_HEALTH_TARGET.to_string(),
            options: rewritten,
        }
    }
}

/// Enable flag for the instance-control actions, `None` for everything else.
fn instance_control_flag(name: &str) -> Option<bool> {
    match name {
        CONNECTION_ENABLE => Some(true),
        CONNECTION_DISABLE => Some(false),
        _ => None,
    }
}
