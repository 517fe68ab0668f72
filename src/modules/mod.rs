//! Catalogue of Companion modules this tool knows how to target.
//!
//! Each module type is described once by a [`ModuleDescriptor`]: where its
//! network address lives, the full default configuration Companion expects,
//! and the tables translating symbolic action and feedback names into the
//! module's own identifiers. Behavior that cannot be expressed as a table
//! lookup lives in a [`ModuleStrategy`] implementation selected by module tag.

mod catalog;
mod internal;
mod mixer;
mod switcher;

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::Options;

pub use internal::{
    internal_module, CONNECTION_DISABLE, CONNECTION_ENABLE, CONNECTION_HEALTH_FEEDBACK,
    CONNECTION_HEALTH_TARGET, ENABLE_FLAG, INSTANCE_OPTION,
};
pub use mixer::{ChannelCoordinate, MixingConsole};
pub use switcher::VideoSwitcher;

/// How a symbolic name maps to a concrete Companion identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConcreteId {
    /// Fixed identifier.
    Static(&'static str),
    /// Identifier computed from the caller's options by the module strategy.
    Dynamic(DynamicRule),
}

/// Template for identifiers that embed addressing information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRule {
    /// Identifier template; `{type}` is replaced by the channel type tag.
    pub template: &'static str,
    /// How the action's value option is derived.
    pub value: ValueTransform,
}

/// Value option synthesis for dynamic identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTransform {
    /// Boolean `mute` flag to the console's on/off literals (a muted channel is "Off").
    Mute {
        /// Literal used when the caller gives no flag.
        when_absent: &'static str,
    },
    /// Move a caller option into the value slot unchanged.
    Rename { from: &'static str },
    /// No value option.
    None,
}

/// One entry of an action or feedback table.
#[derive(Debug, Clone)]
pub struct ActionMapping {
    pub concrete_id: ConcreteId,
    /// Options filled in when the caller omits them.
    pub default_options: Options,
    /// Entry-specific option key remap, applied after the module-wide one.
    pub option_remap: IndexMap<&'static str, &'static str>,
}

impl ActionMapping {
    /// Entry with a fixed identifier and no defaults.
    #[must_use]
    pub fn fixed(id: &'static str) -> Self {
        Self {
            concrete_id: ConcreteId::Static(id),
            default_options: Options::new(),
            option_remap: IndexMap::new(),
        }
    }

    /// Entry whose identifier is synthesized from the caller's options.
    #[must_use]
    pub fn dynamic(template: &'static str, value: ValueTransform) -> Self {
        Self {
            concrete_id: ConcreteId::Dynamic(DynamicRule { template, value }),
            default_options: Options::new(),
            option_remap: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: &[(&str, Value)]) -> Self {
        self.default_options = options(defaults);
        self
    }

    #[must_use]
    pub fn with_remap(mut self, remap: &[(&'static str, &'static str)]) -> Self {
        self.option_remap = remap.iter().copied().collect();
        self
    }
}

/// Static description of a Companion module type.
#[derive(Debug, Clone, Default)]
pub struct ModuleDescriptor {
    /// Companion module identifier (the export's `instance_type`).
    pub name: &'static str,
    /// Config key that carries the network address.
    pub address_field: &'static str,
    /// Config key that receives a machine's MAC address, for modules that need it.
    pub hardware_field: Option<&'static str>,
    /// Every config key Companion expects, with its default.
    pub defaults: Options,
    /// Author-facing config key to module config key.
    pub friendly_field_map: IndexMap<&'static str, &'static str>,
    pub action_table: IndexMap<&'static str, ActionMapping>,
    pub feedback_table: IndexMap<&'static str, ActionMapping>,
    /// Author-facing option key to module option key, for every entry.
    pub option_remap: IndexMap<&'static str, &'static str>,
}

impl ModuleDescriptor {
    /// Rename author-facing config keys to module keys.
    #[must_use]
    pub fn translate_fields(&self, config: &Options) -> Options {
        rename_keys(config, &self.friendly_field_map)
    }
}

/// Whether a symbolic name refers to an action or a feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Action,
    Feedback,
}

/// Result of mapping a symbolic name onto a module.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub concrete_id: String,
    pub options: Options,
    /// False when the name was not found and passed through verbatim.
    pub matched: bool,
}

impl Resolution {
    /// Unresolved name kept as-is for manual correction after import.
    #[must_use]
    pub fn passthrough(name: &str, options: &Options) -> Self {
        Self {
            concrete_id: name.to_string(),
            options: options.clone(),
            matched: false,
        }
    }
}

/// Per-module resolution behavior.
///
/// The default methods implement plain table lookup; modules override only
/// the hooks they need.
pub trait ModuleStrategy: Send + Sync {
    fn descriptor(&self) -> &ModuleDescriptor;

    /// Resolve a symbolic action name.
    fn resolve_action(&self, name: &str, options: &Options) -> Resolution {
        resolve_entry(self, EntryKind::Action, name, options)
    }

    /// Resolve a symbolic feedback name.
    fn resolve_feedback(&self, name: &str, options: &Options) -> Resolution {
        resolve_entry(self, EntryKind::Feedback, name, options)
    }

    /// Complete default configuration for a new connection.
    fn build_default_config(&self) -> Options {
        self.descriptor().defaults.clone()
    }

    /// Synthesize an identifier for a [`ConcreteId::Dynamic`] entry.
    ///
    /// Returns `None` when the options do not carry what the rule needs.
    fn resolve_dynamic(&self, rule: &DynamicRule, options: &Options) -> Option<Resolution> {
        let _ = (rule, options);
        None
    }

    /// Final pass over merged options of a static entry.
    fn substitute_literals(&self, options: Options) -> Options {
        options
    }
}

/// Module with nothing beyond its tables.
#[derive(Debug, Clone)]
pub struct TableModule {
    descriptor: ModuleDescriptor,
}

impl TableModule {
    #[must_use]
    pub const fn new(descriptor: ModuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ModuleStrategy for TableModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }
}

/// Table lookup shared by every strategy.
fn resolve_entry<S: ModuleStrategy + ?Sized>(
    strategy: &S,
    kind: EntryKind,
    name: &str,
    options: &Options,
) -> Resolution {
    let descriptor = strategy.descriptor();
    let table = match kind {
        EntryKind::Action => &descriptor.action_table,
        EntryKind::Feedback => &descriptor.feedback_table,
    };

    let Some(mapping) = table.get(name) else {
        debug!(module = descriptor.name, name, ?kind, "Name not in module table, passing through");
        return Resolution::passthrough(name, options);
    };

    match &mapping.concrete_id {
        ConcreteId::Static(id) => {
            let remapped = rename_keys(
                &rename_keys(options, &descriptor.option_remap),
                &mapping.option_remap,
            );
            let merged = overlay(&mapping.default_options, &remapped);
            trace!(module = descriptor.name, name, concrete = id, "Resolved static entry");
            Resolution {
                concrete_id: (*id).to_string(),
                options: strategy.substitute_literals(merged),
                matched: true,
            }
        }
        ConcreteId::Dynamic(rule) => strategy.resolve_dynamic(rule, options).unwrap_or_else(|| {
            warn!(
                module = descriptor.name,
                name, "Dynamic entry could not be resolved from options, passing through"
            );
            Resolution::passthrough(name, options)
        }),
    }
}

/// Rename keys through a map; unmapped keys are kept.
#[must_use]
pub fn rename_keys(source: &Options, map: &IndexMap<&'static str, &'static str>) -> Options {
    source
        .iter()
        .map(|(key, value)| {
            let key = map.get(key.as_str()).map_or_else(|| key.clone(), |k| (*k).to_string());
            (key, value.clone())
        })
        .collect()
}

/// `base` with every key of `top` written over it.
#[must_use]
pub fn overlay(base: &Options, top: &Options) -> Options {
    let mut merged = base.clone();
    for (key, value) in top {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Build an option map from literal pairs.
#[must_use]
pub fn options(pairs: &[(&str, Value)]) -> Options {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

/// Registry of known module strategies keyed by module type.
pub struct ModuleRegistry {
    modules: IndexMap<&'static str, Box<dyn ModuleStrategy>>,
}

impl ModuleRegistry {
    /// Empty registry; every module is unknown.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            modules: IndexMap::new(),
        }
    }

    /// Registry with every module in the built-in catalogue.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for strategy in catalog::all() {
            registry.register(strategy);
        }
        debug!(modules = registry.modules.len(), "Built module registry");
        registry
    }

    /// Add or replace a module strategy.
    pub fn register(&mut self, strategy: Box<dyn ModuleStrategy>) {
        self.modules.insert(strategy.descriptor().name, strategy);
    }

    #[must_use]
    pub fn get(&self, module: &str) -> Option<&dyn ModuleStrategy> {
        self.modules.get(module).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Known module type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.keys().copied()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}

static BUILTIN: LazyLock<ModuleRegistry> = LazyLock::new(ModuleRegistry::builtin);

/// Process-wide built-in registry.
#[must_use]
pub fn registry() -> &'static ModuleRegistry {
    &BUILTIN
}
