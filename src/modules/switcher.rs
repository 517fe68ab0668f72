//! Blackmagic ATEM video switcher strategy.

use serde_json::{json, Value};
use tracing::trace;

use crate::config::Options;

use super::{options, ActionMapping, ModuleDescriptor, ModuleStrategy};

/// Option keys that name a switcher source.
const SOURCE_KEYS: [&str; 1] = ["input"];

/// Source names the switcher encodes as a number rather than a string.
const SOURCE_LITERALS: [(&str, u64); 1] = [("black", 0)];

/// Strategy for `bmd-atem`.
#[derive(Debug, Clone)]
pub struct VideoSwitcher {
    descriptor: ModuleDescriptor,
}

impl VideoSwitcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: descriptor(),
        }
    }
}

impl Default for VideoSwitcher {
    fn default() -> Self {
        Self::new()
    }
}

fn descriptor() -> ModuleDescriptor {
    let me_input = [("mixeffect", json!(0)), ("input", json!(0))];
    ModuleDescriptor {
        name: "bmd-atem",
        address_field: "host",
        hardware_field: None,
        defaults: options(&[
            ("host", json!("")),
            ("modelID", json!("0")),
            ("presets", json!("0")),
            ("fadeFps", json!(10)),
            ("enableCameraControl", json!(false)),
            ("pollTimecode", json!(false)),
        ]),
        friendly_field_map: [("ip", "host"), ("model", "modelID")].into_iter().collect(),
        action_table: [
            ("program_input", ActionMapping::fixed("program").with_defaults(&me_input)),
            ("preview_input", ActionMapping::fixed("preview").with_defaults(&me_input)),
            (
                "cut",
                ActionMapping::fixed("cut").with_defaults(&[("mixeffect", json!(0))]),
            ),
            (
                "auto_transition",
                ActionMapping::fixed("auto").with_defaults(&[("mixeffect", json!(0))]),
            ),
            (
                "fade_to_black",
                ActionMapping::fixed("ftb").with_defaults(&[("mixeffect", json!(0))]),
            ),
            (
                "aux_output",
                ActionMapping::fixed("aux")
                    .with_defaults(&[("aux", json!(0)), ("input", json!(0))]),
            ),
        ]
        .into_iter()
        .collect(),
        feedback_table: [
            ("program_is", ActionMapping::fixed("program").with_defaults(&me_input)),
            ("preview_is", ActionMapping::fixed("preview").with_defaults(&me_input)),
            (
                "fade_to_black_active",
                ActionMapping::fixed("ftb_state").with_defaults(&[("mixeffect", json!(0))]),
            ),
        ]
        .into_iter()
        .collect(),
        option_remap: [("me", "mixeffect"), ("source", "input")].into_iter().collect(),
    }
}

impl ModuleStrategy for VideoSwitcher {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn substitute_literals(&self, mut options: Options) -> Options {
        for key in SOURCE_KEYS {
            let Some(Value::String(name)) = options.get(key) else {
                continue;
            };
            if let Some((_, number)) = SOURCE_LITERALS
                .iter()
                .find(|(literal, _)| literal.eq_ignore_ascii_case(name))
            {
                trace!(key, source = %name, number, "Substituting source literal");
                options.insert(key.to_string(), json!(number));
            }
        }
        options
    }
}
