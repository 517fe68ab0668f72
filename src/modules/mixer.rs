//! Yamaha RCP mixing console strategy.
//!
//! Console parameters are addressed as `MIXER:Current/<type>/<param>` with a
//! zero-based channel index in option `X`. Authors write channels the way
//! they are labelled on the desk, one-based: `InCh/015` is input 15, `X = 14`.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::config::Options;

use super::{
    options, ActionMapping, DynamicRule, ModuleDescriptor, ModuleStrategy, Resolution,
    ValueTransform,
};

/// Option carrying the `Type/NNN` coordinate.
pub const CHANNEL_OPTION: &str = "channel";
/// Boolean mute flag consumed by [`ValueTransform::Mute`].
pub const MUTE_OPTION: &str = "mute";
/// Channel index option in the console's schema.
pub const INDEX_OPTION: &str = "X";
/// Value option in the console's schema.
pub const VALUE_OPTION: &str = "Val";

/// Parsed `Type/NNN` channel coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCoordinate {
    /// Channel type tag, e.g. `InCh`, `Mix`, `StInCh`.
    pub kind: String,
    /// Zero-based channel index.
    pub index: u32,
}

impl FromStr for ChannelCoordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, number) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("channel '{s}' is not in Type/NNN form"))?;
        if kind.is_empty() || !kind.chars().all(char::is_alphanumeric) {
            return Err(format!("channel '{s}' has an invalid type tag"));
        }
        let number: u32 = number
            .parse()
            .map_err(|_| format!("channel '{s}' has a non-numeric channel number"))?;
        let index = number
            .checked_sub(1)
            .ok_or_else(|| format!("channel '{s}' is numbered from 1"))?;
        Ok(Self {
            kind: kind.to_string(),
            index,
        })
    }
}

impl fmt::Display for ChannelCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:03}", self.kind, self.index + 1)
    }
}

/// Strategy for `yamaha-rcp`.
#[derive(Debug, Clone)]
pub struct MixingConsole {
    descriptor: ModuleDescriptor,
}

impl MixingConsole {
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: descriptor(),
        }
    }
}

impl Default for MixingConsole {
    fn default() -> Self {
        Self::new()
    }
}

fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor {
        name: "yamaha-rcp",
        address_field: "host",
        hardware_field: None,
        defaults: options(&[
            ("host", json!("")),
            ("model", json!("CL/QL")),
            ("kaInterval", json!(10)),
            ("metering", json!(false)),
        ]),
        friendly_field_map: [("ip", "host"), ("console_model", "model")]
            .into_iter()
            .collect(),
        action_table: [
            (
                "mute_channel",
                ActionMapping::dynamic(
                    "MIXER:Current/{type}/Fader/On",
                    ValueTransform::Mute {
                        when_absent: "Toggle",
                    },
                ),
            ),
            (
                "set_fader_level",
                ActionMapping::dynamic(
                    "MIXER:Current/{type}/Fader/Level",
                    ValueTransform::Rename { from: "level" },
                ),
            ),
            (
                "recall_scene",
                ActionMapping::fixed("MIXER:Lib/Scene/Recall")
                    .with_defaults(&[("Bank", json!("A"))])
                    .with_remap(&[("scene", "X"), ("bank", "Bank")]),
            ),
        ]
        .into_iter()
        .collect(),
        feedback_table: [
            (
                "channel_muted",
                ActionMapping::dynamic(
                    "MIXER:Current/{type}/Fader/On",
                    ValueTransform::Mute { when_absent: "Off" },
                ),
            ),
            (
                "fader_level_is",
                ActionMapping::dynamic(
                    "MIXER:Current/{type}/Fader/Level",
                    ValueTransform::Rename { from: "level" },
                ),
            ),
        ]
        .into_iter()
        .collect(),
        option_remap: indexmap::IndexMap::new(),
    }
}

/// Console literal for a mute flag: a muted channel has its fader "On" switch off.
const fn mute_literal(mute: bool) -> &'static str {
    if mute { "Off" } else { "On" }
}

impl ModuleStrategy for MixingConsole {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn resolve_dynamic(&self, rule: &DynamicRule, caller: &Options) -> Option<Resolution> {
        let raw = caller.get(CHANNEL_OPTION)?.as_str()?;
        let coordinate = match raw.parse::<ChannelCoordinate>() {
            Ok(coordinate) => coordinate,
            Err(reason) => {
                debug!(%reason, "Unparseable channel coordinate");
                return None;
            }
        };

        let mut resolved = Options::new();
        resolved.insert(INDEX_OPTION.to_string(), json!(coordinate.index));

        let mut consumed = vec![CHANNEL_OPTION];
        match rule.value {
            ValueTransform::Mute { when_absent } => {
                let literal = caller
                    .get(MUTE_OPTION)
                    .and_then(Value::as_bool)
                    .map_or(when_absent, mute_literal);
                resolved.insert(VALUE_OPTION.to_string(), json!(literal));
                consumed.push(MUTE_OPTION);
            }
            ValueTransform::Rename { from } => {
                if let Some(value) = caller.get(from) {
                    resolved.insert(VALUE_OPTION.to_string(), value.clone());
                }
                consumed.push(from);
            }
            ValueTransform::None => {}
        }

        for (key, value) in caller {
            if !consumed.iter().any(|c| *c == key.as_str()) {
                resolved.insert(key.clone(), value.clone());
            }
        }

        let concrete_id = rule.template.replace("{type}", &coordinate.kind);
        trace!(%coordinate, concrete = %concrete_id, "Synthesized console identifier");
        Some(Resolution {
            concrete_id,
            options: resolved,
            matched: true,
        })
    }
}
