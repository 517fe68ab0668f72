//! Table-only modules and the full built-in catalogue.
//!
//! Default configurations list every field the Companion module stores, even
//! ones authors never set: Companion treats a missing key as a corrupt
//! config and resets the connection on import.

use serde_json::json;

use super::{
    options, ActionMapping, MixingConsole, ModuleDescriptor, ModuleStrategy, TableModule,
    VideoSwitcher,
};

/// Every module strategy shipped with the tool.
pub(super) fn all() -> Vec<Box<dyn ModuleStrategy>> {
    vec![
        Box::new(MixingConsole::new()),
        Box::new(VideoSwitcher::new()),
        Box::new(TableModule::new(propresenter())),
        Box::new(TableModule::new(obs_studio())),
        Box::new(TableModule::new(generic_ssh())),
    ]
}

fn propresenter() -> ModuleDescriptor {
    ModuleDescriptor {
        name: "renewedvision-propresenter",
        address_field: "host",
        hardware_field: None,
        defaults: options(&[
            ("host", json!("")),
            ("port", json!("20652")),
            ("pass", json!("")),
            ("indexOfClockToWatch", json!(0)),
            ("GUIDOfStageDisplayScreenToWatch", json!("")),
            ("sendPresentationCurrentMsgs", json!("yes")),
            ("clientVersion", json!("701")),
            ("use_sd", json!("no")),
            ("sdport", json!("")),
            ("sdpass", json!("")),
        ]),
        friendly_field_map: [
            ("ip", "host"),
            ("password", "pass"),
            ("stage_display_port", "sdport"),
            ("stage_display_password", "sdpass"),
        ]
        .into_iter()
        .collect(),
        action_table: [
            ("next_slide", ActionMapping::fixed("next")),
            ("previous_slide", ActionMapping::fixed("last")),
            (
                "go_to_slide",
                ActionMapping::fixed("slideNumber")
                    .with_defaults(&[("slide", json!(1)), ("path", json!(""))])
                    .with_remap(&[("slide_number", "slide"), ("presentation", "path")]),
            ),
            ("clear_all", ActionMapping::fixed("clearall")),
            ("clear_slide", ActionMapping::fixed("clearslide")),
            ("clear_background", ActionMapping::fixed("clearbackground")),
            ("clear_audio", ActionMapping::fixed("clearaudio")),
            (
                "stage_message",
                ActionMapping::fixed("stageDisplayMessage").with_defaults(&[("message", json!(""))]),
            ),
            ("hide_stage_message", ActionMapping::fixed("stageDisplayHideMessage")),
            (
                "start_clock",
                ActionMapping::fixed("clockStart").with_defaults(&[("clockIndex", json!(0))]),
            ),
            (
                "reset_clock",
                ActionMapping::fixed("clockReset").with_defaults(&[("clockIndex", json!(0))]),
            ),
        ]
        .into_iter()
        .collect(),
        feedback_table: [
            (
                "stage_display_active",
                ActionMapping::fixed("stagedisplay_active")
                    .with_defaults(&[("index", json!(0))]),
            ),
            ("propresenter_connected", ActionMapping::fixed("propresenterConnected")),
        ]
        .into_iter()
        .collect(),
        option_remap: [("clock", "clockIndex"), ("text", "message")].into_iter().collect(),
    }
}

fn obs_studio() -> ModuleDescriptor {
    ModuleDescriptor {
        name: "obs-studio",
        address_field: "host",
        hardware_field: None,
        defaults: options(&[
            ("host", json!("")),
            ("port", json!("4455")),
            ("pass", json!("")),
        ]),
        friendly_field_map: [("ip", "host"), ("password", "pass")].into_iter().collect(),
        action_table: [
            (
                "set_scene",
                ActionMapping::fixed("set_scene").with_defaults(&[("scene", json!(""))]),
            ),
            (
                "preview_scene",
                ActionMapping::fixed("preview_scene").with_defaults(&[("scene", json!(""))]),
            ),
            ("start_stream", ActionMapping::fixed("start_streaming")),
            ("stop_stream", ActionMapping::fixed("stop_streaming")),
            ("toggle_stream", ActionMapping::fixed("StartStopStreaming")),
            ("start_recording", ActionMapping::fixed("start_recording")),
            ("stop_recording", ActionMapping::fixed("stop_recording")),
            ("toggle_recording", ActionMapping::fixed("StartStopRecording")),
            (
                "toggle_source",
                ActionMapping::fixed("toggle_scene_item")
                    .with_defaults(&[("scene", json!("Current Scene")), ("visible", json!("toggle"))]),
            ),
        ]
        .into_iter()
        .collect(),
        feedback_table: [
            ("streaming", ActionMapping::fixed("streaming")),
            ("recording", ActionMapping::fixed("recording").with_defaults(&[("bg", json!(16_711_680))])),
            (
                "scene_active",
                ActionMapping::fixed("scene_active")
                    .with_defaults(&[("mode", json!("programAndPreview")), ("scene", json!(""))]),
            ),
        ]
        .into_iter()
        .collect(),
        option_remap: [("scene_name", "scene"), ("source_name", "source")]
            .into_iter()
            .collect(),
    }
}

fn generic_ssh() -> ModuleDescriptor {
    ModuleDescriptor {
        name: "generic-ssh",
        address_field: "host",
        hardware_field: Some("mac"),
        defaults: options(&[
            ("host", json!("")),
            ("port", json!("22")),
            ("username", json!("")),
            ("password", json!("")),
            ("privatekeypath", json!("")),
            ("passphrase", json!("")),
            ("mac", json!("")),
        ]),
        friendly_field_map: [("ip", "host"), ("user", "username"), ("key_path", "privatekeypath")]
            .into_iter()
            .collect(),
        action_table: [(
            "run_command",
            ActionMapping::fixed("send_command").with_defaults(&[("command", json!(""))]),
        )]
        .into_iter()
        .collect(),
        feedback_table: indexmap::IndexMap::new(),
        option_remap: [("cmd", "command")].into_iter().collect(),
    }
}
