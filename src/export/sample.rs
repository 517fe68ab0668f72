//! Minimal sample export for checking the format against a real Companion export.
//!
//! The sample has one page with three buttons (a page jump, a status
//! feedback, and a two-step confirm), one connection to a module the
//! registry does not know, and one custom variable.

use serde_json::json;

use crate::config::{
    ActionSet, ActionSpec, ButtonSpec, ConnectionSpec, FeedbackSpec, Options, PageDoc, PageFile,
    PageMeta, Project, StyleSpec, VariableSpec,
};
use crate::identity::IdGenerator;
use crate::modules::{options, ModuleRegistry};

use super::{build_export, ResolvedExport};

const SAMPLE_CONNECTION: &str = "sample_module";

fn style(top: &str, bottom: &str, bg: &str) -> StyleSpec {
    StyleSpec {
        text_top: Some(top.to_string()),
        text_bottom: Some(bottom.to_string()),
        font_size: Some("14pt".to_string()),
        color_text: Some("#FFFFFF".to_string()),
        color_bg: Some(bg.to_string()),
    }
}

fn internal(action: &str, options: Options) -> ActionSpec {
    ActionSpec {
        connection: "internal".to_string(),
        action: action.to_string(),
        options,
    }
}

fn bg(color: &str) -> StyleSpec {
    StyleSpec {
        color_bg: Some(color.to_string()),
        ..StyleSpec::default()
    }
}

/// The configuration set behind [`sample_export`].
#[must_use]
pub fn sample_project() -> Project {
    let page_jump = ButtonSpec {
        position: Some(vec![0, 0]),
        style: Some(style("SAMPLE", "サンプル", "#0066CC")),
        actions: ActionSet {
            press: vec![internal("set_page", options(&[("page", json!(2))]))],
        },
        ..ButtonSpec::default()
    };

    let status = ButtonSpec {
        position: Some(vec![0, 1]),
        style: Some(style("STATUS", "状態", "#666666")),
        feedbacks: vec![FeedbackSpec {
            connection: SAMPLE_CONNECTION.to_string(),
            feedback: "connection_status".to_string(),
            options: Options::new(),
            style_when_true: Some(bg("#00CC00")),
            style_when_false: Some(bg("#CC0000")),
        }],
        ..ButtonSpec::default()
    };

    let confirm = ButtonSpec {
        position: Some(vec![0, 2]),
        style: Some(style("CONFIRM", "確認", "#CC0000")),
        actions: ActionSet {
            press: vec![internal("button_step", options(&[("step", json!(2))]))],
        },
        step_count: 2,
        step_2_actions: Some(ActionSet {
            press: vec![internal("set_page", options(&[("page", json!(1))]))],
        }),
        step_2_timeout_ms: Some(5000),
        step_2_style: Some(StyleSpec {
            color_bg: Some("#CCCC00".to_string()),
            color_text: Some("#000000".to_string()),
            ..StyleSpec::default()
        }),
        ..ButtonSpec::default()
    };

    Project {
        connections: vec![ConnectionSpec {
            id: SAMPLE_CONNECTION.to_string(),
            module: "generic-module".to_string(),
            label: Some("Sample Module".to_string()),
            enabled: true,
            config: options(&[("host", json!("192.168.1.100"))]),
            notes: None,
        }],
        variables: vec![VariableSpec {
            name: "sample_var".to_string(),
            description: "A sample variable".to_string(),
            default: json!("hello"),
        }],
        parameters: None,
        pages: vec![PageFile {
            source: "sample".to_string(),
            doc: PageDoc {
                page: PageMeta {
                    number: Some(1),
                    name: Some("Sample Page".to_string()),
                },
                buttons: vec![page_jump, status, confirm],
            },
        }],
    }
}

/// Build the sample export.
#[must_use]
pub fn sample_export(registry: &ModuleRegistry, ids: &mut dyn IdGenerator) -> ResolvedExport {
    build_export(&sample_project(), registry, ids)
}
