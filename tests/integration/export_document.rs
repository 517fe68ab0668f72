//! Shape and stability of the generated export.

use proptest::prelude::*;
use serde_json::{json, Value};

use cb::config::{load_project, ButtonSpec, PageDoc, PageFile, PageMeta, Project};
use cb::export::{build_export, compile, write_document, GRID_COLS, GRID_ROWS};
use cb::identity::SequentialIds;
use cb::modules::registry;

use crate::common::fixtures::ConfigSet;

fn standard_export() -> Value {
    let project = load_project(ConfigSet::standard().path()).unwrap();
    let export = build_export(&project, registry(), &mut SequentialIds::new("x"));
    serde_json::to_value(&export).unwrap()
}

#[test]
fn test_envelope() {
    let export = standard_export();
    assert_eq!(export["version"], 6);
    assert_eq!(export["type"], "full");
    assert_eq!(export["companionBuild"], "yaml-converter-v1.0");

    let pages: Vec<&String> = export["pages"].as_object().unwrap().keys().collect();
    assert_eq!(pages.len(), 2);
    assert_eq!(export["pages"]["1"]["name"], "Main");
    assert_eq!(export["pages"]["2"]["name"], "Slides");
    assert_eq!(
        export["pages"]["1"]["gridSize"],
        json!({"minColumn": 0, "maxColumn": 7, "minRow": 0, "maxRow": 3})
    );

    assert_eq!(
        export["custom_variables"]["service_phase"],
        json!({
            "description": "Current phase of the service",
            "defaultValue": "preservice",
            "persistCurrentValue": false,
            "sortOrder": 0
        })
    );
}

#[test]
fn test_instances_block() {
    let export = standard_export();
    let obs = &export["instances"]["x-0001"];
    assert_eq!(obs["instance_type"], "obs-studio");
    assert_eq!(obs["label"], "Streaming PC");
    assert_eq!(obs["enabled"], true);
    assert_eq!(obs["isFirstInit"], false);
    assert_eq!(obs["lastUpgradeIndex"], -1);
    assert_eq!(obs["sortOrder"], 0);
    assert_eq!(obs["config"]["host"], "192.168.10.5");
    assert!(export["instances"].get("internal").is_none());
}

#[test]
fn test_single_step_button() {
    let export = standard_export();
    let button = &export["pages"]["1"]["controls"]["0"]["0"];

    assert_eq!(button["type"], "button");
    assert_eq!(
        button["options"],
        json!({"rotaryActions": false, "stepProgression": "auto"})
    );
    assert_eq!(button["style"]["text"], "Go\\nLive");
    assert_eq!(button["style"]["size"], 18);
    assert_eq!(button["style"]["bgcolor"], 0x00_6600);
    assert_eq!(button["style"]["color"], 0xFF_FFFF);
    assert_eq!(button["localVariables"], json!([]));

    let steps = button["steps"].as_object().unwrap();
    assert_eq!(steps.len(), 1);
    let step = &steps["x-0004"];
    assert_eq!(step["options"], json!({"runWhileHeld": [], "name": ""}));
    assert_eq!(step["action_sets"]["up"], json!([]));
    assert_eq!(
        step["action_sets"]["down"][0],
        json!({
            "type": "action",
            "id": "x-0005",
            "definitionId": "start_streaming",
            "connectionId": "x-0001",
            "headline": null,
            "options": {},
            "disabled": false,
            "upgradeIndex": null
        })
    );

    let feedback = &button["feedbacks"][0];
    assert_eq!(feedback["id"], "x-0006");
    assert_eq!(feedback["definitionId"], "streaming");
    assert_eq!(feedback["isInverted"], false);
    assert_eq!(feedback["style"], json!({"bgcolor": 0xCC_0000}));
}

#[test]
fn test_multi_step_button() {
    let export = standard_export();
    let button = &export["pages"]["1"]["controls"]["3"]["7"];

    assert_eq!(button["options"]["stepAutoProgressTimeout"], 3000);
    let steps = button["steps"].as_object().unwrap();
    let ids: Vec<&String> = steps.keys().collect();
    assert_eq!(ids, ["x-0009", "x-0011"]);

    let first = &steps["x-0009"]["action_sets"]["down"][0];
    assert_eq!(first["definitionId"], "button_page_set");
    assert_eq!(first["connectionId"], "internal");
    assert_eq!(first["options"], json!({"page": 2}));

    let confirm = &steps["x-0011"];
    assert_eq!(confirm["options"]["name"], "Confirm");
    assert_eq!(confirm["action_sets"]["down"][0]["id"], "x-0012");
    assert_eq!(confirm["action_sets"]["down"][0]["definitionId"], "stop_streaming");
}

#[test]
fn test_inverted_health_feedback() {
    let export = standard_export();
    let feedback = &export["pages"]["2"]["controls"]["1"]["2"]["feedbacks"][0];
    assert_eq!(feedback["definitionId"], "instance_status");
    assert_eq!(feedback["connectionId"], "internal");
    assert_eq!(feedback["options"], json!({"instance_id": "x-0003"}));
    assert_eq!(feedback["isInverted"], true);
    assert_eq!(feedback["style"], json!({"bgcolor": 0x99_0000}));
}

#[test]
fn test_identical_runs_give_identical_exports() {
    let project = load_project(ConfigSet::standard().path()).unwrap();
    let first = build_export(&project, registry(), &mut SequentialIds::new("r"));
    let second = build_export(&project, registry(), &mut SequentialIds::new("r"));
    assert_eq!(first, second);
}

#[test]
fn test_written_export_reads_back() {
    let set = ConfigSet::standard();
    let project = load_project(set.path()).unwrap();
    let compiled = compile(&project, registry(), &mut SequentialIds::new("w"));
    let path = set.output_path("companion-config.companionconfig");

    write_document(&compiled.export, &path, true).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
    let back: cb::export::ResolvedExport = serde_json::from_str(&text).unwrap();
    assert_eq!(back, compiled.export);
}

fn project_with_positions(positions: &[(u32, u32)]) -> Project {
    let buttons = positions
        .iter()
        .map(|&(row, col)| ButtonSpec {
            position: Some(vec![i64::from(row), i64::from(col)]),
            ..ButtonSpec::default()
        })
        .collect();
    Project {
        pages: vec![PageFile {
            source: "page1.yaml".to_string(),
            doc: PageDoc {
                page: PageMeta {
                    number: Some(1),
                    name: Some("Grid".to_string()),
                },
                buttons,
            },
        }],
        ..Project::default()
    }
}

proptest! {
    #[test]
    fn prop_every_placed_button_is_addressable(
        positions in prop::collection::hash_set((0..GRID_ROWS, 0..GRID_COLS), 1..16)
    ) {
        let positions: Vec<(u32, u32)> = positions.into_iter().collect();
        let export = build_export(
            &project_with_positions(&positions),
            registry(),
            &mut SequentialIds::new("p"),
        );
        let page = &export.pages["1"];
        prop_assert_eq!(page.button_count(), positions.len());
        for (row, col) in positions {
            prop_assert!(page.button_at(row, col).is_some());
        }
    }
}
