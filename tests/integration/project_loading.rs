//! Loading configuration directories.

use cb::config::{load_project, ConfigFormat};
use cb::error::CompileError;

use crate::common::fixtures::ConfigSet;

#[test]
fn test_standard_set_loads() {
    let set = ConfigSet::standard();
    let project = load_project(set.path()).unwrap();

    let ids: Vec<&str> = project.connections.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["obs", "foh", "lyrics"]);
    assert_eq!(project.variables.len(), 1);
    assert_eq!(project.variables[0].name, "service_phase");

    let params = project.parameters.as_ref().unwrap();
    assert_eq!(params.assignments["obs"], "stream-pc");
    assert_eq!(params.machines["stream-pc"].ip, "192.168.10.5");

    let sources: Vec<&str> = project.pages.iter().map(|p| p.source.as_str()).collect();
    assert_eq!(sources, ["page1-main.yaml", "page2-slides.yaml"]);
    assert_eq!(project.pages[0].doc.buttons.len(), 3);
    assert_eq!(project.pages[0].doc.buttons[2].step_count, 2);
}

#[test]
fn test_parameters_are_optional() {
    let set = ConfigSet::standard().without_file("parameters.yaml");
    let project = load_project(set.path()).unwrap();
    assert!(project.parameters.is_none());
}

#[test]
fn test_pages_sorted_by_file_name() {
    let set = ConfigSet::standard()
        .with_file(
            "pages/page0-intro.yaml",
            "page:\n  number: 9\n  name: Intro\nbuttons: []\n",
        )
        .with_file("pages/notes.yaml", "not: a page\n")
        .with_file("pages/page3.txt", "ignored");
    let project = load_project(set.path()).unwrap();

    let sources: Vec<&str> = project.pages.iter().map(|p| p.source.as_str()).collect();
    assert_eq!(sources, ["page0-intro.yaml", "page1-main.yaml", "page2-slides.yaml"]);
}

#[test]
fn test_toml_and_json_documents() {
    let set = ConfigSet::empty()
        .with_file(
            "connections.toml",
            r#"
[[connections]]
id = "obs"
module = "obs-studio"

[connections.config]
ip = "10.0.0.5"
"#,
        )
        .with_file(
            "variables.json",
            r#"{"custom_variables": [{"name": "count", "default": 0}]}"#,
        )
        .with_file(
            "pages/page1.toml",
            r#"
[page]
number = 1
name = "Main"

[[buttons]]
position = [0, 0]

[buttons.style]
text_top = "Scene"

[[buttons.actions.press]]
connection = "obs"
action = "set_scene"
options = { scene_name = "Wide" }
"#,
        );

    let project = load_project(set.path()).unwrap();
    assert_eq!(project.connections[0].module, "obs-studio");
    assert_eq!(project.connections[0].config["ip"], "10.0.0.5");
    assert_eq!(project.variables[0].default, 0);
    let button = &project.pages[0].doc.buttons[0];
    assert_eq!(button.grid_position(), Some((0, 0)));
    assert_eq!(button.actions.press[0].options["scene_name"], "Wide");
}

#[test]
fn test_yaml_preferred_over_other_formats() {
    let set = ConfigSet::standard().with_file(
        "connections.json",
        r#"{"connections": [{"id": "json-only", "module": "obs-studio"}]}"#,
    );
    let project = load_project(set.path()).unwrap();
    assert_eq!(project.connections.len(), 3);
    assert_eq!(ConfigFormat::ALL[0], ConfigFormat::Yaml);
}

#[test]
fn test_missing_directory() {
    let set = ConfigSet::empty();
    let err = load_project(&set.path().join("nope")).unwrap_err();
    assert!(matches!(err, CompileError::ConfigDirNotFound { .. }));
}

#[test]
fn test_missing_connections_document() {
    let set = ConfigSet::standard().without_file("connections.yaml");
    let err = load_project(set.path()).unwrap_err();
    assert!(matches!(err, CompileError::FileNotFound { ref path } if path.ends_with("connections.yaml")));
}

#[test]
fn test_missing_connections_section() {
    let set = ConfigSet::standard().with_file("connections.yaml", "devices: []\n");
    let err = load_project(set.path()).unwrap_err();
    assert!(matches!(err, CompileError::MissingSection { ref section, .. } if section == "connections"));
}

#[test]
fn test_empty_pages_directory() {
    let set = ConfigSet::standard()
        .without_file("pages/page1-main.yaml")
        .without_file("pages/page2-slides.yaml");
    let err = load_project(set.path()).unwrap_err();
    assert!(matches!(err, CompileError::NoPages { .. }));
}

#[test]
fn test_malformed_page_names_file() {
    let set = ConfigSet::standard().with_file("pages/page2-slides.yaml", "page: [unclosed\n");
    let err = load_project(set.path()).unwrap_err();
    match err {
        CompileError::Parse { path, .. } => assert!(path.ends_with("page2-slides.yaml")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_empty_variables_file_is_allowed() {
    let set = ConfigSet::standard().with_file("variables.yaml", "");
    let project = load_project(set.path()).unwrap();
    assert!(project.variables.is_empty());
}
