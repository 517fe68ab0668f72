//! Validation over whole configuration sets.

use cb::config::load_project;
use cb::error::CompileError;
use cb::validate::{validate_project, Severity, CONNECTIONS_SOURCE, PARAMETERS_SOURCE};

use crate::common::fixtures::ConfigSet;

fn messages(report: &cb::validate::ValidationReport, severity: Severity) -> Vec<String> {
    report
        .with_severity(severity)
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_standard_set_is_clean() {
    let project = load_project(ConfigSet::standard().path()).unwrap();
    let report = validate_project(&project);
    assert!(report.issues.is_empty(), "unexpected findings: {:?}", report.issues);
    assert!(report.gate(true).is_ok());
}

#[test]
fn test_findings_carry_their_source() {
    let set = ConfigSet::standard()
        .with_file(
            "connections.yaml",
            r"
connections:
  - id: obs
    module: obs-studio
    config:
      ip: 10.0.0.XXX
  - id: obs
    module: obs-studio
  - id: foh
    module: yamaha-rcp
  - id: lyrics
    module: TBD
    notes:
      - 'OPEN QUESTION: ProPresenter or Resolume?'
",
        )
        .with_file(
            "parameters.yaml",
            r"
machines: {}
assignments:
  obs: stream-pc
connection_settings:
  ghost:
    port: 1
",
        );
    let project = load_project(set.path()).unwrap();
    let report = validate_project(&project);

    assert_eq!(
        messages(&report, Severity::Error),
        [format!("{CONNECTIONS_SOURCE}: duplicate connection id 'obs'")]
    );
    let warnings = messages(&report, Severity::Warning);
    assert!(warnings.contains(&format!("{CONNECTIONS_SOURCE}: 'obs' has placeholder IP (10.0.0.XXX)")));
    assert!(warnings.contains(&format!("{CONNECTIONS_SOURCE}: 'lyrics' has 1 OPEN QUESTION(s)")));
    assert!(warnings.contains(&format!(
        "{PARAMETERS_SOURCE}: 'obs' is assigned to unknown machine 'stream-pc'"
    )));
    assert!(warnings.contains(&format!(
        "{PARAMETERS_SOURCE}: settings for unknown connection 'ghost'"
    )));
}

#[test]
fn test_page_findings() {
    let set = ConfigSet::standard().with_file(
        "pages/page3-broken.yaml",
        r#"
page:
  name: ""
buttons:
  - position: [4, 0]
    style:
      color_bg: red
      font_size: 16pt
    actions:
      press:
        - connection: projector
          action: power_on
  - position: [4, 0]
  - style:
      text_top: Lost
  - position: [0, 3]
    style:
      text_top: Confirm
    step_count: 2
    actions:
      press:
        - action: wait
"#,
    );
    let project = load_project(set.path()).unwrap();
    let report = validate_project(&project);

    let errors = messages(&report, Severity::Error);
    for expected in [
        "page3-broken.yaml: Missing page number",
        "page3-broken.yaml: Duplicate button position [4,0]",
        "page3-broken.yaml: Button [4,0] row 4 out of range (0-3)",
        "page3-broken.yaml: Button [4,0] action references unknown connection 'projector'",
        "page3-broken.yaml: Button missing valid position field",
    ] {
        assert!(errors.iter().any(|e| e == expected), "missing error {expected:?} in {errors:?}");
    }

    let warnings = messages(&report, Severity::Warning);
    for expected in [
        "page3-broken.yaml: Missing page name",
        "page3-broken.yaml: Button [4,0] color_bg 'red' may not be valid hex",
        "page3-broken.yaml: Button [4,0] font_size '16pt' not in known sizes",
        "page3-broken.yaml: Button [4,0] has no style defined",
        "page3-broken.yaml: Button [0,3] has step_count=2 but no step_2_actions",
    ] {
        assert!(warnings.iter().any(|w| w == expected), "missing warning {expected:?} in {warnings:?}");
    }

    let notes = messages(&report, Severity::Info);
    assert!(notes.iter().any(|n| n == "page3-broken.yaml: Button [4,0] has no press actions (display-only)"));
    assert!(notes
        .iter()
        .any(|n| n == "page3-broken.yaml: Button [0,3] multi-step without timeout (will use default)"));

    assert!(matches!(report.gate(false), Err(CompileError::ValidationFailed { .. })));
}

#[test]
fn test_strict_mode_blocks_on_warnings() {
    let set = ConfigSet::standard().with_file(
        "pages/page3-draft.yaml",
        "page:\n  number: 3\n  name: Draft\nbuttons: []\n",
    );
    let project = load_project(set.path()).unwrap();
    let report = validate_project(&project);

    assert!(!report.has_errors());
    assert_eq!(messages(&report, Severity::Warning), ["page3-draft.yaml: No buttons defined"]);
    assert!(report.gate(false).is_ok());
    assert!(matches!(report.gate(true), Err(CompileError::StrictWarnings { warnings: 1 })));
}
