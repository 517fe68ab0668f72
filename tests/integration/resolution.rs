//! Connection overlay and identifier resolution over a loaded set.

use serde_json::json;

use cb::config::load_project;
use cb::identity::SequentialIds;
use cb::modules::registry;
use cb::resolve::{resolve_connections, IdentifierResolver};

use crate::common::fixtures::ConfigSet;

#[test]
fn test_connections_get_identities_in_declaration_order() {
    let project = load_project(ConfigSet::standard().path()).unwrap();
    let table = resolve_connections(
        &project.connections,
        project.parameters.as_ref(),
        registry(),
        &mut SequentialIds::new("c"),
    );

    assert_eq!(table.opaque_id("obs"), Some("c-0001"));
    assert_eq!(table.opaque_id("foh"), Some("c-0002"));
    assert_eq!(table.opaque_id("lyrics"), Some("c-0003"));
    assert_eq!(table.opaque_id("internal"), Some("internal"));
    assert_eq!(table.module_of("foh"), Some("yamaha-rcp"));

    let orders: Vec<usize> = table.instances.values().map(|c| c.sort_order).collect();
    assert_eq!(orders, [0, 1, 2]);
    assert_eq!(table.instances["c-0003"].label, "lyrics");
}

#[test]
fn test_machine_assignment_overrides_declared_address() {
    let project = load_project(ConfigSet::standard().path()).unwrap();
    let table = resolve_connections(
        &project.connections,
        project.parameters.as_ref(),
        registry(),
        &mut SequentialIds::new("c"),
    );

    let obs = &table.instances["c-0001"];
    assert_eq!(obs.instance_type, "obs-studio");
    assert_eq!(obs.label, "Streaming PC");
    assert_eq!(
        serde_json::to_value(&obs.config).unwrap(),
        json!({"host": "192.168.10.5", "port": "4455", "pass": "hunter2"})
    );

    let foh = &table.instances["c-0002"];
    assert_eq!(foh.config["host"], "10.0.0.20");
    assert_eq!(foh.config["model"], "CL/QL");
    assert_eq!(foh.config["port"], 49280);
}

#[test]
fn test_overlay_module_override_and_deferred_connection() {
    let set = ConfigSet::standard()
        .with_file(
            "connections.yaml",
            r"
connections:
  - id: obs
    module: obs-studio
  - id: foh
    module: TBD
  - id: lyrics
    module: TBD
",
        )
        .with_file(
            "parameters.yaml",
            r"
connection_settings:
  foh:
    module: yamaha-rcp
    ip: 10.1.1.1
",
        );
    let project = load_project(set.path()).unwrap();
    let table = resolve_connections(
        &project.connections,
        project.parameters.as_ref(),
        registry(),
        &mut SequentialIds::new("c"),
    );

    assert_eq!(table.instances.len(), 2);
    assert!(table.opaque_id("lyrics").is_none());
    let foh = &table.instances["c-0002"];
    assert_eq!(foh.instance_type, "yamaha-rcp");
    assert_eq!(foh.sort_order, 1);
    assert_eq!(foh.config["host"], "10.1.1.1");
    assert!(!foh.config.contains_key("module"));
}

#[test]
fn test_actions_resolve_against_resolved_connections() {
    let project = load_project(ConfigSet::standard().path()).unwrap();
    let table = resolve_connections(
        &project.connections,
        project.parameters.as_ref(),
        registry(),
        &mut SequentialIds::new("c"),
    );
    let resolver = IdentifierResolver::new(registry(), &table);

    let mute = &project.pages[0].doc.buttons[1].actions.press[0];
    let entity = resolver.resolve_action(&mute.connection, &mute.action, &mute.options);
    assert_eq!(entity.connection_id, "c-0002");
    assert_eq!(entity.definition_id, "MIXER:Current/InCh/Fader/On");
    assert_eq!(serde_json::to_value(&entity.options).unwrap(), json!({"X": 0, "Val": "Off"}));

    let enable = resolver.resolve_action(
        "internal",
        "connection_enable",
        &serde_json::from_value(json!({"connection_id": "lyrics"})).unwrap(),
    );
    assert_eq!(enable.connection_id, "internal");
    assert_eq!(enable.definition_id, "instance_control");
    assert_eq!(
        serde_json::to_value(&enable.options).unwrap(),
        json!({"instance_id": "c-0003", "enable": "true"})
    );

    let unknown = resolver.resolve_action("obs", "launch_rocket", &Default::default());
    assert_eq!(unknown.connection_id, "c-0001");
    assert_eq!(unknown.definition_id, "launch_rocket");
}

#[test]
fn test_health_feedback_targets_internal() {
    let project = load_project(ConfigSet::standard().path()).unwrap();
    let table = resolve_connections(
        &project.connections,
        project.parameters.as_ref(),
        registry(),
        &mut SequentialIds::new("c"),
    );
    let resolver = IdentifierResolver::new(registry(), &table);

    let feedback = &project.pages[1].doc.buttons[0].feedbacks[0];
    let entity = resolver.resolve_feedback(&feedback.connection, &feedback.feedback, &feedback.options);
    assert_eq!(entity.connection_id, "internal");
    assert_eq!(entity.definition_id, "instance_status");
    assert_eq!(serde_json::to_value(&entity.options).unwrap(), json!({"instance_id": "c-0003"}));
}
