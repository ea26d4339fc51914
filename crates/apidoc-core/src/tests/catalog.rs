use super::record;
use crate::*;
use indexmap::IndexMap;

#[test]
fn fixture_catalog_loads_clean() {
    let catalog = super::fixture_catalog();
    assert_eq!(catalog.len(), 16);
    assert!(catalog.get("meetings-diarize").is_some());
    assert_eq!(catalog.tag_display_name("teams"), "Teams & Employees");
    assert_eq!(catalog.tag_display_name("unknown"), "unknown");
    assert!(
        catalog.integrity_report().is_clean(),
        "{:?}",
        catalog.integrity_report()
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = Catalog::new(vec![
        record("a", Method::Get, "/a", "t", "s"),
        record("a", Method::Post, "/a", "t", "s"),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateId { id } if id == "a"));
}

#[test]
fn empty_path_or_method_is_rejected() {
    let err = Catalog::new(vec![record("a", Method::Get, "  ", "t", "s")]).unwrap_err();
    assert!(matches!(err, Error::InvalidRecord { .. }));

    let err = Catalog::new(vec![record("b", Method::Other(String::new()), "/b", "t", "s")])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRecord { id, .. } if id == "b"));
}

#[test]
fn ids_must_be_usable_as_file_names_and_links() {
    for bad in ["users/list", "a b", "x?y", "frag#1", "a..b", "..", "caf\u{e9}"] {
        let err = Catalog::new(vec![
            record("ok", Method::Get, "/ok", "t", "s"),
            record(bad, Method::Get, "/bad", "t", "s"),
        ])
        .unwrap_err();
        assert!(
            matches!(&err, Error::InvalidRecord { id, .. } if id == bad),
            "{bad}: {err}"
        );
    }

    let catalog = Catalog::new(vec![record("v1.users_list-2", Method::Get, "/u", "t", "s")]);
    assert!(catalog.is_ok());
    assert!(crate::catalog::is_route_safe_id("meetings-diarize"));
    assert!(!crate::catalog::is_route_safe_id(""));
}

#[test]
fn siblings_match_tag_and_subcategory_in_catalog_order() {
    let catalog = Catalog::new(vec![
        record("A", Method::Post, "/a", "Meetings", "Analysis"),
        record("B", Method::Get, "/b", "Meetings", "Analysis"),
        record("D", Method::Get, "/d", "Meetings", "Lifecycle"),
        record("C", Method::Post, "/c", "Meetings", "Analysis"),
    ])
    .unwrap();
    let a = catalog.get("A").unwrap();
    let ids: Vec<&str> = catalog.siblings(a).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B", "C"]);
}

#[test]
fn related_lists_complex_siblings_of_complex_records() {
    let mut a = record("A", Method::Post, "/a", "Meetings", "Analysis");
    a.complexity = Complexity::Complex;
    let b = record("B", Method::Get, "/b", "Meetings", "Analysis");
    let mut c = record("C", Method::Post, "/c", "Meetings", "Analysis");
    c.complexity = Complexity::Complex;
    let mut d = record("D", Method::Post, "/d", "Meetings", "Lifecycle");
    d.complexity = Complexity::Complex;
    let catalog = Catalog::new(vec![a, b, c, d]).unwrap();

    let ids: Vec<&str> = catalog
        .related(catalog.get("A").unwrap())
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["C"]);
    assert!(catalog.related(catalog.get("B").unwrap()).is_empty());
}

#[test]
fn actor_records_skip_dangling_ids_and_follow_catalog_order() {
    let mut index = ActorEndpointIndex::new();
    index.insert(
        "Facilitator".to_string(),
        vec!["c".to_string(), "ghost".to_string(), "a".to_string()],
    );
    let catalog = Catalog::new(vec![
        record("a", Method::Get, "/a", "t", "s"),
        record("b", Method::Get, "/b", "t", "s"),
        record("c", Method::Get, "/c", "t", "s"),
    ])
    .unwrap()
    .with_actor_endpoints(index);

    let ids: Vec<&str> = catalog
        .actor_records("Facilitator")
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert!(catalog.actor_records("Nobody").is_empty());

    let report = catalog.integrity_report();
    assert_eq!(
        report.dangling,
        vec![DanglingReference {
            owner: "Facilitator".to_string(),
            id: "ghost".to_string(),
        }]
    );
}

#[test]
fn integrity_report_lists_undocumented_placeholders_and_unknown_popup_sources() {
    let catalog = Catalog::new(vec![record("a", Method::Get, "/teams/{team_id}", "t", "s")])
        .unwrap()
        .with_tag_display_names(IndexMap::new());
    let report = catalog.integrity_report();
    assert_eq!(
        report.undocumented_path_params,
        vec![("a".to_string(), "team_id".to_string())]
    );
    // The default diagram names actors and entities this catalog does not define.
    assert_eq!(report.unknown_popup_sources.len(), 8);
    assert!(!report.is_clean());
}

#[test]
fn yaml_catalog_with_diagram_override() {
    let text = r#"
records:
  - id: ping
    method: GET
    path: /ping
    title: Ping
    tag: ops
entity_fields:
  Sensor:
    firestore_path: sensors/{id}
    fields:
      - [status, string, Last status]
diagram:
  nodes:
    - id: n-sensor
      kind: data
      label: Sensor
      popup: { kind: entity, name: Sensor }
      placement: { left: "10%", top: 40 }
  edges: []
"#;
    let catalog = Catalog::from_yaml_str(text).unwrap();
    assert_eq!(catalog.entity("Sensor").unwrap().storage_path, "sensors/{id}");
    let node = catalog.diagram().node("n-sensor").unwrap();
    assert_eq!(node.placement.left, Offset::Percent(10.0));
    assert_eq!(node.placement.top, Offset::Px(40.0));
    assert_eq!(node.popup_id(), "p-sensor");
    assert!(catalog.integrity_report().is_clean());
}

#[test]
fn load_rejects_unknown_extension() {
    let dir = std::env::temp_dir().join("apidoc-core-load-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("catalog.toml");
    std::fs::write(&path, "records = []").unwrap();
    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { extension } if extension == "toml"));
}
