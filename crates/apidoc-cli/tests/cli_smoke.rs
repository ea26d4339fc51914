use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let path = repo_root()
        .join("fixtures")
        .join("catalog")
        .join("platform.json");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("apidoc-cli"));
    cmd.current_dir(repo_root()).env_remove("APIDOC_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn validate_reports_clean_fixture() {
    let out = stdout_of(cli().args(["validate", fixture().to_string_lossy().as_ref()]));
    assert!(out.contains("16 endpoint(s)"), "{out}");
    assert!(out.trim_end().ends_with("ok"), "{out}");
}

#[test]
fn validate_strict_fails_on_dangling_references() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let catalog = tmp.path().join("dangling.yaml");
    fs::write(
        &catalog,
        "records:\n  - id: a\n    method: GET\n    path: /a\n    title: A\n    tag: t\nactor_endpoints:\n  Facilitator: [a, missing-id]\n",
    )
    .expect("write catalog");

    let out = stdout_of(cli().args(["validate", catalog.to_string_lossy().as_ref()]));
    assert!(out.contains("dangling: Facilitator -> missing-id"), "{out}");

    cli()
        .args(["validate", "--strict", catalog.to_string_lossy().as_ref()])
        .assert()
        .code(3);
}

#[test]
fn unsafe_ids_fail_before_any_page_is_written() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let catalog = tmp.path().join("ids.yaml");
    fs::write(
        &catalog,
        "records:\n  - { id: ok, method: GET, path: /ok, title: Ok, tag: t }\n  - { id: users/list, method: GET, path: /users, title: Users, tag: t }\n",
    )
    .expect("write catalog");
    let out_dir = tmp.path().join("site");

    cli()
        .args(["validate", catalog.to_string_lossy().as_ref()])
        .assert()
        .code(1);
    cli()
        .args([
            "render",
            "--out",
            out_dir.to_string_lossy().as_ref(),
            catalog.to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1);
    assert!(!out_dir.exists());
}

#[test]
fn render_writes_every_page() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out_dir = tmp.path().join("site");

    cli()
        .args([
            "render",
            "--out",
            out_dir.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(&out_dir)
        .expect("read site dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 18, "{names:?}");
    for name in ["index.html", "endpoints.html", "ep-meetings-diarize.html"] {
        assert!(names.iter().any(|n| n == name), "missing {name}");
    }
    let home = fs::read_to_string(out_dir.join("index.html")).expect("read index");
    assert!(home.contains("Facilitator Endpoints"));
}

#[test]
fn page_prints_detail_or_not_found_document() {
    let out = stdout_of(cli().args([
        "page",
        fixture().to_string_lossy().as_ref(),
        "ep-clients-list",
    ]));
    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains("List clients"));
    assert!(out.contains("data-section=\"query-parameters\""));

    let out = stdout_of(cli().args(["page", fixture().to_string_lossy().as_ref(), "ep-nope"]));
    assert!(out.contains("Endpoint not found."));

    cli()
        .args(["page", fixture().to_string_lossy().as_ref(), "clients-list"])
        .assert()
        .code(1);
}

#[test]
fn page_applies_config_overrides() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("site.yaml");
    fs::write(&config, "site:\n  title: Partner Docs\n").expect("write config");

    let out = stdout_of(cli().args([
        "page",
        "--config",
        config.to_string_lossy().as_ref(),
        fixture().to_string_lossy().as_ref(),
        "ep-auth-login",
    ]));
    assert!(out.contains("| Partner Docs</title>"), "{out}");
}

#[test]
fn search_filters_by_text_and_method() {
    let out = stdout_of(cli().args([
        "search",
        "--method",
        "post",
        "--json",
        fixture().to_string_lossy().as_ref(),
        "MEETING",
    ]));
    let hits: serde_json::Value = serde_json::from_str(&out).expect("json output");
    let ids: Vec<&str> = hits
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "auth-qr-pin",
            "meetings-create",
            "meetings-diarize",
            "meetings-analyze"
        ]
    );

    let out = stdout_of(cli().args(["search", fixture().to_string_lossy().as_ref(), "summary"]));
    assert!(out.contains("(ep-meetings-summary)"), "{out}");
}

#[test]
fn usage_errors_exit_with_status_2() {
    cli().assert().code(2);
    cli().args(["publish", "catalog.json"]).assert().code(2);
    cli()
        .args(["render", fixture().to_string_lossy().as_ref()])
        .assert()
        .code(2);
}
