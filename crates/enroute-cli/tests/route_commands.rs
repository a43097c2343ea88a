use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/reference_topology.csv")
        .canonicalize()
        .expect("fixture topology present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("enroute-cli");
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn demo_routes_reference_mesh() {
    cli()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route from A to G (3 hops; cost model: table):",
        ))
        .stdout(predicate::str::contains(" - A\n - C\n - F\n - G\n"))
        .stdout(predicate::str::contains("Total cost: 80"));
}

#[test]
fn route_from_file_matches_demo() {
    cli()
        .arg("route")
        .arg("--topology")
        .arg(fixture_path())
        .arg("--from")
        .arg("A")
        .arg("--to")
        .arg("G")
        .assert()
        .success()
        .stdout(predicate::str::contains(" - A\n - C\n - F\n - G\n"))
        .stdout(predicate::str::contains("Total cost: 80"));
}

#[test]
fn route_json_output() {
    let output = cli()
        .arg("--format")
        .arg("json")
        .arg("route")
        .arg("--topology")
        .arg(fixture_path())
        .arg("--from")
        .arg("A")
        .arg("--to")
        .arg("G")
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["source"], "A");
    assert_eq!(value["target"], "G");
    assert_eq!(value["cost_model"], "table");
    assert_eq!(value["reachable"], true);
    assert_eq!(value["total_cost"], 80.0);
    assert_eq!(value["path"], serde_json::json!(["A", "C", "F", "G"]));
}

#[test]
fn isolated_node_is_reported_unreachable() {
    cli()
        .arg("route")
        .arg("--topology")
        .arg(fixture_path())
        .arg("--from")
        .arg("A")
        .arg("--to")
        .arg("H")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No route from A to H (cost model: table).",
        ));
}

#[test]
fn unreachable_json_has_empty_path() {
    let output = cli()
        .args(["--format", "json", "route", "--from", "H", "--to", "A"])
        .arg("--topology")
        .arg(fixture_path())
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["reachable"], false);
    assert_eq!(value["path"], serde_json::json!([]));
}

#[test]
fn self_query_is_single_node() {
    cli()
        .args(["demo", "--from", "C", "--to", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 hops; cost model: table)"))
        .stdout(predicate::str::contains("Total cost: 0"));
}

#[test]
fn unknown_node_error_is_friendly() {
    cli()
        .args(["demo", "--from", "A", "--to", "Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to route from A to Q"))
        .stderr(predicate::str::contains("unknown node name: Q"));
}

#[test]
fn missing_topology_file_fails() {
    let dir = tempdir().expect("create temp dir");
    cli()
        .arg("route")
        .arg("--topology")
        .arg(dir.path().join("absent.csv"))
        .args(["--from", "A", "--to", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load topology"));
}

#[test]
fn malformed_topology_reports_line() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "node_a,cpu_a,radio_a,node_b,cpu_b,radio_b\nA,1,1,B,1,1\nB,1,1,B,1,1\n",
    )
    .expect("write topology");

    cli()
        .arg("route")
        .arg("--topology")
        .arg(&path)
        .args(["--from", "A", "--to", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn fuzzy_model_still_finds_a_route() {
    cli()
        .args(["--cost-model", "fuzzy", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cost model: fuzzy"))
        .stdout(predicate::str::starts_with("Route from A to G"));
}
