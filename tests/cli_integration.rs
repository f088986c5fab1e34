//! End-to-end tests of the `climate-balance` binary.

mod common;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_climate-balance"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("climate-balance process should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("climate-balance-{}-{name}", std::process::id()))
}

#[test]
fn list_prints_every_municipality() {
    let output = run(&["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let ags: Vec<&str> = text.lines().filter_map(|l| l.split('\t').next()).collect();
    // AGS order
    assert_eq!(ags, vec![common::RURAL, common::CITY, common::NATIONAL]);
}

#[test]
fn calc_writes_json_to_stdout() {
    let output = run(&["calc", "--ags", common::CITY, "--year", "2040", "--bisko"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: Value = serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(json["ags"], common::CITY);
    assert_eq!(json["year"], 2040);
    assert!(json["e30"]["e"]["invest"].is_number());
    assert!(json["bisko_ph"]["total"].is_object());
    assert!(json.get("indicators").is_none());
}

#[test]
fn config_file_selects_request_and_format() {
    let output = run(&["calc", "--config", "scenarios/rural_2040.toml"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = stdout(&output);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("path,value"));
    assert_eq!(lines.next(), Some("ags,09780139"));
    assert_eq!(lines.next(), Some("year,2040"));
}

#[test]
fn overrides_change_the_result() {
    let base = run(&["calc", "--preset", "national_2035"]);
    let fast = run(&["calc", "--config", "scenarios/national_fast_rehab.toml"]);
    assert!(base.status.success());
    assert!(fast.status.success(), "stderr: {}", String::from_utf8_lossy(&fast.stderr));

    let rehab = |output: &Output| -> f64 {
        let json: Value = serde_json::from_str(&stdout(output)).expect("stdout should be JSON");
        json["r30"]["p_buildings_total"]["area_m2_rehab"]
            .as_f64()
            .expect("area_m2_rehab should be a number")
    };
    assert!(rehab(&fast) > rehab(&base));
}

#[test]
fn calc_writes_the_output_file() {
    let path = temp_path("rural.csv");
    let path_str = path.to_str().expect("temp path should be UTF-8");
    let output = run(&["calc", "--ags", common::RURAL, "--format", "csv", "--out", path_str]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let text = fs::read_to_string(&path).expect("output file should exist");
    let _ = fs::remove_file(&path);
    assert!(text.lines().any(|l| l.starts_with("l30.g_forest.area_ha,")));
}

#[test]
fn invalid_requests_exit_with_1() {
    let output = run(&["calc", "--year", "2019"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("2019"));

    let output = run(&["calc", "--ags", "00000000"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["calc", "--set", "Ass_R_P_not_a_key=1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ass_R_P_not_a_key"));
}

#[test]
fn compare_against_own_output_matches() {
    let reference = temp_path("reference.json");
    let reference_str = reference.to_str().expect("temp path should be UTF-8");
    let output = run(&["calc", "--ags", common::RURAL, "--out", reference_str]);
    assert!(output.status.success());

    let same = run(&["compare", reference_str, "--ags", common::RURAL]);
    let other_year = run(&["compare", reference_str, "--ags", common::RURAL, "--year", "2045"]);
    let _ = fs::remove_file(&reference);

    assert_eq!(same.status.code(), Some(0));
    let result: Value = serde_json::from_str(&stdout(&same)).expect("comparison should be JSON");
    assert_eq!(result["differences"].as_array().map(Vec::len), Some(0));

    assert_eq!(other_year.status.code(), Some(2));
    let result: Value =
        serde_json::from_str(&stdout(&other_year)).expect("comparison should be JSON");
    assert!(result["differences"].as_array().is_some_and(|d| !d.is_empty()));
}
