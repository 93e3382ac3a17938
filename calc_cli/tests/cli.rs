//! End-to-end tests of the calc_cli binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SHOP_TOML: &str = r#"
[meta]
version = "0.1.0"
facility = "Woodworking shop"
engineer = "A. Petrenko"

[[equipment]]
id = 1
name = "Grinding machine"
count = 3
rated_power = "10"
utilization_rate = "0.6"
reactive_factor = 0.75

[fuels]
coal = "1000"
"#;

/// Run the binary in an empty directory with no inherited log settings
fn calc_cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("calc_cli").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("LOADLINE_LOG")
        .env_remove("LOADLINE_KR")
        .env_remove("LOADLINE_FILTER_EFFICIENCY")
        .env_remove("LOADLINE_DEFAULT_REFERENCE_VOLTAGE")
        .env_remove("LOADLINE_LOG_FORMAT");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_from_toml_worksheet() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "shop.toml", SHOP_TOML);

    calc_cli(&dir)
        .args(["load", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Σ n·P        = 30.00 kW"))
        .stdout(predicate::str::contains("Kv = 0.600"))
        .stdout(predicate::str::contains("Pр = 20.88 kW"))
        .stdout(predicate::str::contains("Sр = 26.10 kVA"));
}

#[test]
fn load_kr_flag_overrides_worksheet() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "shop.toml", SHOP_TOML);

    let output = calc_cli(&dir)
        .args(["load", "--kr", "1", "--json", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kr"], 1.0);
    assert_eq!(json["active_load_kw"], 18.0);
    assert_eq!(json["reference_voltage_kv"], 10.0);
}

#[test]
fn load_prompts_when_no_input() {
    let dir = TempDir::new().unwrap();
    // First row: η, cos φ, U, n, P, Kv, tg φ; the remaining rows stay blank.
    calc_cli(&dir)
        .arg("load")
        .write_stdin("\n\n0.38\n3\n10\n0.6\n0.75\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pр = 20.88 kW"))
        .stdout(predicate::str::contains("U = 0.380 kV"))
        .stderr(predicate::str::contains("1. Grinding machine"));
}

#[test]
fn emission_from_flags_as_json() {
    let dir = TempDir::new().unwrap();
    let output = calc_cli(&dir)
        .args(["emission", "--coal", "1096363", "--oil", "70945", "--gas", "84762", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let total = json["total_t"].as_f64().unwrap();
    assert!((total - 3367.49).abs() < 0.01);
    assert_eq!(json["fuels"].as_array().unwrap().len(), 3);
    assert_eq!(json["fuels"][2]["emission_t"], 0.0);
}

#[test]
fn emission_malformed_amount_counts_as_zero() {
    let dir = TempDir::new().unwrap();
    calc_cli(&dir)
        .args(["emission", "--coal", "1,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total emission = 0.00 t"));
}

#[test]
fn emission_rejects_out_of_range_filter() {
    let dir = TempDir::new().unwrap();
    calc_cli(&dir)
        .args(["emission", "--coal", "1000", "--filter-efficiency", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_INPUT").or(predicate::str::contains("InvalidInput")))
        .stderr(predicate::str::contains("filter_efficiency"));
}

#[test]
fn report_from_json_worksheet() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "shop.json",
        r#"{ "meta": { "version": "0.1.0", "facility": "Sawmill" },
             "fuels": { "coal": 1000 } }"#,
    );

    calc_cli(&dir)
        .args(["report", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Facility: Sawmill"))
        .stdout(predicate::str::contains("Pр = 0.00 kW"))
        .stdout(predicate::str::contains("Total emission = 3.07 t"));
}

#[test]
fn report_version_mismatch_prints_error_json() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "old.json", r#"{ "meta": { "version": "1.0.0" } }"#);

    calc_cli(&dir)
        .args(["report", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error JSON:"))
        .stderr(predicate::str::contains("VersionMismatch"));
}

#[test]
fn report_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    calc_cli(&dir)
        .args(["report", "--input", "nowhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FileError"));
}

#[test]
fn config_file_sets_filter_efficiency() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "loadline.toml", "filter_efficiency = 1.0\n");

    calc_cli(&dir)
        .args(["emission", "--coal", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total emission = 0.00 t"));
}

#[test]
fn env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "loadline.toml", "filter_efficiency = 1.0\n");

    calc_cli(&dir)
        .env("LOADLINE_FILTER_EFFICIENCY", "0.985")
        .args(["emission", "--coal", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total emission = 3.07 t"));
}

const SHOP_JSON_NO_SETTINGS: &str = r#"{
    "meta": { "version": "0.1.0" },
    "equipment": [
        { "id": 1, "count": 3, "rated_power": 10, "utilization_rate": 0.6, "reactive_factor": 0.75 }
    ],
    "fuels": { "coal": 1000 }
}"#;

#[test]
fn config_file_applies_to_worksheet_without_settings() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "loadline.toml", "kr = 1.0\nfilter_efficiency = 1.0\n");
    let input = write_file(&dir, "ws.json", SHOP_JSON_NO_SETTINGS);

    calc_cli(&dir)
        .args(["emission", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total emission = 0.00 t"));

    calc_cli(&dir)
        .args(["report", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kr = 1.00"))
        .stdout(predicate::str::contains("Pр = 18.00 kW"));
}

#[test]
fn env_applies_to_worksheet_without_settings() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "ws.json", SHOP_JSON_NO_SETTINGS);

    calc_cli(&dir)
        .env("LOADLINE_KR", "1.0")
        .args(["load", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kr = 1.00"))
        .stdout(predicate::str::contains("Pр = 18.00 kW"));
}

#[test]
fn worksheet_settings_win_over_config_file() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "loadline.toml", "kr = 1.0\nfilter_efficiency = 1.0\n");
    let input = write_file(
        &dir,
        "ws.toml",
        "[settings]\nkr = 1.16\n\n[[equipment]]\nid = 1\ncount = 3\nrated_power = 10\nutilization_rate = 0.6\n",
    );

    calc_cli(&dir)
        .args(["load", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pр = 20.88 kW"));
}

#[test]
fn fuels_and_equations_print() {
    let dir = TempDir::new().unwrap();
    calc_cli(&dir)
        .arg("fuels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fuel oil"));

    calc_cli(&dir)
        .arg("equations")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Loadline Equations Reference"));
}
