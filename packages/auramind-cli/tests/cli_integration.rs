use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn auramind() -> Command {
    let mut cmd = Command::cargo_bin("auramind").unwrap();
    cmd.env_remove("AURAMIND_CONFIG")
        .env_remove("AURAMIND_SAMPLE_RATE");
    cmd
}

/// One-column CSV with a header row holding `sin(i * 0.1)` for `i` in `0..n`
fn write_sine_csv(dir: &Path, name: &str, n: usize) -> String {
    let mut text = String::from("amplitude\n");
    for i in 0..n {
        text.push_str(&format!("{}\n", (i as f64 * 0.1).sin()));
    }
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap()
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_no_args_shows_help() {
    auramind()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    auramind()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("auramind"));
}

#[test]
fn test_help_lists_subcommands() {
    auramind()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("filter"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("bands"));
}

// =============================================================================
// BANDS SUBCOMMAND
// =============================================================================

#[test]
fn test_bands_table() {
    auramind()
        .arg("bands")
        .assert()
        .success()
        .stdout(predicate::str::contains("delta"))
        .stdout(predicate::str::contains("gamma"));
}

#[test]
fn test_bands_json() {
    let assert = auramind().args(["bands", "--json"]).assert().success();
    let parsed = stdout_json(assert.get_output());
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 5);
    assert_eq!(arr[2]["name"], "alpha");
    assert_eq!(arr[2]["low_hz"], 8.0);
    assert_eq!(arr[2]["high_hz"], 13.0);
}

// =============================================================================
// ANALYZE SUBCOMMAND
// =============================================================================

#[test]
fn test_analyze_missing_file() {
    auramind()
        .args(["analyze", "--file", "/nonexistent_dir_12345/rec.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_analyze_unsupported_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("scan.pdf");
    fs::write(&path, "%PDF-1.4").unwrap();

    auramind()
        .args(["analyze", "--file", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported file extension"));
}

#[test]
fn test_analyze_csv_outputs_report() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 1000);

    let assert = auramind()
        .args(["analyze", "--file", file.as_str(), "--quiet"])
        .assert()
        .success();
    let report = stdout_json(assert.get_output());

    assert_eq!(report["sample_count"], 1000);
    assert_eq!(report["sample_rate"], 256.0);
    assert!(report["id"].is_string());
    assert!(report["filtered_stats"].is_object());

    let metrics = &report["metrics"];
    let risk = metrics["schizophreniaRisk"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&risk));
    let stages = &metrics["sleepStages"];
    let rem = stages["rem"].as_f64().unwrap();
    let deep = stages["deep"].as_f64().unwrap();
    assert_eq!(stages["light"].as_f64().unwrap(), 100.0 - rem - deep);
}

#[test]
fn test_analyze_flags_reach_config() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 500);

    let assert = auramind()
        .args([
            "analyze", "--file", file.as_str(), "--sr", "512", "--low", "1", "--high", "30",
            "--notch", "60", "--method", "fft", "--compact", "--quiet",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim().lines().count(), 1);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let config = &report["config"];
    assert_eq!(report["sample_rate"], 512.0);
    assert_eq!(config["low_hz"], 1.0);
    assert_eq!(config["high_hz"], 30.0);
    assert_eq!(config["notch_enabled"], true);
    assert_eq!(config["notch_frequency"], 60.0);
    assert_eq!(config["spectrum_method"], "fft");
}

#[test]
fn test_analyze_sample_rate_from_env() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 300);

    let assert = auramind()
        .env("AURAMIND_SAMPLE_RATE", "128")
        .args(["analyze", "--file", file.as_str(), "--quiet"])
        .assert()
        .success();
    assert_eq!(stdout_json(assert.get_output())["sample_rate"], 128.0);
}

#[test]
fn test_analyze_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 300);
    let config = tmp.path().join("config.json");
    fs::write(&config, r#"{"filter_enabled": false, "max_samples": 100}"#).unwrap();

    let assert = auramind()
        .args([
            "analyze", "--file", file.as_str(), "--config", config.to_str().unwrap(), "--quiet",
        ])
        .assert()
        .success();
    let report = stdout_json(assert.get_output());
    assert_eq!(report["sample_count"], 100);
    assert!(report["filtered_stats"].is_null());
}

#[test]
fn test_analyze_invalid_config() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 10);
    let config = tmp.path().join("config.json");
    fs::write(&config, "{ not json").unwrap();

    auramind()
        .args(["analyze", "--file", file.as_str(), "--config", config.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_analyze_empty_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("empty.csv");
    fs::write(&path, "amplitude\n").unwrap();

    auramind()
        .args(["analyze", "--file", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No samples decoded"));
}

#[test]
fn test_analyze_zero_signal_guard() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("zeros.txt");
    fs::write(&path, "0\n0\n0\n0\n").unwrap();

    let assert = auramind()
        .args(["analyze", "--file", path.to_str().unwrap(), "--quiet"])
        .assert()
        .success();
    assert!(stdout_json(assert.get_output())["metrics"]["alphaPower"].is_null());

    let assert = auramind()
        .args([
            "analyze",
            "--file",
            path.to_str().unwrap(),
            "--guard-zero-power",
            "--quiet",
        ])
        .assert()
        .success();
    assert_eq!(stdout_json(assert.get_output())["metrics"]["alphaPower"], 0.0);
}

#[test]
fn test_analyze_writes_output_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 200);
    let out = tmp.path().join("result.json");

    auramind()
        .args([
            "analyze", "--file", file.as_str(), "--delay-ms", "5", "-o", out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Results written to"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["config"]["delay_ms"], 5);
}

// =============================================================================
// FILTER SUBCOMMAND
// =============================================================================

#[test]
fn test_filter_csv_output() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 50);

    let assert = auramind()
        .args(["filter", "--file", file.as_str(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Sample Index,Amplitude\n0,"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 51);
}

#[test]
fn test_filter_disabled_passes_samples_through() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("values.txt");
    fs::write(&path, "1.5\n-2\n3\n").unwrap();

    auramind()
        .args(["filter", "--file", path.to_str().unwrap(), "--no-filter", "--quiet"])
        .assert()
        .success()
        .stdout("Sample Index,Amplitude\n0,1.5\n1,-2\n2,3\n");
}

#[test]
fn test_filter_interpolates_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("spike.txt");
    fs::write(&path, "1\n-1\n1\n-1\n50\n-1\n1\n-1\n1\n").unwrap();

    auramind()
        .args([
            "filter", "--file", path.to_str().unwrap(), "--no-filter",
            "--artifact-threshold", "2", "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n4,-1\n"))
        .stdout(predicate::str::contains("50").not());
}

// =============================================================================
// REPORT SUBCOMMAND
// =============================================================================

#[test]
fn test_report_text() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_sine_csv(tmp.path(), "sine.csv", 1000);

    auramind()
        .args(["report", "--file", file.as_str(), "--patient", "Jane Doe", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AuraMind EEG Analysis Report"))
        .stdout(predicate::str::contains("Patient: Jane Doe"))
        .stdout(predicate::str::contains("POWER SPECTRUM:"))
        .stdout(predicate::str::contains("RECOMMENDATIONS:"));
}

// =============================================================================
// BATCH SUBCOMMAND
// =============================================================================

#[test]
fn test_batch_no_matches() {
    auramind()
        .args(["batch", "--pattern", "/nonexistent_dir_12345/*.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn test_batch_json_lines() {
    let tmp = tempfile::tempdir().unwrap();
    write_sine_csv(tmp.path(), "a.csv", 300);
    write_sine_csv(tmp.path(), "b.csv", 400);
    let pattern = format!("{}/*.csv", tmp.path().to_str().unwrap());

    let assert = auramind()
        .args(["batch", "--pattern", pattern.as_str(), "--quiet"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let reports: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["sample_count"], 300);
    assert_eq!(reports[1]["sample_count"], 400);
}

#[test]
fn test_batch_continue_on_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_sine_csv(tmp.path(), "a.csv", 300);
    fs::write(tmp.path().join("b.csv"), "amplitude\n").unwrap();
    write_sine_csv(tmp.path(), "c.csv", 200);
    let pattern = format!("{}/*.csv", tmp.path().to_str().unwrap());

    let assert = auramind()
        .args(["batch", "--pattern", pattern.as_str(), "--continue-on-error", "--quiet"])
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 2);

    let assert = auramind()
        .args(["batch", "--pattern", pattern.as_str(), "--quiet"])
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1);
}
