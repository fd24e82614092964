//! End-to-end CLI tests against an isolated XDG environment.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
        }
    }
}

fn run_lyub(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("lyub"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute lyub: {e}"))
}

fn assert_success(args: &[&str], output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "lyub {} failed\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            stdout,
            stderr
        );
    }
    stdout
}

#[test]
fn test_default_categories_are_seeded() {
    let env = CliTestEnv::new();

    let args = ["category", "list"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);

    for name in ["Writing", "Research", "Reading", "Meetings", "Rest", "Interests"] {
        assert!(stdout.contains(name), "missing category {name}:\n{stdout}");
    }
}

#[test]
fn test_timer_start_status_stop_flow() {
    let env = CliTestEnv::new();

    let args = ["start", "Writing", "drafting notes"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("Started 'Writing'"));

    // A second start must be refused
    let output = run_lyub(&env, &["start", "Reading"]);
    assert!(!output.status.success());

    let args = ["status"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("Writing"));

    let args = ["stop"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("Recorded"));
    assert!(stdout.contains("Writing"));

    // The activity shows up in the history under Today
    let args = ["log"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("Today"));
    assert!(stdout.contains("drafting notes"));

    // And stopping again fails
    let output = run_lyub(&env, &["stop"]);
    assert!(!output.status.success());
}

#[test]
fn test_cancel_discards_the_timer() {
    let env = CliTestEnv::new();

    run_lyub(&env, &["start", "Rest"]);
    let args = ["cancel"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("Discarded"));

    let args = ["log"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("No activities yet"));
}

#[test]
fn test_stats_reports_recorded_time() {
    let env = CliTestEnv::new();

    run_lyub(&env, &["start", "Writing"]);
    run_lyub(&env, &["stop"]);

    let args = ["stats", "--period", "week"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("This Week"));
    assert!(stdout.contains("Streak: 1 day"));
    assert!(stdout.contains("Creative"));
    assert!(stdout.contains("Last 7 days:"));
}

#[test]
fn test_stats_json_output() {
    let env = CliTestEnv::new();

    run_lyub(&env, &["start", "Writing"]);
    run_lyub(&env, &["stop"]);

    let args = ["stats", "--format", "json"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);

    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("stats --format json must emit valid JSON");
    assert_eq!(payload["streak"], 1);
    assert_eq!(payload["summary"]["period"], "today");
    assert!(payload["summary"]["total_secs"].as_i64().unwrap() >= 0);
    assert_eq!(payload["summary"]["by_type"].as_array().unwrap().len(), 4);

    // Unknown formats are refused
    let output = run_lyub(&env, &["stats", "--format", "yaml"]);
    assert!(!output.status.success());
}

#[test]
fn test_stats_on_empty_log() {
    let env = CliTestEnv::new();

    let args = ["stats"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("No activities recorded in this period."));
    assert!(stdout.contains("Streak: 0 days"));
}

#[test]
fn test_unit_preference_changes_output() {
    let env = CliTestEnv::new();

    let args = ["unit", "hours"];
    let output = run_lyub(&env, &args);
    assert_success(&args, &output);

    run_lyub(&env, &["start", "Writing"]);
    let args = ["stop"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    // An immediate stop rounds to 0.00h in the hours unit
    assert!(stdout.contains("0.00h"), "expected hours unit:\n{stdout}");
}

#[test]
fn test_category_add_and_remove() {
    let env = CliTestEnv::new();

    let args = ["category", "add", "Violin", "--kind", "personal"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("Added 'Violin'"));

    let args = ["category", "remove", "Violin"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("Removed 'Violin'"));

    // Removing an unknown category fails
    let output = run_lyub(&env, &["category", "remove", "Violin"]);
    assert!(!output.status.success());
}

#[test]
fn test_calendar_renders_legend() {
    let env = CliTestEnv::new();

    let args = ["calendar", "--month", "2024-02"];
    let output = run_lyub(&env, &args);
    let stdout = assert_success(&args, &output);
    assert!(stdout.contains("2024-02"));
    assert!(stdout.contains("Mo Tu We Th Fr Sa Su"));
    assert!(stdout.contains("6h+"));
}
