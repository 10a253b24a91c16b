use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("cli").expect("binary builds")
}

#[test]
fn missing_trials_prints_usage_and_fails() {
    cli().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn zero_trials_is_rejected() {
    cli().arg("0").assert().failure();
}

#[test]
fn non_numeric_trials_is_rejected() {
    cli().arg("lots").assert().failure().stderr(predicate::str::contains("invalid value"));
}

#[test]
fn unknown_encounter_kind_is_rejected() {
    cli().args(["10", "--encounters", "dragon"]).assert().failure();
}

#[test]
fn small_run_writes_the_eight_matrices() {
    let out = std::env::temp_dir().join(format!("sim-cli-test-{}", std::process::id()));
    cli()
        .args(["5", "2", "--seed", "1", "--out-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Time taken"));

    for class in ["barbarian", "cleric", "rogue", "wizard"] {
        assert!(out.join(format!("{class}_NPC_hit_rate.csv")).is_file());
        assert!(out.join(format!("NPC_{class}_hit_rate.csv")).is_file());
    }
    std::fs::remove_dir_all(&out).ok();
}
