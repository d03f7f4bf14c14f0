#[path = "common/mod.rs"]
mod common;

use std::fs;

use assert_cmd::Command;
use common::{ProvisionFixture, WRAPPER_ALWAYS_ABSENT};
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::tempdir;

fn provg() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("provg"))
}

#[test]
fn provision_fails_when_config_missing() {
    let temp = tempdir().expect("failed to create tempdir");
    let missing = temp.path().join("nope.json");

    provg()
        .arg("provision")
        .arg("--config")
        .arg(missing.to_str().unwrap())
        .assert()
        .failure()
        .stderr(contains("Failed to read config file"));
}

#[test]
fn provision_fails_on_malformed_config() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = temp.path().join("config.json");
    fs::write(&config, "{ definitely not json").unwrap();

    provg()
        .arg("provision")
        .arg("--config")
        .arg(config.to_str().unwrap())
        .assert()
        .failure()
        .stderr(contains("Invalid JSON format"));
}

#[test]
fn check_reports_declared_services() {
    let fixture = ProvisionFixture::new(WRAPPER_ALWAYS_ABSENT);
    let script = fixture.add_script("Worker1");
    fixture.write_config(&[("Worker1", &script)]);

    provg()
        .arg("check")
        .arg("--config")
        .arg(fixture.config_path().to_str().unwrap())
        .assert()
        .success()
        .stdout(contains("config ok: 1 service(s)").and(contains("Worker1")));
}

#[test]
fn check_rejects_duplicate_service_names() {
    let fixture = ProvisionFixture::new(WRAPPER_ALWAYS_ABSENT);
    let script = fixture.add_script("Worker1");
    fixture.write_config(&[("Worker1", &script), ("Worker1", &script)]);

    provg()
        .arg("check")
        .arg("--config")
        .arg(fixture.config_path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(contains("duplicate service name"));
}

#[test]
fn check_does_not_install_the_wrapper() {
    let fixture = ProvisionFixture::new(WRAPPER_ALWAYS_ABSENT);
    let script = fixture.add_script("Worker1");
    fixture.write_config(&[("Worker1", &script)]);

    provg()
        .arg("check")
        .arg("--config")
        .arg(fixture.config_path().to_str().unwrap())
        .env("PROVISIONG_SYSTEM_DIR", fixture.system_dir())
        .assert()
        .success();

    assert!(
        !fixture.system_dir().join("nssm.exe").exists(),
        "check must not perform the privileged wrapper copy"
    );
    assert!(
        fs::read_dir(fixture.dest_folder()).unwrap().next().is_none(),
        "check must not deploy any script"
    );
}

#[test]
fn log_file_flag_appends_to_the_given_file() {
    let temp = tempdir().expect("failed to create tempdir");
    let missing = temp.path().join("nope.json");
    let log_file = temp.path().join("app.log");

    provg()
        .arg("--log-file")
        .arg(log_file.to_str().unwrap())
        .arg("provision")
        .arg("--config")
        .arg(missing.to_str().unwrap())
        .assert()
        .failure();

    let content = fs::read_to_string(&log_file).expect("log file should exist");
    assert!(
        content.contains("Failed to load configuration"),
        "log file should carry the error line, got: {content}"
    );
}
