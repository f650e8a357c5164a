//! Black-box tests of the argument surface. None of these reach the
//! network: they all fail (or print help) before any remote call.

use assert_cmd::Command;
use predicates::prelude::*;

fn zbx_update() -> Command {
    let mut cmd = Command::cargo_bin("zbx-update").unwrap();
    // keep the host environment's credentials out of the tests
    cmd.env_remove("ZABBIX_USER");
    cmd.env_remove("ZABBIX_PASSWORD");
    cmd.env_remove("ZABBIX_URL");
    cmd
}

#[test]
fn missing_credentials_prints_usage_and_fails() {
    zbx_update()
        .args(["webserver", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn missing_password_alone_is_rejected() {
    zbx_update()
        .args([
            "-n",
            "ops",
            "-u",
            "http://zabbix.example/api_jsonrpc.php",
            "webserver",
            "enable",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));
}

#[test]
fn rejects_unknown_operation() {
    zbx_update()
        .args([
            "-n",
            "ops",
            "-p",
            "secret",
            "-u",
            "http://zabbix.example/api_jsonrpc.php",
            "webserver",
            "explode",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation 'explode'"));
}

#[test]
fn help_documents_the_surface() {
    zbx_update()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dryrun"))
        .stdout(predicate::str::contains("ZABBIX_USER"));
}
