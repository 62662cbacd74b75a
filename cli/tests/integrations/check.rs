use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_check_fully_declared_model() {
    let temp_dir = TempDir::new().unwrap();
    let model = temp_dir.path().join("ok.mzn");
    fs::write(&model, "var 0..9: a;\nvar 0..9: b;\nconstraint a + b = 9;").unwrap();

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("check").arg(&model);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 variable(s), 1 constraint(s), all declared"));
}

#[test]
fn test_cli_check_reports_undeclared_name() {
    let temp_dir = TempDir::new().unwrap();
    let model = temp_dir.path().join("missing.mzn");
    fs::write(&model, "var 0..9: a;\nconstraint a + c = 9;").unwrap();

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("check").arg(&model);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Undeclared variable: c"));
}

#[test]
fn test_cli_check_declaration_after_use_is_undeclared() {
    let temp_dir = TempDir::new().unwrap();
    let model = temp_dir.path().join("order.mzn");
    fs::write(&model, "constraint late > 0;\nvar 0..9: late;").unwrap();

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("check").arg(&model);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Undeclared variable: late"));
}
