use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_model(dir: &TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_cli_render_simple_model() {
    let temp_dir = TempDir::new().unwrap();
    let model = write_model(
        &temp_dir,
        "sum.mzn",
        r#"
var 0..10: x;
var 0..10: y;
constraint x + y = 10;
"#,
    );

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("render").arg(&model);

    cmd.assert().success().stdout(
        "var 0..10: x;\nvar 0..10: y;\n\nconstraint ((x) + (y)) = (10);\n",
    );
}

#[test]
fn test_cli_render_auto_declares_with_default_domain() {
    let temp_dir = TempDir::new().unwrap();
    let model = write_model(&temp_dir, "implicit.mzn", "constraint a < b;");

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("render")
        .arg(&model)
        .arg("--default-domain")
        .arg("1..6");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("var 1..6: a;"))
        .stdout(predicate::str::contains("var 1..6: b;"))
        .stdout(predicate::str::contains("constraint (a) < (b);"));
}

#[test]
fn test_cli_render_from_stdin() {
    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("render")
        .arg("-")
        .write_stdin("var 0..1: flag;\nconstraint flag >= 1;\n");

    cmd.assert()
        .success()
        .stdout("var 0..1: flag;\n\nconstraint (flag) >= (1);\n");
}

#[test]
fn test_cli_render_no_auto_declare_fails() {
    let temp_dir = TempDir::new().unwrap();
    let model = write_model(&temp_dir, "typo.mzn", "var 0..9: count;\nconstraint cuont > 1;");

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("render").arg(&model).arg("--no-auto-declare");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Undeclared variable: cuont"));
}

#[test]
fn test_cli_render_syntax_error() {
    let temp_dir = TempDir::new().unwrap();
    let model = write_model(&temp_dir, "broken.mzn", "var 0..9: x;\nconstraint x + ;");

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("render").arg(&model);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_cli_render_invalid_default_domain() {
    let temp_dir = TempDir::new().unwrap();
    let model = write_model(&temp_dir, "m.mzn", "constraint a < 1;");

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("render")
        .arg(&model)
        .arg("--default-domain")
        .arg("9..0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("lower bound exceeds upper bound"));
}

#[test]
fn test_cli_render_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("render").arg(temp_dir.path().join("nope.mzn"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read model file"));
}

#[test]
fn test_cli_vars_table() {
    let temp_dir = TempDir::new().unwrap();
    let model = write_model(
        &temp_dir,
        "vars.mzn",
        "var -5..5: temperature;\nconstraint temperature > offset;",
    );

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("vars").arg(&model);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("temperature"))
        .stdout(predicate::str::contains("-5..5"))
        .stdout(predicate::str::contains("offset"))
        .stdout(predicate::str::contains("0..255"))
        .stdout(predicate::str::contains("2 variable(s), 1 constraint(s)"));
}

#[test]
fn test_cli_vars_raw() {
    let temp_dir = TempDir::new().unwrap();
    let model = write_model(&temp_dir, "vars.mzn", "var 1..3: a;\nconstraint a = b;");

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("vars").arg(&model).arg("--raw");

    cmd.assert()
        .success()
        .stdout("var 1..3: a;\nvar 0..255: b;\n");
}
