use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_solve_without_minizinc_executable() {
    let temp_dir = TempDir::new().unwrap();
    let model = temp_dir.path().join("sum.mzn");
    fs::write(&model, "var 0..3: x;\nconstraint x > 1;").unwrap();

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("solve")
        .arg(&model)
        .arg("--minizinc")
        .arg(temp_dir.path().join("no-such-minizinc"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to run MiniZinc executable"));
}

#[test]
fn test_cli_solvers_without_minizinc_executable() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("zinc").unwrap();
    cmd.arg("solvers")
        .env("MINIZINC", temp_dir.path().join("no-such-minizinc"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Solver error"));
}

#[cfg(unix)]
mod with_fake_minizinc {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::time::Duration;

    const SOLVERS_JSON: &str = r#"if [ "$1" = "--solvers-json" ]; then
  echo '[{"id": "org.gecode.gecode", "name": "Gecode", "version": "6.3.0", "tags": ["cp", "int"]}]'
  exit 0
fi
"#;

    /// A shell script standing in for MiniZinc: lists one solver, then runs
    /// `solve_body` for every other invocation.
    fn script_minizinc(dir: &TempDir, solve_body: &str) -> PathBuf {
        let script = dir.path().join("minizinc");
        fs::write(&script, format!("#!/bin/sh\n{}{}", SOLVERS_JSON, solve_body)).unwrap();
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();
        script
    }

    /// Prints two JSON solutions followed by the search-complete marker
    fn fake_minizinc(dir: &TempDir) -> PathBuf {
        script_minizinc(
            dir,
            r#"echo '{ "x" : 2 }'
echo '----------'
echo '{ "x" : 3 }'
echo '----------'
echo '=========='
"#,
        )
    }

    fn model_file(dir: &TempDir) -> PathBuf {
        let model = dir.path().join("sum.mzn");
        fs::write(&model, "var 0..3: x;\nconstraint x > 1;").unwrap();
        model
    }

    #[test]
    fn test_cli_solve_streams_solutions() {
        let temp_dir = TempDir::new().unwrap();
        let minizinc = fake_minizinc(&temp_dir);
        let model = model_file(&temp_dir);

        let mut cmd = Command::cargo_bin("zinc").unwrap();
        cmd.arg("solve")
            .arg(&model)
            .arg("--all")
            .arg("--raw")
            .arg("--minizinc")
            .arg(&minizinc);

        cmd.assert()
            .success()
            .stdout("{\"x\":2}\n{\"x\":3}\n");
    }

    #[test]
    fn test_cli_solve_unknown_solver() {
        let temp_dir = TempDir::new().unwrap();
        let minizinc = fake_minizinc(&temp_dir);
        let model = model_file(&temp_dir);

        let mut cmd = Command::cargo_bin("zinc").unwrap();
        cmd.arg("solve")
            .arg(&model)
            .arg("--solver")
            .arg("cplex")
            .arg("--minizinc")
            .arg(&minizinc);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Solver 'cplex' not found"));
    }

    #[test]
    fn test_cli_solvers_table() {
        let temp_dir = TempDir::new().unwrap();
        let minizinc = fake_minizinc(&temp_dir);

        let mut cmd = Command::cargo_bin("zinc").unwrap();
        cmd.arg("solvers").arg("--minizinc").arg(&minizinc);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("org.gecode.gecode"))
            .stdout(predicate::str::contains("cp, int"));
    }

    #[test]
    fn test_cli_solve_with_noisy_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let minizinc = script_minizinc(
            &temp_dir,
            r#"yes 'warning: redundant constraint' | head -n 20000 >&2
echo '{ "x" : 2 }'
echo '----------'
echo '=========='
"#,
        );
        let model = model_file(&temp_dir);

        let mut cmd = Command::cargo_bin("zinc").unwrap();
        cmd.arg("solve")
            .arg(&model)
            .arg("--raw")
            .arg("--minizinc")
            .arg(&minizinc)
            .timeout(Duration::from_secs(30));

        cmd.assert().success().stdout("{\"x\":2}\n");
    }

    #[test]
    fn test_cli_solve_reports_error_status_and_stops_solver() {
        let temp_dir = TempDir::new().unwrap();
        let minizinc = script_minizinc(
            &temp_dir,
            r#"echo 'Error: type error in sum.mzn' >&2
echo '=====ERROR====='
exec sleep 60
"#,
        );
        let model = model_file(&temp_dir);

        let mut cmd = Command::cargo_bin("zinc").unwrap();
        cmd.arg("solve")
            .arg(&model)
            .arg("--minizinc")
            .arg(&minizinc)
            .timeout(Duration::from_secs(30));

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("MiniZinc reported an error"))
            .stderr(predicate::str::contains("type error in sum.mzn"));
    }

    #[test]
    fn test_cli_solve_failed_exit_includes_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let minizinc = script_minizinc(
            &temp_dir,
            r#"yes 'padding' | head -n 20000 >&2
echo 'solver crashed' >&2
exit 3
"#,
        );
        let model = model_file(&temp_dir);

        let mut cmd = Command::cargo_bin("zinc").unwrap();
        cmd.arg("solve")
            .arg(&model)
            .arg("--minizinc")
            .arg(&minizinc)
            .timeout(Duration::from_secs(30));

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("MiniZinc exited with"))
            .stderr(predicate::str::contains("solver crashed"));
    }
}
