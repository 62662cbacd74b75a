//! Solver backend driving the MiniZinc executable.
//!
//! The rendered document is written to a temporary `.mzn` file and handed to
//! `minizinc --output-mode json`. Solutions are read lazily from stdout, one
//! JSON object per `----------` separator. Diagnostics on stderr go to an
//! unnamed temporary file and are only read back when solving fails.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zinc::{SolutionRecord, SolveOptions, Solutions, Solver, SolverRegistry, ZincError, ZincResult};

const SOLUTION_SEPARATOR: &str = "----------";
const SEARCH_COMPLETE: &str = "==========";
const STATUS_ERROR: &str = "=====ERROR=====";

/// A solver entry as reported by `minizinc --solvers-json`
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub struct MiniZinc {
    executable: PathBuf,
}

impl MiniZinc {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Ask the executable which solvers it has configured
    pub fn solver_configs(&self) -> ZincResult<Vec<SolverConfig>> {
        let output = Command::new(&self.executable)
            .arg("--solvers-json")
            .output()
            .map_err(|e| {
                ZincError::Solver(format!(
                    "failed to run MiniZinc executable '{}': {}",
                    self.executable.display(),
                    e
                ))
            })?;
        if !output.status.success() {
            return Err(ZincError::Solver(format!(
                "MiniZinc could not list solvers: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        serde_json::from_slice(&output.stdout)
            .map_err(|e| ZincError::Solver(format!("unreadable solver list from MiniZinc: {}", e)))
    }

    /// A registry holding one entry per configured solver
    pub fn registry(&self) -> ZincResult<SolverRegistry> {
        let mut registry = SolverRegistry::new();
        for config in self.solver_configs()? {
            debug!(id = %config.id, version = %config.version, "registering solver");
            registry.register(Box::new(MiniZincSolver {
                executable: self.executable.clone(),
                config,
            }));
        }
        Ok(registry)
    }
}

pub struct MiniZincSolver {
    executable: PathBuf,
    config: SolverConfig,
}

impl MiniZincSolver {
    fn command(&self, model_file: &Path, options: &SolveOptions, stderr: Stdio) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("--solver")
            .arg(&self.config.id)
            .arg("--output-mode")
            .arg("json");
        if options.all_solutions {
            cmd.arg("--all-solutions");
        }
        if let Some(limit) = options.solution_limit {
            cmd.arg("--num-solutions").arg(limit.to_string());
        }
        if let Some(ms) = options.time_limit_ms {
            cmd.arg("--time-limit").arg(ms.to_string());
        }
        if options.free_search {
            cmd.arg("--free-search");
        }
        cmd.arg(model_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(stderr);
        cmd
    }
}

impl Solver for MiniZincSolver {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn tags(&self) -> &[String] {
        &self.config.tags
    }

    fn solve(&self, document: &str, options: &SolveOptions) -> ZincResult<Solutions<'_>> {
        let model_file = tempfile::Builder::new()
            .prefix("zinc-")
            .suffix(".mzn")
            .tempfile()
            .map_err(|e| ZincError::Solver(format!("cannot create model file: {}", e)))?;
        std::fs::write(model_file.path(), document)
            .map_err(|e| ZincError::Solver(format!("cannot write model file: {}", e)))?;

        let stderr_log = tempfile::tempfile()
            .map_err(|e| ZincError::Solver(format!("cannot create stderr log: {}", e)))?;
        let stderr = stderr_log
            .try_clone()
            .map_err(|e| ZincError::Solver(format!("cannot share stderr log: {}", e)))?;

        let mut child = self
            .command(model_file.path(), options, Stdio::from(stderr))
            .spawn()
            .map_err(|e| {
                ZincError::Solver(format!(
                    "failed to run MiniZinc executable '{}': {}",
                    self.executable.display(),
                    e
                ))
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ZincError::Solver("MiniZinc stdout unavailable".to_string()))?;
        info!(solver = %self.config.id, "solving");

        Ok(Box::new(SolutionStream {
            child,
            lines: BufReader::new(stdout).lines(),
            stderr_log,
            buffer: String::new(),
            finished: false,
            reaped: false,
            _model_file: model_file,
        }))
    }
}

/// Lazily reads solutions from a running MiniZinc process. Dropping the
/// stream, or any failure, stops the process.
struct SolutionStream {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    stderr_log: File,
    buffer: String,
    finished: bool,
    reaped: bool,
    _model_file: NamedTempFile,
}

impl SolutionStream {
    fn fail(&mut self, message: String) -> Option<ZincResult<SolutionRecord>> {
        self.finished = true;
        self.stop();
        Some(Err(ZincError::Solver(message)))
    }

    /// Kill the process if it is still running and reap it
    fn stop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
            self.reaped = true;
        }
    }

    fn stderr(&mut self) -> String {
        let mut stderr = String::new();
        if self.stderr_log.seek(SeekFrom::Start(0)).is_ok() {
            let _ = self.stderr_log.read_to_string(&mut stderr);
        }
        stderr.trim().to_string()
    }

    fn finish(&mut self) -> Option<ZincResult<SolutionRecord>> {
        self.finished = true;
        let status = match self.child.wait() {
            Ok(status) => status,
            Err(e) => return self.fail(format!("lost MiniZinc process: {}", e)),
        };
        self.reaped = true;
        if status.success() {
            return None;
        }
        let stderr = self.stderr();
        self.fail(format!("MiniZinc exited with {}: {}", status, stderr))
    }

    fn parse_solution(&mut self) -> ZincResult<SolutionRecord> {
        let text = std::mem::take(&mut self.buffer);
        match serde_json::from_str(&text) {
            Ok(serde_json::Value::Object(assignments)) => Ok(SolutionRecord::new(assignments)),
            Ok(other) => Err(ZincError::Solver(format!(
                "expected a JSON object per solution, got {}",
                other
            ))),
            Err(e) => Err(ZincError::Solver(format!("unreadable solution: {}", e))),
        }
    }
}

impl Iterator for SolutionStream {
    type Item = ZincResult<SolutionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let line = match self.lines.next() {
                None => return self.finish(),
                Some(Err(e)) => return self.fail(format!("reading MiniZinc output: {}", e)),
                Some(Ok(line)) => line,
            };
            match line.trim() {
                SOLUTION_SEPARATOR => return Some(self.parse_solution()),
                SEARCH_COMPLETE => debug!("search complete"),
                STATUS_ERROR => {
                    self.stop();
                    let stderr = self.stderr();
                    return self.fail(format!("MiniZinc reported an error: {}", stderr));
                }
                status if status.starts_with("=====") => {
                    info!(status = status.trim_matches('='), "solver finished");
                }
                _ => {
                    self.buffer.push_str(&line);
                    self.buffer.push('\n');
                }
            }
        }
    }
}

impl Drop for SolutionStream {
    fn drop(&mut self) {
        if !self.finished {
            debug!("stopping MiniZinc before the search finished");
        }
        self.stop();
    }
}
