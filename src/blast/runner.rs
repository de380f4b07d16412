// runner.rs - Blocking BLAST+ invocation with a bounded timeout

use super::program::BlastProgram;
use crate::error::{ArgScanError, Result};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Default timeout for one BLAST run
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Parameters for the external search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastConfig {
    pub program: BlastProgram,
    /// Database prefix as given to `makeblastdb -out`
    pub db: PathBuf,
    pub evalue: f64,
    pub max_target_seqs: usize,
    pub threads: usize,
    pub timeout_secs: u64,
    /// Directory holding the BLAST+ executables; `PATH` is searched when absent
    pub binary_dir: Option<PathBuf>,
}

impl BlastConfig {
    pub fn new(program: BlastProgram, db: PathBuf) -> Self {
        Self {
            program,
            db,
            evalue: 1e-5,
            max_target_seqs: 5,
            threads: 1,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            binary_dir: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Outcome of a successful search
#[derive(Debug, Clone)]
pub struct BlastRun {
    pub output: PathBuf,
    pub elapsed: Duration,
    pub stderr: String,
}

/// Runs one BLAST+ program against one database
pub struct BlastRunner {
    config: BlastConfig,
}

impl BlastRunner {
    pub fn new(config: BlastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BlastConfig {
        &self.config
    }

    fn tool_name(&self) -> &'static str {
        self.config.program.binary_name()
    }

    /// Resolve the executable from `binary_dir` or `PATH`
    pub fn locate_binary(&self) -> Result<PathBuf> {
        self.locate_binary_in(std::env::var_os("PATH"))
    }

    /// Like [`locate_binary`](Self::locate_binary), searching `search_path` instead of `PATH`
    pub fn locate_binary_in(&self, search_path: Option<OsString>) -> Result<PathBuf> {
        let name = self.tool_name();
        match &self.config.binary_dir {
            Some(dir) => {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    Ok(candidate)
                } else {
                    Err(ArgScanError::external_tool(
                        name.to_string(),
                        format!("executable not found in {}", dir.display()),
                    ))
                }
            }
            None => which::which_in(name, search_path, Path::new(".")).map_err(|e| {
                ArgScanError::external_tool(
                    name.to_string(),
                    format!("executable not found on PATH ({})", e),
                )
            }),
        }
    }

    /// Command-line arguments requesting 12-column tabular output
    pub fn build_args(&self, query: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        args.push("-query".into());
        args.push(query.as_os_str().to_os_string());
        args.push("-db".into());
        args.push(self.config.db.as_os_str().to_os_string());
        args.push("-out".into());
        args.push(output.as_os_str().to_os_string());
        args.push("-outfmt".into());
        args.push("6".into());
        args.push("-evalue".into());
        args.push(self.config.evalue.to_string().into());
        args.push("-max_target_seqs".into());
        args.push(self.config.max_target_seqs.to_string().into());
        args.push("-num_threads".into());
        args.push(self.config.threads.to_string().into());
        args
    }

    /// Run without a visible spinner
    pub fn run(&self, query: &Path, output: &Path) -> Result<BlastRun> {
        self.run_with_progress(query, output, &ProgressBar::hidden())
    }

    /// Run the search, updating `progress` while waiting.
    ///
    /// Failure, timeout, or a missing output file all remove any partial output.
    pub fn run_with_progress(
        &self,
        query: &Path,
        output: &Path,
        progress: &ProgressBar,
    ) -> Result<BlastRun> {
        let tool = self.tool_name();
        if !query.exists() {
            return Err(ArgScanError::not_found(query));
        }

        let binary = self.locate_binary()?;
        let args = self.build_args(query, output);
        log::debug!("Running {} {:?}", binary.display(), args);

        // A table left by an earlier run must not pass for this run's output
        remove_partial_output(output);

        let mut child = Command::new(&binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ArgScanError::external_tool(tool.to_string(), format!("failed to start: {}", e))
            })?;

        let stderr_reader = spawn_stderr_reader(&mut child);
        let start = Instant::now();

        let status = match wait_with_timeout(&mut child, self.config.timeout(), progress, start) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                // Grandchildren may still hold the pipe; detach the reader instead of joining
                drop(stderr_reader);
                remove_partial_output(output);
                return Err(ArgScanError::ToolTimeout {
                    tool: tool.to_string(),
                    seconds: self.config.timeout_secs,
                });
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                remove_partial_output(output);
                return Err(ArgScanError::external_tool(
                    tool.to_string(),
                    format!("failed while waiting for process: {}", e),
                ));
            }
        };

        let stderr = collect_stderr(stderr_reader);
        let elapsed = start.elapsed();

        if !status.success() {
            remove_partial_output(output);
            let detail = stderr.trim();
            return Err(ArgScanError::external_tool(
                tool.to_string(),
                if detail.is_empty() {
                    format!("exited with {}", describe_status(&status))
                } else {
                    format!("exited with {}: {}", describe_status(&status), detail)
                },
            ));
        }

        if !output.is_file() {
            return Err(ArgScanError::external_tool(
                tool.to_string(),
                format!("finished but produced no output file at {}", output.display()),
            ));
        }

        if !stderr.trim().is_empty() {
            log::warn!("{} reported: {}", tool, stderr.trim());
        }
        log::debug!("{} finished in {:.1}s", tool, elapsed.as_secs_f64());

        Ok(BlastRun {
            output: output.to_path_buf(),
            elapsed,
            stderr,
        })
    }
}

/// Poll until the child exits (`Some`) or the timeout passes (`None`)
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    progress: &ProgressBar,
    start: Instant,
) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Ok(None);
        }
        progress.set_message(format!("BLAST running ({}s elapsed)", elapsed.as_secs()));
        std::thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}

fn spawn_stderr_reader(child: &mut Child) -> Option<JoinHandle<String>> {
    child.stderr.take().map(|mut stderr| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect_stderr(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn remove_partial_output(output: &Path) {
    if output.exists() {
        if let Err(e) = std::fs::remove_file(output) {
            log::warn!(
                "Could not remove partial output {}: {}",
                output.display(),
                e
            );
        }
    }
}

fn describe_status(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}
