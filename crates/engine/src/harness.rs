//! Execution harness for model-generated benchmark programs.
//!
//! Each run gets its own scratch directory holding exactly one source file.
//! The toolchain is invoked as `program args... <source>` with a hard
//! wall-clock deadline. On unix the child leads its own process group, so a
//! timeout kills everything it spawned (`go run` forks the compiled binary)
//! before the scratch directory is removed and control returns. The group is
//! also killed when the run is cancelled, e.g. a dropped request future.
//!
//! There is no memory or CPU limit and no inspection of the program text.

use async_trait::async_trait;
use complexity_common::{AnalyzerError, HarnessConfig, Result};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Grace period for the output readers once the child is gone
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

const SCRATCH_PREFIX: &str = "complexity-test-";

/// Runs a benchmark program and returns its combined output.
#[async_trait]
pub trait BenchmarkRunner: Send + Sync {
    async fn run(&self, source: &str) -> Result<String>;
}

/// Subprocess-backed [`BenchmarkRunner`]
#[derive(Debug, Clone)]
pub struct BenchmarkHarness {
    config: HarnessConfig,
}

impl BenchmarkHarness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    fn create_scratch(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let created = match &self.config.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        created.map_err(|e| AnalyzerError::execution(format!("failed to create temp dir: {}", e), ""))
    }

    async fn execute_in(&self, dir: &Path, source: &str) -> Result<String> {
        let source_path = dir.join(&self.config.source_file);
        tokio::fs::write(&source_path, source)
            .await
            .map_err(|e| AnalyzerError::execution(format!("failed to write test file: {}", e), ""))?;

        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(&source_path)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        debug!(command = ?cmd, "Spawning benchmark");
        let mut child = cmd.spawn().map_err(|e| {
            AnalyzerError::execution(
                format!("failed to start `{}`: {}", self.config.program, e),
                "",
            )
        })?;

        let limit = self.config.output_limit_bytes;
        let stdout = tokio::spawn(read_capped(child.stdout.take(), limit));
        let stderr = tokio::spawn(read_capped(child.stderr.take(), limit));

        let started = Instant::now();
        let group = GroupGuard::new(child.id());
        let status = self.wait_with_deadline(&mut child).await;
        // anything the program left running in its group goes too
        group.kill();
        let output = collect_output(stdout, stderr).await;

        match status {
            Ok(status) if status.success() => {
                info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    output_len = output.len(),
                    "Benchmark completed"
                );
                Ok(output)
            }
            Ok(status) => Err(AnalyzerError::execution(
                format!("failed to run test: {}", status),
                output,
            )),
            Err(reason) => Err(AnalyzerError::execution(reason, output)),
        }
    }

    /// Wait for the child under the configured deadline, killing its process
    /// group on timeout. The child is always reaped before this returns.
    async fn wait_with_deadline(&self, child: &mut Child) -> std::result::Result<ExitStatus, String> {
        let deadline = self.config.timeout();
        match tokio::time::timeout(deadline, child.wait()).await {
            Ok(Ok(status)) => Ok(status),
            Ok(Err(e)) => {
                terminate(child).await;
                Err(format!("failed to wait for benchmark: {}", e))
            }
            Err(_) => {
                warn!(timeout_secs = deadline.as_secs(), "Benchmark exceeded deadline, killing");
                terminate(child).await;
                Err(format!("timed out after {}s", deadline.as_secs()))
            }
        }
    }
}

#[async_trait]
impl BenchmarkRunner for BenchmarkHarness {
    #[instrument(skip(self, source), fields(program = %self.config.program, source_len = source.len()))]
    async fn run(&self, source: &str) -> Result<String> {
        let scratch = self.create_scratch()?;
        let scratch_path = scratch.path().to_path_buf();
        debug!(scratch = %scratch_path.display(), "Created scratch directory");

        let result = self.execute_in(&scratch_path, source).await;

        if let Err(e) = scratch.close() {
            warn!(scratch = %scratch_path.display(), error = %e, "Failed to remove scratch directory");
        }
        result
    }
}

/// SIGKILL the process group led by `pid`. No-op off unix.
fn kill_group(pid: Option<u32>) {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = pid {
            match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                Ok(()) | Err(Errno::ESRCH) => {}
                Err(e) => debug!(pid, error = %e, "killpg failed"),
            }
        }
    }
    #[cfg(not(unix))]
    let _ = pid;
}

/// Owns the benchmark's process group. Dropping it kills the group, so a
/// cancelled run cannot leave grandchildren behind; `kill_on_drop` only
/// reaches the direct child.
struct GroupGuard {
    pid: Option<u32>,
}

impl GroupGuard {
    fn new(pid: Option<u32>) -> Self {
        Self { pid }
    }

    fn kill(mut self) {
        kill_group(self.pid.take());
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        if let Some(pid) = self.pid.take() {
            debug!(pid, "Benchmark run dropped, killing process group");
            kill_group(Some(pid));
        }
    }
}

/// Kill the child's whole process group and reap the child.
async fn terminate(child: &mut Child) {
    kill_group(child.id());

    if let Err(e) = child.start_kill() {
        debug!(error = %e, "start_kill failed");
    }
    if let Err(e) = child.wait().await {
        warn!(error = %e, "Failed to reap benchmark process");
    }
}

/// Read a pipe to EOF, keeping at most `limit` bytes. Reading continues past
/// the limit so the child never blocks on a full pipe. Truncated output is cut
/// back to its last complete line so no partial sample survives.
async fn read_capped<R>(reader: Option<R>, limit: usize) -> Vec<u8>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut kept = Vec::new();
    let Some(mut reader) = reader else {
        return kept;
    };

    let mut truncated = false;
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let room = limit.saturating_sub(kept.len());
                truncated |= n > room;
                kept.extend_from_slice(&buf[..n.min(room)]);
            }
            Err(e) => {
                debug!(error = %e, "Output pipe read failed");
                break;
            }
        }
    }

    if truncated {
        let complete = kept.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        debug!(limit, dropped = kept.len() - complete, "Benchmark output truncated");
        kept.truncate(complete);
    }
    kept
}

/// Join both readers and concatenate stdout then stderr.
async fn collect_output(mut stdout: JoinHandle<Vec<u8>>, mut stderr: JoinHandle<Vec<u8>>) -> String {
    let joined = tokio::time::timeout(DRAIN_TIMEOUT, async {
        tokio::join!(&mut stdout, &mut stderr)
    })
    .await;

    let (out, err) = match joined {
        Ok((out, err)) => (out.unwrap_or_default(), err.unwrap_or_default()),
        Err(_) => {
            warn!("Benchmark output pipes still open after exit, discarding output");
            stdout.abort();
            stderr.abort();
            return String::new();
        }
    };

    let mut combined = String::from_utf8_lossy(&out).into_owned();
    if !err.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&String::from_utf8_lossy(&err));
    }
    combined
}
