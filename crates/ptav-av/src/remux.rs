//! Container remuxing of extracted streams.

use crate::tools::get_tool_path;
use crate::{Error, Result};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default muxer used for remuxed output.
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp4";

/// Packs an elementary stream into a standard container.
///
/// The batch pipeline only depends on this trait, so tests can swap the
/// external tool for an in-process stand-in.
pub trait Remuxer {
    /// Remux `input` into `output` and return the path that was written.
    ///
    /// On failure the error carries the tool's diagnostics.
    fn remux(&self, input: &Path, output: &Path) -> Result<PathBuf>;
}

impl<F> Remuxer for F
where
    F: Fn(&Path, &Path) -> Result<PathBuf>,
{
    fn remux(&self, input: &Path, output: &Path) -> Result<PathBuf> {
        self(input, output)
    }
}

/// Remuxer backed by the ffmpeg CLI.
///
/// Streams are copied without re-encoding.
#[derive(Debug, Clone)]
pub struct FfmpegRemuxer {
    program: PathBuf,
    output_format: String,
    timeout: Option<Duration>,
}

impl FfmpegRemuxer {
    /// Create a remuxer running the given ffmpeg executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            timeout: None,
        }
    }

    /// Locate ffmpeg, preferring `config_path` over a `PATH` lookup.
    pub fn discover(config_path: Option<&Path>) -> Result<Self> {
        Ok(Self::new(get_tool_path("ffmpeg", config_path)?))
    }

    /// Set the ffmpeg muxer name (`-f`).
    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    /// Kill ffmpeg if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build the ffmpeg invocation for one file.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-hide_banner", "-nostdin", "-loglevel", "error", "-i"])
            .arg(input)
            .args(["-c:v", "copy", "-f"])
            .arg(&self.output_format)
            .arg(output);
        cmd
    }
}

impl Remuxer for FfmpegRemuxer {
    fn remux(&self, input: &Path, output: &Path) -> Result<PathBuf> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Remuxing with ffmpeg CLI: {:?} -> {:?}", input, output);

        let cmd = self.command(input, output);
        let result = match self.timeout {
            Some(timeout) => run_with_timeout(cmd, timeout),
            None => run(cmd),
        }
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffmpeg")
            } else {
                Error::Io(e)
            }
        })?;

        let result = match result {
            Some(result) => result,
            None => {
                let secs = self.timeout.map(|t| t.as_secs_f64()).unwrap_or_default();
                return Err(Error::tool_failed(
                    "ffmpeg",
                    format!("timed out after {:.1}s", secs),
                ));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed(
                "ffmpeg",
                format!("exited with {}: {}", result.status, stderr.trim()),
            ));
        }

        if !output.is_file() {
            return Err(Error::tool_failed(
                "ffmpeg",
                format!("reported success but wrote no output: {}", output.display()),
            ));
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Remux complete: {:?}", output);

        Ok(output.to_path_buf())
    }
}

fn run(mut cmd: Command) -> std::io::Result<Option<Output>> {
    cmd.stdin(Stdio::null()).output().map(Some)
}

/// Run `cmd`, killing it once `timeout` elapses.
///
/// Returns `Ok(None)` if the process was killed. Stderr goes to an anonymous
/// temp file so the child never blocks on a full pipe while we wait.
fn run_with_timeout(mut cmd: Command, timeout: Duration) -> std::io::Result<Option<Output>> {
    let mut stderr_file = tempfile::tempfile()?;
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::from(stderr_file.try_clone()?))
        .spawn()?;

    let Some(status) = child.wait_timeout(timeout)? else {
        child.kill()?;
        child.wait()?;
        return Ok(None);
    };

    let mut stderr = Vec::new();
    stderr_file.seek(SeekFrom::Start(0))?;
    stderr_file.read_to_end(&mut stderr)?;

    Ok(Some(Output {
        status,
        stdout: Vec::new(),
        stderr,
    }))
}
