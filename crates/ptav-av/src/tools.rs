//! Locating and probing the ffmpeg executable.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What `check-tools` learned about one executable.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    /// The tool ran and exited successfully with its version flag.
    pub available: bool,
    /// First line of the version banner.
    pub version: Option<String>,
    /// Resolved executable, if it could be located.
    pub path: Option<PathBuf>,
}

/// Probe `program` by running it with `version_arg`, reporting it as `name`.
///
/// `program` may be a bare name, which is looked up on `PATH`, or a path.
///
/// # Example
///
/// ```no_run
/// use ptav_av::check_tool_at;
/// use std::path::Path;
///
/// let info = check_tool_at("ffmpeg", Path::new("ffmpeg"), "-version");
/// if info.available {
///     println!("ffmpeg version: {:?}", info.version);
/// }
/// ```
pub fn check_tool_at(name: &str, program: &Path, version_arg: &str) -> ToolInfo {
    let path = which::which(program).ok();
    let output = Command::new(path.as_deref().unwrap_or(program))
        .arg(version_arg)
        .stdin(Stdio::null())
        .output();

    let version = match output {
        Ok(output) if output.status.success() => Some(
            String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
        ),
        _ => None,
    };

    ToolInfo {
        name: name.to_string(),
        available: version.is_some(),
        version: version.filter(|v| !v.is_empty()),
        path,
    }
}

/// Probe the tools used by the remux step.
///
/// `ffmpeg_path` overrides the `PATH` lookup for ffmpeg.
pub fn check_tools(ffmpeg_path: Option<&Path>) -> Vec<ToolInfo> {
    let program = ffmpeg_path.unwrap_or(Path::new("ffmpeg"));
    vec![check_tool_at("ffmpeg", program, "-version")]
}

/// Path of `name` on `PATH`.
///
/// # Errors
///
/// [`Error::ToolNotFound`] if it is not there.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Resolve a tool, preferring an existing configured path over `PATH`.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) if path.exists() => Ok(path.to_path_buf()),
        Some(path) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Configured {} path {:?} does not exist, searching PATH", name, path);
            #[cfg(not(feature = "tracing"))]
            let _ = path;
            require_tool(name)
        }
        None => require_tool(name),
    }
}
