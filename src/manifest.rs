//! Concat manifest for converted files.
//!
//! The manifest uses the ffmpeg concat demuxer syntax, one `file '<path>'`
//! line per container. ffmpeg resolves relative entries against the
//! manifest's directory rather than the working directory, so
//! [`write_manifest`] always writes absolute paths.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default manifest file name.
pub const DEFAULT_MANIFEST_NAME: &str = "converted_files.txt";

/// Render manifest text for `outputs`, sorted by path.
pub fn render_manifest<P: AsRef<Path>>(outputs: &[P]) -> String {
    let mut paths: Vec<&Path> = outputs.iter().map(|p| p.as_ref()).collect();
    paths.sort();

    paths
        .iter()
        .map(|path| format!("file '{}'\n", escape(&path.to_string_lossy())))
        .collect()
}

/// Write the manifest for `outputs` to `path`.
///
/// Relative outputs are made absolute against the current directory.
pub fn write_manifest<P: AsRef<Path>>(path: &Path, outputs: &[P]) -> Result<PathBuf> {
    let outputs = outputs
        .iter()
        .map(|output| {
            let output: &Path = output.as_ref();
            std::path::absolute(output).with_context(|| format!("Failed to resolve {:?}", output))
        })
        .collect::<Result<Vec<_>>>()?;

    std::fs::write(path, render_manifest(&outputs))
        .with_context(|| format!("Failed to write manifest: {:?}", path))?;

    tracing::info!("Wrote concat manifest with {} entries to {:?}", outputs.len(), path);
    Ok(path.to_path_buf())
}

/// ffmpeg command that concatenates the files listed in `manifest`.
pub fn concat_hint(manifest: &Path) -> String {
    format!(
        "ffmpeg -f concat -safe 0 -i {} -c copy final_output.mp4",
        manifest.display()
    )
}

// Single quotes cannot be escaped inside a quoted string, so close the
// quote, emit an escaped quote and reopen.
fn escape(path: &str) -> String {
    path.replace('\'', r"'\''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sorted() {
        let text = render_manifest(&[
            PathBuf::from("b_converted.mp4"),
            PathBuf::from("a_converted.mp4"),
        ]);
        assert_eq!(text, "file 'a_converted.mp4'\nfile 'b_converted.mp4'\n");
    }

    #[test]
    fn test_render_escapes_quotes() {
        let text = render_manifest(&[Path::new("it's_converted.mp4")]);
        assert_eq!(text, "file 'it'\\''s_converted.mp4'\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_manifest::<PathBuf>(&[]), "");
    }

    #[test]
    fn test_write_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_MANIFEST_NAME);
        let output = dir.path().join("x_converted.mp4");

        write_manifest(&path, &[&output]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("file '{}'\n", output.display())
        );
    }

    #[test]
    fn test_write_manifest_elsewhere_uses_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists").join(DEFAULT_MANIFEST_NAME);
        std::fs::create_dir(dir.path().join("lists")).unwrap();

        write_manifest(&path, &[Path::new("x_converted.mp4")]).unwrap();

        let expected = std::env::current_dir().unwrap().join("x_converted.mp4");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("file '{}'\n", expected.display())
        );
    }

    #[test]
    fn test_concat_hint() {
        assert_eq!(
            concat_hint(Path::new("converted_files.txt")),
            "ffmpeg -f concat -safe 0 -i converted_files.txt -c copy final_output.mp4"
        );
    }
}
