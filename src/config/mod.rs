mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./ptav.toml",
        "~/.config/ptav/config.toml",
        "/etc/ptav/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.scan.window_size < ptav_format::START_MARKER.len() {
        anyhow::bail!(
            "scan.window_size must be at least {} bytes",
            ptav_format::START_MARKER.len()
        );
    }

    if config.extract.chunk_size == 0 {
        anyhow::bail!("extract.chunk_size cannot be 0");
    }

    let naming = &config.naming;
    if naming.source_extension.trim_start_matches('.').is_empty() {
        anyhow::bail!("naming.source_extension cannot be empty");
    }
    if naming.extracted_suffix.is_empty() || naming.converted_suffix.is_empty() {
        anyhow::bail!("naming suffixes cannot be empty");
    }
    let source_ext = naming.source_extension.trim_start_matches('.');
    for (key, suffix) in [
        ("extracted_suffix", &naming.extracted_suffix),
        ("converted_suffix", &naming.converted_suffix),
    ] {
        if suffix_extension(suffix).is_some_and(|ext| ext.eq_ignore_ascii_case(source_ext)) {
            anyhow::bail!(
                "naming.{} {:?} would give artifacts the .{} source extension",
                key,
                suffix,
                source_ext
            );
        }
    }
    if naming.extracted_suffix == naming.converted_suffix {
        anyhow::bail!(
            "naming.extracted_suffix and naming.converted_suffix must differ (both {:?})",
            naming.extracted_suffix
        );
    }

    if config.remux.output_format.trim().is_empty() {
        anyhow::bail!("remux.output_format cannot be empty");
    }
    if config.remux.timeout_secs == Some(0) {
        anyhow::bail!("remux.timeout_secs cannot be 0");
    }

    if let Some(ref path) = config.remux.ffmpeg_path {
        if !path.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", path);
        }
    }

    Ok(())
}

// Extension of a file named `<stem><suffix>`.
fn suffix_extension(suffix: &str) -> Option<String> {
    Path::new(&format!("stem{}", suffix))
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
}
