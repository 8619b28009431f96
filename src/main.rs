mod cli;

use ptav::{
    config::{self, Config},
    discovery, manifest,
    pipeline::{self, BatchPipeline, FileReport},
};
use ptav_av::{FfmpegRemuxer, StreamExtractor};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "ptav=trace,ptav_av=trace".to_string()
        } else {
            "ptav=warn,ptav_av=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            paths,
            no_remux,
            recursive,
            json,
        } => convert(&paths, cli.config.as_deref(), no_remux, recursive, json),
        Commands::Inspect { file, json } => inspect_file(&file, cli.config.as_deref(), json),
        Commands::Extract {
            file,
            offset,
            output,
        } => extract_file(&file, cli.config.as_deref(), offset, output),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("ptav {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn convert(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    no_remux: bool,
    recursive: bool,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let naming = ptav_av::ArtifactNaming::from(&config.naming);
    let ext = &naming.source_extension;

    let inputs = discovery::discover_inputs(paths, &naming, recursive);
    if inputs.is_empty() {
        if json {
            println!("{}", serde_json::to_string_pretty(&pipeline::BatchSummary::default())?);
        } else {
            println!("No .{} files found", ext);
        }
        return Ok(());
    }

    let remux = config.remux.enabled && !no_remux;
    let mut batch = BatchPipeline::new(&config);
    if remux {
        batch = batch.with_remuxer(Box::new(build_remuxer(&config)));
    }
    if !json {
        println!("Found {} .{} files", inputs.len(), ext);
        println!("{}", "=".repeat(50));
        batch = batch.with_progress_callback(Box::new(print_report));
    }

    let summary = batch.run(&inputs);

    let manifest_path = if remux && config.manifest.enabled && summary.successes > 0 {
        Some(manifest::write_manifest(&config.manifest.path, &summary.produced())?)
    } else {
        None
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if remux {
        println!(
            "\nSummary: {}/{} files successfully converted",
            summary.successes,
            summary.total()
        );
    } else {
        println!(
            "\nSummary: {}/{} files extracted",
            summary.extracted(),
            summary.total()
        );
    }

    if let Some(path) = manifest_path {
        println!("\nCreated file list for concatenation: {}", path.display());
        println!("To concatenate all converted files, run:");
        println!("{}", manifest::concat_hint(&path));
    }

    Ok(())
}

fn build_remuxer(config: &Config) -> FfmpegRemuxer {
    let configured = config.remux.ffmpeg_path.as_deref();
    let remuxer = FfmpegRemuxer::discover(configured).unwrap_or_else(|e| {
        // Each file will then fail at the remux stage with this same error
        tracing::warn!("{}; remuxing will fail", e);
        FfmpegRemuxer::new(configured.unwrap_or(Path::new("ffmpeg")))
    });

    remuxer
        .with_output_format(config.remux.output_format.clone())
        .with_timeout(config.remux.timeout())
}

fn print_report(index: usize, total: usize, report: &FileReport) {
    println!(
        "Processing file {}/{}: {}",
        index,
        total,
        report.path.display()
    );
    if let Some(header) = report.header {
        println!("  PTAV Version: {}", header.version);
        println!("  Data1: {} (0x{:08x})", header.field1, header.field1);
        println!("  Data2: {} (0x{:08x})", header.field2, header.field2);
    }
    if let Some(first) = report.markers.first() {
        println!(
            "  Found {} potential H.264 NAL markers",
            report.markers.len()
        );
        println!("  First marker at offset: {}", first);
    }
    println!("  Result: {}", report.outcome);
    println!("{}", "-".repeat(50));
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    path: &'a Path,
    file_size: u64,
    header: pipeline::HeaderInfo,
    window_len: usize,
    markers: &'a [u64],
}

fn inspect_file(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let inspection = pipeline::inspect(file, config.scan.window_size)
        .with_context(|| format!("Failed to inspect {:?}", file))?;
    let header = pipeline::HeaderInfo::from(inspection.header);

    if json {
        let output = InspectOutput {
            path: file,
            file_size: inspection.file_size,
            header,
            window_len: inspection.scan.window_len,
            markers: &inspection.scan.hits,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Size: {} bytes", inspection.file_size);
    println!("  PTAV Version: {}", header.version);
    println!("  Data1: {} (0x{:08x})", header.field1, header.field1);
    println!("  Data2: {} (0x{:08x})", header.field2, header.field2);
    println!("  Scanned: {} bytes", inspection.scan.window_len);

    match inspection.scan.first() {
        Some(first) => {
            println!(
                "  Found {} potential H.264 NAL markers",
                inspection.scan.count()
            );
            println!("  First marker at offset: {}", first);
            println!(
                "  Stream length: {} bytes",
                inspection.file_size - first
            );
        }
        None => println!("  No H.264 stream found"),
    }

    Ok(())
}

fn extract_file(
    file: &Path,
    config_path: Option<&Path>,
    offset: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let offset = match offset {
        Some(offset) => offset,
        None => {
            let inspection = pipeline::inspect(file, config.scan.window_size)
                .with_context(|| format!("Failed to inspect {:?}", file))?;
            inspection.scan.first().with_context(|| {
                format!(
                    "No H.264 stream found in the first {} bytes of {:?}",
                    inspection.scan.window_len, file
                )
            })?
        }
    };

    let output = match output {
        Some(output) => output,
        None => ptav_av::ArtifactNaming::from(&config.naming)
            .derive(file)?
            .extracted,
    };

    let result = StreamExtractor::new()
        .with_chunk_size(config.extract.chunk_size)
        .extract(file, offset, &output)
        .map_err(|e| {
            if e.leaves_partial_output() {
                if let Err(remove_err) = std::fs::remove_file(&output) {
                    if remove_err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!("Failed to remove partial output {:?}: {}", output, remove_err);
                    }
                }
            }
            e
        })?;

    println!("Extracted H.264 stream to: {}", result.output_path.display());
    println!(
        "  {} bytes from offset {} of {}",
        result.extracted_length, result.marker_offset, result.file_size
    );

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = ptav_av::check_tools(config.remux.ffmpeg_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Use `convert --no-remux` to extract streams only.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("  Scan window: {} bytes", config.scan.window_size);
    println!("  Chunk size: {} bytes", config.extract.chunk_size);
    println!(
        "  Naming: *.{} -> *{} -> *{}",
        config.naming.source_extension, config.naming.extracted_suffix, config.naming.converted_suffix
    );
    println!("  Remux enabled: {}", config.remux.enabled);
    if let Some(ref path) = config.remux.ffmpeg_path {
        println!("  ffmpeg: {}", path.display());
    }
    println!("  Manifest: {}", config.manifest.path.display());
}
