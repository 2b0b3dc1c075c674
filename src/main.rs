use anyhow::{Context, Result};
use clap::Parser;
use dds_exporter::host::{load_image, DesktopHost, RunMode};
use dds_exporter::{CompressionFormat, DdsExportPlugin, ExportConfig, ExportOptions, ProcedureStatus};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dds-exporter")]
#[command(about = "Export an image to DDS using texconv", long_about = None)]
struct Args {
    /// Image to export (any format the image crate can read)
    image: PathBuf,

    /// Destination .dds file (a save dialog is shown when omitted)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Compression format: bc1, bc2, bc3, bc4, bc5, bc7 or rgba8
    #[arg(short = 'f', long, default_value = "bc1", value_parser = parse_format)]
    format: CompressionFormat,

    /// Do not generate mipmaps
    #[arg(long)]
    no_mipmaps: bool,

    /// Do not tag the texture as sRGB
    #[arg(long)]
    no_srgb: bool,

    /// Do not let texconv overwrite existing files
    #[arg(long)]
    no_overwrite: bool,

    /// Path to texconv.exe
    #[arg(long, env = "TEXCONV_PATH")]
    texconv: Option<PathBuf>,

    /// Settings file (default: <config dir>/dds-exporter/config.json)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Skip the confirmation dialog
    #[arg(short = 'y', long)]
    yes: bool,

    /// Run non-interactively (the export procedure does nothing in this mode)
    #[arg(long)]
    batch: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_format(value: &str) -> Result<CompressionFormat, String> {
    CompressionFormat::parse(value).ok_or_else(|| {
        let names: Vec<&str> = CompressionFormat::ALL.iter().map(|f| f.short_name()).collect();
        format!("unknown format '{}' (expected one of: {})", value, names.join(", "))
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = ExportConfig::resolve(args.texconv.clone(), args.config.as_deref())
        .context("Failed to load configuration")?;
    let plugin = DdsExportPlugin::new(config);

    let options = ExportOptions::new(args.format)
        .with_mipmaps(!args.no_mipmaps)
        .with_srgb(!args.no_srgb)
        .with_overwrite(!args.no_overwrite);

    let mut host = DesktopHost::new(options).with_output(args.output.clone());
    if args.yes {
        host = host.without_confirmation();
    }

    let image = load_image(&args.image)?;
    let run_mode = if args.batch {
        RunMode::NonInteractive
    } else {
        RunMode::Interactive
    };

    match plugin.run::<_, ()>(&mut host, run_mode, &image, &[]) {
        ProcedureStatus::Success => Ok(()),
        ProcedureStatus::Cancel => {
            log::info!("Nothing exported");
            Ok(())
        }
        ProcedureStatus::ExecutionError { domain, message } => {
            anyhow::bail!("{}: {}", domain, message)
        }
    }
}
