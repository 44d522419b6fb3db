//! Informe CLI - report generation and asset-recovery diagnostics
//!
//! A command-line interface over the informe_rs engine: turn a JSON report
//! request into a finished PDF, or run the recovery decoder on a single
//! asset blob to see what the engine would make of it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use informe_assets::recovery::{self, RecoveryConfig};
use informe_core::{ReportRequest, ReportVariant};
use informe_report::{assemble_to_pdf, AssemblyOptions};
use std::fs;
use std::path::PathBuf;

/// Format bytes as human-readable size (e.g., "1.5 MB")
fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Report layout selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Records grouped by state, several images per page ("Figura N")
    Grouped,
    /// One image per page region with a metadata echo ("Imagen N")
    OnePerPage,
    /// Numbered activities with individual and collage images
    Narrative,
}

impl From<VariantArg> for ReportVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Grouped => Self::GroupedByState,
            VariantArg::OnePerPage => Self::OnePerPage,
            VariantArg::Narrative => Self::StructuredNarrative,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "informe",
    about = "Generate incident reports and diagnose damaged assets",
    long_about = "Generate paginated incident reports from a JSON request, or run the\n\
                  asset-recovery decoder on one blob to inspect what it yields.\n\
                  \n\
                  Damaged photos and signatures never abort a report: unreadable files\n\
                  are skipped and undecodable ones degrade to a placeholder card.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a report request into a PDF
    Generate {
        /// Report request JSON file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Document layout variant
        #[arg(long, value_enum, default_value = "narrative")]
        variant: VariantArg,

        /// Directory asset paths resolve against (transients are written here too)
        #[arg(long, value_name = "DIR", default_value = "uploads")]
        assets_root: PathBuf,

        /// Output PDF path
        #[arg(short, long, value_name = "FILE", default_value = "informe.pdf")]
        output: PathBuf,
    },

    /// Run the recovery decoder on one asset blob
    #[command(long_about = "Run the recovery decoder on one asset blob.\n\
                      \n\
                      Prints the provenance of the result: 'original' when the blob decoded\n\
                      directly (raw or base64), 'reconstructed' after byte-level container\n\
                      repair, 'placeholder' when nothing usable survived.")]
    Recover {
        /// Blob file (binary image or base64 text)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Write the recovered raster as a PNG
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Wire the `log` facade to RUST_LOG before any library call.
    env_logger::init();

    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    match args.command {
        Commands::Generate {
            input,
            variant,
            assets_root,
            output,
        } => generate_command(&input, variant.into(), &assets_root, &output, verbosity),
        Commands::Recover { input, output } => recover_command(&input, output.as_deref(), verbosity),
    }
}

fn generate_command(
    input: &std::path::Path,
    variant: ReportVariant,
    assets_root: &std::path::Path,
    output: &std::path::Path,
    verbosity: Verbosity,
) -> Result<()> {
    let request = ReportRequest::from_json_file(input)
        .with_context(|| format!("Failed to read report request: {}", input.display()))?;

    if verbosity.is_verbose() {
        println!(
            "{} {} records, {} asset refs, variant '{variant}'",
            "Request:".cyan().bold(),
            request.records.len(),
            request.asset_count(),
        );
    }

    let options = AssemblyOptions::new(assets_root);
    let pdf = assemble_to_pdf(&request, variant, &options)
        .with_context(|| format!("Failed to assemble '{variant}' report"))?;

    fs::write(output, &pdf)
        .with_context(|| format!("Failed to write PDF: {}", output.display()))?;

    if verbosity.should_show_output() {
        println!(
            "{} {} ({})",
            "Generated:".green().bold(),
            output.display(),
            format_bytes(pdf.len())
        );
    }
    Ok(())
}

fn recover_command(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    verbosity: Verbosity,
) -> Result<()> {
    let blob =
        fs::read(input).with_context(|| format!("Failed to read blob: {}", input.display()))?;

    let decoded = recovery::decode(&blob, &RecoveryConfig::new());
    let (w, h) = decoded.dimensions();

    if verbosity.should_show_output() {
        let provenance = decoded.provenance().to_string();
        let tag = match decoded.provenance() {
            informe_core::Provenance::Original => provenance.green(),
            informe_core::Provenance::Reconstructed => provenance.yellow(),
            informe_core::Provenance::Placeholder => provenance.red(),
        };
        println!(
            "{} {} ({}), decoded {w}x{h} px, provenance: {}",
            "Blob:".cyan().bold(),
            input.display(),
            format_bytes(blob.len()),
            tag.bold()
        );
    }

    if let Some(out) = output {
        decoded
            .pixels()
            .save(out)
            .with_context(|| format!("Failed to write recovered image: {}", out.display()))?;
        if verbosity.should_show_output() {
            println!("{} {}", "Recovered:".green().bold(), out.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_variant_arg_maps_to_report_variant() {
        assert_eq!(
            ReportVariant::from(VariantArg::Grouped),
            ReportVariant::GroupedByState
        );
        assert_eq!(
            ReportVariant::from(VariantArg::OnePerPage),
            ReportVariant::OnePerPage
        );
        assert_eq!(
            ReportVariant::from(VariantArg::Narrative),
            ReportVariant::StructuredNarrative
        );
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert!(!Verbosity::Quiet.should_show_output());
        assert!(Verbosity::Verbose.is_verbose());
    }

    #[test]
    fn test_format_bytes_scales() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_generate_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let request_path = dir.path().join("request.json");
        std::fs::write(
            &request_path,
            r#"{"meta": {"client": "ACME", "version": "1"}, "records": []}"#,
        )
        .unwrap();
        let output = dir.path().join("informe.pdf");

        generate_command(
            &request_path,
            ReportVariant::StructuredNarrative,
            dir.path(),
            &output,
            Verbosity::Quiet,
        )
        .unwrap();

        let pdf = std::fs::read(&output).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_recover_writes_placeholder_for_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let blob_path = dir.path().join("firma.txt");
        std::fs::write(&blob_path, "not an image at all").unwrap();
        let out = dir.path().join("recovered.png");

        recover_command(&blob_path, Some(&out), Verbosity::Quiet).unwrap();

        let recovered = image::open(&out).unwrap();
        assert!(recovered.width() > 0 && recovered.height() > 0);
    }
}
