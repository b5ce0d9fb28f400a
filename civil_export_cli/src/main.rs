use std::path::PathBuf;

use civil_export::{
    io::snapshot::read_model_json, ExportConfig, ExportKind, ModelSession, Result, Selection,
};
use clap::{Args, Parser, Subcommand};
use log::debug;

/// Export corridors, feature lines and surfaces of a model snapshot as XML.
#[derive(Parser)]
#[command(name = "civil_export_cli", version)]
struct Cli {
    /// Directory receiving the XML documents (defaults to the temp directory)
    #[arg(long, global = true, env = "CIVIL_EXPORT_DIR")]
    output_dir: Option<PathBuf>,
    /// Also write the skipped-element diagnostics as JSON to this file
    #[arg(long, global = true)]
    report: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Target {
    /// Model snapshot (JSON)
    snapshot: PathBuf,
    /// Handle of the entity to export; omit or leave blank for all
    #[arg(long)]
    handle: Option<String>,
}

#[derive(Args)]
struct Sections {
    /// Baseline index, -1 for all
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    baseline: i64,
    /// Region index, -1 for all
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    region: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// Export stand-alone feature lines.
    FeatureLines {
        #[command(flatten)]
        target: Target,
    },
    /// Export corridor feature lines with their region indices.
    CorridorFeatureLines {
        #[command(flatten)]
        target: Target,
        /// Baseline index, -1 for all
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        baseline: i64,
    },
    /// Export subassembly shapes per baseline and region.
    SubassemblyShapes {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        sections: Sections,
    },
    /// Export subassembly links per baseline and region.
    SubassemblyLinks {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        sections: Sections,
    },
    /// Export surface vertices and triangles.
    Surface {
        #[command(flatten)]
        target: Target,
    },
    /// Export surface triangles (same content as `surface`).
    SurfaceTriangles {
        #[command(flatten)]
        target: Target,
    },
}

impl Commands {
    fn plan(&self) -> (ExportKind, &Target, Selection) {
        fn select(target: &Target) -> Selection {
            match &target.handle {
                Some(h) => Selection::handle(h.as_str()),
                None => Selection::all(),
            }
        }
        match self {
            Commands::FeatureLines { target } => {
                (ExportKind::LandFeatureLines, target, select(target))
            }
            Commands::CorridorFeatureLines { target, baseline } => (
                ExportKind::CorridorFeatureLines,
                target,
                select(target).with_baseline(*baseline),
            ),
            Commands::SubassemblyShapes { target, sections } => (
                ExportKind::SubassemblyShapes,
                target,
                select(target)
                    .with_baseline(sections.baseline)
                    .with_region(sections.region),
            ),
            Commands::SubassemblyLinks { target, sections } => (
                ExportKind::SubassemblyLinks,
                target,
                select(target)
                    .with_baseline(sections.baseline)
                    .with_region(sections.region),
            ),
            Commands::Surface { target } => (ExportKind::Surface, target, select(target)),
            Commands::SurfaceTriangles { target } => {
                (ExportKind::SurfaceTriangles, target, select(target))
            }
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let (kind, target, selection) = cli.command.plan();
    debug!("{:?} from {}", kind, target.snapshot.display());
    let model = read_model_json(&target.snapshot)?;
    let session = ModelSession::open(&model);
    let export = kind.run(&session, &selection)?;
    let config = cli
        .output_dir
        .clone()
        .map(ExportConfig::new)
        .unwrap_or_default();
    let path = export.write_to(&config)?;
    if !export.report.is_clean() {
        eprintln!("Skipped {} elements", export.report.diagnostics.len());
    }
    if let Some(report) = &cli.report {
        export.report.write_json(report)?;
    }
    Ok(path)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(path) => println!("Wrote {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
