use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nodegraph_engine::*;
use ron::{extensions::Extensions, Options};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lay out a graph file
    Layout(LayoutArgs),
    /// List the available layout presets
    Presets,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Graph file, in RON
    file: PathBuf,

    /// Layout type, overrides every other layout setting
    #[arg(short, long)]
    strategy: Option<String>,

    /// Named preset, see `nodegraph presets`
    #[arg(short, long)]
    preset: Option<String>,

    /// Layout settings file, in RON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Park nodes without edges next to the graph instead of laying them
    /// out with it
    #[arg(long)]
    separate_unconnected: bool,

    /// Where to write the laid out graph, defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl LayoutArgs {
    fn layout_config(&self, file: &GraphFile) -> Result<LayoutConfig> {
        if let Some(strategy) = &self.strategy {
            return Ok(LayoutSettings::of_kind(strategy.as_str()).into());
        }

        if let Some(path) = &self.config {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let settings: LayoutSettings = Options::default()
                .with_default_extension(Extensions::IMPLICIT_SOME)
                .from_str(&text)
                .with_context(|| format!("Invalid layout settings in {}", path.display()))?;
            return Ok(settings.into());
        }

        if let Some(name) = &self.preset {
            return preset(name)
                .with_context(|| format!("Unknown preset {name}, see `nodegraph presets`"));
        }

        Ok(file.layout_config())
    }

    fn composition(&self) -> Composition {
        if self.separate_unconnected {
            Composition::SeparateUnconnected
        } else {
            Composition::Direct
        }
    }
}

fn layout(args: LayoutArgs) -> Result<()> {
    let file = GraphFile::load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let config = args.layout_config(&file)?;
    info!(
        "Laying out {} nodes with the {} layout",
        file.nodes.len(),
        config.name()
    );

    let mut scheduler = LayoutScheduler::new(args.composition());
    scheduler.set_inputs(file.nodes.clone(), file.edges.clone(), config);
    while scheduler.is_layouting() {
        scheduler.run_frame();
    }

    let snapshot = scheduler.snapshot();
    debug!(
        "Layout v{} spans {:?}",
        snapshot.version,
        snapshot.result.bounds()
    );
    let output = file.with_result(snapshot.result.as_ref().clone()).to_ron()?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match args.command {
        Command::Layout(args) => layout(args),
        Command::Presets => {
            for name in PRESET_NAMES {
                if let Some(config) = preset(name) {
                    println!("{name:16} {}", config.name());
                }
            }
            Ok(())
        }
    }
}
