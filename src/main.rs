use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use depscope::config::{self, Config, RepoMode};
use depscope::graph::{DependencyGraph, GraphBuilder, ReverseIndex};
use depscope::render::{self, RenderFormat};
use depscope::source::{FlatFileSource, GraphSource, MavenSource};

#[derive(Parser)]
#[command(name = "depscope")]
#[command(version)]
#[command(about = "Package dependency graph visualizer with reverse-dependency impact queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dependency graph and render it to stdout
    Analyze {
        /// Path to the JSON run-configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Output format: edges, mermaid, or tree (defaults to the
        /// config file's choice)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// List every package that transitively depends on the given package
    Dependents {
        /// Path to the JSON run-configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Package to query
        package: String,
    },
    /// Show version information
    Version,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depscope=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze { config, format }) => {
            let config = load_config(&config)?;
            let format = match format {
                Some(name) => name.parse::<RenderFormat>().map_err(anyhow::Error::msg)?,
                None => config.default_format(),
            };

            let graph = build_graph(&config)?;

            let stdout = io::stdout();
            let mut handle = stdout.lock();
            render::render(format, &graph, &mut handle)?;
            handle.flush()?;

            if graph.has_cycles() {
                tracing::warn!(
                    count = graph.cycles().len(),
                    "dependency cycles detected during construction"
                );
            }
        }
        Some(Commands::Dependents { config, package }) => {
            let config = load_config(&config)?;
            let graph = build_graph(&config)?;
            let index = ReverseIndex::from_graph(&graph);

            let dependents = index.transitive_dependents(&package);
            tracing::info!(
                package = %package,
                count = dependents.len(),
                "transitive dependents"
            );
            for dependent in &dependents {
                println!("{}", dependent);
            }
        }
        Some(Commands::Version) => {
            println!("depscope v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("depscope - package dependency graph visualizer");
            println!("Run 'depscope analyze --config <file>' to render a dependency graph");
            println!("Run 'depscope --help' for more information");
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    config::validate(&config)?;
    tracing::debug!(
        package = %config.package_name,
        mode = %config.repo_mode,
        "configuration loaded"
    );
    Ok(config)
}

fn build_graph(config: &Config) -> anyhow::Result<DependencyGraph> {
    let source: Box<dyn GraphSource> = match config.repo_mode {
        RepoMode::Local => Box::new(
            FlatFileSource::load(Path::new(&config.repository_source)).with_context(|| {
                format!("failed to load description {}", config.repository_source)
            })?,
        ),
        RepoMode::Remote => Box::new(MavenSource::new(&config.repository_source)),
    };

    let start = config.start_package();
    let graph = GraphBuilder::new(source)
        .build(&start)
        .with_context(|| format!("failed to build dependency graph for {}", start))?;

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    Ok(graph)
}
