mod logging;
mod render;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Result, WrapErr};
use lineage_core::{Config, GraphData, GraphRule, LineageGraph, RuleEngine, Rules};
use tracing::info;

use render::OutputFormat;

#[derive(Parser)]
#[command(name = "lineage")]
#[command(about = "Apply display rules to lineage graphs", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./lineage.toml or the user config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a lineage graph with the configured rules
    Apply {
        /// Graph file (.json, .yaml or .yml)
        graph: PathBuf,

        /// GUID of the node the lineage query was made for
        #[arg(short, long)]
        queried: String,

        /// Rules file replacing the configured rules (.toml, .yaml or .json)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
        format: OutputFormat,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the rule trace to stderr
        #[arg(long)]
        explain: bool,

        /// Fail if the result has edges pointing at missing nodes
        #[arg(long)]
        strict: bool,

        /// Recompute node levels from the queried node
        #[arg(long)]
        levels: bool,
    },
    /// List the effective rules in application order
    Rules {
        /// Rules file replacing the configured rules
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
    /// Check a graph file for duplicate ids and dangling edges
    Validate {
        /// Graph file (.json, .yaml or .yml)
        graph: PathBuf,
    },
    /// Print a default configuration file
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Apply {
            graph,
            queried,
            rules,
            format,
            output,
            explain,
            strict,
            levels,
        } => {
            let mut config = with_rules(config, rules.as_deref())?;
            config.engine.strict |= strict;
            config.engine.assign_levels |= levels;

            let engine = RuleEngine::from_config(&config);
            let mut lineage = LineageGraph::from_file(&graph)
                .wrap_err_with(|| format!("Failed to load graph {}", graph.display()))?;

            let report = engine.rewrite(&mut lineage, &queried)?;
            if explain {
                eprint!("{}", report.format_trace());
            }

            let rendered = render::to_json(&lineage, format)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote rewritten graph");
                }
                None => println!("{}", rendered),
            }
        }
        Commands::Rules { rules } => {
            let config = with_rules(config, rules.as_deref())?;
            let all = config.rules.all_rules();
            if all.is_empty() {
                println!("No rules configured. Use 'lineage config' for a starting point.");
            }
            for (i, rule) in all.iter().enumerate() {
                println!("{:>2}. {:<18} {}", i + 1, rule.name(), serde_json::to_string(rule)?);
            }
        }
        Commands::Validate { graph } => {
            let data = GraphData::from_file(&graph)
                .wrap_err_with(|| format!("Failed to load graph {}", graph.display()))?;

            let lineage = LineageGraph::from(data.clone());
            let dangling = lineage.dangling_edges();
            for edge in dangling.iter().filter_map(|&idx| lineage.edge(idx)) {
                println!("dangling edge: {} -> {}", edge.from, edge.to);
            }

            if let Err(e) = LineageGraph::try_from_data(data) {
                bail!("{}: {}", graph.display(), e);
            }
            println!(
                "{}: {} nodes, {} edges, ok",
                graph.display(),
                lineage.node_count(),
                lineage.edge_count()
            );
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}

/// Load the configuration from an explicit file or the default locations.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Replace the configured rules with the contents of `rules`, if given.
fn with_rules(mut config: Config, rules: Option<&Path>) -> Result<Config> {
    if let Some(path) = rules {
        config.rules = Rules::from_file(path)
            .wrap_err_with(|| format!("Failed to load rules {}", path.display()))?;
    }
    Ok(config)
}
