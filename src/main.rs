use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use avl_replay::{
    parse_values, AlgorithmCatalog, AlgorithmCategory, AlgorithmInfo, EventSequence, LayoutConfig,
    Playback,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "avl-replay", about = "Record step-by-step algorithm visualizations")]
struct Cli {
    /// Log every recorded event to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a run and print the event list as JSON.
    Generate {
        /// Comma-separated integers, e.g. "10,20,30,40,50,25".
        values: String,
        /// Catalog id of the algorithm to run.
        #[arg(long, default_value = "avl-tree")]
        algorithm: String,
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Record a run and print one line per step.
    Replay {
        /// Comma-separated integers.
        values: String,
        /// Catalog id of the algorithm to run.
        #[arg(long, default_value = "avl-tree")]
        algorithm: String,
        /// Validate every snapshot's structure while stepping.
        #[arg(long)]
        check: bool,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// List catalog entries.
    List {
        /// Only entries in this category (sorting, searching, trees, graphs).
        #[arg(long)]
        category: Option<AlgorithmCategory>,
        /// Only premium entries.
        #[arg(long)]
        premium: bool,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Horizontal parent-to-child offset at the root.
    #[arg(long, default_value_t = 80.0)]
    base_offset: f64,
    /// Per-level shrink factor for the horizontal offset, in (0, 1).
    #[arg(long, default_value_t = 0.7)]
    decay: f64,
    /// Vertical distance between levels.
    #[arg(long, default_value_t = 100.0)]
    row_height: f64,
}

impl LayoutArgs {
    fn to_config(&self) -> LayoutConfig {
        LayoutConfig::default()
            .with_base_offset(self.base_offset)
            .with_decay(self.decay)
            .with_row_height(self.row_height)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = AlgorithmCatalog::builtin();
    match cli.command {
        Commands::Generate {
            values,
            algorithm,
            pretty,
            layout,
        } => {
            let events = record(&catalog, &algorithm, &values, &layout)?;
            run_generate(&events, pretty)?
        }
        Commands::Replay {
            values,
            algorithm,
            check,
            layout,
        } => {
            let events = record(&catalog, &algorithm, &values, &layout)?;
            run_replay(events, check)?
        }
        Commands::List { category, premium } => run_list(&catalog, category, premium),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn record(
    catalog: &AlgorithmCatalog,
    algorithm: &str,
    input: &str,
    layout: &LayoutArgs,
) -> Result<EventSequence> {
    let values = parse_values(input);
    if values.is_empty() {
        bail!("please enter valid numbers separated by commas (got '{input}')");
    }
    debug!(?values, algorithm, "parsed input");

    let mut generator = catalog
        .generator(algorithm, layout.to_config())
        .with_context(|| format!("cannot visualize '{algorithm}'"))?;
    Ok(generator.generate(&values))
}

fn run_generate(events: &EventSequence, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if pretty {
        serde_json::to_writer_pretty(&mut out, events)
    } else {
        serde_json::to_writer(&mut out, events)
    };
    written.context("failed to serialize events")?;
    writeln!(out)?;
    Ok(())
}

fn run_replay(events: EventSequence, check: bool) -> Result<()> {
    let mut playback = Playback::new(events);
    let total = playback.len();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let step = playback.position();
        let Some(event) = playback.current() else {
            break;
        };
        if check {
            event
                .snapshot()
                .validate()
                .with_context(|| format!("snapshot at step {} is malformed", step + 1))?;
        }
        writeln!(
            out,
            "step {}/{}\t[{}]\t{}\t| rotations={} inserts={}",
            step + 1,
            total,
            event.kind,
            event.explanation,
            event.meta.rotations,
            event.meta.inserts
        )?;
        if !playback.next() {
            break;
        }
    }

    if let Some(done) = playback.current() {
        let values = done.snapshot().in_order_values();
        writeln!(out, "in-order: {values:?}")?;
    }
    Ok(())
}

fn run_list(catalog: &AlgorithmCatalog, category: Option<AlgorithmCategory>, premium: bool) {
    let entries: Vec<&AlgorithmInfo> = match category {
        Some(category) => catalog.by_category(category),
        None => catalog.list(),
    };

    for info in entries.into_iter().filter(|info| !premium || info.premium) {
        println!(
            "{}\t{}\t{}{}\t{}",
            info.id,
            info.category,
            info.name,
            if info.premium { " (premium)" } else { "" },
            info.description
        );
    }
}
