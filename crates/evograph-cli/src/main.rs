//! Evograph CLI - evolving graph queries from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show stats for a CSV edge list (source,target,time[,attr...])
//! evograph stats edges.csv
//!
//! # Adjacency matrix at one timestamp
//! evograph matrix edges.csv --time 3
//!
//! # Weighted matrix from an attribute column
//! evograph matrix edges.csv --attributes --time 3 --attribute closeness
//!
//! # Shortest time-respecting path
//! evograph path edges.csv --from a --from-time 1 --to e --to-time 2
//!
//! # Everything reachable from a state
//! evograph reach edges.csv --from a --time 1
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use evograph::formats::{read_attributed_csv, read_csv_file, CsvConfig};
use evograph::{AttributeEvolvingGraph, Attributes, EvolvingGraph, TemporalBfsConfig, TimeEdge};
use indicatif::ProgressBar;
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

type Graph<A> = EvolvingGraph<String, i64, A>;

#[derive(Parser)]
#[command(name = "evograph")]
#[command(about = "Evolving graph CLI", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Input CSV file (source,target,time[,attribute...])
    input: PathBuf,

    /// Mirror every edge
    #[arg(long)]
    undirected: bool,

    /// Parse columns past the third as numeric edge attributes
    #[arg(long)]
    attributes: bool,

    /// The first row is data, not column names
    #[arg(long)]
    no_headers: bool,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: char,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics about an evolving graph
    Stats {
        #[command(flatten)]
        input: Input,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List nodes in id order
    Nodes {
        #[command(flatten)]
        input: Input,
    },

    /// List timestamps in order, with edge counts
    Timestamps {
        #[command(flatten)]
        input: Input,
    },

    /// List stored edges
    Edges {
        #[command(flatten)]
        input: Input,

        /// Only edges at this timestamp
        #[arg(long)]
        time: Option<i64>,

        /// Limit number of results
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Print the adjacency matrix at a timestamp
    Matrix {
        #[command(flatten)]
        input: Input,

        /// Timestamp
        #[arg(long)]
        time: i64,

        /// Fill cells with this attribute instead of 0/1 (needs --attributes)
        #[arg(long)]
        attribute: Option<String>,
    },

    /// Find a shortest time-respecting path between two states
    Path {
        #[command(flatten)]
        input: Input,

        /// Starting node
        #[arg(long)]
        from: String,

        /// Starting timestamp
        #[arg(long)]
        from_time: i64,

        /// Target node
        #[arg(long)]
        to: String,

        /// Target timestamp
        #[arg(long)]
        to_time: i64,
    },

    /// List nodes reachable from a state
    Reach {
        #[command(flatten)]
        input: Input,

        /// Starting node
        #[arg(long)]
        from: String,

        /// Starting timestamp
        #[arg(long)]
        time: i64,

        /// Stop after this many steps
        #[arg(long)]
        max_distance: Option<usize>,
    },
}

impl Commands {
    fn input(&self) -> &Input {
        match self {
            Commands::Stats { input, .. }
            | Commands::Nodes { input }
            | Commands::Timestamps { input }
            | Commands::Edges { input, .. }
            | Commands::Matrix { input, .. }
            | Commands::Path { input, .. }
            | Commands::Reach { input, .. } => input,
        }
    }
}

enum Loaded {
    Plain(Graph<()>),
    Attributed(AttributeEvolvingGraph<String, i64>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match load_graph(cli.command.input())? {
        Loaded::Plain(g) => {
            if let Commands::Matrix {
                attribute: Some(_), ..
            } = cli.command
            {
                bail!("--attribute requires --attributes");
            }
            run(&g, &cli.command, |_| None)
        }
        Loaded::Attributed(g) => match &cli.command {
            Commands::Matrix {
                time,
                attribute: Some(name),
                ..
            } => cmd_attribute_matrix(&g, *time, name),
            Commands::Stats { json: false, .. } => {
                run(&g, &cli.command, |a: &Attributes| Some(a.to_string()))?;
                println!("Attributes:  {}", g.attribute_names().join(", "));
                Ok(())
            }
            command => run(&g, command, |a: &Attributes| Some(a.to_string())),
        },
    }
}

fn run<A: Clone>(
    g: &Graph<A>,
    command: &Commands,
    attrs: impl Fn(&A) -> Option<String>,
) -> Result<()> {
    match command {
        Commands::Stats { json, .. } => cmd_stats(g, *json),
        Commands::Nodes { .. } => cmd_nodes(g),
        Commands::Timestamps { .. } => cmd_timestamps(g),
        Commands::Edges { time, limit, .. } => cmd_edges(g, *time, *limit, attrs),
        Commands::Matrix { time, .. } => cmd_matrix(g, *time),
        Commands::Path {
            from,
            from_time,
            to,
            to_time,
            ..
        } => cmd_path(g, from, *from_time, to, *to_time),
        Commands::Reach {
            from,
            time,
            max_distance,
            ..
        } => cmd_reach(g, from, *time, *max_distance),
    }
}

fn load_graph(input: &Input) -> Result<Loaded> {
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Loading {}...", input.input.display()));

    if !input.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character");
    }
    let config = CsvConfig {
        directed: !input.undirected,
        has_headers: !input.no_headers,
        delimiter: input.delimiter as u8,
    };

    let path = &input.input;
    let loaded = if input.attributes {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let g = read_attributed_csv(BufReader::new(file), config)
            .with_context(|| format!("Failed to parse CSV {}", path.display()))?;
        Loaded::Attributed(g)
    } else {
        let g = read_csv_file(path, config)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Loaded::Plain(g)
    };

    pb.finish_with_message(format!("Loaded in {:.2?}", start.elapsed()));
    Ok(loaded)
}

fn cmd_stats<A: Clone>(g: &Graph<A>, json: bool) -> Result<()> {
    let stats = g.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Evolving Graph Statistics");
    println!("=========================");
    println!("Directed:    {}", stats.directed);
    println!("Nodes:       {}", stats.node_count);
    println!("Edges:       {}", stats.edge_count);
    println!("Timestamps:  {}", stats.timestamp_count);
    if let (Some(first), Some(last)) = (g.timestamps().first(), g.timestamps().last()) {
        println!("Time span:   {} .. {}", first, last);
    }

    Ok(())
}

fn cmd_nodes<A: Clone>(g: &Graph<A>) -> Result<()> {
    for (id, label) in g.nodes().iter().enumerate() {
        println!("{}\t{}", id, label);
    }
    Ok(())
}

fn cmd_timestamps<A: Clone>(g: &Graph<A>) -> Result<()> {
    for (id, count) in g.edge_counts(g.full_window()) {
        println!("{}\t{}", g.timestamp_label(id)?, count);
    }
    Ok(())
}

fn cmd_edges<A: Clone>(
    g: &Graph<A>,
    time: Option<i64>,
    limit: usize,
    attrs: impl Fn(&A) -> Option<String>,
) -> Result<()> {
    let edges: Vec<&TimeEdge<A>> = match time {
        Some(t) => g.edges_at(&t)?,
        None => g.edges().iter().collect(),
    };
    let arrow = if g.is_directed() { "->" } else { "--" };

    for edge in edges.iter().take(limit) {
        let line = format!(
            "{} {} {} @ {}",
            g.node_label(edge.src)?,
            arrow,
            g.node_label(edge.dst)?,
            g.timestamp_label(edge.time)?
        );
        match attrs(&edge.attrs) {
            Some(a) => println!("{} {}", line, a),
            None => println!("{}", line),
        }
    }
    if edges.len() > limit {
        println!("... and {} more", edges.len() - limit);
    }
    Ok(())
}

fn cmd_matrix<A: Clone>(g: &Graph<A>, time: i64) -> Result<()> {
    let m = g.matrix(&time)?;
    print_matrix(g.nodes(), m.rows().into_iter().map(|row| row.to_vec()));
    Ok(())
}

fn cmd_attribute_matrix(
    g: &AttributeEvolvingGraph<String, i64>,
    time: i64,
    name: &str,
) -> Result<()> {
    let m = g.attribute_matrix(&time, name)?;
    print_matrix(g.nodes(), m.rows().into_iter().map(|row| row.to_vec()));
    Ok(())
}

fn print_matrix<D: Display>(labels: &[String], rows: impl Iterator<Item = Vec<D>>) {
    println!("\t{}", labels.join("\t"));
    for (label, row) in labels.iter().zip(rows) {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}\t{}", label, cells.join("\t"));
    }
}

fn cmd_path<A: Clone>(
    g: &Graph<A>,
    from: &str,
    from_time: i64,
    to: &str,
    to_time: i64,
) -> Result<()> {
    let (from, to) = (from.to_string(), to.to_string());
    let start = Instant::now();
    let path = g.shortest_temporal_path((&from, &from_time), (&to, &to_time))?;
    tracing::info!(elapsed = ?start.elapsed(), "path search done");

    match path {
        Some(path) => {
            println!("Distance: {}", path.len() - 1);
            let steps: Vec<String> = path.iter().map(|(v, t)| format!("{}@{}", v, t)).collect();
            println!("Path: {}", steps.join(" -> "));
        }
        None => println!(
            "Unreachable: no time-respecting path from {}@{} to {}@{}",
            from, from_time, to, to_time
        ),
    }
    Ok(())
}

fn cmd_reach<A: Clone>(
    g: &Graph<A>,
    from: &str,
    time: i64,
    max_distance: Option<usize>,
) -> Result<()> {
    let config = TemporalBfsConfig { max_distance };
    let from = from.to_string();
    let nodes = g.reachable_nodes(&from, &time, config)?;

    println!("Reachable from {}@{}: {} nodes", from, time, nodes.len());
    for v in nodes {
        println!("  {}", v);
    }
    Ok(())
}
