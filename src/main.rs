use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use suffix_tree::{Session, TreeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stree")]
#[command(about = "Index one line of text and report where each following line occurs in it")]
struct Cli {
    /// Read from this file instead of stdin
    input: Option<PathBuf>,

    /// Terminator appended to the text; must not occur in it
    #[arg(long, default_value_t = '$')]
    sentinel: char,

    /// Print the tree built from the text line and exit
    #[arg(long)]
    dump_tree: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = TreeConfig::default().with_sentinel(cli.sentinel)?;
    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let session = Session::open(reader, &config).context("failed to build suffix tree")?;
    let out = io::BufWriter::new(io::stdout().lock());
    if cli.dump_tree {
        session.dump_tree(out).context("failed to write tree")?;
        return Ok(());
    }

    let summary = session.run(out).context("failed to answer queries")?;
    info!(queries = summary.queries, answered = summary.answered, "done");
    Ok(())
}
