//! `avl-demo` — build an AVL tree from integers and dump it.
//!
//! Usage:
//!   avl-demo [VALUES]... [--search <V>]... [--duplicates <POLICY>] [--config <PATH>]
//!
//! Prints `Answer`, the pre-order `key:height` dump, then one `true`/`false`
//! line per searched value. Set `RUST_LOG=trace` to see every rotation.

use std::path::PathBuf;

use avl_tree::{AvlConfig, AvlError, AvlTree, DuplicatePolicy};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DuplicatesArg {
    Keep,
    Ignore,
    Reject,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::Keep => DuplicatePolicy::Keep,
            DuplicatesArg::Ignore => DuplicatePolicy::Ignore,
            DuplicatesArg::Reject => DuplicatePolicy::Reject,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "avl-demo", about = "Insert integers into an AVL tree and dump it")]
struct Args {
    /// Values to insert, in order.
    #[arg(default_values_t = [3, 5, 4, 10, 1, 8], allow_negative_numbers = true)]
    values: Vec<i64>,

    /// Values to look up after all insertions.
    #[arg(long = "search", default_values_t = [5, 3, 9], allow_negative_numbers = true)]
    search: Vec<i64>,

    /// Duplicate key handling; overrides the config file.
    #[arg(long, value_enum)]
    duplicates: Option<DuplicatesArg>,

    /// TOML file holding an `AvlConfig`.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<AvlConfig, AvlError> {
    let mut config = match &args.config {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .map_err(|e| AvlError::Config(format!("{}: {e}", path.display())))?;
            AvlConfig::from_toml_str(&src)?
        }
        None => AvlConfig::default(),
    };
    if let Some(duplicates) = args.duplicates {
        config.duplicates = duplicates.into();
    }
    Ok(config)
}

/// `Answer`, the tree dump, then one membership line per searched value.
fn render<C>(tree: &AvlTree<i64, C>, search: &[i64]) -> String
where
    C: Fn(&i64, &i64) -> std::cmp::Ordering,
{
    let mut out = String::from("Answer\n");
    out.push_str(&tree.traverse());
    for v in search {
        out.push_str(if tree.contains(v) { "true\n" } else { "false\n" });
    }
    out
}

fn run(args: &Args) -> Result<String, AvlError> {
    let config = load_config(args)?;
    tracing::debug!(?config, "starting");

    let mut tree = AvlTree::with_config(config);
    tree.extend(args.values.iter().copied());
    tree.assert_valid()?;

    Ok(render(&tree, &args.search))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
