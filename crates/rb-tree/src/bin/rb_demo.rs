//! `rb-demo`: build a red-black tree from sample keys and print what happens.
//!
//! Usage:
//!   rb-demo [--insert 10,20,30] [--search 15,25] [--remove 18,11,3] [--check] [-d]
//!
//! Without flags it inserts 10, 20, 30, 15, 18, 11, 3, searches for 15 and 25,
//! then removes 18, 11 and 3, printing the tree after each removal.

use clap::{ArgAction, Parser};
use rb_tree::{InvariantViolation, RbTree};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Exercise a red-black tree from the command line
#[derive(Parser, Debug)]
#[command(name = "rb-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keys to insert, in order
    #[arg(long, value_delimiter = ',', default_values_t = [10, 20, 30, 15, 18, 11, 3])]
    insert: Vec<i64>,

    /// Keys to look up after inserting
    #[arg(long, value_delimiter = ',', default_values_t = [15, 25])]
    search: Vec<i64>,

    /// Keys to remove, in order
    #[arg(long, value_delimiter = ',', default_values_t = [18, 11, 3])]
    remove: Vec<i64>,

    /// Validate the tree after every mutation
    #[arg(long)]
    check: bool,

    /// Log verbosity (-d info, -dd debug, -ddd trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

fn run(cli: &Cli) -> Result<(), InvariantViolation> {
    let mut tree = RbTree::new();

    for &key in &cli.insert {
        tree.insert(key);
        check(cli, &tree)?;
    }

    println!("Initial Red-Black Tree:");
    println!("{tree}");

    println!("\nInorder traversal: {}", inorder(&tree));

    println!();
    for key in &cli.search {
        let found = if tree.search(key) { "Found" } else { "Not Found" };
        println!("Searching for {key}: {found}");
    }

    for key in &cli.remove {
        println!("After deleting {key}:");
        if let Err(e) = tree.remove(key) {
            println!("{e}");
        }
        check(cli, &tree)?;
        println!("{tree}");
    }

    println!("\nFinal Inorder traversal: {}", inorder(&tree));
    Ok(())
}

fn check(cli: &Cli, tree: &RbTree<i64>) -> Result<(), InvariantViolation> {
    if cli.check {
        let black_height = tree.validate()?;
        tracing::debug!(len = tree.len(), black_height, "tree valid");
    }
    Ok(())
}

fn inorder(tree: &RbTree<i64>) -> String {
    tree.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
