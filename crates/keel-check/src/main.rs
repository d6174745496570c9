//! keel-check - decode a YAML file against a type descriptor
//!
//! Usage:
//!   keel-check --input config.yaml --type 'map<string, list<u16>>'
//!   keel-check --input config.yaml --type 'set<ipaddr>' --json

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod check;

use check::{CheckOptions, Outcome};

#[derive(Parser, Debug)]
#[command(name = "keel-check")]
#[command(version)]
#[command(about = "Decode a YAML file against a type descriptor and report every failure", long_about = None)]
struct Args {
    /// YAML file to check
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Type to decode the document as, e.g. `list<u16>` or `map<string, duration>`
    #[arg(short = 't', long = "type", value_name = "DESCRIPTOR", required_unless_present = "tree")]
    ty: Option<String>,

    /// Maximum nesting depth accepted by the tree builder
    #[arg(long, value_name = "N", default_value_t = keel_yaml::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print failures as JSON
    #[arg(long)]
    json: bool,

    /// Print the parsed tree as JSON and exit without decoding
    #[arg(long, conflicts_with = "json")]
    tree: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keel=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let options = CheckOptions {
        input: args.input,
        ty: args.ty.unwrap_or_default(),
        max_depth: args.max_depth,
    };

    if args.tree {
        let tree = check::load(&options)?;
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    match check::run(&options)? {
        Outcome::Valid => {
            println!("✓ {} decodes as {}", options.input.display(), options.ty);
            Ok(())
        }
        Outcome::Invalid(failures) => {
            if args.json {
                let summaries = keel_decode::summarize(&failures);
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                eprintln!("✗ {} does not decode as {}", options.input.display(), options.ty);
                eprintln!();
                eprint!("{}", keel_decode::render_failures(&failures));
            }
            process::exit(1);
        }
    }
}
