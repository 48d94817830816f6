//! CLI for resolving dotted symbol paths against lazily loaded namespaces.
//!
//! Usage:
//!   lazyns --config namespaces.toml app.models.User
//!   lazyns --base ./lib --namespace app --extension js app.models.User

use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lazyns::resolver::{
    lookup_global, register, DefaultStrategy, NamespaceConfig, NamespaceRegistry,
    SourceFileLoader, Symbol, Target, UnitSource,
};

#[derive(Parser, Debug)]
#[command(name = "lazyns", about = "Resolve dotted symbol paths on demand")]
struct Cli {
    /// Namespace configuration file (TOML).
    #[arg(short, long, conflicts_with = "base")]
    config: Option<PathBuf>,

    /// Base directory for the namespaces given with --namespace.
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Namespace to register under --base. Repeatable.
    #[arg(short, long = "namespace")]
    namespaces: Vec<String>,

    /// Extension appended to unit file names.
    #[arg(short, long)]
    extension: Option<String>,

    /// Dotted paths to resolve, e.g. app.models.User.
    #[arg(required = true)]
    paths: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lazyns=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(config) = &cli.config {
        NamespaceConfig::load(config)?.apply(&NamespaceRegistry::global(), Target::Global)?;
    } else if let Some(base) = &cli.base {
        if cli.namespaces.is_empty() {
            return Err("--base needs at least one --namespace".into());
        }
        let loader = match &cli.extension {
            Some(extension) => SourceFileLoader::with_extension(extension.as_str()),
            None => SourceFileLoader::new(),
        };
        let strategy = DefaultStrategy::with_loader(base, Arc::new(loader));
        register(cli.namespaces.clone(), Arc::new(strategy), Target::Global)?;
    } else {
        return Err("either --config or --base is required".into());
    }

    for path in &cli.paths {
        let symbol = lookup_global(path)?;
        print_symbol(&symbol);
    }
    Ok(())
}

fn print_symbol(symbol: &Symbol) {
    match symbol {
        Symbol::Namespace(node) => println!("namespace {}", node.full_name()),
        Symbol::Unit(unit) => match unit.downcast_ref::<UnitSource>() {
            Some(source) => println!(
                "unit {} ({}, {} bytes)",
                unit.full_name(),
                source.path.display(),
                source.text.len()
            ),
            None => println!("unit {}", unit.full_name()),
        },
    }
}
