use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use quadrify::config::{Config, QuadMode};
use quadrify::snapshot::read_snapshot;
use quadrify::util::{write_quads, write_quads_to_file};
use quadrify::QuadGenerator;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "quadrify")]
#[command(about = "Convert tabular database snapshots into RDF quads")]
struct Cli {
    /// Database snapshot file to convert
    #[clap(long, short)]
    input: PathBuf,
    /// Output N-Quads file; written to stdout when omitted
    #[clap(long, short)]
    output: Option<PathBuf>,
    /// Model used to generate quads
    #[clap(long, short, value_enum, default_value_t = QuadMode::FacadeX)]
    mode: QuadMode,
    /// Base IRI for the Facade-X generated data; defaults to a file: URL
    /// derived from the input path
    #[clap(long, short)]
    base: Option<String>,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false")]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false")]
    debug: bool,
}

/// Base IRI pointing at the input file itself, so two snapshots on the same
/// machine never share graph names by accident.
fn base_iri_for(input: &Path) -> Result<String> {
    let absolute = input.canonicalize()?;
    let url = Url::from_file_path(&absolute)
        .map_err(|_| anyhow!("cannot derive a file URL from {}", input.display()))?;
    Ok(format!("{}#", url))
}

fn main() -> Result<()> {
    let cmd = Cli::parse();

    let log_level = if cmd.verbose { "info" } else { "warn" };
    let log_level = if cmd.debug { "debug" } else { log_level };
    std::env::set_var("RUST_LOG", log_level);
    env_logger::init();

    let base = match cmd.base {
        Some(base) => base,
        None => base_iri_for(&cmd.input)?,
    };
    let config = Config::new(cmd.mode, base);
    if cmd.verbose || cmd.debug {
        config.print();
    }

    let source = read_snapshot(&cmd.input)?;
    let generator = QuadGenerator::new(source, &config)?;
    info!("Generating {} quads from {}", cmd.mode, cmd.input.display());

    match cmd.output {
        Some(path) => write_quads_to_file(generator.quads(), &path)?,
        None => {
            let stdout = std::io::stdout();
            write_quads(generator.quads(), stdout.lock())?;
        }
    }
    Ok(())
}
