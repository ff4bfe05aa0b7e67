//! Command line entry point for genwrap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use genwrap::{Generator, GeneratorConfig, RustEdition, DEFAULT_OUTPUT};

/// Generate Rust wrappers for the qpid-proton C API from its headers.
#[derive(Parser, Debug)]
#[command(name = "genwrap", version, about)]
struct Cli {
    /// Directory holding the proton headers (`link.h`, `types.h`, ...).
    #[arg(long)]
    include: PathBuf,

    /// Generated file.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Formatter run on the generated file; its exit status must be zero.
    #[arg(long, default_value = "rustfmt")]
    formatter: String,

    /// Edition passed to rustfmt (`2021` or `2024`); defaults to the newest one supported.
    #[arg(long)]
    edition: Option<RustEdition>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("genwrap=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut builder = GeneratorConfig::builder(&cli.include)
        .output(&cli.output)
        .formatter(Some(cli.formatter));
    if let Some(edition) = cli.edition {
        builder = builder.edition(edition);
    }
    let config = builder.build();
    let path = Generator::new(config)
        .generate()
        .with_context(|| format!("generating wrappers from {}", cli.include.display()))?;
    tracing::debug!(path = %path.display(), "done");
    Ok(())
}
