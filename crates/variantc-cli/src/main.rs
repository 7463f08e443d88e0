//! `variantc` -- generate the variant configuration header.
//!
//! With no arguments, reads `mitsuba.conf` from the working directory and
//! writes `include/mitsuba/core/config.h`. Exits non-zero on any error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use variantc_cli::{check, generate, resolve_config, GeneratorConfig};
use variantc_emit::writer::WriteOutcome;

/// Compile the build-variant configuration into C++ preprocessor macros.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Variant configuration to read (defaults to mitsuba.conf)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Header to generate (defaults to include/mitsuba/core/config.h)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reject a default mode that is not among the enabled variants
    #[arg(long)]
    strict_default: bool,

    /// Check only: fail if the header is missing or out of date
    #[arg(long, conflicts_with = "dump_resolved")]
    check: bool,

    /// Print the resolved variants as JSON instead of writing the header
    #[arg(long)]
    dump_resolved: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        let defaults = GeneratorConfig::default();
        GeneratorConfig {
            config_path: self.config.clone().unwrap_or(defaults.config_path),
            output_path: self.output.clone().unwrap_or(defaults.output_path),
            strict_default: self.strict_default,
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.generator_config();

    if cli.dump_resolved {
        let resolved = resolve_config(&config)?;
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.check {
        return Ok(if check(&config)? {
            println!("{} is up to date", config.output_path.display());
            ExitCode::SUCCESS
        } else {
            eprintln!("{} is out of date; run variantc to regenerate it", config.output_path.display());
            ExitCode::FAILURE
        });
    }

    let generation = generate(&config)?;
    match generation.outcome {
        WriteOutcome::Written => println!(
            "Generated configuration header: {} ({} variants, default mode \"{}\")",
            generation.output_path.display(),
            generation.variant_count,
            generation.default_mode
        ),
        WriteOutcome::Unchanged => println!(
            "Configuration header is up to date: {}",
            generation.output_path.display()
        ),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
