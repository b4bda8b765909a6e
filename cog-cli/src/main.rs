//! cog: volume and center of mass of a closed triangle soup.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=cog_core=debug` - calculator details
//! - `RUST_LOG=debug` - all debug output
//!
//! # Example
//!
//! ```bash
//! # Demo cube, moved off the origin
//! cog --cube 1 --offset 2,0,0
//!
//! # Flat coordinate list from a file, JSON output
//! cog mesh.txt --format json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use cog_core::{CalculatorConfig, CogError, Vec3};
use cog_cli::{load_config, run_job, CentroidJob, InputSource, MeshSource, OutputFormat};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compute the enclosed volume and center of mass of a closed triangle mesh.
///
/// Input is a flat list of coordinates, 9 per triangle
/// (x1 y1 z1 x2 y2 z2 x3 y3 z3), as a JSON array or plain numbers.
#[derive(Parser, Debug)]
#[command(name = "cog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Coordinate file, or `-` for stdin (default)
    input: Option<PathBuf>,

    /// Use an axis-aligned demo cube of this side length instead of input
    #[arg(long, conflicts_with = "input", value_parser = parse_size)]
    cube: Option<f64>,

    /// Translate every vertex by X,Y,Z before computing
    #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
    offset: Option<Vec3>,

    /// JSON file with calculator settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Volumes at or below this magnitude yield no center
    #[arg(long)]
    epsilon: Option<f64>,

    /// Triangle count from which the sum is computed in parallel
    #[arg(long)]
    parallel_threshold: Option<usize>,

    /// Fail instead of reporting a zero center for negligible volume
    #[arg(long)]
    strict: bool,

    /// Output format for results
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_offset(s: &str) -> Result<Vec3> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] if [x, y, z].iter().all(|c| c.is_finite()) => Ok(Vec3::new(*x, *y, *z)),
        [_, _, _] => bail!("offset components must be finite, got {:?}", s),
        _ => bail!("expected X,Y,Z, got {:?}", s),
    }
}

fn parse_size(s: &str) -> Result<f64> {
    let size: f64 = s.trim().parse()?;
    if !size.is_finite() || size <= 0.0 {
        bail!("cube size must be a positive finite number, got {:?}", s);
    }
    Ok(size)
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "cog_core=info,cog_cli=info",
            2 => "cog_core=debug,cog_cli=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn build_config(cli: &Cli) -> Result<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(epsilon) = cli.epsilon {
        config = config.with_volume_epsilon(epsilon);
    }
    if let Some(threshold) = cli.parallel_threshold {
        config = config.with_parallel_threshold(threshold);
    }
    if cli.strict {
        config = config.with_reject_degenerate(true);
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let source = match cli.cube {
        Some(size) => MeshSource::Cube(size),
        None => MeshSource::Coordinates(InputSource::from_arg(cli.input.clone())),
    };
    let job = CentroidJob {
        source,
        offset: cli.offset,
        config: build_config(cli)?,
    };

    let report = run_job(&job)?;
    if !cli.quiet {
        println!("{}", report.render(cli.format)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        if !cli.quiet {
            eprintln!("{}: {}", "Error".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {}", "Caused by".yellow(), cause);
            }
            if let Some(CogError::DegenerateMesh { .. }) = e.downcast_ref::<CogError>() {
                eprintln!(
                    "  {}: the mesh may be open or flat; rerun without --strict to get a zero center",
                    "Suggestion".green()
                );
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("2,0,-1.5").unwrap(), Vec3::new(2.0, 0.0, -1.5));
        assert!(parse_offset("1,2").is_err());
        assert!(parse_offset("a,b,c").is_err());
        assert!(parse_offset("nan,0,0").is_err());
        assert!(parse_offset("0,inf,0").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("2.5").unwrap(), 2.5);
        assert!(parse_size("inf").is_err());
        assert!(parse_size("NaN").is_err());
        assert!(parse_size("0").is_err());
        assert!(Cli::try_parse_from(["cog", "--cube", "inf"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["cog", "--cube", "1", "--epsilon", "0.5", "--strict"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.volume_epsilon, 0.5);
        assert!(config.reject_degenerate);
        assert_eq!(cli.cube, Some(1.0));
    }

    #[test]
    fn test_negative_offset_is_accepted() {
        let cli = Cli::parse_from(["cog", "--cube", "1", "--offset", "-2,0,0"]);
        assert_eq!(cli.offset, Some(Vec3::new(-2.0, 0.0, 0.0)));
    }
}
