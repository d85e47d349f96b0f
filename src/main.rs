use anyhow::Context;
use apsis::{config::PipelineConfig, quantity::Quantity, run, series::CollisionPolicy};
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "apsis",
    version,
    about = "Compare the apogee/perigee trend of predicted orbits against GPS ephemerides."
)]
struct Args {
    /// Directory holding the propagator, TLE and GPS files.
    #[arg(value_name = "DIR", default_value = apsis::config::DEFAULT_INPUT_DIR)]
    input_dir: Utf8PathBuf,

    /// Quantity extracted at each extremum: `altitude` or `semi-major`.
    #[arg(long, short, default_value = "semi-major")]
    quantity: Quantity,

    /// Draw the extrema as markers on top of the trend lines.
    #[arg(long)]
    scatter: bool,

    /// Keep each file's fitted intercept instead of a common starting value.
    #[arg(long)]
    no_start_align: bool,

    /// Chart title. Derived from the first GPS or TLE file name when omitted.
    #[arg(long)]
    title: Option<String>,

    /// SVG file to write.
    #[arg(long, short, default_value = apsis::config::DEFAULT_OUTPUT)]
    output: Utf8PathBuf,

    /// What to do when two extrema of a file round to the same elapsed time:
    /// `overwrite`, `keep-first` or `reject`.
    #[arg(long, default_value = "overwrite", value_name = "POLICY")]
    on_collision: CollisionPolicy,

    /// Fail on GPS states whose semi-major axis is negative or not finite.
    #[arg(long)]
    reject_degenerate: bool,

    /// Print a table of the fitted trends.
    #[arg(long)]
    summary: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Default filter directive for a `-v` count, used when `RUST_LOG` is unset.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Called once, before anything is logged.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut builder = PipelineConfig::builder()
        .input_dir(args.input_dir)
        .quantity(args.quantity)
        .collision_policy(args.on_collision)
        .reject_degenerate_orbits(args.reject_degenerate)
        .scatter(args.scatter)
        .start_aligned(!args.no_start_align)
        .output(args.output);
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    let config = builder.build()?;

    let report = run(&config)
        .with_context(|| format!("failed to plot the orbits of {}", config.input_dir))?;

    if args.summary {
        println!("{}", report.summary());
    }
    Ok(())
}
