use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};

use statplot_core::SigmaParams;
use statplot_core::climate::{DEFAULT_REGION, DEFAULT_TARGET_YEAR, default_input_path};
use statplot_core::samples::DEFAULT_SEED;

use crate::config::RenderConfig;
use crate::figures::{self, FigureError, RunOptions, Written};
use crate::render::ImageFormat;

#[derive(Parser, Debug)]
#[command(name = "statplot")]
#[command(about = "Render annotated statistics figures")]
pub struct Cli {
    /// Directory figures, summaries and the log are written to [default: img]
    #[arg(short, long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// Image format for every figure (default: per figure)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<ImageFormat>,

    /// YAML render configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write a JSON summary of the statistics beside each image
    #[arg(short, long, global = true)]
    pub summary: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Normal pdf with shifted curves and the mass beyond the specification limits
    Sigma(SigmaArgs),
    /// Overlaid density histograms of four seeded distributions
    Distributions(DistributionsArgs),
    /// A year's daily extremes against the records of every other year
    Climate(ClimateArgs),
    /// All three figures with default parameters
    All,
}

#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct SigmaArgs {
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub mean: f64,
    #[arg(long, default_value_t = 1.0)]
    pub sigma: f64,
    /// Offset of the shifted curves, in standard deviations
    #[arg(long, default_value_t = 1.5)]
    pub shift: f64,
    /// Specification limit, in standard deviations
    #[arg(long, default_value_t = 6.0)]
    pub limit: f64,
}

impl From<SigmaArgs> for SigmaParams {
    fn from(args: SigmaArgs) -> Self {
        SigmaParams {
            mean: args.mean,
            std_dev: args.sigma,
            shift: args.shift,
            limit: args.limit,
        }
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionsArgs {
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ClimateArgs {
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,
    /// Year compared against the records of all other years
    #[arg(long, default_value_t = DEFAULT_TARGET_YEAR)]
    pub year: i16,
    /// Observation CSV [default: data/<region>_climate.csv]
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl ClimateArgs {
    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| default_input_path(&self.region))
    }
}

impl Default for ClimateArgs {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            year: DEFAULT_TARGET_YEAR,
            input: None,
        }
    }
}

impl Cli {
    /// Config file (if any) with command-line overrides applied
    pub fn render_config(&self) -> color_eyre::Result<RenderConfig> {
        let config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        Ok(config.with_overrides(self.out_dir.clone(), self.format))
    }
}

fn report(written: &Written) {
    println!("wrote {}", written.image.display());
    if let Some(summary) = &written.summary {
        println!("wrote {}", summary.display());
    }
}

pub fn run(command: &Command, options: &RunOptions) -> color_eyre::Result<()> {
    match command {
        Command::Sigma(args) => {
            report(&figures::sigma((*args).into(), options).wrap_err("sigma figure failed")?);
        }
        Command::Distributions(args) => {
            report(
                &figures::distributions(args.seed, options)
                    .wrap_err("distributions figure failed")?,
            );
        }
        Command::Climate(args) => {
            report(
                &figures::climate(&args.region, args.year, &args.input_path(), options)
                    .wrap_err("climate figure failed")?,
            );
        }
        Command::All => run_all(options, &ClimateArgs::default())?,
    }
    Ok(())
}

/// Attempt every figure, logging failures, and fail if any did.
///
/// Climate is skipped with a warning when its input file does not exist.
pub fn run_all(options: &RunOptions, climate: &ClimateArgs) -> color_eyre::Result<()> {
    let input = climate.input_path();

    let mut attempts: Vec<(&str, Result<Written, FigureError>)> = vec![
        ("sigma", figures::sigma(SigmaParams::default(), options)),
        (
            "distributions",
            figures::distributions(DEFAULT_SEED, options),
        ),
    ];
    if input.exists() {
        attempts.push((
            "climate",
            figures::climate(&climate.region, climate.year, &input, options),
        ));
    } else {
        tracing::warn!(input = %input.display(), "climate input missing, skipping figure");
        eprintln!(
            "skipping climate figure: {} not found",
            input.display()
        );
    }

    let mut failed = Vec::new();
    for (name, attempt) in attempts {
        match attempt {
            Ok(written) => report(&written),
            Err(err) => {
                tracing::error!(figure = name, "{err}");
                eprintln!("{name} figure failed: {err}");
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        bail!("{} figure(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigma_defaults() {
        let cli = Cli::try_parse_from(["statplot", "sigma"]).unwrap();
        let Command::Sigma(args) = cli.command else {
            panic!("expected sigma");
        };
        assert_eq!(SigmaParams::from(args), SigmaParams::default());
        assert_eq!(cli.log_level, "info");
        assert!(!cli.summary);
    }

    #[test]
    fn test_sigma_negative_mean_and_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "statplot", "sigma", "--mean", "-2", "--sigma", "0.5", "--format", "png",
            "--summary",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(ImageFormat::Png));
        assert!(cli.summary);
        let Command::Sigma(args) = cli.command else {
            panic!("expected sigma");
        };
        assert_eq!(args.mean, -2.0);
        assert_eq!(args.sigma, 0.5);
    }

    #[test]
    fn test_distributions_seed() {
        let cli = Cli::try_parse_from(["statplot", "distributions"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Distributions(DistributionsArgs { seed: 1234 })
        );

        let cli = Cli::try_parse_from(["statplot", "distributions", "--seed", "9"]).unwrap();
        assert_eq!(cli.command, Command::Distributions(DistributionsArgs { seed: 9 }));
    }

    #[test]
    fn test_climate_default_input_follows_region() {
        let cli = Cli::try_parse_from(["statplot", "climate", "--region", "Ann Arbor"]).unwrap();
        let Command::Climate(args) = cli.command else {
            panic!("expected climate");
        };
        assert_eq!(args.year, 2015);
        assert_eq!(args.input_path(), PathBuf::from("data/Ann_Arbor_climate.csv"));

        assert_eq!(
            ClimateArgs::default().input_path(),
            PathBuf::from("data/New_York_region_climate.csv")
        );
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["statplot", "--format", "gif", "all"]).is_err());
    }

    #[test]
    fn test_render_config_overrides() {
        let cli = Cli::try_parse_from(["statplot", "-o", "plots", "-f", "svg", "all"]).unwrap();
        let config = cli.render_config().unwrap();
        assert_eq!(config.out_dir, PathBuf::from("plots"));
        assert_eq!(config.climate.format, ImageFormat::Svg);
    }
}
