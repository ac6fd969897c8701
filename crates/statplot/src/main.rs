use clap::Parser;
use statplot::cli::run;
use statplot::{Cli, RunOptions, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.render_config()?;

    init_logging(&config.out_dir, &cli.log_level)?;
    tracing::debug!(?config, "render configuration");

    let options = RunOptions {
        config,
        write_summary: cli.summary,
    };
    run(&cli.command, &options)?;

    tracing::info!("statplot finished");
    Ok(())
}
