use std::{ fs, path::PathBuf };
use anyhow::{ Context, Result };
use clap::Parser;
use log::info;
use nlse::{
    config::Config,
    grid::Grid1,
    timedep::{ self, RunOutcome },
};

#[derive(Parser, Debug)]
#[command(name = "run", about = "Run a single NLSE simulation from a TOML file")]
struct Cli {
    /// Path to a TOML configuration file
    config: PathBuf,
    /// Prefix for output file names
    #[arg(short, long, default_value = "run")]
    prefix: String,
}

fn main() -> Result<()> {
    lib::init_logging();
    let cli = Cli::parse();
    let raw = fs::read_to_string(&cli.config)
        .with_context(|| format!("couldn't read {}", cli.config.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("couldn't parse {}", cli.config.display()))?;
    info!("loaded {}", cli.config.display());

    let outdir = lib::outdir()?;
    let out = |name: &str| outdir.join(format!("{}_{}.csv", cli.prefix, name));
    match timedep::run(&config)? {
        RunOutcome::D1(outcome) => {
            let x = Grid1::from_config(&config)?.x().coords();
            lib::write_field_1d(&out("initial"), &x, &outcome.initial)?;
            lib::write_field_1d(&out("final"), &x, &outcome.field)?;
            lib::write_trace(&out("trace"), &outcome.trace)?;
            info!("norm {:.6} -> {:.6}", outcome.initial_norm(), outcome.final_norm());
        },
        RunOutcome::D2(outcome) => {
            lib::write_field_2d(&out("initial"), &outcome.initial)?;
            lib::write_field_2d(&out("final"), &outcome.field)?;
            lib::write_trace(&out("trace"), &outcome.trace)?;
            info!("norm {:.6} -> {:.6}", outcome.initial_norm(), outcome.final_norm());
        },
    }
    Ok(())
}
