use anyhow::Result;
use log::info;
use nlse::{
    config::{ AxisConfig, Config, Nonlinearity, Profile, Scheme },
    grid::{ Grid, Grid1 },
    timedep,
};

fn main() -> Result<()> {
    lib::init_logging();
    let outdir = lib::outdir()?;

    for (scheme, nodes, max_time, steps) in [
        (Scheme::Spectral, 1000, 10.0, 100_000),
        (Scheme::Fdtd, 200, 2.0, 20_000),
    ] {
        let mut config
            = Config::new_1d(AxisConfig::new(nodes, 10.0), max_time, steps);
        config.scheme = scheme;
        config.nonlinearity = Nonlinearity::Cubic;
        config.profile = Profile::Soliton;
        config.sample_every = 100;
        let grid = Grid1::from_config(&config)?;
        let outcome = timedep::run_1d(&config)?;

        let deviation
            = outcome.field.iter().zip(&outcome.initial)
            .map(|(a, b)| (a.norm() - b.norm()).abs())
            .fold(0.0, f64::max);
        let drift
            = (outcome.final_norm() - outcome.initial_norm()).abs()
            / outcome.initial_norm();
        info!(
            "{:?}: max profile deviation = {:.3e}, norm drift = {:.3e}, elapsed = {:.3?}",
            scheme, deviation, drift, outcome.elapsed,
        );

        let tag = match scheme {
            Scheme::Fdtd => "fdtd",
            Scheme::Spectral => "spectral",
        };
        let x = grid.x().coords();
        lib::write_field_1d(
            &outdir.join(format!("soliton_{}_initial.csv", tag)), &x, &outcome.initial)?;
        lib::write_field_1d(
            &outdir.join(format!("soliton_{}_final.csv", tag)), &x, &outcome.field)?;
        lib::write_trace(
            &outdir.join(format!("soliton_{}_trace.csv", tag)), &outcome.trace)?;
        if scheme == Scheme::Spectral {
            lib::write_spectrum_1d(
                &outdir.join("soliton_spectral_spectrum.csv"),
                grid.x().step(),
                &outcome.field,
            )?;
        }
        info!("grid: {} nodes, dx = {:e}", grid.len(), grid.x().step());
    }
    Ok(())
}
