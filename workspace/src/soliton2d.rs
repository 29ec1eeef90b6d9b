use anyhow::Result;
use log::info;
use nlse::{
    config::{ AxisConfig, Config, Nonlinearity, Profile, Scheme },
    timedep,
};

fn main() -> Result<()> {
    lib::init_logging();
    let outdir = lib::outdir()?;

    let mut config = Config::new_2d(
        AxisConfig::new(256, 10.0), AxisConfig::new(256, 10.0), 5.0, 5000);
    config.scheme = Scheme::Spectral;
    config.nonlinearity = Nonlinearity::CubicQuintic;
    config.profile = Profile::Soliton;
    config.snapshot_every = 1000;
    let outcome = timedep::run_2d(&config)?;

    let (min, max)
        = outcome.trace.peaks().iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    info!(
        "peak magnitude in [{:.4}, {:.4}] over {} samples; norm {:.6} -> {:.6}",
        min,
        max,
        outcome.trace.len(),
        outcome.initial_norm(),
        outcome.final_norm(),
    );

    lib::write_trace(&outdir.join("soliton2d_trace.csv"), &outcome.trace)?;
    lib::write_field_2d(&outdir.join("soliton2d_initial.csv"), &outcome.initial)?;
    lib::write_field_2d(&outdir.join("soliton2d_final.csv"), &outcome.field)?;
    for snap in outcome.history.iter() {
        lib::write_field_2d(
            &outdir.join(format!("soliton2d_{:06}.csv", snap.step)), &snap.field)?;
    }
    Ok(())
}
