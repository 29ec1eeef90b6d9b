use anyhow::Result;
use log::info;
use ndarray as nd;
use num_complex::Complex64 as C64;
use nlse::{
    config::{ AxisConfig, Config, Nonlinearity, Profile, Scheme },
    grid::Grid1,
    timedep,
};

const AMPLITUDE: f64 = 1.0;
const WIDTH: f64 = 1.0;

// A exp(-x² / (2 σ²)) evolved freely to time t
fn exact(x: &nd::Array1<f64>, t: f64) -> nd::Array1<C64> {
    let s = C64::new(WIDTH * WIDTH, 2.0 * t);
    let pre = AMPLITUDE * WIDTH / s.sqrt();
    x.mapv(|xk| pre * (-xk * xk / (2.0 * s)).exp())
}

fn main() -> Result<()> {
    lib::init_logging();
    let outdir = lib::outdir()?;

    for scheme in [Scheme::Spectral, Scheme::Fdtd] {
        let mut config = Config::new_1d(AxisConfig::new(400, 20.0), 1.0, 10_000);
        config.scheme = scheme;
        config.nonlinearity = Nonlinearity::Linear;
        config.profile = Profile::Gaussian { amplitude: AMPLITUDE, width: WIDTH };
        config.sample_every = 0;
        let x = Grid1::from_config(&config)?.x().coords();
        let outcome = timedep::run_1d(&config)?;
        let psi = exact(&x, config.max_time);
        let err
            = outcome.field.iter().zip(&psi)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max);
        info!("{:?}: max error vs. closed form = {:.3e}", scheme, err);

        let tag = match scheme {
            Scheme::Fdtd => "fdtd",
            Scheme::Spectral => "spectral",
        };
        lib::write_field_1d(
            &outdir.join(format!("gaussian_{}.csv", tag)), &x, &outcome.field)?;
    }
    let x = Grid1::from_config(
        &Config::new_1d(AxisConfig::new(400, 20.0), 1.0, 1))?.x().coords();
    lib::write_field_1d(&outdir.join("gaussian_exact.csv"), &x, &exact(&x, 1.0))?;
    Ok(())
}
