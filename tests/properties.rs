use ndarray as nd;
use num_complex::Complex64 as C64;
use nlse::{
    Field,
    config::{ AxisConfig, Config, Nonlinearity, Profile, Scheme },
    grid::{ Axis, Clock, Grid, Grid1, Grid2 },
    linear::{ Fdtd, LinearPropagator, Spectral },
    nonlinear::Nonlinear,
    timedep::{ self, Simulation },
    transform::Transform,
    utils::{ norm, peak },
};

fn max_diff<D: nd::Dimension>(a: &Field<D>, b: &Field<D>) -> f64 {
    a.iter().zip(b).map(|(ak, bk)| (ak - bk).norm()).fold(0.0, f64::max)
}

// closed-form free evolution of A exp(-x² / (2 σ²)) under ψ_t = i ψ_xx
fn free_gaussian(x: &nd::Array1<f64>, amplitude: f64, width: f64, t: f64)
    -> Field<nd::Ix1>
{
    let s = C64::new(width * width, 2.0 * t);
    let pre = amplitude * width / s.sqrt();
    x.mapv(|xk| pre * (-xk * xk / (2.0 * s)).exp())
}

#[test]
fn spectral_run_conserves_norm_1d() {
    let mut config = Config::new_1d(AxisConfig::new(512, 20.0), 2.0, 2000);
    config.scheme = Scheme::Spectral;
    config.nonlinearity = Nonlinearity::CubicQuintic;
    config.profile = Profile::Gaussian { amplitude: 1.8, width: 1.2 };
    let outcome = timedep::run_1d(&config).unwrap();
    let n0 = outcome.initial_norm();
    let n1 = outcome.final_norm();
    assert!(((n1 - n0) / n0).abs() < 1e-10);
    assert_eq!(outcome.trace.len(), 2000);
}

#[test]
fn spectral_run_conserves_norm_2d() {
    let mut config = Config::new_2d(
        AxisConfig::new(64, 8.0), AxisConfig::new(48, 6.0), 0.5, 200);
    config.scheme = Scheme::Spectral;
    config.nonlinearity = Nonlinearity::CubicQuintic;
    let outcome = timedep::run_2d(&config).unwrap();
    let n0 = outcome.initial_norm();
    let n1 = outcome.final_norm();
    assert!(((n1 - n0) / n0).abs() < 1e-10);
    assert_eq!(outcome.trace.len(), 200);
    assert!(outcome.trace.peaks().iter().all(|p| p.is_finite() && *p > 0.0));
    assert_eq!(outcome.field.dim(), (64, 48));
}

#[test]
fn transform_round_trip_is_identity() {
    let psi0: Field<nd::Ix2>
        = nd::Array2::from_shape_fn((30, 17), |(i, j)| {
            let (x, y) = (i as f64 * 0.3, j as f64 * 0.7);
            C64::new(x.sin() * y.cos() + 0.1 * x, (x * y).tanh())
        });
    let mut psi = psi0.clone();
    let fft = Transform::new(psi.raw_dim()).unwrap();
    fft.forward(&mut psi).unwrap();
    fft.inverse(&mut psi).unwrap();
    assert!(max_diff(&psi, &psi0) < 1e-12);

    // non-standard layout
    let mut psi_t: Field<nd::Ix2>
        = nd::Array2::from_shape_fn((17, 30), |(j, i)| psi0[[i, j]]);
    let mut psi_f = psi0.clone().reversed_axes();
    assert!(!psi_f.is_standard_layout());
    let fft = Transform::new(psi_t.raw_dim()).unwrap();
    fft.forward(&mut psi_t).unwrap();
    fft.forward(&mut psi_f).unwrap();
    assert!(max_diff(&psi_t, &psi_f) < 1e-10);
    fft.inverse(&mut psi_f).unwrap();
    assert!(psi_f.iter().zip(psi0.t()).all(|(a, b)| (a - b).norm() < 1e-12));
}

#[test]
fn fdtd_edges_never_change_1d() {
    let grid = Grid1::new(Axis::new(100, 5.0).unwrap(), Clock::new(0.2, 400).unwrap());
    let profile = Profile::Gaussian { amplitude: 1.0, width: 2.0 };
    let psi0 = grid.initial(&profile);
    let mut sim = Simulation::new(grid, Fdtd::new(grid), Nonlinearity::Cubic, &profile);
    while sim.step().unwrap() != timedep::State::Finished {
        assert_eq!(sim.field()[0], psi0[0]);
        assert_eq!(sim.field()[99], psi0[99]);
    }
    assert_eq!(sim.field()[0], psi0[0]);
    assert_eq!(sim.field()[99], psi0[99]);
    assert!(max_diff(sim.field(), &psi0) > 1e-3);
}

#[test]
fn fdtd_edges_never_change_2d() {
    let mut config = Config::new_2d(
        AxisConfig::new(32, 8.0), AxisConfig::new(24, 6.0), 0.5, 100);
    config.profile = Profile::Gaussian { amplitude: 1.0, width: 3.0 };
    config.nonlinearity = Nonlinearity::CubicQuintic;
    let outcome = timedep::run_2d(&config).unwrap();
    let (nx, ny) = outcome.field.dim();
    for ((i, j), p) in outcome.field.indexed_iter() {
        if i == 0 || j == 0 || i == nx - 1 || j == ny - 1 {
            assert_eq!(*p, outcome.initial[[i, j]]);
        }
    }
    assert!(max_diff(&outcome.field, &outcome.initial) > 1e-3);
}

#[test]
fn zero_steps_are_identity() {
    let grid = Grid2::new(
        Axis::new(20, 4.0).unwrap(),
        Axis::new(20, 4.0).unwrap(),
        Clock::new(1.0, 1).unwrap(),
    );
    let psi0 = grid.initial(&Profile::Soliton);

    let mut psi = psi0.clone();
    Fdtd::new(grid).advance(&mut psi, 0.0).unwrap();
    assert_eq!(psi, psi0);

    let mut psi = psi0.clone();
    Spectral::new(&grid).unwrap().advance(&mut psi, 0.0).unwrap();
    assert!(max_diff(&psi, &psi0) < 1e-13);

    for order in [Nonlinearity::Cubic, Nonlinearity::CubicQuintic] {
        let nonlinear = Nonlinear::new(order);
        let mut psi = psi0.clone();
        nonlinear.advance(&mut psi, 0.0, Fdtd::new(grid).boundary());
        assert_eq!(psi, psi0);
        nonlinear.advance(&mut psi, 0.0, Spectral::new(&grid).unwrap().boundary());
        assert_eq!(psi, psi0);
    }
}

#[test]
fn spectral_free_gaussian_matches_closed_form() {
    let (amplitude, width) = (1.0, 1.0);
    let mut config = Config::new_1d(AxisConfig::new(256, 20.0), 1.0, 100);
    config.scheme = Scheme::Spectral;
    config.nonlinearity = Nonlinearity::Linear;
    config.profile = Profile::Gaussian { amplitude, width };
    let x = Grid1::from_config(&config).unwrap().x().coords();
    let outcome = timedep::run_1d(&config).unwrap();
    let exact = free_gaussian(&x, amplitude, width, config.max_time);
    assert!(max_diff(&outcome.field, &exact) < 1e-10);
}

#[test]
fn fdtd_free_gaussian_matches_closed_form() {
    let (amplitude, width) = (1.0, 1.0);
    let mut config = Config::new_1d(AxisConfig::new(200, 10.0), 0.1, 1000);
    config.scheme = Scheme::Fdtd;
    config.nonlinearity = Nonlinearity::Linear;
    config.profile = Profile::Gaussian { amplitude, width };
    let x = Grid1::from_config(&config).unwrap().x().coords();
    let outcome = timedep::run_1d(&config).unwrap();
    let exact = free_gaussian(&x, amplitude, width, config.max_time);
    assert!(max_diff(&outcome.field, &exact) < 1e-2);
}

#[test]
fn splitting_is_second_order_in_time() {
    let axis = Axis::new(128, 16.0).unwrap();
    let profile = Profile::Gaussian { amplitude: 1.5, width: 1.0 };
    let max_time = 0.5;
    let evolve = |steps: usize| -> Field<nd::Ix1> {
        let grid = Grid1::new(axis, Clock::new(max_time, steps).unwrap());
        let linear = Spectral::new(&grid).unwrap();
        Simulation::new(grid, linear, Nonlinearity::Cubic, &profile)
            .sample_every(0)
            .run()
            .unwrap()
            .field
    };
    let reference = evolve(3200);
    let coarse = max_diff(&evolve(25), &reference);
    let fine = max_diff(&evolve(50), &reference);
    assert!(coarse > 1e-8);
    assert!(coarse / fine > 3.0, "error ratio {}", coarse / fine);
}

#[test]
fn sampled_peaks_match_field() {
    let mut config = Config::new_1d(AxisConfig::new(128, 10.0), 0.2, 40);
    config.scheme = Scheme::Spectral;
    config.sample_every = 10;
    config.snapshot_every = 20;
    let outcome = timedep::run_1d(&config).unwrap();
    assert_eq!(outcome.trace.steps(), &[10, 20, 30, 40]);
    assert_eq!(outcome.history.len(), 2);
    let last = outcome.trace.peaks()[3];
    assert_eq!(last, peak(&outcome.field));
    let snap = &outcome.history[0];
    assert_eq!(outcome.trace.peaks()[1], peak(&snap.field));
    assert!((norm(&snap.field, 20.0 / 128.0) - outcome.initial_norm()).abs() < 1e-10);
}
