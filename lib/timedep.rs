//! Time-step orchestration via symmetric (Strang) operator splitting.
//!
//! Each full step of size `dt` is composed as
//! ```text
//! ψ → L(dt/2) → N(dt) → L(dt/2) → ψ'
//! ```
//! where `L` is a [linear propagator][crate::linear] and `N` is the
//! [nonlinear propagator][crate::nonlinear]. The symmetric ordering gives a
//! local error of *O*(*dt*³) per step; see [`docs`][crate::docs#splitting].
//!
//! In all returned fields, the first (or zero-th) axis indexes *x*.

use std::time::{ Duration, Instant };
use log::{ debug, info };
use ndarray::{ self as nd, Dimension };
use crate::{
    Field,
    config::{ Config, Nonlinearity, Profile, Scheme },
    diagnostics::{ Sampler, Trace },
    error::{ NlseError, NlseResult, ShapeError },
    grid::{ Grid, Grid1, Grid2 },
    linear::{ Fdtd, LinearPropagator, Spectral },
    nonlinear::Nonlinear,
    utils::{ norm, peak },
};

/// Stage of a [`Simulation`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// No steps have been taken.
    Initialized,
    /// At least one step has been taken and more remain.
    Stepping,
    /// All configured steps have been taken, or a step failed.
    Finished,
}

/// A copy of the field at a particular step.
#[derive(Clone, Debug)]
pub struct Snapshot<D>
where D: nd::Dimension
{
    pub step: usize,
    pub time: f64,
    pub field: Field<D>,
}

/// Everything produced by a completed run.
#[derive(Clone, Debug)]
pub struct Outcome<D>
where D: nd::Dimension
{
    /// The field before the first step.
    pub initial: Field<D>,
    /// The field after the last step.
    pub field: Field<D>,
    /// Peak magnitudes recorded during the run.
    pub trace: Trace,
    /// Intermediate fields, if requested.
    pub history: Vec<Snapshot<D>>,
    /// Wall-clock time spent stepping.
    pub elapsed: Duration,
    /// Volume element of a single grid node.
    pub cell_volume: f64,
}

impl<D> Outcome<D>
where D: nd::Dimension
{
    /// Total probability of the initial field.
    pub fn initial_norm(&self) -> f64 { norm(&self.initial, self.cell_volume) }

    /// Total probability of the final field.
    pub fn final_norm(&self) -> f64 { norm(&self.field, self.cell_volume) }
}

/// Owns the field for the duration of a run and sequences the propagators.
pub struct Simulation<G, L>
where
    G: Grid,
    L: LinearPropagator<G::Dim>,
{
    grid: G,
    linear: L,
    nonlinear: Nonlinear,
    sampler: Sampler,
    snapshot_every: usize,
    initial: Field<G::Dim>,
    psi: Field<G::Dim>,
    history: Vec<Snapshot<G::Dim>>,
    step: usize,
    state: State,
}

impl<G, L> Simulation<G, L>
where
    G: Grid,
    L: LinearPropagator<G::Dim>,
{
    /// Create a new simulation starting from a closed-form profile.
    ///
    /// Peak sampling is performed after every step and no snapshots are kept;
    /// see [`Self::sample_every`] and [`Self::snapshot_every`].
    pub fn new(grid: G, linear: L, order: Nonlinearity, profile: &Profile)
        -> Self
    {
        let psi0 = grid.initial(profile);
        Self::new_unchecked(grid, linear, order, psi0)
    }

    /// Create a new simulation starting from an arbitrary field.
    pub fn with_field(grid: G, linear: L, order: Nonlinearity, psi0: Field<G::Dim>)
        -> NlseResult<Self>
    {
        ShapeError::check(grid.shape().slice(), psi0.shape())?;
        Ok(Self::new_unchecked(grid, linear, order, psi0))
    }

    fn new_unchecked(grid: G, linear: L, order: Nonlinearity, psi0: Field<G::Dim>)
        -> Self
    {
        Self {
            grid,
            linear,
            nonlinear: Nonlinear::new(order),
            sampler: Sampler::new(1),
            snapshot_every: 0,
            initial: psi0.clone(),
            psi: psi0,
            history: Vec::new(),
            step: 0,
            state: State::Initialized,
        }
    }

    /// Record the peak magnitude every `every` steps (0 disables).
    pub fn sample_every(mut self, every: usize) -> Self {
        self.sampler = Sampler::new(every);
        self
    }

    /// Keep a copy of the field every `every` steps (0 disables).
    pub fn snapshot_every(mut self, every: usize) -> Self {
        self.snapshot_every = every;
        self
    }

    pub fn state(&self) -> State { self.state }

    /// Number of steps taken so far.
    pub fn steps_taken(&self) -> usize { self.step }

    /// Current simulation time.
    pub fn time(&self) -> f64 { self.step as f64 * self.grid.clock().dt() }

    pub fn grid(&self) -> &G { &self.grid }

    /// The field before the first step.
    pub fn initial(&self) -> &Field<G::Dim> { &self.initial }

    /// The current field.
    pub fn field(&self) -> &Field<G::Dim> { &self.psi }

    /// Peak magnitudes recorded so far.
    pub fn trace(&self) -> &Trace { self.sampler.trace() }

    // L(dt/2) N(dt) L(dt/2)
    fn strang(&mut self, dt: f64) -> NlseResult<()> {
        let boundary = self.linear.boundary();
        self.linear.advance(&mut self.psi, dt / 2.0)?;
        self.nonlinear.advance(&mut self.psi, dt, boundary);
        self.linear.advance(&mut self.psi, dt / 2.0)?;
        Ok(())
    }

    fn advance(&mut self) -> NlseResult<()> {
        let dt = self.grid.clock().dt();
        self.strang(dt)?;
        self.step += 1;
        let time = self.time();
        self.sampler.sample(self.step, time, &self.psi)?;
        if self.snapshot_every != 0 && self.step % self.snapshot_every == 0 {
            self.history.push(
                Snapshot { step: self.step, time, field: self.psi.clone() });
        }
        Ok(())
    }

    /// Take a single step, returning the new state.
    ///
    /// Stepping a finished simulation does nothing. If the step fails, the
    /// simulation is finished and the field should be regarded as invalid.
    pub fn step(&mut self) -> NlseResult<State> {
        match self.state {
            State::Finished => return Ok(State::Finished),
            State::Initialized => { self.state = State::Stepping; },
            State::Stepping => { },
        }
        if let Err(err) = self.advance() {
            self.state = State::Finished;
            return Err(err);
        }
        if self.step >= self.grid.clock().steps() {
            self.state = State::Finished;
        }
        Ok(self.state)
    }

    /// Take all remaining steps and collect the results.
    ///
    /// The final field is checked for non-finite values regardless of the
    /// sampling cadence, so a corrupted trajectory is never returned.
    pub fn run(mut self) -> NlseResult<Outcome<G::Dim>> {
        let clock = self.grid.clock();
        info!(
            "running {} steps over t = {} on a {:?} grid",
            clock.steps() - self.step,
            clock.max_time(),
            self.grid.shape().slice(),
        );
        let start = Instant::now();
        while self.step()? != State::Finished { }
        let elapsed = start.elapsed();
        if !peak(&self.psi).is_finite() {
            return Err(NlseError::Diverged { step: self.step, time: self.time() });
        }
        info!("finished {} steps in {:.3?}", self.step, elapsed);
        Ok(Outcome {
            initial: self.initial,
            field: self.psi,
            trace: self.sampler.into_trace(),
            history: self.history,
            elapsed,
            cell_volume: self.grid.cell_volume(),
        })
    }
}

/// Outcome of a run of either dimension.
#[derive(Clone, Debug)]
pub enum RunOutcome {
    D1(Outcome<nd::Ix1>),
    D2(Outcome<nd::Ix2>),
}

fn run_grid<G>(grid: G, config: &Config) -> NlseResult<Outcome<G::Dim>>
where G: Grid
{
    debug!(
        "scheme = {:?}, nonlinearity = {:?}, profile = {:?}, dt = {:e}",
        config.scheme,
        config.nonlinearity,
        config.profile,
        grid.clock().dt(),
    );
    match config.scheme {
        Scheme::Fdtd => {
            let linear = Fdtd::new(grid.clone());
            Simulation::new(grid, linear, config.nonlinearity, &config.profile)
                .sample_every(config.sample_every)
                .snapshot_every(config.snapshot_every)
                .run()
        },
        Scheme::Spectral => {
            let linear = Spectral::new(&grid)?;
            Simulation::new(grid, linear, config.nonlinearity, &config.profile)
                .sample_every(config.sample_every)
                .snapshot_every(config.snapshot_every)
                .run()
        },
    }
}

// run `f` on a dedicated pool if a thread count is given
fn with_pool<T, F>(threads: Option<usize>, f: F) -> NlseResult<T>
where
    T: Send,
    F: FnOnce() -> NlseResult<T> + Send,
{
    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            pool.install(f)
        },
        None => f(),
    }
}

/// Validate a 1D configuration and run it to completion.
pub fn run_1d(config: &Config) -> NlseResult<Outcome<nd::Ix1>> {
    config.validate()?;
    let grid = Grid1::from_config(config)?;
    with_pool(config.threads, || run_grid(grid, config))
}

/// Validate a 2D configuration and run it to completion.
pub fn run_2d(config: &Config) -> NlseResult<Outcome<nd::Ix2>> {
    config.validate()?;
    let grid = Grid2::from_config(config)?;
    with_pool(config.threads, || run_grid(grid, config))
}

/// Validate a configuration of either dimension and run it to completion.
pub fn run(config: &Config) -> NlseResult<RunOutcome> {
    match config.dim() {
        1 => run_1d(config).map(RunOutcome::D1),
        _ => run_2d(config).map(RunOutcome::D2),
    }
}
