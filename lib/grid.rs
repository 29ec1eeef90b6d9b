//! Spatial and temporal grid descriptors, initial conditions, and the
//! dimension-specific parts of the real-space stencil.
//!
//! Coordinates along an axis of *N* nodes with step *dx* are
//! ```text
//! x[i] = (i - N/2) dx,  i ∊ {0, ..., N - 1}
//! ```
//! with `N/2` taken as an integer quotient, so the origin always lies exactly
//! on a node.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes *x*.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Field,
    config::{ AxisConfig, Config, Profile },
    error::{ NlseError, NlseResult },
    utils::wavenumbers,
};

/// A single uniformly sampled spatial axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis {
    nodes: usize,
    half_width: f64,
    step: f64,
}

impl Axis {
    /// Create a new axis of `nodes` points spanning `[-half_width,
    /// half_width)`, so that the step size is `2 * half_width / nodes`.
    pub fn new(nodes: usize, half_width: f64) -> NlseResult<Self> {
        NlseError::check_nodes(nodes)?;
        NlseError::check_half_width(half_width)?;
        let step = 2.0 * half_width / nodes as f64;
        Ok(Self { nodes, half_width, step })
    }

    /// Number of nodes.
    pub fn nodes(&self) -> usize { self.nodes }

    /// Domain half-width.
    pub fn half_width(&self) -> f64 { self.half_width }

    /// Node spacing.
    pub fn step(&self) -> f64 { self.step }

    /// Generate the coordinate array.
    pub fn coords(&self) -> nd::Array1<f64> {
        let c = (self.nodes / 2) as f64;
        (0..self.nodes)
            .map(|i| (i as f64 - c) * self.step)
            .collect()
    }

    /// Generate the angular wavenumber array in FFT bin order.
    pub fn wavenumbers(&self) -> nd::Array1<f64> {
        wavenumbers(self.nodes, self.step)
    }
}

impl TryFrom<AxisConfig> for Axis {
    type Error = NlseError;

    fn try_from(config: AxisConfig) -> NlseResult<Self> {
        Self::new(config.nodes, config.half_width)
    }
}

/// Total simulated time, divided into a fixed number of equal steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Clock {
    max_time: f64,
    steps: usize,
    dt: f64,
}

impl Clock {
    pub fn new(max_time: f64, steps: usize) -> NlseResult<Self> {
        NlseError::check_max_time(max_time)?;
        NlseError::check_steps(steps)?;
        Ok(Self { max_time, steps, dt: max_time / steps as f64 })
    }

    /// Total simulated time.
    pub fn max_time(&self) -> f64 { self.max_time }

    /// Number of steps.
    pub fn steps(&self) -> usize { self.steps }

    /// Step size.
    pub fn dt(&self) -> f64 { self.dt }
}

/// Common interface to 1D and 2D grids.
///
/// A grid is immutable once created; everything here is derived from its node
/// counts and step sizes.
pub trait Grid: Clone + Send + Sync {
    /// Array dimension of fields living on this grid.
    type Dim: nd::Dimension;

    /// All spatial axes, in array-axis order.
    fn axes(&self) -> &[Axis];

    /// The time axis.
    fn clock(&self) -> Clock;

    /// Shape of fields living on this grid.
    fn shape(&self) -> Self::Dim;

    /// Distance of every node from the origin.
    fn radii(&self) -> nd::Array<f64, Self::Dim>;

    /// Sum of squared angular wavenumbers over all axes at every frequency-space
    /// node, in FFT bin order.
    fn wavenumbers_sq(&self) -> nd::Array<f64, Self::Dim>;

    /// Overwrite every interior node of `psi` with one forward step of size
    /// `dt` of the linear operator `i ∇²`, computed entirely from `prev`.
    ///
    /// Boundary nodes of `psi` are left untouched. `prev` and `psi` must both
    /// have this grid's shape.
    fn stencil(&self, prev: &Field<Self::Dim>, psi: &mut Field<Self::Dim>, dt: f64);

    /// Number of spatial dimensions.
    fn ndim(&self) -> usize { self.axes().len() }

    /// Total number of nodes.
    fn len(&self) -> usize {
        self.axes().iter().map(|ax| ax.nodes()).product()
    }

    /// Area (or length) element associated with a single node.
    fn cell_volume(&self) -> f64 {
        self.axes().iter().map(|ax| ax.step()).product()
    }

    /// Largest eigenvalue magnitude of the discrete Laplacian, `Σ 4 / dx²`.
    fn stiffness(&self) -> f64 {
        self.axes().iter().map(|ax| 4.0 / ax.step().powi(2)).sum()
    }

    /// Sample an initial-condition profile over the grid.
    fn initial(&self, profile: &Profile) -> Field<Self::Dim> {
        self.radii().mapv(|r| C64::from(profile.eval(r)))
    }
}

/// One-dimensional grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid1 {
    axes: [Axis; 1],
    clock: Clock,
}

impl Grid1 {
    pub fn new(x: Axis, clock: Clock) -> Self {
        Self { axes: [x], clock }
    }

    /// Build from a validated 1D configuration.
    pub fn from_config(config: &Config) -> NlseResult<Self> {
        config.check_dim(1)?;
        let x = Axis::try_from(config.x)?;
        let clock = Clock::new(config.max_time, config.steps)?;
        Ok(Self::new(x, clock))
    }

    pub fn x(&self) -> &Axis { &self.axes[0] }
}

impl Grid for Grid1 {
    type Dim = nd::Ix1;

    fn axes(&self) -> &[Axis] { &self.axes }

    fn clock(&self) -> Clock { self.clock }

    fn shape(&self) -> nd::Ix1 { nd::Ix1(self.x().nodes()) }

    fn radii(&self) -> nd::Array1<f64> { self.x().coords().mapv(f64::abs) }

    fn wavenumbers_sq(&self) -> nd::Array1<f64> {
        self.x().wavenumbers().mapv(|k| k * k)
    }

    fn stencil(&self, prev: &Field<nd::Ix1>, psi: &mut Field<nd::Ix1>, dt: f64) {
        let n = self.x().nodes();
        let c = C64::i() * dt / self.x().step().powi(2);
        nd::Zip::indexed(psi.slice_mut(nd::s![1..n - 1]))
            .par_for_each(|k, psik| {
                let i = k + 1;
                *psik
                    = prev[i] + c * (prev[i + 1] - 2.0 * prev[i] + prev[i - 1]);
            });
    }
}

/// Two-dimensional grid, with fields indexed as `[[i, j]]` for `(x[i], y[j])`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid2 {
    axes: [Axis; 2],
    clock: Clock,
}

impl Grid2 {
    pub fn new(x: Axis, y: Axis, clock: Clock) -> Self {
        Self { axes: [x, y], clock }
    }

    /// Build from a validated 2D configuration.
    pub fn from_config(config: &Config) -> NlseResult<Self> {
        config.check_dim(2)?;
        let x = Axis::try_from(config.x)?;
        let y = config.y
            .ok_or(NlseError::Dimension { expected: 2, got: 1 })
            .and_then(Axis::try_from)?;
        let clock = Clock::new(config.max_time, config.steps)?;
        Ok(Self::new(x, y, clock))
    }

    pub fn x(&self) -> &Axis { &self.axes[0] }

    pub fn y(&self) -> &Axis { &self.axes[1] }
}

impl Grid for Grid2 {
    type Dim = nd::Ix2;

    fn axes(&self) -> &[Axis] { &self.axes }

    fn clock(&self) -> Clock { self.clock }

    fn shape(&self) -> nd::Ix2 { nd::Ix2(self.x().nodes(), self.y().nodes()) }

    fn radii(&self) -> nd::Array2<f64> {
        let x = self.x().coords();
        let y = self.y().coords();
        nd::Array2::from_shape_fn(self.shape(), |(i, j)| x[i].hypot(y[j]))
    }

    fn wavenumbers_sq(&self) -> nd::Array2<f64> {
        let kx = self.x().wavenumbers();
        let ky = self.y().wavenumbers();
        nd::Array2::from_shape_fn(
            self.shape(),
            |(i, j)| kx[i].powi(2) + ky[j].powi(2),
        )
    }

    fn stencil(&self, prev: &Field<nd::Ix2>, psi: &mut Field<nd::Ix2>, dt: f64) {
        let (nx, ny) = (self.x().nodes(), self.y().nodes());
        let cx = C64::i() * dt / self.x().step().powi(2);
        let cy = C64::i() * dt / self.y().step().powi(2);
        nd::Zip::indexed(psi.slice_mut(nd::s![1..nx - 1, 1..ny - 1]))
            .par_for_each(|(a, b), psiij| {
                let (i, j) = (a + 1, b + 1);
                let p = prev[[i, j]];
                *psiij
                    = p
                    + cx * (prev[[i + 1, j]] - 2.0 * p + prev[[i - 1, j]])
                    + cy * (prev[[i, j + 1]] - 2.0 * p + prev[[i, j - 1]]);
            });
    }
}
