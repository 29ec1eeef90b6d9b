//! Run configuration.
//!
//! A [`Config`] is fixed for the duration of a run and is read-only after
//! validation. It derives [`serde`] traits so that drivers can load it from a
//! file, e.g.
//! ```
//! use nlse::config::{ Config, Nonlinearity, Profile, Scheme };
//!
//! let config: Config = toml::from_str(r#"
//!     max_time = 10.0
//!     steps = 100000
//!     scheme = "spectral"
//!     nonlinearity = "cubic-quintic"
//!
//!     [x]
//!     nodes = 1000
//!     half_width = 10.0
//!
//!     [profile]
//!     kind = "gaussian"
//!     amplitude = 1.5
//!     width = 0.8
//! "#).unwrap();
//! assert_eq!(config.scheme, Scheme::Spectral);
//! assert_eq!(config.nonlinearity, Nonlinearity::CubicQuintic);
//! assert_eq!(config.profile, Profile::Gaussian { amplitude: 1.5, width: 0.8 });
//! assert_eq!(config.dim(), 1);
//! ```

use serde::{ Deserialize, Serialize };
use crate::error::{ NlseError, NlseResult };

/// Node count and domain half-width for a single spatial axis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Number of grid nodes.
    pub nodes: usize,
    /// The axis spans `[-half_width, half_width)`.
    pub half_width: f64,
}

impl AxisConfig {
    pub fn new(nodes: usize, half_width: f64) -> Self {
        Self { nodes, half_width }
    }

    fn validate(&self) -> NlseResult<()> {
        NlseError::check_nodes(self.nodes)?;
        NlseError::check_half_width(self.half_width)?;
        Ok(())
    }
}

/// Order of the intensity-dependent term.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nonlinearity {
    /// `|ψ|²`
    #[default]
    Cubic,
    /// `|ψ|² - |ψ|⁴`
    CubicQuintic,
    /// No intensity term; the field disperses freely.
    Linear,
}

impl Nonlinearity {
    /// Phase rate at a point of intensity `a2 = |ψ|²`.
    #[inline]
    pub fn rate(self, a2: f64) -> f64 {
        match self {
            Self::Cubic => a2,
            Self::CubicQuintic => a2 - a2 * a2,
            Self::Linear => 0.0,
        }
    }
}

/// Discretization of the linear operator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// Real-space central difference with fixed boundary nodes.
    #[default]
    Fdtd,
    /// Exact phase step in frequency space with periodic boundaries.
    Spectral,
}

/// Closed-form initial field profile, evaluated at radius `r` from the origin.
///
/// The imaginary part of every profile is zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Profile {
    /// Fundamental bright soliton `√2 sech(r)`.
    #[default]
    Soliton,
    /// `amplitude * exp(-r² / (2 width²))`.
    Gaussian { amplitude: f64, width: f64 },
}

impl Profile {
    /// Evaluate the profile at radius `r`.
    pub fn eval(&self, r: f64) -> f64 {
        match *self {
            Self::Soliton => std::f64::consts::SQRT_2 / r.cosh(),
            Self::Gaussian { amplitude, width }
                => amplitude * (-r.powi(2) / (2.0 * width.powi(2))).exp(),
        }
    }

    fn validate(&self) -> NlseResult<()> {
        match *self {
            Self::Soliton => Ok(()),
            Self::Gaussian { width, .. } => NlseError::check_width(width),
        }
    }
}

fn default_sample_every() -> usize { 1 }

/// Full description of a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Total simulated time.
    pub max_time: f64,
    /// Number of (full) time steps.
    pub steps: usize,
    #[serde(default)]
    pub nonlinearity: Nonlinearity,
    #[serde(default)]
    pub scheme: Scheme,
    /// Record the peak field magnitude every this many steps; 0 disables
    /// recording.
    #[serde(default = "default_sample_every")]
    pub sample_every: usize,
    /// Keep a copy of the field every this many steps; 0 disables.
    #[serde(default)]
    pub snapshot_every: usize,
    /// Size of a dedicated worker pool; the global pool is used if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// First spatial axis.
    pub x: AxisConfig,
    /// Second spatial axis; present only for 2D runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisConfig>,
    #[serde(default)]
    pub profile: Profile,
}

impl Config {
    /// Create a 1D configuration with a cubic nonlinearity, soliton profile,
    /// and FDTD scheme.
    pub fn new_1d(x: AxisConfig, max_time: f64, steps: usize) -> Self {
        Self {
            x,
            y: None,
            max_time,
            steps,
            nonlinearity: Nonlinearity::default(),
            scheme: Scheme::default(),
            profile: Profile::default(),
            sample_every: default_sample_every(),
            snapshot_every: 0,
            threads: None,
        }
    }

    /// Like [`Self::new_1d`], but for a 2D grid.
    pub fn new_2d(x: AxisConfig, y: AxisConfig, max_time: f64, steps: usize)
        -> Self
    {
        Self { y: Some(y), ..Self::new_1d(x, max_time, steps) }
    }

    /// Number of spatial dimensions.
    pub fn dim(&self) -> usize { if self.y.is_some() { 2 } else { 1 } }

    /// Time step size.
    pub fn dt(&self) -> f64 { self.max_time / self.steps as f64 }

    /// Check all invariants of the configuration.
    pub fn validate(&self) -> NlseResult<()> {
        self.x.validate()?;
        if let Some(y) = self.y.as_ref() { y.validate()?; }
        NlseError::check_max_time(self.max_time)?;
        NlseError::check_steps(self.steps)?;
        self.profile.validate()?;
        Ok(())
    }

    pub(crate) fn check_dim(&self, expected: usize) -> NlseResult<()> {
        let got = self.dim();
        (got == expected).then_some(())
            .ok_or(NlseError::Dimension { expected, got })
    }
}
