#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for integration of the cubic
//! and cubic-quintic nonlinear Schrödinger equation (NLSE)
//! ```text
//!   ∂ψ     ∂²ψ
//! i -- + ----- + (|ψ|² - s |ψ|⁴) ψ = 0,  s ∊ {0, 1}
//!   ∂t    ∂x²
//! ```
//! in one and two spatial dimensions via symmetric (Strang) operator splitting.
//!
//! Provides implementations for the following numerical routines:
//! - Linear (dispersive) step:
//!     - Real-space second-order central difference (FDTD) with fixed
//!       boundaries
//!     - Pseudo-spectral exact phase step with periodic boundaries
//! - Nonlinear step:
//!     - Exact pointwise phase rotation for cubic and cubic-quintic intensity
//!       terms
//!
//! All per-point kernels are data-parallel over the grid via [`rayon`].
//!
//! ```
//! use nlse::config::{ AxisConfig, Config, Scheme };
//!
//! let mut config = Config::new_1d(AxisConfig::new(256, 10.0), 0.5, 500);
//! config.scheme = Scheme::Spectral;
//! let outcome = nlse::timedep::run_1d(&config).unwrap();
//! let drift
//!     = (outcome.final_norm() - outcome.initial_norm()).abs()
//!     / outcome.initial_norm();
//! assert!(drift < 1e-9);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod linear;
pub mod nonlinear;
pub mod timedep;
pub mod transform;
pub mod utils;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;

/// A complex wave field sampled over a grid of dimension `D`.
pub type Field<D> = ndarray::Array<num_complex::Complex64, D>;
