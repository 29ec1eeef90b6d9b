//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Every error here is fatal to a run: there is no partial-result or retry
//! path, since a single corrupted grid point spreads to its neighbors within
//! one stencil step and to the whole field within one transform.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned when an operation requiring arrays of equal shape encounters arrays
/// with unequal shapes.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible shapes; expected {0:?} but got {1:?}")]
pub struct ShapeError(pub Vec<usize>, pub Vec<usize>);

impl ShapeError {
    pub(crate) fn check(expected: &[usize], got: &[usize]) -> Result<(), Self> {
        (expected == got).then_some(())
            .ok_or_else(|| Self(expected.to_vec(), got.to_vec()))
    }
}

/// Returned from the [transform engine][crate::transform].
#[derive(Debug, Error)]
pub enum TransformError {
    /// Returned when a transform is planned over an axis of zero length.
    #[error("cannot plan a transform over an empty axis (axis {0})")]
    EmptyAxis(usize),

    /// Returned when a transform is executed on a field whose shape differs
    /// from the one it was planned for.
    #[error("transform shape error: {0}")]
    Shape(#[from] ShapeError),
}

/// Returned from grid construction, propagators, and the time-step
/// orchestrator.
#[derive(Debug, Error)]
pub enum NlseError {
    /// Returned when an axis has fewer than 3 nodes.
    #[error("axes must have at least 3 nodes for the difference stencil; got {0}")]
    BadNodes(usize),

    /// Returned when a non-positive or non-finite domain half-width is
    /// encountered.
    #[error("domain half-widths must be positive and finite; got {0}")]
    BadHalfWidth(f64),

    /// Returned when a non-positive or non-finite total time is encountered.
    #[error("total simulated time must be positive and finite; got {0}")]
    BadMaxTime(f64),

    /// Returned when the temporal step count is zero.
    #[error("step count must be greater than 0; got {0}")]
    BadSteps(usize),

    /// Returned when a Gaussian profile is given a non-positive width.
    #[error("gaussian width must be positive and finite; got {0}")]
    BadWidth(f64),

    /// Returned when a configuration is handed to an entry point of the wrong
    /// dimension.
    #[error("configuration describes a {got}D grid, but a {expected}D run was requested")]
    Dimension { expected: usize, got: usize },

    /// Returned when the field's peak magnitude becomes non-finite.
    #[error("field diverged at step {step} (t = {time}); the trajectory is invalid")]
    Diverged { step: usize, time: f64 },

    /// Returned when the field handed to a propagator doesn't match its grid.
    #[error("field shape error: {0}")]
    Shape(#[from] ShapeError),

    /// [`TransformError`]
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Returned when a dedicated worker pool cannot be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl NlseError {
    pub(crate) fn check_nodes(nodes: usize) -> Result<(), Self> {
        (nodes >= 3).then_some(()).ok_or(Self::BadNodes(nodes))
    }

    pub(crate) fn check_half_width(half_width: f64) -> Result<(), Self> {
        (half_width > 0.0 && half_width.is_finite()).then_some(())
            .ok_or(Self::BadHalfWidth(half_width))
    }

    pub(crate) fn check_max_time(max_time: f64) -> Result<(), Self> {
        (max_time > 0.0 && max_time.is_finite()).then_some(())
            .ok_or(Self::BadMaxTime(max_time))
    }

    pub(crate) fn check_steps(steps: usize) -> Result<(), Self> {
        (steps != 0).then_some(()).ok_or(Self::BadSteps(steps))
    }

    pub(crate) fn check_width(width: f64) -> Result<(), Self> {
        (width > 0.0 && width.is_finite()).then_some(())
            .ok_or(Self::BadWidth(width))
    }
}

pub type NlseResult<T> = Result<T, NlseError>;
