//! Forward and inverse discrete Fourier transforms over fields of any
//! dimension.
//!
//! Multidimensional transforms are performed as successive 1D transforms along
//! each axis, with lanes along a single axis processed in parallel. The
//! inverse transform renormalizes by the total number of samples, so that a
//! forward transform followed by an inverse transform is the identity (up to
//! floating-point error).
//!
//! ```
//! use ndarray as nd;
//! use num_complex::Complex64 as C64;
//! use nlse::transform::Transform;
//!
//! let mut psi: nd::Array2<C64>
//!     = nd::Array2::from_shape_fn((6, 5), |(i, j)| C64::new(i as f64, j as f64));
//! let psi0 = psi.clone();
//! let fft = Transform::new(psi.raw_dim()).unwrap();
//! fft.forward(&mut psi).unwrap();
//! assert!((psi[[0, 0]] - C64::new(15.0 * 5.0, 10.0 * 6.0)).norm() < 1e-12);
//! fft.inverse(&mut psi).unwrap();
//! assert!(psi.iter().zip(&psi0).all(|(a, b)| (a - b).norm() < 1e-12));
//! ```

use std::sync::Arc;
use ndarray::{ self as nd, parallel::prelude::* };
use num_complex::Complex64 as C64;
use rustfft::{ Fft, FftPlanner };
use crate::{
    Field,
    error::{ ShapeError, TransformError },
};

pub type TransformResult<T> = Result<T, TransformError>;

/// Pre-planned transform pair for fields of a fixed shape.
#[derive(Clone)]
pub struct Transform<D>
where D: nd::Dimension
{
    shape: D,
    forward: Vec<Arc<dyn Fft<f64>>>,
    inverse: Vec<Arc<dyn Fft<f64>>>,
}

impl<D> std::fmt::Debug for Transform<D>
where D: nd::Dimension
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("shape", &self.shape.slice())
            .finish()
    }
}

// apply a 1D plan along every lane of `data` parallel to `axis`; scratch and
// staging buffers are allocated per rayon job, not per lane
fn process_lanes<D>(plan: &Arc<dyn Fft<f64>>, data: &mut Field<D>, axis: nd::Axis)
where D: nd::Dimension
{
    let n = data.len_of(axis);
    let scratch_len = plan.get_inplace_scratch_len();
    nd::Zip::from(data.lanes_mut(axis))
        .into_par_iter()
        .for_each_init(
            || (vec![C64::new(0.0, 0.0); scratch_len], Vec::<C64>::with_capacity(n)),
            |(scratch, buf), (mut lane,)| {
                if let Some(lane_buf) = lane.as_slice_mut() {
                    plan.process_with_scratch(lane_buf, scratch);
                } else {
                    buf.clear();
                    buf.extend(lane.iter().copied());
                    plan.process_with_scratch(buf, scratch);
                    lane.iter_mut().zip(buf.iter())
                        .for_each(|(lk, bk)| { *lk = *bk; });
                }
            },
        );
}

impl<D> Transform<D>
where D: nd::Dimension
{
    /// Plan forward and inverse transforms for fields of shape `shape`.
    ///
    /// Fails if any axis has zero length.
    pub fn new(shape: D) -> TransformResult<Self> {
        let mut planner = FftPlanner::new();
        let mut forward = Vec::with_capacity(shape.ndim());
        let mut inverse = Vec::with_capacity(shape.ndim());
        for (k, &n) in shape.slice().iter().enumerate() {
            if n == 0 { return Err(TransformError::EmptyAxis(k)); }
            forward.push(planner.plan_fft_forward(n));
            inverse.push(planner.plan_fft_inverse(n));
        }
        Ok(Self { shape, forward, inverse })
    }

    /// Shape of fields this transform was planned for.
    pub fn shape(&self) -> &[usize] { self.shape.slice() }

    /// Total number of samples in a single transform.
    pub fn len(&self) -> usize { self.shape.size() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn check(&self, data: &Field<D>) -> TransformResult<()> {
        ShapeError::check(self.shape.slice(), data.shape())?;
        Ok(())
    }

    /// Perform the unnormalized forward transform in place.
    pub fn forward(&self, data: &mut Field<D>) -> TransformResult<()> {
        self.check(data)?;
        self.forward.iter().enumerate()
            .for_each(|(k, plan)| process_lanes(plan, data, nd::Axis(k)));
        Ok(())
    }

    /// Perform the inverse transform in place, dividing every sample by the
    /// total sample count afterward.
    pub fn inverse(&self, data: &mut Field<D>) -> TransformResult<()> {
        self.check(data)?;
        self.inverse.iter().enumerate()
            .for_each(|(k, plan)| process_lanes(plan, data, nd::Axis(k)));
        let n = self.len() as f64;
        data.par_mapv_inplace(|zk| zk / n);
        Ok(())
    }
}
