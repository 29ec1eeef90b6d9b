//! Exact pointwise propagator for the intensity-dependent part of the NLSE,
//! ```text
//! ∂ψ
//! -- = i (|ψ|² - s |ψ|⁴) ψ
//! ∂t
//! ```
//! Since |ψ| is conserved by this equation, its solution over a step `dt` is a
//! pure phase rotation by `θ = (|ψ|² - s |ψ|⁴) dt` at every node, with no
//! coupling between nodes.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Field,
    config::Nonlinearity,
    linear::Boundary,
};

/// Applies the nonlinear phase rotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Nonlinear {
    order: Nonlinearity,
}

impl Nonlinear {
    pub fn new(order: Nonlinearity) -> Self { Self { order } }

    pub fn order(&self) -> Nonlinearity { self.order }

    /// Advance `psi` by `dt` in place.
    ///
    /// Under [`Boundary::Fixed`], the outermost nodes along every axis are left
    /// untouched; under [`Boundary::Periodic`], every node is rotated.
    pub fn advance<D>(&self, psi: &mut Field<D>, dt: f64, boundary: Boundary)
    where D: nd::Dimension
    {
        let order = self.order;
        if order == Nonlinearity::Linear { return; }
        let rotate = move |psik: &mut C64| {
            let theta = order.rate(psik.norm_sqr()) * dt;
            *psik *= C64::cis(theta);
        };
        match boundary {
            Boundary::Periodic => {
                psi.par_map_inplace(rotate);
            },
            Boundary::Fixed => {
                psi.slice_each_axis_mut(|ax| nd::Slice::from(1..ax.len - 1))
                    .par_map_inplace(rotate);
            },
        }
    }
}
