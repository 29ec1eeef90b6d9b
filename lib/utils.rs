//! Miscellaneous tools.

use std::f64::consts::TAU;
use ndarray::{ self as nd, parallel::prelude::* };
use num_complex::Complex64 as C64;
use crate::Arr1;

/// Generate the array of angular wavenumbers to accompany a FFT of `n` points
/// for sampling interval `dx`.
///
/// Bins are in standard FFT order: `k[i] = i dk` for `i ≤ n/2` and
/// `k[i] = (i - n) dk` above, with `dk = 2π / (n dx)`.
pub fn wavenumbers(n: usize, dx: f64) -> nd::Array1<f64> {
    let dk = TAU / (n as f64 * dx);
    (0..n)
        .map(|i| {
            if i <= n / 2 {
                i as f64 * dk
            } else {
                -((n - i) as f64) * dk
            }
        })
        .collect()
}

/// Return a copy of `x` with indices shifted to map super-Nyquist frequency
/// components to negative frequencies, i.e. so that the zero mode is centered.
pub fn fft_shift<S, A>(x: &Arr1<S>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (p, m) = x.view().split_at(nd::Axis(0), (n / 2 + 1).min(n));
    nd::concatenate!(nd::Axis(0), m, p)
}

// max that propagates NaN instead of discarding it
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// Maximum magnitude of a field, computed as a parallel reduction.
///
/// Returns NaN if any sample is NaN.
pub fn peak<S, D>(psi: &nd::ArrayBase<S, D>) -> f64
where
    S: nd::Data<Elem = C64>,
    D: nd::Dimension,
{
    psi.view().into_par_iter()
        .map(|z| z.norm())
        .reduce(|| 0.0, nan_max)
}

/// Total probability `Σ |ψ|² dV` of a field, where `dv` is the volume element
/// of a single node.
pub fn norm<S, D>(psi: &nd::ArrayBase<S, D>, dv: f64) -> f64
where
    S: nd::Data<Elem = C64>,
    D: nd::Dimension,
{
    psi.view().into_par_iter().map(|z| z.norm_sqr()).sum::<f64>() * dv
}
