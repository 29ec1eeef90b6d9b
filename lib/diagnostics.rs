//! Peak-magnitude tracking.
//!
//! The [`Sampler`] reduces the whole field to its maximum magnitude
//! `max_p |ψ[p]|` at a fixed cadence and appends it to a [`Trace`]. A
//! non-finite peak means the trajectory has been corrupted, which is reported
//! as [`NlseError::Diverged`].

use ndarray as nd;
use crate::{
    Field,
    error::{ NlseError, NlseResult },
    utils::peak,
};

/// Append-only record of peak field magnitudes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    steps: Vec<usize>,
    times: Vec<f64>,
    peaks: Vec<f64>,
}

impl Trace {
    pub fn new() -> Self { Self::default() }

    fn push(&mut self, step: usize, time: f64, peak: f64) {
        self.steps.push(step);
        self.times.push(time);
        self.peaks.push(peak);
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize { self.peaks.len() }

    pub fn is_empty(&self) -> bool { self.peaks.is_empty() }

    /// Step numbers at which samples were taken.
    pub fn steps(&self) -> &[usize] { &self.steps }

    /// Simulation times at which samples were taken.
    pub fn times(&self) -> &[f64] { &self.times }

    /// Recorded peak magnitudes.
    pub fn peaks(&self) -> &[f64] { &self.peaks }

    /// Iterate over `(step, time, peak)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.steps.iter().zip(&self.times).zip(&self.peaks)
            .map(|((&s, &t), &p)| (s, t, p))
    }
}

/// Records the peak magnitude of a field every `every` steps.
#[derive(Clone, Debug)]
pub struct Sampler {
    every: usize,
    trace: Trace,
}

impl Sampler {
    /// Create a new sampler; `every = 0` disables sampling.
    pub fn new(every: usize) -> Self { Self { every, trace: Trace::new() } }

    /// Returns `true` if a sample is due at step `step`.
    pub fn is_due(&self, step: usize) -> bool {
        self.every != 0 && step % self.every == 0
    }

    /// Sample `psi` if due, returning the recorded peak.
    pub fn sample<D>(&mut self, step: usize, time: f64, psi: &Field<D>)
        -> NlseResult<Option<f64>>
    where D: nd::Dimension
    {
        if !self.is_due(step) { return Ok(None); }
        let p = peak(psi);
        if !p.is_finite() { return Err(NlseError::Diverged { step, time }); }
        self.trace.push(step, time, p);
        Ok(Some(p))
    }

    pub fn trace(&self) -> &Trace { &self.trace }

    pub fn into_trace(self) -> Trace { self.trace }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64 as C64;
    use super::*;

    #[test]
    fn samples_at_cadence() {
        let psi: Field<nd::Ix2>
            = nd::Array2::from_shape_fn((3, 4), |(i, j)| C64::new(i as f64, -(j as f64)));
        let mut sampler = Sampler::new(2);
        for step in 1..=5 {
            sampler.sample(step, 0.1 * step as f64, &psi).unwrap();
        }
        let trace = sampler.into_trace();
        assert_eq!(trace.steps(), &[2, 4]);
        assert_eq!(trace.len(), 2);
        assert!(trace.peaks().iter().all(|&p| (p - 13.0_f64.sqrt()).abs() < 1e-15));
        let collected: Vec<(usize, f64, f64)> = trace.iter().collect();
        assert_eq!(collected[1].0, 4);
    }

    #[test]
    fn disabled_sampler_records_nothing() {
        let psi: Field<nd::Ix1> = nd::Array1::from_elem(4, C64::new(f64::NAN, 0.0));
        let mut sampler = Sampler::new(0);
        assert_eq!(sampler.sample(1, 0.1, &psi).unwrap(), None);
        assert!(sampler.trace().is_empty());
    }

    #[test]
    fn non_finite_peak_is_divergence() {
        let mut psi: Field<nd::Ix1> = nd::Array1::zeros(8);
        psi[3] = C64::new(f64::INFINITY, 0.0);
        let mut sampler = Sampler::new(1);
        assert!(matches!(
            sampler.sample(7, 0.7, &psi),
            Err(NlseError::Diverged { step: 7, .. }),
        ));
    }
}
