//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Splitting](#splitting)
//! - [Spectral linear step](#spectral-linear-step)
//! - [Finite-difference linear step](#finite-difference-linear-step)
//! - [Boundaries](#boundaries)
//! - [Solitons](#solitons)
//!
//! # Background
//! The nonlinear Schrödinger equation (NLSE) describes the slowly varying
//! envelope of a wave packet in a weakly nonlinear, dispersive medium, e.g. an
//! optical pulse in a Kerr fiber or the condensate wavefunction of a dilute
//! Bose gas. In dimensionless units, the variant handled by this crate reads
//! ```text
//!   ∂ψ
//! i -- + ∇²ψ + (|ψ|² - s |ψ|⁴) ψ = 0
//!   ∂t
//! ```
//! where *s* = 0 gives the focusing cubic equation and *s* = 1 adds a
//! defocusing quintic term that saturates the nonlinearity at high intensity.
//! The equation conserves the total probability
//! ```text
//! P = ∫ |ψ|² dV
//! ```
//! which is the primary numerical health check for a run; see
//! [`Outcome::final_norm`][crate::timedep::Outcome::final_norm].
//!
//! # Splitting
//! Rewriting the equation as
//! ```text
//! ∂ψ
//! -- = (L + N) ψ
//! ∂t
//!
//! L = i ∇²
//! N = i (|ψ|² - s |ψ|⁴)
//! ```
//! the formal solution over a step *dt* is exp((*L* + *N*) *dt*) ψ(*t*). The
//! two operators don't commute, so by the Baker-Campbell-Hausdorff formula,
//! ```text
//!               L dt  N dt  [L, N] dt²/2  O(dt³)
//! ψ(t + dt) = [e     e     e             e      ] ψ(t)
//! ```
//! and simply discarding the commutator leaves a *O*(*dt*²) error per step.
//! Sandwiching the nonlinear step between two half-sized linear steps cancels
//! the leading commutator term and reduces the local error to *O*(*dt*³):
//! ```text
//!               L dt/2  N dt  L dt/2
//! ψ(t + dt) = [e       e     e      ] ψ(t) + O(dt³)
//! ```
//! The nonlinear factor is easy to apply exactly. Under *N* alone, |ψ| is
//! constant in time at every point, so the solution is a pointwise phase
//! rotation,
//! ```text
//!  N dt         i (|ψ(x)|² - s |ψ(x)|⁴) dt
//! e     ψ(x) = e                           ψ(x)
//! ```
//! See [`nonlinear`][crate::nonlinear].
//!
//! # Spectral linear step
//! The Laplacian is diagonal in frequency space, ∇² → -*k*², so the linear
//! factor is also a pointwise phase, but applied to the Fourier transform of
//! the field:
//! ```text
//!  L dt            -i k² dt
//! e     ψ = F⁻¹[e          F[ψ](k)]
//! ```
//! This step is exact up to aliasing and round-off, and is unitary, so the
//! total probability is conserved to machine precision over arbitrarily long
//! runs. Wavenumbers are laid out in FFT bin order,
//! ```text
//! k[i] = i dk,        i ≤ N/2
//! k[i] = (i - N) dk,  i > N/2
//!
//! dk = 2π / (N dx)
//! ```
//! and in 2D, *k*² = *k*<sub>*x*</sub>² + *k*<sub>*y*</sub>². Taking a full step
//! *dt* looks like this:
//! ```text
//!        ψ(t, x)
//!           |
//!           '--> FFT ---.
//!                       |
//!                       V
//!                  -i k² dt/2
//!                 e
//!                       |
//!           .-- iFFT <--'
//!           |
//!           V
//!  i (|ψ|² - s |ψ|⁴) dt
//! e
//!           |
//!           '--> FFT ---.
//!                       |
//!                       V
//!                  -i k² dt/2
//!                 e
//!                       |
//!           .-- iFFT <--'
//!           |
//!           V
//!     ψ(t + dt, x)
//! ```
//! See [`linear::Spectral`][crate::linear::Spectral].
//!
//! # Finite-difference linear step
//! Alternatively, the Laplacian can be replaced by its second-order central
//! difference, here in 2D:
//! ```text
//!            ψ[i + 1, j] - 2 ψ[i, j] + ψ[i - 1, j]
//! ∇²ψ[i, j] ≈ -------------------------------------
//!                             dx²
//!
//!              ψ[i, j + 1] - 2 ψ[i, j] + ψ[i, j - 1]
//!            + -------------------------------------
//!                             dy²
//! ```
//! and the linear equation advanced with a single forward-Euler step,
//! ```text
//! ψ'[p] = ψ[p] + i dt ∇²ψ[p]
//! ```
//! Every node is updated from the same snapshot of the field taken before the
//! step. The scheme has a *O*(*dt*) truncation error in time and a *O*(*dx*²)
//! error in space, so within the splitting above it is only first-order
//! accurate in *dt* overall.
//!
//! The discrete Laplacian has real eigenvalues -*λ* ∊ [-*λ*<sub>max</sub>, 0]
//! with *λ*<sub>max</sub> = Σ 4 / *dx*² over all axes. A mode with eigenvalue
//! -*λ* is multiplied by 1 - *i* *λ* *dt* on each step, whose magnitude
//! ```text
//! |1 - i λ dt| = √(1 + λ² dt²) > 1
//! ```
//! always exceeds unity: the forward step is *unconditionally* unstable for a
//! purely imaginary operator, and any run will eventually amplify round-off in
//! the stiffest modes. The growth is slow if *λ*<sub>max</sub> *dt* ≪ 1, which
//! requires *dt* ≪ *dx*²/4 in 1D. [`Fdtd::new`][crate::linear::Fdtd::new]
//! logs a warning when the accumulated growth over a run is expected to be
//! large, and runs are aborted with
//! [`NlseError::Diverged`][crate::error::NlseError::Diverged] if the field
//! ever becomes non-finite. For long runs, prefer the spectral step.
//!
//! # Boundaries
//! The finite-difference step can't update the outermost nodes because they
//! lack neighbors, so these are held fixed at their initial values for the
//! whole run (a Dirichlet condition). To keep the two halves of a step
//! consistent, the nonlinear step skips the same nodes.
//!
//! The spectral step implicitly treats the field as periodic over the domain,
//! and every node is updated by both halves. Fields that don't decay to zero
//! at the domain edges will therefore interact with their periodic images.
//!
//! # Solitons
//! The cubic equation in 1D admits the stationary bright soliton
//! ```text
//! ψ(x, t) = √2 sech(x) e^(i t)
//! ```
//! whose magnitude profile is constant in time. It is the default initial
//! condition, and the peak magnitude max |ψ| recorded by a
//! [`Sampler`][crate::diagnostics::Sampler] should stay close to √2 for an
//! accurate run. In 2D, the same radial profile √2 sech(*r*) is not
//! stationary; under the cubic term it is subject to collapse, which the
//! quintic term arrests.
