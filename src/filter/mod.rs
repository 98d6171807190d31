//! Quadrature kernel storage and application.
//!
//! - [`kernel`]: the per-band in-phase/quadrature coefficient pairs, loaded
//!   from constant files.
//! - [`apply`]: kernel window dot product and full linear convolution
//!   (time domain for short kernels, FFT otherwise).

pub mod apply;
pub mod kernel;

pub use apply::{convolve_full, dot, DIRECT_MAX_TAPS};
pub use kernel::{Band, FilterBank, FilterKernelPair};
