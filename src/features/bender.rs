//! The saturating compressor ("bender").
//!
//! ```text
//! bender(x, center, span) = 1 / (1 + exp(-3.3 · (x - center) / span))
//! ```
//!
//! A logistic curve that maps every raw feature onto `(0, 1)` so the
//! classifier's Euclidean distance weighs all three features on the same
//! scale. `center` lands on 0.5; `x = center ± span/2` lands on roughly
//! 0.16 / 0.84. Infinite inputs saturate to exactly 0 or 1.

/// Logistic gain applied to `(x - center) / span`.
pub const STEEPNESS: f64 = 3.3;

/// Compress `x` into `(0, 1)`.
#[inline]
pub fn bender(x: f64, center: f64, span: f64) -> f64 {
    1.0 / (1.0 + (-STEEPNESS * (x - center) / span).exp())
}

/// A `(center, span)` pair for [`bender`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compression {
    pub center: f64,
    pub span: f64,
}

impl Compression {
    pub const fn new(center: f64, span: f64) -> Self {
        Self { center, span }
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        bender(x, self.center, self.span)
    }
}

// ── Tuned constants ───────────────────────────────────────────────────────────

/// Per-channel peak energy, raw or first-differenced.
pub const PEAK: Compression = Compression::new(4.8, 3.0);
/// Cross-channel deviation of the first-differenced peak energies.
pub const DIFF_DEVIATION: Compression = Compression::new(0.055, 0.1);
/// 10–20 Hz quadrature energy.
pub const TEN_TWENTY: Compression = Compression::new(3.0, 8.0);
/// 10–20 Hz upslope quadrature energy.
pub const TEN_TWENTY_UPSLOPE: Compression = Compression::new(3.0, 6.0);
/// 10–20 Hz downslope quadrature energy.
pub const TEN_TWENTY_DOWNSLOPE: Compression = Compression::new(4.0, 4.0);
/// 10–30 Hz line length.
pub const TEN_THIRTY_LINE_LENGTH: Compression = Compression::new(-3.5, 3.0);
/// 20–30 Hz line length.
pub const TWENTY_THIRTY_LINE_LENGTH: Compression = Compression::new(-2.7, 3.0);
/// 10–20 Hz line length of the first-differenced signal.
pub const DIFF_TEN_TWENTY_LINE_LENGTH: Compression = Compression::new(-2.7, 3.0);
