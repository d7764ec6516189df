//! Error types for filter design

use crate::complex::Complex;
use crate::roots::RootId;
use thiserror::Error;

/// Result type for filter design operations
pub type Result<T> = std::result::Result<T, DesignError>;

/// Errors that can occur while designing or editing a filter.
///
/// Arithmetic edge cases (division by zero, a normalization frequency sitting on
/// a zero of the response) are not errors: they propagate as non-finite values.
/// `DegenerateNormalization` and `UnstableConfiguration` are only ever produced
/// by the advisory [`FilterEngine::check`](crate::dsp::engine::FilterEngine::check).
#[derive(Error, Debug, Clone)]
pub enum DesignError {
    /// A complex value was built from a component that is not a real number
    #[error("invalid operand: ({real}, {imaginary}) is not a finite complex number")]
    InvalidOperand { real: f64, imaginary: f64 },

    /// The response magnitude at the normalization frequency is zero
    #[error("degenerate normalization at frequency {frequency}: coefficients are not finite")]
    DegenerateNormalization { frequency: f64 },

    /// A pole lies on or outside the unit circle
    #[error("unstable configuration: pole {pole} has modulus {modulus}")]
    UnstableConfiguration { pole: Complex, modulus: f64 },

    /// Filter order without tabulated prototype roots
    #[error("unsupported order {order}, supported orders are 1 through {max}")]
    UnsupportedOrder { order: usize, max: usize },

    /// Preset parameter outside its domain
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Denominator whose leading coefficient is not 1
    #[error("denominator is not monic, leading coefficient is {0}")]
    NonMonicDenominator(Complex),

    /// Handle that does not refer to a root in the set
    #[error("no root with id {0:?}")]
    UnknownRoot(RootId),
}
