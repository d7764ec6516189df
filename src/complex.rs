//! Complex arithmetic for pole/zero geometry.
//!
//! Arithmetic comes from [`num_complex::Complex64`]; this module adds the
//! tolerant comparisons and the few operations pole/zero editing needs on top.
//! Nothing here panics on degenerate input: dividing by zero or inverting zero
//! yields non-finite components, which then propagate through the design.

use crate::error::{DesignError, Result};
pub use num_complex::Complex64;

/// complex value used throughout filter design
pub type Complex = Complex64;

/// Tolerant comparisons and editing helpers for [`Complex`]. Equality is only
/// meaningful up to [`ComplexExt::EPSILON`], prefer [`ComplexExt::approx_eq`]
/// over `==`.
pub trait ComplexExt: Sized {
    /// tolerance used for equality and realness tests
    const EPSILON: f64 = 1e-10;

    const ZERO: Self;
    const ONE: Self;
    const I: Self;

    /// Checked constructor for values coming from outside the design code.
    /// Fails with [`DesignError::InvalidOperand`] if either component is NaN or
    /// infinite.
    fn try_new(re: f64, im: f64) -> Result<Self>;

    /// `|im| < EPSILON`
    fn is_real(&self) -> bool;

    /// principal `n`th root, `r^(1/n) ∠ (phi / n)`
    fn nth_root(self, n: usize) -> Self;

    /// Rescales in place so that the modulus becomes `x`, keeping the argument.
    fn scale_modulus_to(&mut self, x: f64);

    /// componentwise equality within [`ComplexExt::EPSILON`]
    fn approx_eq(&self, other: &Self) -> bool;

    /// Like [`ComplexExt::approx_eq`], but an absent operand is unequal to
    /// anything, including another absent operand.
    fn are_equal(lhs: Option<&Self>, rhs: Option<&Self>) -> bool {
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => lhs.approx_eq(rhs),
            _ => false,
        }
    }
}

impl ComplexExt for Complex64 {
    const ZERO: Self = Self::new(0.0, 0.0);
    const ONE: Self = Self::new(1.0, 0.0);
    const I: Self = Self::new(0.0, 1.0);

    fn try_new(re: f64, im: f64) -> Result<Self> {
        if re.is_finite() && im.is_finite() {
            Ok(Self::new(re, im))
        } else {
            Err(DesignError::InvalidOperand {
                real: re,
                imaginary: im,
            })
        }
    }

    fn is_real(&self) -> bool {
        self.im.abs() < Self::EPSILON
    }

    fn nth_root(self, n: usize) -> Self {
        let n = n as f64;
        Self::from_polar(self.norm().powf(n.recip()), self.arg() / n)
    }

    fn scale_modulus_to(&mut self, x: f64) {
        let scale_factor = x / self.norm();
        *self *= scale_factor;
    }

    fn approx_eq(&self, other: &Self) -> bool {
        (self.re - other.re).abs() < Self::EPSILON && (self.im - other.im).abs() < Self::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const SAMPLES: [Complex; 6] = [
        Complex::new(1.0, 0.0),
        Complex::new(0.3, -0.7),
        Complex::new(-2.5, 1.25),
        Complex::new(0.0, 1.0),
        Complex::new(-0.001, -0.002),
        Complex::new(123.0, 45.6),
    ];

    #[test]
    fn divide_undoes_multiply() {
        for z in SAMPLES {
            for w in SAMPLES {
                let back = (z * w) / w;
                assert!(back.approx_eq(&z), "({z}) * ({w}) / ({w}) = {back}");
            }
        }
    }

    #[test]
    fn division_by_zero_is_not_finite() {
        assert!(!(Complex::ONE / Complex::ZERO).is_finite());
        assert!(!Complex::ZERO.inv().is_finite());
    }

    #[test]
    fn try_new_rejects_non_numbers() {
        assert!(Complex::try_new(0.5, -0.5).is_ok());
        assert!(matches!(
            Complex::try_new(f64::NAN, 0.0),
            Err(DesignError::InvalidOperand { .. })
        ));
        assert!(matches!(
            Complex::try_new(0.0, f64::INFINITY),
            Err(DesignError::InvalidOperand { .. })
        ));
    }

    #[test]
    fn nth_root_recovers_value() {
        for z in SAMPLES {
            for n in 1..6i32 {
                let root = z.nth_root(n as usize);
                assert!((root.powi(n) - z).norm() < 1e-9 * z.norm().max(1.0));
            }
        }
        // principal root of -1 is on the upper half plane
        assert!(Complex::from(-1.0).nth_root(2).approx_eq(&Complex::I));
    }

    #[test]
    fn scale_modulus_keeps_argument() {
        let mut z = Complex::new(0.6, 0.8);
        let argument = z.arg();
        z.scale_modulus_to(0.5);
        assert!((z.norm() - 0.5).abs() < Complex::EPSILON);
        assert!((z.arg() - argument).abs() < Complex::EPSILON);
    }

    #[test]
    fn equality_is_tolerant() {
        let z = Complex::new(0.25, -0.75);
        let nudged = Complex::new(0.25 + 1e-12, -0.75 - 1e-12);
        assert!(z.approx_eq(&nudged));
        assert!(!z.approx_eq(&Complex::new(0.25, -0.7500001)));
        assert!(Complex::are_equal(Some(&z), Some(&nudged)));
        assert!(!Complex::are_equal(Some(&z), None));
        assert!(!Complex::are_equal(None, None));
    }

    #[test]
    fn realness() {
        assert!(Complex::new(1.0, 1e-12).is_real());
        assert!(!Complex::new(1.0, 1e-6).is_real());
        assert!(Complex::cis(PI).is_real());
    }
}
