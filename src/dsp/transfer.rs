use super::polynomial::coefficients_from_roots;
use crate::complex::{Complex, ComplexExt};
use crate::error::{DesignError, Result};
use itertools_num::linspace;
use std::f64::consts::PI;

/// Numerator `b` and denominator `a` of a rational transfer function, both in
/// descending power order. The denominator is always monic (`a[0] == 1`).
#[derive(Debug, Clone)]
pub struct Coefficients {
    b: Vec<Complex>,
    a: Vec<Complex>,
}

impl Coefficients {
    /// `H(z) = 1`
    pub fn identity() -> Self {
        Self {
            b: vec![Complex::ONE],
            a: vec![Complex::ONE],
        }
    }

    /// unnormalized coefficients of the design with the given zeros and poles
    pub fn from_roots(zeros: &[Complex], poles: &[Complex]) -> Self {
        let mut b = coefficients_from_roots(zeros);
        let mut a = coefficients_from_roots(poles);
        b.reverse();
        a.reverse();
        Self { b, a }
    }

    /// Checked constructor for coefficients that did not come from a root set.
    /// The denominator must be non-empty and start with 1.
    pub fn new(b: Vec<Complex>, a: Vec<Complex>) -> Result<Self> {
        let coefficients = Self { b, a };
        if coefficients.is_monic() {
            Ok(coefficients)
        } else {
            let a0 = coefficients.a.first().copied().unwrap_or(Complex::ZERO);
            Err(DesignError::NonMonicDenominator(a0))
        }
    }

    /// `a[0]` equals 1 within [`ComplexExt::EPSILON`], in both parts
    pub fn is_monic(&self) -> bool {
        self.a.first().map_or(false, |a0| a0.approx_eq(&Complex::ONE))
    }

    /// numerator, descending powers
    pub fn b(&self) -> &[Complex] {
        &self.b
    }

    /// denominator, descending powers, `a[0] == 1`
    pub fn a(&self) -> &[Complex] {
        &self.a
    }

    pub fn is_finite(&self) -> bool {
        self.b.iter().chain(&self.a).all(|c| c.is_finite())
    }

    pub(crate) fn scale_numerator(&mut self, factor: f64) {
        for b in &mut self.b {
            *b = *b * factor;
        }
    }

    /// Evaluates `H(z) = B(1/z) / A(1/z)`, where both polynomials are summed
    /// against ascending powers of `1/z`. Not finite at `z = 0`.
    pub fn evaluate(&self, z: Complex) -> Complex {
        let z_inverse = z.inv();
        let mut power = Complex::ONE;
        let mut num = Complex::ZERO;
        let mut den = Complex::ZERO;
        for i in 0..self.b.len().max(self.a.len()) {
            if let Some(&b) = self.b.get(i) {
                num = num + b * power;
            }
            if let Some(&a) = self.a.get(i) {
                den = den + a * power;
            }
            power = power * z_inverse;
        }
        num / den
    }

    /// Samples the frequency response at `points` frequencies evenly spaced
    /// over `[-pi, pi]`, both ends included.
    pub fn frequency_response(&self, points: usize) -> Vec<ResponsePoint> {
        linspace(-PI, PI, points)
            .map(|omega| ResponsePoint {
                omega,
                response: self.evaluate(Complex::cis(omega)),
            })
            .collect()
    }
}

/// `H(e^(i * omega))`
#[derive(Debug, Clone, Copy)]
pub struct ResponsePoint {
    pub omega: f64,
    pub response: Complex,
}

impl ResponsePoint {
    pub fn magnitude(&self) -> f64 {
        self.response.norm()
    }

    pub fn magnitude_db(&self) -> f64 {
        20.0 * self.magnitude().log10()
    }

    pub fn phase(&self) -> f64 {
        self.response.arg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_flat() {
        let coefficients = Coefficients::identity();
        for point in coefficients.frequency_response(17) {
            assert!(point.response.approx_eq(&Complex::ONE));
            assert!(point.magnitude_db().abs() < 1e-9);
        }
    }

    #[test]
    fn descending_storage() {
        let coefficients = Coefficients::from_roots(&[Complex::from(1.0), Complex::from(-1.0)], &[]);
        let b: Vec<f64> = coefficients.b().iter().map(|c| c.re).collect();
        assert_eq!(b, vec![1.0, 0.0, -1.0]);
        assert_eq!(coefficients.a().len(), 1);
    }

    #[test]
    fn evaluates_rational_function() {
        // H(z) = (1 - 0.5/z) / (1 + 0.25/z)
        let coefficients =
            Coefficients::from_roots(&[Complex::from(0.5)], &[Complex::from(-0.25)]);
        let z = Complex::new(0.3, 0.9);
        let w = z.inv();
        let expected = (Complex::ONE - w * 0.5) / (Complex::ONE + w * 0.25);
        assert!(coefficients.evaluate(z).approx_eq(&expected));
    }

    #[test]
    fn uneven_orders() {
        // two zeros at the origin and one pole: H(z) = 1 / (1 - 0.5/z)
        let coefficients = Coefficients::from_roots(&[Complex::ZERO; 2], &[Complex::from(0.5)]);
        let at_dc = coefficients.evaluate(Complex::ONE);
        assert!(at_dc.approx_eq(&Complex::from(2.0)));
    }

    #[test]
    fn zero_is_not_finite() {
        let coefficients = Coefficients::from_roots(&[], &[Complex::from(0.5)]);
        assert!(!coefficients.evaluate(Complex::ZERO).is_finite());
    }

    #[test]
    fn response_sweep_covers_unit_circle() {
        let response = Coefficients::identity().frequency_response(5);
        let omegas: Vec<f64> = response.iter().map(|p| p.omega).collect();
        assert_eq!(omegas.len(), 5);
        assert!((omegas[0] + PI).abs() < 1e-12);
        assert!(omegas[2].abs() < 1e-12);
        assert!((omegas[4] - PI).abs() < 1e-12);
    }

    #[test]
    fn phase_of_pure_delay() {
        // H(z) = z^-1
        let delay = Coefficients::new(
            vec![Complex::ZERO, Complex::ONE],
            vec![Complex::ONE],
        )
        .unwrap();
        for point in delay.frequency_response(9) {
            assert!((point.magnitude() - 1.0).abs() < 1e-12);
        }
        let quarter = delay.evaluate(Complex::cis(PI / 2.0));
        assert!((quarter.arg() + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn checked_constructor_requires_monic_denominator() {
        assert!(Coefficients::new(vec![Complex::ONE], vec![Complex::ONE]).is_ok());
        assert!(matches!(
            Coefficients::new(vec![Complex::ONE], vec![Complex::from(2.0)]),
            Err(DesignError::NonMonicDenominator(_))
        ));
        assert!(Coefficients::new(vec![Complex::ONE], vec![]).is_err());
    }

    #[test]
    fn monic_check_looks_at_both_parts() {
        let nearly_one = Complex::new(1.0 + 1e-12, -1e-12);
        assert!(Coefficients::new(vec![Complex::ONE], vec![nearly_one]).is_ok());

        // real part is exactly 1, the imaginary part is not negligible
        let skewed = Complex::new(1.0, 1e-6);
        assert!(matches!(
            Coefficients::new(vec![Complex::ONE], vec![skewed, Complex::from(0.5)]),
            Err(DesignError::NonMonicDenominator(a0)) if a0.approx_eq(&skewed)
        ));
        assert!(Coefficients::from_roots(&[], &[Complex::new(0.3, 0.4)]).is_monic());
    }
}
