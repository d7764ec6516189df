//! Preset filter families.
//!
//! Moving average, leaky integrator and comb filters are placed directly in the
//! z-plane. Butterworth, Chebyshev type I and Bessel filters are designed as
//! analog prototypes with cutoff `Ω_c = 1` and mapped to the z-plane with the
//! bilinear transform, pre-warped so that `Ω_c` lands exactly on the requested
//! digital cutoff.

use crate::complex::{Complex, ComplexExt};
use crate::dsp::engine::{FilterDescriptor, Normalization};
use crate::error::{DesignError, Result};
use crate::math_utils::cot;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Roots of the reverse Bessel polynomials of order 1 through 6.
const BESSEL_ROOTS: [&[Complex]; 6] = [
    &[Complex::new(-1.000_000_000_000_00, 0.0)],
    &[
        Complex::new(-1.500_000_000_000_00, 0.866_025_403_784_439),
        Complex::new(-1.500_000_000_000_00, -0.866_025_403_784_439),
    ],
    &[
        Complex::new(-2.322_185_354_626_09, 0.0),
        Complex::new(-1.838_907_322_686_96, 1.754_380_959_783_720),
        Complex::new(-1.838_907_322_686_96, -1.754_380_959_783_720),
    ],
    &[
        Complex::new(-2.103_789_397_179_63, 2.657_418_041_856_750),
        Complex::new(-2.103_789_397_179_63, -2.657_418_041_856_750),
        Complex::new(-2.896_210_602_820_37, 0.867_234_128_934_507),
        Complex::new(-2.896_210_602_820_37, -0.867_234_128_934_507),
    ],
    &[
        Complex::new(-3.646_738_595_329_65, 0.0),
        Complex::new(-2.324_674_303_181_65, 3.571_022_920_337_98),
        Complex::new(-2.324_674_303_181_65, -3.571_022_920_337_98),
        Complex::new(-3.351_956_399_153_53, 1.742_661_416_183_20),
        Complex::new(-3.351_956_399_153_53, -1.742_661_416_183_20),
    ],
    &[
        Complex::new(-2.515_932_247_810_83, 4.492_672_953_653_95),
        Complex::new(-2.515_932_247_810_83, -4.492_672_953_653_95),
        Complex::new(-3.735_708_356_325_81, 2.626_272_311_447_13),
        Complex::new(-3.735_708_356_325_81, -2.626_272_311_447_13),
        Complex::new(-4.248_359_395_863_37, 0.867_509_673_231_36),
        Complex::new(-4.248_359_395_863_37, -0.867_509_673_231_36),
    ],
];

/// highest Bessel order with tabulated prototype roots
pub const MAX_BESSEL_ORDER: usize = BESSEL_ROOTS.len();

/// A parametrized filter design. Cutoffs are digital frequencies in radians
/// per sample, strictly inside `(0, pi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preset {
    /// no filtering
    Off,
    MovingAverage {
        order: usize,
    },
    LeakyIntegrator {
        lambda: f64,
    },
    Butterworth {
        cutoff: f64,
        order: usize,
        lowpass: bool,
    },
    ChebyshevI {
        cutoff: f64,
        order: usize,
        ripple: f64,
        lowpass: bool,
    },
    Bessel {
        cutoff: f64,
        order: usize,
        lowpass: bool,
    },
    Comb {
        alpha: f64,
        delay: usize,
        feedforward: bool,
    },
}

impl Preset {
    pub fn descriptor(&self) -> Result<FilterDescriptor> {
        match *self {
            Self::Off => Ok(FilterDescriptor::identity()),
            Self::MovingAverage { order } => moving_average(order),
            Self::LeakyIntegrator { lambda } => Ok(leaky_integrator(lambda)),
            Self::Butterworth {
                cutoff,
                order,
                lowpass,
            } => butterworth(cutoff, order, lowpass),
            Self::ChebyshevI {
                cutoff,
                order,
                ripple,
                lowpass,
            } => chebyshev_type_i(cutoff, order, ripple, lowpass),
            Self::Bessel {
                cutoff,
                order,
                lowpass,
            } => bessel(cutoff, order, lowpass),
            Self::Comb {
                alpha,
                delay,
                feedforward,
            } => comb(alpha, delay, feedforward),
        }
    }
}

/// Maps `s` from the analog plane to the digital plane with
/// ```ignore
/// s -> (1 + s/c) / (1 - s/c),  c = cot(prewarp_frequency / 2)
/// ```
/// which sends `s = i` to `z = e^(i * prewarp_frequency)`.
pub fn bilinear_transform(s: Complex, prewarp_frequency: f64) -> Complex {
    let sc = s * cot(prewarp_frequency / 2.0).recip();
    (Complex::ONE + sc) / (Complex::ONE - sc)
}

/// Mirrors a lowpass design into a highpass one, `z -> -z` flips the frequency
/// response around `pi / 2`.
fn highpass_transform(roots: Vec<Complex>) -> Vec<Complex> {
    roots.into_iter().map(|z| -z).collect()
}

fn check_cutoff(cutoff: f64) -> Result<()> {
    if cutoff > 0.0 && cutoff < PI {
        Ok(())
    } else {
        Err(DesignError::InvalidParameter {
            name: "cutoff",
            value: cutoff,
        })
    }
}

/// Shared tail of the analog prototype designs: maps each prototype pole with
/// the bilinear transform, puts all zeros at `z = -1`, and mirrors the result
/// for highpass designs. `cutoff` must already be the pre-warp frequency.
fn from_analog_prototype(
    analog_poles: impl Iterator<Item = Complex>,
    cutoff: f64,
    lowpass: bool,
    normalize: Normalization,
) -> FilterDescriptor {
    let poles: Vec<Complex> = analog_poles.map(|s| bilinear_transform(s, cutoff)).collect();
    let zeros = vec![Complex::from(-1.0); poles.len()];

    let (zeros, poles) = if lowpass {
        (zeros, poles)
    } else {
        (highpass_transform(zeros), highpass_transform(poles))
    };

    FilterDescriptor {
        zeros,
        poles,
        normalize: Some(normalize),
    }
}

/// `y[n] = (1/k) * sum(x[n - i])` for `i` in `0..k`: zeros at the `k`th roots
/// of unity except `z = 1`.
pub fn moving_average(order: usize) -> Result<FilterDescriptor> {
    if order == 0 {
        return Err(DesignError::InvalidParameter {
            name: "moving average order",
            value: 0.0,
        });
    }
    let k = order as f64;
    let zeros = (1..order)
        .map(|i| Complex::cis(i as f64 * TAU / k))
        .collect();

    Ok(FilterDescriptor {
        zeros,
        poles: vec![],
        normalize: None,
    })
}

/// `y[n] = lambda * y[n - 1] + (1 - lambda) * x[n]`
pub fn leaky_integrator(lambda: f64) -> FilterDescriptor {
    FilterDescriptor {
        zeros: vec![],
        poles: vec![Complex::from(lambda)],
        normalize: None,
    }
}

/// Maximally flat magnitude response. The analog poles sit on the left half of
/// the unit circle at `e^(-i * theta_k)`, `theta_k = pi/2 + pi(2k + 1)/(2n)`.
pub fn butterworth(cutoff: f64, order: usize, lowpass: bool) -> Result<FilterDescriptor> {
    check_cutoff(cutoff)?;
    let cutoff = if lowpass { cutoff } else { PI - cutoff };
    let n = order as f64;

    let analog_poles = (0..order).map(|k| {
        let theta = FRAC_PI_2 + PI * (2 * k + 1) as f64 / (2.0 * n);
        Complex::cis(-theta)
    });

    Ok(from_analog_prototype(
        analog_poles,
        cutoff,
        lowpass,
        Normalization {
            frequency: if lowpass { 0.0 } else { PI },
            gain: 1.0,
        },
    ))
}

/// Equiripple passband with ripple factor `ripple` (ε). Analog poles lie on an
/// ellipse:
/// ```ignore
/// s_m = -sinh(x) sin(theta_m) + i cosh(x) cos(theta_m)
/// x = arsinh(1 / ε) / n,  theta_m = (pi / 2)(2m - 1) / n,  m = 1..=n
/// ```
/// The gain is normalized to the bottom of the ripple, `1 / sqrt(1 + ε²)`.
pub fn chebyshev_type_i(
    cutoff: f64,
    order: usize,
    ripple: f64,
    lowpass: bool,
) -> Result<FilterDescriptor> {
    check_cutoff(cutoff)?;
    if !(ripple > 0.0 && ripple.is_finite()) {
        return Err(DesignError::InvalidParameter {
            name: "ripple",
            value: ripple,
        });
    }
    let cutoff = if lowpass { cutoff } else { PI - cutoff };
    let n = order as f64;

    let x = ripple.recip().asinh() / n;
    let (sinh, cosh) = (x.sinh(), x.cosh());
    let analog_poles = (1..=order).map(|m| {
        let theta = FRAC_PI_2 * (2 * m - 1) as f64 / n;
        Complex::new(-sinh * theta.sin(), cosh * theta.cos())
    });

    Ok(from_analog_prototype(
        analog_poles,
        cutoff,
        lowpass,
        Normalization {
            frequency: if lowpass { cutoff } else { PI },
            gain: (1.0 + ripple * ripple).sqrt().recip(),
        },
    ))
}

/// Maximally flat group delay in the analog domain. Prototype roots are
/// tabulated for orders 1 through [`MAX_BESSEL_ORDER`].
pub fn bessel(cutoff: f64, order: usize, lowpass: bool) -> Result<FilterDescriptor> {
    check_cutoff(cutoff)?;
    let roots = order
        .checked_sub(1)
        .and_then(|i| BESSEL_ROOTS.get(i))
        .ok_or(DesignError::UnsupportedOrder {
            order,
            max: MAX_BESSEL_ORDER,
        })?;
    let cutoff = if lowpass { cutoff } else { PI - cutoff };

    Ok(from_analog_prototype(
        roots.iter().copied(),
        cutoff,
        lowpass,
        Normalization {
            frequency: if lowpass { 0.0 } else { PI },
            gain: 1.0,
        },
    ))
}

/// Feedforward `H(z) ~ (z^k - alpha) / z^k` or feedback
/// `H(z) ~ z^k / (z^k + alpha)` for a delay of `k` samples. The `k` roots are
/// the `k`th roots of `alpha` (feedforward) or `-alpha` (feedback), evenly
/// spread around a circle; their counterparts sit at the origin.
pub fn comb(alpha: f64, delay: usize, feedforward: bool) -> Result<FilterDescriptor> {
    if delay == 0 {
        return Err(DesignError::InvalidParameter {
            name: "comb delay",
            value: 0.0,
        });
    }
    let k = delay as f64;
    let sign = if feedforward { 1.0 } else { -1.0 };
    let alpha_kth_root = Complex::from(alpha * sign).nth_root(delay);

    let roots: Vec<Complex> = (0..delay)
        .map(|i| alpha_kth_root * Complex::cis(i as f64 * TAU / k))
        .collect();
    let origin = vec![Complex::ZERO; delay];
    let (zeros, poles) = if feedforward {
        (roots, origin)
    } else {
        (origin, roots)
    };

    Ok(FilterDescriptor {
        zeros,
        poles,
        normalize: Some(Normalization {
            frequency: if alpha > 0.0 { PI / k } else { 0.0 },
            gain: 1.0,
        }),
    })
}
