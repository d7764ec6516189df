use super::iir_filters::IirFilter;
use super::transfer::{Coefficients, ResponsePoint};
use super::StereoProcessor;
use crate::complex::Complex;
use crate::error::{DesignError, Result};
use crate::roots::{RootKind, RootSet};

/// Gain the magnitude response is scaled to at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// digital frequency in radians per sample, `[0, pi]`
    pub frequency: f64,
    pub gain: f64,
}

impl Default for Normalization {
    /// unity gain at DC
    fn default() -> Self {
        Self {
            frequency: 0.0,
            gain: 1.0,
        }
    }
}

/// Everything needed to design a filter: the roots of the numerator and the
/// denominator, and where to normalize the gain (unity at DC when absent).
#[derive(Debug, Clone, Default)]
pub struct FilterDescriptor {
    pub zeros: Vec<Complex>,
    pub poles: Vec<Complex>,
    pub normalize: Option<Normalization>,
}

impl FilterDescriptor {
    /// `H(z) = 1`
    pub fn identity() -> Self {
        Self::default()
    }
}

/// Owns one filter design and its running state: the editable zeros and
/// poles, the normalized coefficients and the per-channel history.
///
/// The engine does not notice edits made through [`FilterEngine::roots_mut`];
/// call [`FilterEngine::recompute`] after every edit. Both `compute` and
/// `recompute` allocate and must be serialized with the audio thread, `process`
/// and `reset` never allocate.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    zeros: RootSet,
    poles: RootSet,
    normalization: Normalization,
    filter: IirFilter,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// engine running the identity design
    pub fn new() -> Self {
        Self {
            zeros: RootSet::new(),
            poles: RootSet::new(),
            normalization: Normalization::default(),
            filter: IirFilter::new(Coefficients::identity()),
        }
    }

    /// Replaces the design with `descriptor`, returns the new coefficients.
    /// History is reset. Root handles from the previous design become stale.
    pub fn compute(&mut self, descriptor: FilterDescriptor) -> &Coefficients {
        self.zeros = RootSet::from_roots(&descriptor.zeros);
        self.poles = RootSet::from_roots(&descriptor.poles);
        self.normalization = descriptor.normalize.unwrap_or_default();
        self.recompute()
    }

    /// Re-derives the coefficients from the stored zeros, poles and
    /// normalization. History is reset, root handles stay valid.
    pub fn recompute(&mut self) -> &Coefficients {
        let mut coefficients = Coefficients::from_roots(&self.zeros.values(), &self.poles.values());

        let Normalization { frequency, gain } = self.normalization;
        let magnitude = coefficients.evaluate(Complex::cis(frequency)).norm();
        // a zero response at `frequency` makes this non-finite, `check` reports it
        coefficients.scale_numerator(gain / magnitude);

        self.filter = IirFilter::new(coefficients);
        self.filter.coefficients()
    }

    /// `H(z)` of the current design
    pub fn evaluate(&self, z: Complex) -> Complex {
        self.filter.coefficients().evaluate(z)
    }

    /// filters one stereo frame
    #[inline]
    pub fn process(&mut self, in_left: f64, in_right: f64) -> (f64, f64) {
        self.filter.step(in_left, in_right)
    }

    pub fn frequency_response(&self, points: usize) -> Vec<ResponsePoint> {
        self.filter.coefficients().frequency_response(points)
    }

    pub fn coefficients(&self) -> &Coefficients {
        self.filter.coefficients()
    }

    pub fn zeros(&self) -> &RootSet {
        &self.zeros
    }

    pub fn poles(&self) -> &RootSet {
        &self.poles
    }

    pub fn roots(&self, kind: RootKind) -> &RootSet {
        match kind {
            RootKind::Zero => &self.zeros,
            RootKind::Pole => &self.poles,
        }
    }

    /// Edit access to the zeros or poles. Follow up with
    /// [`FilterEngine::recompute`].
    pub fn roots_mut(&mut self, kind: RootKind) -> &mut RootSet {
        match kind {
            RootKind::Zero => &mut self.zeros,
            RootKind::Pole => &mut self.poles,
        }
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn set_normalization(&mut self, normalization: Normalization) {
        self.normalization = normalization;
    }

    /// snapshot of the current design
    pub fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor {
            zeros: self.zeros.values(),
            poles: self.poles.values(),
            normalize: Some(self.normalization),
        }
    }

    /// Advisory validation of the current design. Neither condition stops
    /// `process` from running, they only make it produce garbage.
    pub fn check(&self) -> Result<()> {
        if !self.coefficients().is_finite() {
            return Err(DesignError::DegenerateNormalization {
                frequency: self.normalization.frequency,
            });
        }
        match self.poles.iter().find(|(_, pole)| pole.norm() >= 1.0) {
            Some((_, pole)) => Err(DesignError::UnstableConfiguration {
                pole,
                modulus: pole.norm(),
            }),
            None => Ok(()),
        }
    }
}

impl StereoProcessor for FilterEngine {
    fn step(&mut self, left: f64, right: f64) -> (f64, f64) {
        self.process(left, right)
    }

    fn reset(&mut self) {
        self.filter.reset();
    }
}
