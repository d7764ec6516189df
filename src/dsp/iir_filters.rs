use super::history::History;
use super::transfer::Coefficients;
use super::StereoProcessor;
use crate::NUM_CHANNELS;
use array_macro::array;
use nih_plug::nih_debug_assert;

/// input and output windows of one channel
#[derive(Debug, Clone)]
struct ChannelHistory {
    x: History,
    y: History,
}

/// Direct form 1 realization of an arbitrary order IIR filter, one instance
/// runs both channels with shared coefficients.
///
/// Only the real part of each coefficient is used; designs with conjugate
/// symmetric roots have real coefficients anyway.
#[derive(Debug, Clone)]
pub struct IirFilter {
    coefficients: Coefficients,

    // real feedforward taps, descending powers
    b: Vec<f64>,
    // real feedback taps, descending powers without the implicit `a[0] = 1`
    a: Vec<f64>,

    history: [ChannelHistory; NUM_CHANNELS],
}

impl IirFilter {
    /// Allocates zeroed history sized for `coefficients`. Must not be called
    /// from the audio thread.
    pub fn new(coefficients: Coefficients) -> Self {
        nih_debug_assert!(coefficients.is_monic(), "IIR denominator must be monic");

        let b: Vec<f64> = coefficients.b().iter().map(|c| c.re).collect();
        let a: Vec<f64> = coefficients.a().iter().skip(1).map(|c| c.re).collect();
        let (x_len, y_len) = (b.len(), a.len());

        Self {
            coefficients,
            b,
            a,
            history: array![
                ChannelHistory {
                    x: History::new(x_len),
                    y: History::new(y_len),
                };
                NUM_CHANNELS
            ],
        }
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// ```ignore
    /// y[n] = sum(b[i] * x[n - i]) - sum(a[i] * y[n - i]), i >= 1 for the feedback
    /// ```
    #[inline]
    fn step_channel(b: &[f64], a: &[f64], history: &mut ChannelHistory, sample: f64) -> f64 {
        history.x.push(sample);
        let feedforward: f64 = b.iter().zip(&history.x).map(|(b, x)| b * x).sum();
        let feedback: f64 = a.iter().zip(&history.y).map(|(a, y)| a * y).sum();
        let output = feedforward - feedback;
        history.y.push(output);
        output
    }
}

impl StereoProcessor for IirFilter {
    fn step(&mut self, left: f64, right: f64) -> (f64, f64) {
        let [l, r] = &mut self.history;
        (
            Self::step_channel(&self.b, &self.a, l, left),
            Self::step_channel(&self.b, &self.a, r, right),
        )
    }

    fn reset(&mut self) {
        for h in &mut self.history {
            h.x.reset();
            h.y.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;

    #[test]
    fn identity_passes_through() {
        let mut filter = IirFilter::new(Coefficients::identity());
        for (i, x) in [0.5, -1.0, 0.25, 0.0, 1.0, -0.125].into_iter().enumerate() {
            let y = -x * i as f64;
            assert_eq!(filter.step(x, y), (x, y));
        }
    }

    #[test]
    fn first_order_recursion() {
        // y[n] = x[n] + 0.5 y[n - 1]
        let mut filter = IirFilter::new(Coefficients::from_roots(&[], &[Complex::from(0.5)]));
        let outputs: Vec<f64> = (0..4)
            .map(|n| filter.step(if n == 0 { 1.0 } else { 0.0 }, 0.0).0)
            .collect();
        assert_eq!(outputs, vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn feedforward_taps_are_newest_first() {
        // b = [1, 0, -1]: y[n] = x[n] - x[n - 2]
        let mut filter = IirFilter::new(Coefficients::from_roots(
            &[Complex::from(1.0), Complex::from(-1.0)],
            &[],
        ));
        let input = [1.0, 2.0, 3.0, 4.0];
        let outputs: Vec<f64> = input.iter().map(|&x| filter.step(x, x).1).collect();
        assert_eq!(outputs, vec![1.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn channels_are_independent() {
        let mut filter = IirFilter::new(Coefficients::from_roots(&[], &[Complex::from(0.9)]));
        filter.step(1.0, 0.0);
        let (l, r) = filter.step(0.0, 0.0);
        assert!((l - 0.9).abs() < 1e-15);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn reset_clears_state() {
        let mut filter = IirFilter::new(Coefficients::from_roots(&[], &[Complex::from(0.5)]));
        filter.step(1.0, 1.0);
        filter.reset();
        assert_eq!(filter.step(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn block_processing_matches_steps() {
        let coefficients = Coefficients::from_roots(
            &[Complex::from(-1.0)],
            &[Complex::new(0.5, 0.3), Complex::new(0.5, -0.3)],
        );
        let mut by_block = IirFilter::new(coefficients.clone());
        let mut by_step = IirFilter::new(coefficients);

        let mut left: Vec<f32> = (0..64).map(|i| ((i * 7) % 13) as f32 / 13.0 - 0.5).collect();
        let mut right: Vec<f32> = left.iter().map(|x| -x).collect();
        let expected: Vec<(f32, f32)> = left
            .iter()
            .zip(&right)
            .map(|(&l, &r)| {
                let (l, r) = by_step.step(f64::from(l), f64::from(r));
                (l as f32, r as f32)
            })
            .collect();

        by_block.process_buffer_replacing(&mut left, &mut right);
        for ((l, r), (el, er)) in left.iter().zip(&right).zip(expected) {
            assert_eq!((*l, *r), (el, er));
        }
    }
}
