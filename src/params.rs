use crate::math_utils::{exponential_scale, inverse_exponential_scale};
use crate::presets::Preset;
use nih_plug::prelude::*;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFamily {
    #[id = "off"]
    Off,
    #[id = "moving-average"]
    #[name = "Moving Average"]
    MovingAverage,
    #[id = "leaky-integrator"]
    #[name = "Leaky Integrator"]
    LeakyIntegrator,
    #[id = "butterworth"]
    Butterworth,
    #[id = "chebyshev-1"]
    #[name = "Chebyshev I"]
    ChebyshevI,
    #[id = "bessel"]
    Bessel,
    #[id = "comb"]
    Comb,
}

#[derive(Params)]
pub struct FilterParams {
    #[id = "bypass"]
    pub bypass: BoolParam,

    #[id = "family"]
    pub family: EnumParam<FilterFamily>,

    /// Slider position in `[0, 1]`, mapped exponentially onto the digital
    /// cutoff frequency so most of the travel goes to the low end.
    #[id = "cutoff"]
    pub cutoff: FloatParam,

    /// moving average length `k`
    #[id = "average-order"]
    pub average_order: IntParam,

    /// Butterworth and Chebyshev order in conjugate pole pairs, the filter
    /// order is twice this
    #[id = "pole-pairs"]
    pub pole_pairs: IntParam,

    /// Bessel prototypes are tabulated for orders 1 through 6
    #[id = "bessel-order"]
    pub bessel_order: IntParam,

    /// Chebyshev passband ripple factor ε
    #[id = "ripple"]
    pub ripple: FloatParam,

    /// leaky integrator feedback λ
    #[id = "lambda"]
    pub lambda: FloatParam,

    /// comb gain α
    #[id = "alpha"]
    pub alpha: FloatParam,

    /// comb delay in samples
    #[id = "delay"]
    pub delay: IntParam,

    #[id = "lowpass"]
    pub lowpass: BoolParam,

    #[id = "feedforward"]
    pub feedforward: BoolParam,
}

/// Raises `flag` whenever the parameter changes. Parameters change on whatever
/// thread the host likes, the audio thread picks the flag up between blocks.
fn mark_changed<T: 'static>(flag: &Arc<AtomicBool>) -> Arc<dyn Fn(T) + Send + Sync> {
    let flag = flag.clone();
    Arc::new(move |_: T| flag.store(true, Ordering::Release))
}

/// digital cutoff frequency for a slider position
pub fn cutoff_from_slider(x: f32) -> f64 {
    PI * exponential_scale(f64::from(x))
}

impl FilterParams {
    pub fn new(design_changed: Arc<AtomicBool>) -> Self {
        let changed = &design_changed;
        Self {
            bypass: BoolParam::new("Bypass", false),

            family: EnumParam::new("Filter", FilterFamily::Off)
                .with_callback(mark_changed(changed)),

            cutoff: FloatParam::new(
                "Cutoff",
                0.5,
                FloatRange::Linear {
                    min: 0.05,
                    max: 0.995,
                },
            )
            .with_callback(mark_changed(changed))
            // shown as a fraction of pi, like `0.118π`
            .with_value_to_string(Arc::new(|x: f32| {
                format!("{:.3}π", cutoff_from_slider(x) / PI)
            }))
            .with_string_to_value(Arc::new(|s: &str| {
                let fraction: f64 = s.trim().trim_end_matches('π').trim().parse().ok()?;
                Some(inverse_exponential_scale(fraction) as f32)
            })),

            average_order: IntParam::new("Length", 6, IntRange::Linear { min: 2, max: 20 })
                .with_callback(mark_changed(changed)),

            pole_pairs: IntParam::new("Order", 2, IntRange::Linear { min: 1, max: 3 })
                .with_callback(mark_changed(changed))
                .with_value_to_string(Arc::new(|pairs: i32| format!("{}", pairs * 2)))
                .with_string_to_value(Arc::new(|s: &str| {
                    let order: i32 = s.trim().parse().ok()?;
                    Some(order / 2)
                })),

            bessel_order: IntParam::new("Bessel Order", 3, IntRange::Linear { min: 1, max: 6 })
                .with_callback(mark_changed(changed)),

            ripple: FloatParam::new("Ripple", 0.5, FloatRange::Linear { min: 0.1, max: 0.9 })
                .with_callback(mark_changed(changed))
                .with_step_size(0.01),

            lambda: FloatParam::new("Lambda", 0.5, FloatRange::Linear { min: 0.1, max: 0.99 })
                .with_callback(mark_changed(changed))
                .with_step_size(0.01),

            alpha: FloatParam::new(
                "Alpha",
                -0.85,
                FloatRange::Linear {
                    min: -0.85,
                    max: 0.85,
                },
            )
            .with_callback(mark_changed(changed))
            .with_step_size(0.001),

            delay: IntParam::new("Delay", 8, IntRange::Linear { min: 1, max: 16 })
                .with_callback(mark_changed(changed))
                .with_unit(" samples"),

            lowpass: BoolParam::new("Lowpass", true)
                .with_callback(mark_changed(changed))
                .with_value_to_string(Arc::new(|lowpass: bool| {
                    String::from(if lowpass { "Lowpass" } else { "Highpass" })
                })),

            feedforward: BoolParam::new("Feedforward", true)
                .with_callback(mark_changed(changed))
                .with_value_to_string(Arc::new(|feedforward: bool| {
                    String::from(if feedforward { "Feedforward" } else { "Feedback" })
                })),
        }
    }

    /// the design selected by the current parameter values
    pub fn preset(&self) -> Preset {
        self.preset_for(self.family.value())
    }

    fn preset_for(&self, family: FilterFamily) -> Preset {
        let cutoff = cutoff_from_slider(self.cutoff.value());
        let order = 2 * self.pole_pairs.value().max(1) as usize;
        let lowpass = self.lowpass.value();

        match family {
            FilterFamily::Off => Preset::Off,
            FilterFamily::MovingAverage => Preset::MovingAverage {
                order: self.average_order.value().max(1) as usize,
            },
            FilterFamily::LeakyIntegrator => Preset::LeakyIntegrator {
                lambda: f64::from(self.lambda.value()),
            },
            FilterFamily::Butterworth => Preset::Butterworth {
                cutoff,
                order,
                lowpass,
            },
            FilterFamily::ChebyshevI => Preset::ChebyshevI {
                cutoff,
                order,
                ripple: f64::from(self.ripple.value()),
                lowpass,
            },
            FilterFamily::Bessel => Preset::Bessel {
                cutoff,
                order: self.bessel_order.value().max(1) as usize,
                lowpass,
            },
            FilterFamily::Comb => Preset::Comb {
                alpha: f64::from(self.alpha.value()),
                delay: self.delay.value().max(1) as usize,
                feedforward: self.feedforward.value(),
            },
        }
    }
}
