#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
use dsp::engine::FilterEngine;
use dsp::StereoProcessor;
use error::DesignError;
use nih_plug::prelude::*;
use params::FilterParams;
use presets::Preset;
use static_assertions::{assert_impl_all, const_assert_eq};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub mod complex;
pub mod dsp;
pub mod error;
pub mod math_utils;
pub mod params;
pub mod presets;
pub mod roots;

/// max size of each batch, design changes requested by the host are picked up
/// at this resolution
const MAX_BLOCK_SIZE: usize = 64;

/// hardcoded supported number of channels
pub const NUM_CHANNELS: usize = 2;

/// samples the host keeps feeding silence after the input stops, enough for
/// any preset with poles comfortably inside the unit circle to ring out
const TAIL_SAMPLES: u32 = 4096;

const_assert_eq!(NUM_CHANNELS, 2);
assert_impl_all!(complex::Complex: Copy, Send, Sync);
assert_impl_all!(FilterEngine: Send);

pub struct ZPlane {
    params: Arc<FilterParams>,
    engine: FilterEngine,

    // raised by parameter callbacks, consumed by the audio thread
    design_changed: Arc<AtomicBool>,
}

/// Outcome of a redesign. Redesigns happen on the audio thread, so these are
/// handed to the background task executor and logged there.
#[derive(Debug, Clone)]
pub enum DesignEvent {
    Changed {
        preset: Preset,
        order: usize,
        /// advisory problem with the new design
        warning: Option<DesignError>,
    },
    /// the previous design stays active
    Rejected { preset: Preset, error: DesignError },
}

fn log_design_event(event: DesignEvent) {
    match event {
        DesignEvent::Changed {
            preset,
            order,
            warning,
        } => {
            nih_log!("Filter design changed to {preset:?}, order {order}");
            if let Some(warning) = warning {
                nih_warn!("{warning}");
            }
        }
        DesignEvent::Rejected { preset, error } => {
            nih_warn!("Keeping previous design, {preset:?} is not realizable: {error}");
        }
    }
}

impl ZPlane {
    /// Redesigns the filter from the current parameter values. A preset that
    /// cannot be realized keeps the previous design running.
    fn update_design(&mut self) -> DesignEvent {
        self.apply_preset(self.params.preset())
    }

    fn apply_preset(&mut self, preset: Preset) -> DesignEvent {
        match preset.descriptor() {
            Ok(descriptor) => {
                let order = self.engine.compute(descriptor).a().len() - 1;
                DesignEvent::Changed {
                    preset,
                    order,
                    warning: self.engine.check().err(),
                }
            }
            Err(error) => DesignEvent::Rejected { preset, error },
        }
    }
}

impl Default for ZPlane {
    fn default() -> Self {
        let design_changed = Arc::new(AtomicBool::new(true));
        Self {
            params: Arc::new(FilterParams::new(design_changed.clone())),
            engine: FilterEngine::new(),
            design_changed,
        }
    }
}

impl Plugin for ZPlane {
    const NAME: &'static str = "Z-Plane";
    const VENDOR: &'static str = "Støjmaskiner";
    const URL: &'static str = env!("CARGO_PKG_HOMEPAGE");
    const EMAIL: &'static str = "panierilorenzo@gmail.com";

    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[AudioIOLayout {
        main_input_channels: NonZeroU32::new(NUM_CHANNELS as u32),
        main_output_channels: NonZeroU32::new(NUM_CHANNELS as u32),
        ..AudioIOLayout::const_default()
    }];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;
    const MIDI_OUTPUT: MidiConfig = MidiConfig::None;

    const SAMPLE_ACCURATE_AUTOMATION: bool = false;

    type SysExMessage = ();
    type BackgroundTask = DesignEvent;

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn task_executor(&mut self) -> TaskExecutor<Self> {
        Box::new(log_design_event)
    }

    fn initialize(
        &mut self,
        _audio_io_layout: &AudioIOLayout,
        _buffer_config: &BufferConfig,
        context: &mut impl InitContext<Self>,
    ) -> bool {
        // the design only depends on normalized frequencies, so the sample
        // rate plays no part here
        self.design_changed.store(false, Ordering::Release);
        let event = self.update_design();
        context.execute(event);

        context.set_latency_samples(0);

        true
    }

    fn reset(&mut self) {
        self.engine.reset();
    }

    // ===== PROCESS =====================================================================
    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        for (_, block) in buffer.iter_blocks(MAX_BLOCK_SIZE) {
            if self.design_changed.swap(false, Ordering::AcqRel) {
                // redesigning allocates the new coefficients and history
                let event = nih_plug::util::permit_alloc(|| self.update_design());
                context.execute_background(event);
            }

            if self.params.bypass.value() {
                continue;
            }

            let mut block_channels = block.into_iter();
            if let (Some(left), Some(right)) = (block_channels.next(), block_channels.next()) {
                self.engine.process_buffer_replacing(left, right);
            }
        }
        ProcessStatus::Tail(TAIL_SAMPLES)
    }
}

impl ClapPlugin for ZPlane {
    const CLAP_ID: &'static str = "com.stoejmaskiner.zplane";
    const CLAP_DESCRIPTION: Option<&'static str> = Some("Pole/zero IIR filter designer");
    const CLAP_MANUAL_URL: Option<&'static str> = Some(Self::URL);
    const CLAP_SUPPORT_URL: Option<&'static str> = None;

    const CLAP_FEATURES: &'static [ClapFeature] =
        &[ClapFeature::AudioEffect, ClapFeature::Stereo, ClapFeature::Filter];
}

impl Vst3Plugin for ZPlane {
    const VST3_CLASS_ID: [u8; 16] = *b"stoej-fp002-zpln";

    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Filter];
}

nih_export_clap!(ZPlane);
nih_export_vst3!(ZPlane);
