pub mod engine;
pub mod history;
pub mod iir_filters;
pub mod polynomial;
pub mod transfer;

/// Something that turns one stereo sample frame into another. Calls are
/// strictly sequential: the output depends on every frame seen since the last
/// `reset`.
pub trait StereoProcessor {
    fn step(&mut self, left: f64, right: f64) -> (f64, f64);

    /// clears internal state, must not allocate
    fn reset(&mut self);

    /// runs `step` over a pair of host channel buffers in place
    fn process_buffer_replacing(&mut self, left: &mut [f32], right: &mut [f32]) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.step(f64::from(*l), f64::from(*r));
            *l = out_l as f32;
            *r = out_r as f32;
        }
    }
}
