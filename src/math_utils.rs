/// Linear interpolation, implementing `lerp()` gives you a lot of other utility
/// functions for free.
pub trait Lerpable: Sized {
    /// Interpolate from `self` to `other` as `t` goes from `0` to `1`.
    ///
    /// Pseudocode:
    /// ```ignore
    /// (1 - t) * self + t * other
    /// ```
    fn lerp(&self, other: Self, t: f64) -> Self;

    /// Given a value `self` in the range `min..max`, return the proportional
    /// position of `self` within the range, as a number between `0` and `1`.
    ///
    /// Pseudocode:
    /// ```ignore
    /// (self - min) / (max - min)
    /// ```
    fn inverse_lerp(&self, min: Self, max: Self) -> f64;

    /// Given a value `self` in the range `imin..imax`, return a proportional
    /// value in the range `omin..omax`.
    fn remap(&self, imin: Self, imax: Self, omin: Self, omax: Self) -> Self {
        omin.lerp(omax, self.inverse_lerp(imin, imax))
    }
}

impl Lerpable for f64 {
    fn lerp(&self, other: f64, t: f64) -> f64 {
        (1.0 - t) * self + t * other
    }

    fn inverse_lerp(&self, min: f64, max: f64) -> f64 {
        (self - min) / (max - min)
    }
}

/// `1 / tan(theta)`
#[inline]
pub fn cot(theta: f64) -> f64 {
    theta.tan().recip()
}

/// base of [`exponential_scale`], sliders spend most of their travel on low
/// frequencies
pub const EXPONENTIAL_BASE: f64 = 50.0;

/// Maps `[0, 1]` onto `[0, 1]` exponentially:
/// ```ignore
/// (50^x - 1) / (50 - 1)
/// ```
pub fn exponential_scale(x: f64) -> f64 {
    EXPONENTIAL_BASE.powf(x).inverse_lerp(1.0, EXPONENTIAL_BASE)
}

/// inverse of [`exponential_scale`]
pub fn inverse_exponential_scale(y: f64) -> f64 {
    y.remap(0.0, 1.0, 1.0, EXPONENTIAL_BASE).log(EXPONENTIAL_BASE)
}
