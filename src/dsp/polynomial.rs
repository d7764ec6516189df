use crate::complex::{Complex, ComplexExt};

/// Expands the monic polynomial `(z - r_0)(z - r_1)...(z - r_{n-1})` and
/// returns its `n + 1` coefficients in ascending power order, so the last
/// element is always `1`. An empty root list yields the constant `[1]`.
///
/// Each root convolves the running product with `(z - r)`:
/// ```ignore
/// new[0] = -r * old[0]
/// new[i] = old[i - 1] - r * old[i]
/// new[k] = old[k - 1]
/// ```
pub fn coefficients_from_roots(roots: &[Complex]) -> Vec<Complex> {
    let mut coefficients = Vec::with_capacity(roots.len() + 1);
    coefficients.push(Complex::ONE);

    for &root in roots {
        // the leading term carries forward, then update in place from the top
        // down so every `old[i - 1]` read still sees the previous product
        let k = coefficients.len();
        coefficients.push(coefficients[k - 1]);
        for i in (1..k).rev() {
            coefficients[i] = coefficients[i - 1] - root * coefficients[i];
        }
        coefficients[0] = -root * coefficients[0];
    }

    coefficients
}
