//! Windowing and the in-place radix-2 Cooley-Tukey transform.

use num_complex::Complex32;
use std::f32::consts::PI;

/// Symmetric raised-cosine (Hann) window of length `len`
pub fn hann_window(len: usize) -> Vec<f32> {
    if len < 2 {
        return vec![1.0; len];
    }
    (0..len)
        .map(|i| {
            let t = i as f32 / (len - 1) as f32;
            0.5 * (1.0 - (2.0 * PI * t).cos())
        })
        .collect()
}

/// In-place radix-2 decimation-in-time transform.
///
/// `buf.len()` must be a power of two. Bit-reversal permutation first,
/// then log2(N) butterfly stages with the span doubling per stage; the
/// stage twiddle `e^(-2πi/span)` is accumulated multiplicatively across
/// each stage instead of recomputing the angle per butterfly.
pub fn forward_in_place(buf: &mut [Complex32]) {
    let n = buf.len();
    debug_assert!(n.is_power_of_two(), "transform length must be a power of two");
    if n < 2 {
        return;
    }
    let bits = n.trailing_zeros();

    for i in 0..n {
        let j = ((i as u32).reverse_bits() >> (32 - bits)) as usize;
        if j > i {
            buf.swap(i, j);
        }
    }

    let mut span = 2;
    while span <= n {
        let half = span / 2;
        let step = Complex32::from_polar(1.0, -2.0 * PI / span as f32);
        for start in (0..n).step_by(span) {
            let mut w = Complex32::new(1.0, 0.0);
            for k in start..start + half {
                let u = buf[k];
                let t = w * buf[k + half];
                buf[k] = u + t;
                buf[k + half] = u - t;
                w *= step;
            }
        }
        span *= 2;
    }
}
