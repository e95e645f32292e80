//! Per-pixel operations: each output value depends only on its input value.

use log::warn;
use rgb::RGB8;

use super::Channels;

/// Every channel `c` becomes `255 - c`.
pub fn negative<P: Channels>(pixels: &mut [P]) {
    for px in pixels {
        *px = px.map_channels(|c| 255 - c);
    }
}

/// Add `delta` to every channel, saturating at 0 and 255.
///
/// Deltas outside [-255, 255] are accepted; they only saturate everything.
pub fn brightness<P: Channels>(pixels: &mut [P], delta: i32) {
    if !(-255..=255).contains(&delta) {
        warn!("brightness delta {delta} is outside [-255, 255]");
    }
    for px in pixels {
        *px = px.map_channels(|c| i32::from(c).saturating_add(delta).clamp(0, 255) as u8);
    }
}

/// Binarize: values at or above `threshold` become 255, the rest 0.
///
/// `threshold` is clamped to [0, 255] first.
pub fn threshold(data: &mut [u8], threshold: i32) {
    let t = threshold.clamp(0, 255) as u8;
    for v in data {
        *v = if *v >= t { 255 } else { 0 };
    }
}

/// Luma of an RGB pixel with ITU-R BT.601 weights, rounded half up.
///
/// Computed in thousandths so exact halves (e.g. 26.5) never round down.
#[inline]
pub fn luma(px: RGB8) -> u8 {
    let y = 299 * u32::from(px.r) + 587 * u32::from(px.g) + 114 * u32::from(px.b);
    ((y + 500) / 1000) as u8
}

/// Replace every pixel with a gray of its own luma.
pub fn grayscale(pixels: &mut [RGB8]) {
    for px in pixels {
        let y = luma(*px);
        *px = RGB8::new(y, y, y);
    }
}

/// 256-bin intensity histogram.
pub fn histogram(data: &[u8]) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in data {
        hist[usize::from(v)] += 1;
    }
    hist
}

/// Running sum of a histogram: `cdf[v]` counts the values `<= v`.
pub fn cdf(hist: &[u64; 256]) -> [u64; 256] {
    let mut cdf = [0u64; 256];
    let mut total = 0u64;
    for (out, &count) in cdf.iter_mut().zip(hist) {
        total += count;
        *out = total;
    }
    cdf
}

/// Lookup table spreading a cumulative distribution over [0, 255]:
/// `round((cdf[v] - cdf_min) / (total - cdf_min) * 255)`, where `cdf_min`
/// is the first nonzero entry.
///
/// When every value falls in one bin (`total == cdf_min`), or there are no
/// values, the table maps everything to 0.
pub fn equalization_lut(cdf: &[u64; 256]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let total = cdf[255];
    let cdf_min = cdf.iter().copied().find(|&c| c != 0).unwrap_or(0);
    let range = total - cdf_min;
    if range == 0 {
        return lut;
    }
    for (out, &c) in lut.iter_mut().zip(cdf) {
        let scaled = c.saturating_sub(cdf_min) as f64 / range as f64 * 255.0;
        *out = scaled.round() as u8;
    }
    lut
}

/// Histogram equalization of 8-bit intensities, in place.
pub fn equalize(data: &mut [u8]) {
    let lut = equalization_lut(&cdf(&histogram(data)));
    for v in data {
        *v = lut[usize::from(*v)];
    }
}
