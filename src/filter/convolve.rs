//! Spatial convolution of a pixel grid with a square kernel.
//!
//! For each output pixel the kernel is centered on the source pixel and
//! every tap that lands inside the image contributes `weight * sample`
//! per channel. Taps outside the image are skipped: nothing is mirrored,
//! clamped to the edge or zero-padded into the sum's normalization.
//! Each channel sum is then clamped to [0, 255] and rounded half away
//! from zero.
//!
//! Complexity: O(W·H·K²); allocates exactly one output grid.

use imgref::{ImgRef, ImgVec};

use super::Channels;
use super::kernel::Kernel;

/// Convolve `src` with `kernel`, returning a new grid of the same size.
///
/// The input is never modified.
pub fn convolve<P: Channels>(src: ImgRef<'_, P>, kernel: &Kernel) -> ImgVec<P> {
    let (w, h) = (src.width(), src.height());
    let n = kernel.radius();
    let stride = src.stride();
    let buf = src.buf();

    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (ky, weights) in kernel.rows().enumerate() {
                // Source row y + ky - n, skipped when outside [0, h).
                let Some(sy) = (y + ky).checked_sub(n).filter(|&sy| sy < h) else {
                    continue;
                };
                let row = &buf[sy * stride..sy * stride + w];
                for (kx, &weight) in weights.iter().enumerate() {
                    let Some(sx) = (x + kx).checked_sub(n).filter(|&sx| sx < w) else {
                        continue;
                    };
                    let sample = row[sx].to_channels();
                    for (sum, &c) in acc.iter_mut().zip(&sample[..P::COUNT]) {
                        *sum += weight * f32::from(c);
                    }
                }
            }
            out.push(P::from_channels(acc.map(clamp_round)));
        }
    }
    ImgVec::new(out, w, h)
}

/// Clamp to [0, 255], then round half away from zero.
#[inline]
pub(crate) fn clamp_round(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn ramp(w: usize, h: usize) -> ImgVec<RGB8> {
        let pixels = (0..w * h)
            .map(|i| RGB8::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
            .collect();
        ImgVec::new(pixels, w, h)
    }

    #[test]
    fn identity_preserves_every_pixel() {
        let src = ramp(5, 4);
        let out = convolve(src.as_ref(), &Kernel::identity(3).unwrap());
        assert_eq!(out.buf(), src.buf());

        let out = convolve(src.as_ref(), &Kernel::identity(5).unwrap());
        assert_eq!(out.buf(), src.buf());
    }

    #[test]
    fn box_blur_uniform_interior() {
        let src = ImgVec::new(vec![RGB8::new(100, 100, 100); 25], 5, 5);
        let out = convolve(src.as_ref(), &Kernel::box_blur());
        // Interior pixels see all nine taps.
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(out.buf()[y * 5 + x], RGB8::new(100, 100, 100));
            }
        }
        // A corner sees four taps of 100/9 each.
        assert_eq!(out.buf()[0], RGB8::new(44, 44, 44));
    }

    #[test]
    fn out_of_range_taps_are_skipped() {
        // 1x1 image: only the center tap lands.
        let src = ImgVec::new(vec![200u8], 1, 1);
        let k = Kernel::from_rows([[9.0, 9.0, 9.0], [9.0, 0.5, 9.0], [9.0, 9.0, 9.0]]).unwrap();
        assert_eq!(convolve(src.as_ref(), &k).buf(), &[100u8]);
    }

    #[test]
    fn sums_are_clamped() {
        let src = ImgVec::new(vec![10u8, 200, 10], 3, 1);
        let out = convolve(src.as_ref(), &Kernel::outline());
        // center: 8*200 - 10 - 10 = 1580 -> 255; edges: 80 - 200 = -120 -> 0
        assert_eq!(out.buf(), &[0u8, 255, 0]);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(clamp_round(2.5), 3);
        assert_eq!(clamp_round(2.49), 2);
        assert_eq!(clamp_round(254.5), 255);
        assert_eq!(clamp_round(-0.4), 0);
        assert_eq!(clamp_round(1000.0), 255);
        assert_eq!(clamp_round(f32::NAN), 0);
    }

    #[test]
    fn sharpen_flat_region_unchanged() {
        let src = ImgVec::new(vec![RGB8::new(30, 60, 90); 9], 3, 3);
        let out = convolve(src.as_ref(), &Kernel::sharpen());
        assert_eq!(out.buf()[4], RGB8::new(30, 60, 90));
    }

    #[test]
    fn input_is_untouched() {
        let src = ramp(4, 4);
        let before = src.buf().clone();
        let _ = convolve(src.as_ref(), &Kernel::emboss());
        assert_eq!(src.buf(), &before);
    }

    #[test]
    fn respects_source_stride() {
        // 2x2 view into a 3-wide buffer.
        let buf = [1u8, 2, 99, 3, 4, 99];
        let src = ImgRef::new_stride(&buf[..], 2, 2, 3);
        let out = convolve(src, &Kernel::identity(3).unwrap());
        assert_eq!(out.buf(), &[1u8, 2, 3, 4]);
    }
}
