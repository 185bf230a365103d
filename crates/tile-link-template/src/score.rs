//! Similarity measures between equally sized images.
//!
//! All scores are in `[-1, 1]` with `1` meaning identical. Images of
//! different sizes score `0`.

use image::{GrayImage, RgbImage};

const SSIM_K1: f64 = 0.01;
const SSIM_K2: f64 = 0.03;
const DATA_RANGE: f64 = 255.0;

/// Summed-area table: `rect` returns the sum over any axis-aligned window in
/// constant time.
pub(crate) struct SumTable {
    stride: usize,
    table: Vec<f64>,
}

impl SumTable {
    pub(crate) fn new(width: usize, height: usize, value: impl Fn(usize, usize) -> f64) -> Self {
        let stride = width + 1;
        let mut table = vec![0.0; stride * (height + 1)];
        for y in 0..height {
            let mut row_sum = 0.0;
            for x in 0..width {
                row_sum += value(x, y);
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
            }
        }
        Self { stride, table }
    }

    #[inline]
    pub(crate) fn rect(&self, x: usize, y: usize, w: usize, h: usize) -> f64 {
        let s = self.stride;
        self.table[(y + h) * s + x + w] - self.table[y * s + x + w] - self.table[(y + h) * s + x]
            + self.table[y * s + x]
    }
}

/// Mean structural similarity of two grayscale images.
///
/// Local statistics use a square uniform window of `window` pixels (clamped
/// to the image size) with sample covariance; the result is averaged over
/// every window that fits entirely inside the image.
pub fn ssim_gray(a: &GrayImage, b: &GrayImage, window: usize) -> f64 {
    if a.dimensions() != b.dimensions() {
        return 0.0;
    }
    let (w, h) = (a.width() as usize, a.height() as usize);
    if w == 0 || h == 0 {
        return 0.0;
    }
    let win = window.min(w).min(h).max(1);
    let np = (win * win) as f64;
    let cov_norm = if win > 1 { np / (np - 1.0) } else { 1.0 };

    let pa = |x: usize, y: usize| a.get_pixel(x as u32, y as u32).0[0] as f64;
    let pb = |x: usize, y: usize| b.get_pixel(x as u32, y as u32).0[0] as f64;
    let sa = SumTable::new(w, h, pa);
    let sb = SumTable::new(w, h, pb);
    let saa = SumTable::new(w, h, |x, y| pa(x, y) * pa(x, y));
    let sbb = SumTable::new(w, h, |x, y| pb(x, y) * pb(x, y));
    let sab = SumTable::new(w, h, |x, y| pa(x, y) * pb(x, y));

    let c1 = (SSIM_K1 * DATA_RANGE).powi(2);
    let c2 = (SSIM_K2 * DATA_RANGE).powi(2);

    let mut total = 0.0;
    let mut count = 0usize;
    for y in 0..=h - win {
        for x in 0..=w - win {
            let ux = sa.rect(x, y, win, win) / np;
            let uy = sb.rect(x, y, win, win) / np;
            let vx = cov_norm * (saa.rect(x, y, win, win) / np - ux * ux);
            let vy = cov_norm * (sbb.rect(x, y, win, win) / np - uy * uy);
            let vxy = cov_norm * (sab.rect(x, y, win, win) / np - ux * uy);

            let num = (2.0 * ux * uy + c1) * (2.0 * vxy + c2);
            let den = (ux * ux + uy * uy + c1) * (vx + vy + c2);
            total += num / den;
            count += 1;
        }
    }
    total / count as f64
}

/// Joint RGB histogram with `bins` bins per channel, flattened.
pub(crate) fn color_histogram(img: &RgbImage, bins: usize) -> Vec<f64> {
    let bins = bins.clamp(1, 256);
    let mut hist = vec![0.0; bins * bins * bins];
    for px in img.pixels() {
        let [r, g, b] = px.0;
        let q = |v: u8| v as usize * bins / 256;
        hist[(q(r) * bins + q(g)) * bins + q(b)] += 1.0;
    }
    hist
}

/// Pearson correlation of two histograms. Flat histograms compare as `1`.
pub(crate) fn histogram_correlation(h1: &[f64], h2: &[f64]) -> f64 {
    if h1.len() != h2.len() || h1.is_empty() {
        return 0.0;
    }
    let n = h1.len() as f64;
    let m1 = h1.iter().sum::<f64>() / n;
    let m2 = h2.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut d1 = 0.0;
    let mut d2 = 0.0;
    for (a, b) in h1.iter().zip(h2) {
        let (da, db) = (a - m1, b - m2);
        num += da * db;
        d1 += da * da;
        d2 += db * db;
    }
    let den = d1 * d2;
    if den.abs() > f64::EPSILON {
        num / den.sqrt()
    } else {
        1.0
    }
}

/// Correlation of the joint colour histograms of two images.
pub fn hist_correlation(a: &RgbImage, b: &RgbImage, bins: usize) -> f64 {
    histogram_correlation(&color_histogram(a, bins), &color_histogram(b, bins))
}

/// Zero-mean normalized cross-correlation over `n` paired samples.
fn ncc_samples(n: usize, sample: impl Fn(usize) -> (f64, f64)) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let (mut sa, mut sb) = (0.0, 0.0);
    for i in 0..n {
        let (a, b) = sample(i);
        sa += a;
        sb += b;
    }
    let (ma, mb) = (sa / n as f64, sb / n as f64);
    let (mut num, mut da, mut db) = (0.0, 0.0, 0.0);
    for i in 0..n {
        let (a, b) = sample(i);
        let (a, b) = (a - ma, b - mb);
        num += a * b;
        da += a * a;
        db += b * b;
    }
    let den = (da * db).sqrt();
    if den > f64::EPSILON {
        num / den
    } else {
        0.0
    }
}

/// Normalized cross-correlation of two grayscale images.
pub fn ncc_gray(a: &GrayImage, b: &GrayImage) -> f64 {
    if a.dimensions() != b.dimensions() {
        return 0.0;
    }
    let (ra, rb) = (a.as_raw(), b.as_raw());
    ncc_samples(ra.len(), |i| (ra[i] as f64, rb[i] as f64))
}

/// Normalized cross-correlation of two colour images. Each channel is
/// centred on its own mean; products are summed over all channels.
pub fn ncc_rgb(a: &RgbImage, b: &RgbImage) -> f64 {
    if a.dimensions() != b.dimensions() {
        return 0.0;
    }
    let (ra, rb) = (a.as_raw(), b.as_raw());
    let n = ra.len() / 3;
    if n == 0 {
        return 0.0;
    }
    let mut means = [(0.0f64, 0.0f64); 3];
    for i in 0..n {
        for c in 0..3 {
            means[c].0 += ra[i * 3 + c] as f64;
            means[c].1 += rb[i * 3 + c] as f64;
        }
    }
    for m in &mut means {
        m.0 /= n as f64;
        m.1 /= n as f64;
    }
    let (mut num, mut da, mut db) = (0.0, 0.0, 0.0);
    for i in 0..n {
        for (c, (ma, mb)) in means.iter().enumerate() {
            let a = ra[i * 3 + c] as f64 - ma;
            let b = rb[i * 3 + c] as f64 - mb;
            num += a * b;
            da += a * a;
            db += b * b;
        }
    }
    let den = (da * db).sqrt();
    if den > f64::EPSILON {
        num / den
    } else {
        0.0
    }
}
