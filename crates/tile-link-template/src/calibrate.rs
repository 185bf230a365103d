//! Anchor calibration by template search.
//!
//! Every tile template is slid over the grayscale frame and scored with
//! zero-mean normalized cross-correlation. The best location of the best
//! template becomes the anchor rectangle of logical cell `(0, 0)`. A second,
//! colour-aware correlation at that exact spot guards against grayscale
//! look-alikes.

use image::imageops;
use image::GrayImage;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tile_link_core::{Anchor, FrameView, PixelRect};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::frame::frame_image;
use crate::score::{ncc_rgb, SumTable};
use crate::{CalibrationError, Template, TemplateSet};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    /// Minimal grayscale correlation of the best template location.
    pub min_score: f64,
    /// Minimal colour correlation at the chosen location.
    pub recheck_min_score: f64,
    /// Pixel stride of the coarse search (`1` = exhaustive).
    pub search_stride: usize,
    /// Half-size of the exhaustive window around the coarse optimum.
    pub refine_radius: usize,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            min_score: 0.6,
            recheck_min_score: 0.7,
            search_stride: 4,
            refine_radius: 3,
        }
    }
}

/// Result of a successful calibration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub anchor: Anchor,
    /// Name of the template that located the anchor.
    pub template: String,
    /// Grayscale correlation at the anchor.
    pub score: f64,
    /// Colour correlation at the anchor.
    pub recheck_score: f64,
}

/// Grayscale frame with the summed-area tables the search needs.
struct SearchImage<'a> {
    gray: &'a GrayImage,
    sum: SumTable,
    sum_sq: SumTable,
}

impl<'a> SearchImage<'a> {
    fn new(gray: &'a GrayImage) -> Self {
        let (w, h) = (gray.width() as usize, gray.height() as usize);
        let px = |x: usize, y: usize| gray.get_pixel(x as u32, y as u32).0[0] as f64;
        Self {
            gray,
            sum: SumTable::new(w, h, px),
            sum_sq: SumTable::new(w, h, |x, y| px(x, y) * px(x, y)),
        }
    }
}

/// Zero-mean template samples and their energy.
struct CenteredTemplate {
    width: usize,
    height: usize,
    values: Vec<f64>,
    energy: f64,
}

impl CenteredTemplate {
    fn new(gray: &GrayImage) -> Self {
        let raw = gray.as_raw();
        let n = raw.len().max(1) as f64;
        let mean = raw.iter().map(|&v| v as f64).sum::<f64>() / n;
        let values: Vec<f64> = raw.iter().map(|&v| v as f64 - mean).collect();
        let energy = values.iter().map(|v| v * v).sum();
        Self {
            width: gray.width() as usize,
            height: gray.height() as usize,
            values,
            energy,
        }
    }

    /// Correlation of the template placed with its top-left corner at `(x, y)`.
    fn score_at(&self, img: &SearchImage<'_>, x: usize, y: usize) -> f64 {
        let n = (self.width * self.height) as f64;
        let s = img.sum.rect(x, y, self.width, self.height);
        let s2 = img.sum_sq.rect(x, y, self.width, self.height);
        let window_energy = s2 - s * s / n;
        let den = (self.energy * window_energy).sqrt();
        if den <= f64::EPSILON {
            return 0.0;
        }

        let stride = img.gray.width() as usize;
        let data = img.gray.as_raw();
        let mut num = 0.0;
        for ty in 0..self.height {
            let row = &data[(y + ty) * stride + x..(y + ty) * stride + x + self.width];
            let tpl = &self.values[ty * self.width..(ty + 1) * self.width];
            num += row
                .iter()
                .zip(tpl)
                .map(|(&p, &t)| p as f64 * t)
                .sum::<f64>();
        }
        num / den
    }

    /// Best location in raster order: coarse stride pass, then an exhaustive
    /// pass around the coarse optimum. Ties keep the earlier location.
    fn search(&self, img: &SearchImage<'_>, params: &CalibrationParams) -> (f64, usize, usize) {
        let max_x = img.gray.width() as usize - self.width;
        let max_y = img.gray.height() as usize - self.height;
        let stride = params.search_stride.max(1);

        let mut best = (f64::NEG_INFINITY, 0, 0);
        for y in (0..=max_y).step_by(stride) {
            for x in (0..=max_x).step_by(stride) {
                let s = self.score_at(img, x, y);
                if s > best.0 {
                    best = (s, x, y);
                }
            }
        }

        if stride > 1 {
            let r = params.refine_radius;
            let (_, cx, cy) = best;
            for y in cy.saturating_sub(r)..=(cy + r).min(max_y) {
                for x in cx.saturating_sub(r)..=(cx + r).min(max_x) {
                    let s = self.score_at(img, x, y);
                    if s > best.0 {
                        best = (s, x, y);
                    }
                }
            }
        }
        best
    }
}

/// Locate the anchor cell in `frame`.
///
/// Templates are searched in parallel; the highest score wins, ties going to
/// the template that sorts first by name.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(frame, templates, params), fields(width = frame.width, height = frame.height))
)]
pub fn calibrate(
    frame: &FrameView<'_>,
    templates: &TemplateSet,
    params: &CalibrationParams,
) -> Result<Calibration, CalibrationError> {
    let candidates: Vec<&Template> = templates.tiles().collect();
    if candidates.is_empty() {
        return Err(CalibrationError::NoCandidateTemplates);
    }
    let (cell_width, cell_height) = templates.cell_size();
    if frame.width < cell_width as usize || frame.height < cell_height as usize {
        return Err(CalibrationError::FrameTooSmall {
            frame_width: frame.width,
            frame_height: frame.height,
            cell_width,
            cell_height,
        });
    }

    let rgb = frame_image(frame);
    let gray = imageops::grayscale(&rgb);
    let search_image = SearchImage::new(&gray);

    let results: Vec<(f64, usize, usize)> = candidates
        .par_iter()
        .map(|t| CenteredTemplate::new(&t.gray).search(&search_image, params))
        .collect();

    let mut best_idx = 0;
    for (i, r) in results.iter().enumerate() {
        debug!(
            "template '{}' best {:.3} at ({}, {})",
            candidates[i].name, r.0, r.1, r.2
        );
        if r.0 > results[best_idx].0 {
            best_idx = i;
        }
    }
    let template = candidates[best_idx];
    let (score, x, y) = results[best_idx];

    if score < params.min_score {
        return Err(CalibrationError::BelowThreshold {
            template: template.name.clone(),
            score,
            min_score: params.min_score,
        });
    }

    let rect = PixelRect::new(x as i32, y as i32, cell_width, cell_height);
    let roi = imageops::crop_imm(&rgb, x as u32, y as u32, cell_width, cell_height).to_image();
    let recheck_score = ncc_rgb(&roi, &template.rgb);
    if recheck_score < params.recheck_min_score {
        return Err(CalibrationError::RecheckFailed {
            template: template.name.clone(),
            score: recheck_score,
            min_score: params.recheck_min_score,
        });
    }

    info!(
        "calibrated with template '{}' at ({}, {}) score {:.3} / {:.3}",
        template.name, x, y, score, recheck_score
    );
    Ok(Calibration {
        anchor: Anchor::new(rect),
        template: template.name.clone(),
        score,
        recheck_score,
    })
}
