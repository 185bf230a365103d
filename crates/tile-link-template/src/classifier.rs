use image::imageops::{self, FilterType};
use image::RgbImage;
use log::trace;
use serde::{Deserialize, Serialize};
use tile_link_core::{Classifier, FramePatch, TileId};

use crate::frame::patch_image;
use crate::score::{color_histogram, histogram_correlation, ncc_rgb, ssim_gray};
use crate::{Template, TemplateSet};

/// Weights and thresholds of the composite template score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// A patch is unknown unless some template scores strictly above this.
    ///
    /// The default of `0.0` only rejects patches whose best composite score
    /// is not positive, which in practice is rare; raise it to make
    /// discovery stop at board margins that are still inside the frame.
    pub min_confidence: f64,
    pub ssim_weight: f64,
    pub hist_weight: f64,
    pub ncc_weight: f64,
    /// Histogram bins per colour channel.
    pub hist_bins: usize,
    /// SSIM window side in pixels.
    pub ssim_window: usize,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            ssim_weight: 0.8,
            hist_weight: 0.8,
            ncc_weight: 0.8,
            hist_bins: 8,
            ssim_window: 7,
        }
    }
}

/// Best template for a patch.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateMatch {
    pub name: String,
    pub id: TileId,
    pub score: f64,
}

struct Prepared {
    template: Template,
    hist: Vec<f64>,
}

/// Classifies patches by their best-scoring template.
pub struct TemplateClassifier {
    prepared: Vec<Prepared>,
    params: ClassifierParams,
    cell_size: (u32, u32),
}

impl TemplateClassifier {
    pub fn new(templates: &TemplateSet, params: ClassifierParams) -> Self {
        let prepared = templates
            .iter()
            .map(|t| Prepared {
                hist: color_histogram(&t.rgb, params.hist_bins),
                template: t.clone(),
            })
            .collect();
        Self {
            prepared,
            params,
            cell_size: templates.cell_size(),
        }
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Composite score of `rgb` (already at template size) against one template.
    fn composite(&self, rgb: &RgbImage, gray: &image::GrayImage, hist: &[f64], p: &Prepared) -> f64 {
        let ssim = ssim_gray(gray, &p.template.gray, self.params.ssim_window);
        let hist = histogram_correlation(hist, &p.hist);
        let ncc = ncc_rgb(rgb, &p.template.rgb);
        self.params.ssim_weight * ssim + self.params.hist_weight * hist + self.params.ncc_weight * ncc
    }

    /// Score every template against `img` and return them in template order.
    pub fn scores(&self, img: &RgbImage) -> Vec<(&str, f64)> {
        let rgb = self.normalize(img);
        let gray = imageops::grayscale(&rgb);
        let hist = color_histogram(&rgb, self.params.hist_bins);
        self.prepared
            .iter()
            .map(|p| (p.template.name.as_str(), self.composite(&rgb, &gray, &hist, p)))
            .collect()
    }

    /// Best template scoring strictly above `min_confidence`.
    ///
    /// Ties keep the template that comes first by name.
    pub fn best_match(&self, img: &RgbImage) -> Option<TemplateMatch> {
        let mut best: Option<(&Prepared, f64)> = None;
        let mut best_score = self.params.min_confidence;

        let rgb = self.normalize(img);
        let gray = imageops::grayscale(&rgb);
        let hist = color_histogram(&rgb, self.params.hist_bins);
        for p in &self.prepared {
            let score = self.composite(&rgb, &gray, &hist, p);
            if score > best_score {
                best_score = score;
                best = Some((p, score));
            }
        }

        best.map(|(p, score)| TemplateMatch {
            name: p.template.name.clone(),
            id: p.template.id.clone(),
            score,
        })
    }

    fn normalize(&self, img: &RgbImage) -> RgbImage {
        let (w, h) = self.cell_size;
        if img.dimensions() == (w, h) {
            img.clone()
        } else {
            imageops::resize(img, w, h, FilterType::Triangle)
        }
    }
}

impl Classifier for TemplateClassifier {
    fn classify(&self, patch: &FramePatch<'_>) -> Option<TileId> {
        let found = self.best_match(&patch_image(patch));
        let rect = patch.rect();
        match &found {
            Some(m) => trace!("({}, {}) -> {} ({:.3})", rect.x(), rect.y(), m.name, m.score),
            None => trace!("({}, {}) -> unknown", rect.x(), rect.y()),
        }
        found.map(|m| m.id)
    }
}
