//! Tile template sets.

use std::fs;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tile_link_core::{GridPitch, TileId, DEFAULT_EMPTY_NAME};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::TemplateError;

/// How template files are interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSetParams {
    /// File stem of the template that depicts an empty board slot.
    pub empty_name: String,
}

impl Default for TemplateSetParams {
    fn default() -> Self {
        Self {
            empty_name: DEFAULT_EMPTY_NAME.to_owned(),
        }
    }
}

/// One reference image, normalized to the grid's cell size.
#[derive(Clone, Debug)]
pub struct Template {
    pub name: String,
    pub id: TileId,
    pub rgb: RgbImage,
    pub gray: GrayImage,
}

impl Template {
    fn new(name: String, rgb: RgbImage, pitch: &GridPitch, params: &TemplateSetParams) -> Self {
        let rgb = if rgb.dimensions() != (pitch.cell_width, pitch.cell_height) {
            imageops::resize(&rgb, pitch.cell_width, pitch.cell_height, FilterType::Triangle)
        } else {
            rgb
        };
        let gray = imageops::grayscale(&rgb);
        let id = TileId::from_name(&name, &params.empty_name);
        Self {
            name,
            id,
            rgb,
            gray,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.rgb.dimensions()
    }
}

/// Templates sorted by name, all sharing one size.
#[derive(Clone, Debug)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    /// Build a set from in-memory images. Images not matching the pitch's
    /// cell size are resized.
    pub fn from_images(
        images: impl IntoIterator<Item = (String, RgbImage)>,
        pitch: &GridPitch,
        params: &TemplateSetParams,
    ) -> Result<Self, TemplateError> {
        let mut templates: Vec<Template> = images
            .into_iter()
            .map(|(name, rgb)| Template::new(name, rgb, pitch, params))
            .collect();
        if templates.is_empty() {
            return Err(TemplateError::EmptyTemplateSet);
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates.dedup_by(|a, b| a.name == b.name);
        Ok(Self { templates })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Templates depicting an actual tile, i.e. everything but the empty slot.
    pub fn tiles(&self) -> impl Iterator<Item = &Template> + '_ {
        self.templates.iter().filter(|t| !t.id.is_empty())
    }

    /// Common template size `(width, height)`.
    pub fn cell_size(&self) -> (u32, u32) {
        self.templates[0].dimensions()
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Load every `*.png` in `dir` as a template named after its file stem.
///
/// Files that fail to decode are skipped with a warning.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(pitch, params), fields(dir = %dir.as_ref().display())))]
pub fn load_templates(
    dir: impl AsRef<Path>,
    pitch: &GridPitch,
    params: &TemplateSetParams,
) -> Result<TemplateSet, TemplateError> {
    let dir = dir.as_ref();
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match image::open(&path) {
            Ok(img) => images.push((name.to_owned(), img.to_rgb8())),
            Err(err) => warn!("skipping template {}: {err}", path.display()),
        }
    }

    if images.is_empty() {
        return Err(TemplateError::NoTemplates {
            dir: dir.to_path_buf(),
        });
    }

    let set = TemplateSet::from_images(images, pitch, params)?;
    info!("loaded {} templates from {}", set.len(), dir.display());
    Ok(set)
}
