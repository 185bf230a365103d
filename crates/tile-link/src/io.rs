//! JSON configuration and report helpers.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tile_link_connect::{find_link, LinkPath, PairFinder};
use tile_link_core::{
    Anchor, Board, BoardBounds, GridCoords, GridPitch, PixelRect, TileId, DEFAULT_EMPTY_NAME,
};
use tile_link_template::{Calibration, CalibrationParams, ClassifierParams, TemplateSetParams};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_templates_dir() -> String {
    "templates".to_owned()
}

fn default_empty_name() -> String {
    DEFAULT_EMPTY_NAME.to_owned()
}

/// Everything needed to run a hint session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLinkConfig {
    /// Directory holding one `<name>.png` per tile kind.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default)]
    pub pitch: GridPitch,
    #[serde(default)]
    pub templates: TemplateSetParams,
    #[serde(default)]
    pub classifier: ClassifierParams,
    #[serde(default)]
    pub calibration: CalibrationParams,
}

impl Default for TileLinkConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            pitch: GridPitch::default(),
            templates: TemplateSetParams::default(),
            classifier: ClassifierParams::default(),
            calibration: CalibrationParams::default(),
        }
    }
}

impl TileLinkConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn templates_dir(&self) -> PathBuf {
        PathBuf::from(&self.templates_dir)
    }
}

/// One discovered cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    pub coords: GridCoords,
    /// Template name; empty slots carry the report's `empty_name`.
    pub tile: String,
    pub rect: PixelRect,
}

/// One removable pair and the route joining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    pub a: GridCoords,
    pub b: GridCoords,
    pub path: LinkPath,
}

impl PairReport {
    fn resolve(board: &Board, (a, b): (GridCoords, GridCoords)) -> Option<Self> {
        find_link(board, a, b).map(|path| Self { a, b, path })
    }
}

/// Analysis of one frame: the board in discovery order and its removable
/// pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame_path: String,
    pub frame_width: usize,
    pub frame_height: usize,
    pub pitch: GridPitch,
    pub anchor: Anchor,
    /// Template name of the empty slot in `cells`.
    #[serde(default = "default_empty_name")]
    pub empty_name: String,
    #[serde(default)]
    pub calibration: Option<Calibration>,
    #[serde(default)]
    pub bounds: Option<BoardBounds>,
    pub cells: Vec<CellReport>,
    /// Every removable pair, or empty when only the hint was requested.
    #[serde(default)]
    pub pairs: Vec<PairReport>,
    #[serde(default)]
    pub hint: Option<PairReport>,
}

impl FrameReport {
    /// Build a report from a discovered board.
    ///
    /// Empty slots are named `empty_name`, the name the template set gives
    /// them. With `all_pairs` unset only the first pair is resolved.
    pub fn new(
        frame_path: &Path,
        frame_size: (usize, usize),
        pitch: GridPitch,
        anchor: Anchor,
        empty_name: &str,
        board: &Board,
        all_pairs: bool,
    ) -> Self {
        let cells = board
            .iter()
            .map(|(coords, cell)| CellReport {
                coords,
                tile: cell.id.name_with(empty_name).to_owned(),
                rect: cell.bounds,
            })
            .collect();

        let finder = PairFinder::new(board);
        let pairs: Vec<PairReport> = if all_pairs {
            finder
                .pairs()
                .filter_map(|p| PairReport::resolve(board, p))
                .collect()
        } else {
            Vec::new()
        };
        let hint = match pairs.first() {
            Some(first) => Some(first.clone()),
            None if all_pairs => None,
            None => finder
                .first_pair()
                .and_then(|p| PairReport::resolve(board, p)),
        };

        Self {
            frame_path: frame_path.to_string_lossy().into_owned(),
            frame_width: frame_size.0,
            frame_height: frame_size.1,
            pitch,
            anchor,
            empty_name: empty_name.to_owned(),
            calibration: None,
            bounds: board.bounds(),
            cells,
            pairs,
            hint,
        }
    }

    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = Some(calibration);
    }

    /// Cell identities in discovery order, resolved against `empty_name`.
    pub fn tile_ids(&self) -> impl Iterator<Item = (GridCoords, TileId)> + '_ {
        self.cells
            .iter()
            .map(|cell| (cell.coords, TileId::from_name(&cell.tile, &self.empty_name)))
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_link_core::Cell;

    fn board(entries: &[((i32, i32), Option<&str>)]) -> Board {
        let pitch = GridPitch::default();
        let anchor = Anchor::at(0, 0, &pitch);
        entries
            .iter()
            .map(|&((c, r), name)| {
                let coords = GridCoords::new(c, r);
                let id = name.map_or(TileId::Empty, TileId::named);
                (
                    coords,
                    Cell {
                        id,
                        bounds: anchor.rect_for(coords, &pitch),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let cfg: TileLinkConfig =
            serde_json::from_str(r#"{ "pitch": { "cell_width": 40 }, "classifier": { "min_confidence": 1.5 } }"#)
                .expect("parse");
        assert_eq!(cfg.templates_dir, "templates");
        assert_eq!(cfg.pitch.cell_width, 40);
        assert_eq!(cfg.pitch.cell_height, GridPitch::default().cell_height);
        assert_eq!(cfg.classifier.min_confidence, 1.5);
        assert_eq!(cfg.calibration, CalibrationParams::default());
        assert_eq!(cfg.templates.empty_name, "None");
    }

    #[test]
    fn config_survives_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cfg.json");
        let cfg = TileLinkConfig {
            templates_dir: "tiles".to_owned(),
            ..TileLinkConfig::default()
        };
        cfg.write_json(&path).expect("write");
        assert_eq!(TileLinkConfig::load_json(&path).expect("load"), cfg);
    }

    #[test]
    fn missing_config_is_io_error() {
        let err = TileLinkConfig::load_json("/definitely/not/here.json").expect_err("missing");
        assert!(matches!(err, ConfigIoError::Io(_)));
    }

    #[test]
    fn report_lists_cells_in_discovery_order_and_hint() {
        let b = board(&[
            ((0, 0), Some("A")),
            ((1, 0), None),
            ((2, 0), Some("A")),
            ((0, 1), Some("B")),
            ((1, 1), Some("B")),
        ]);
        let pitch = GridPitch::default();
        let anchor = Anchor::at(0, 0, &pitch);

        let hint_only = FrameReport::new(
            Path::new("f.png"),
            (400, 200),
            pitch,
            anchor,
            DEFAULT_EMPTY_NAME,
            &b,
            false,
        );
        let order: Vec<_> = hint_only.cells.iter().map(|c| c.coords).collect();
        assert_eq!(order, b.coords());
        assert!(hint_only.pairs.is_empty());
        assert_eq!(
            hint_only.hint,
            Some(PairReport {
                a: GridCoords::new(0, 0),
                b: GridCoords::new(2, 0),
                path: LinkPath::Direct,
            })
        );

        let all = FrameReport::new(
            Path::new("f.png"),
            (400, 200),
            pitch,
            anchor,
            DEFAULT_EMPTY_NAME,
            &b,
            true,
        );
        assert_eq!(all.pairs.len(), 2);
        assert_eq!(all.hint, hint_only.hint);
    }

    #[test]
    fn report_json_uses_tile_names() {
        let b = board(&[((0, 0), Some("A")), ((1, 0), None)]);
        let pitch = GridPitch::default();
        let report = FrameReport::new(
            Path::new("f.png"),
            (400, 200),
            pitch,
            Anchor::at(0, 0, &pitch),
            DEFAULT_EMPTY_NAME,
            &b,
            true,
        );
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["empty_name"], "None");
        assert_eq!(json["cells"][0]["tile"], "A");
        assert_eq!(json["cells"][1]["tile"], "None");
        assert!(json["hint"].is_null());
    }

    #[test]
    fn custom_empty_name_survives_disk() {
        let pitch = GridPitch::default();
        let anchor = Anchor::at(0, 0, &pitch);
        let b: Board = [
            (GridCoords::new(0, 0), TileId::from_name("None", "blank")),
            (GridCoords::new(1, 0), TileId::from_name("blank", "blank")),
        ]
        .into_iter()
        .map(|(coords, id)| {
            let bounds = anchor.rect_for(coords, &pitch);
            (coords, Cell { id, bounds })
        })
        .collect();
        let report = FrameReport::new(Path::new("f.png"), (400, 200), pitch, anchor, "blank", &b, true);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        report.write_json(&path).expect("write");
        let back = FrameReport::load_json(&path).expect("load");

        assert_eq!(back.empty_name, "blank");
        let names: Vec<_> = back.cells.iter().map(|c| c.tile.as_str()).collect();
        assert_eq!(names, ["None", "blank"]);
        let ids: Vec<_> = back.tile_ids().map(|(_, id)| id).collect();
        assert_eq!(ids, [TileId::named("None"), TileId::Empty]);
    }

    #[test]
    fn report_without_empty_name_uses_default() {
        let pitch = GridPitch::default();
        let b = board(&[((0, 0), None)]);
        let report = FrameReport::new(
            Path::new("f.png"),
            (400, 200),
            pitch,
            Anchor::at(0, 0, &pitch),
            DEFAULT_EMPTY_NAME,
            &b,
            false,
        );
        let mut json = serde_json::to_value(&report).expect("json");
        json.as_object_mut().expect("object").remove("empty_name");

        let back: FrameReport = serde_json::from_value(json).expect("parse");
        assert_eq!(back.empty_name, DEFAULT_EMPTY_NAME);
        assert_eq!(back.tile_ids().next(), Some((GridCoords::ORIGIN, TileId::Empty)));
    }
}
