use log::{debug, info};
use tile_link_connect::PairFinder;
use tile_link_core::{Anchor, Board, Classifier, FrameView, GridCoords, GridPitch};
use tile_link_grid::GridMapper;
use tile_link_template::{
    calibrate, load_templates, Calibration, CalibrationError, CalibrationParams, TemplateClassifier,
    TemplateError, TemplateSet,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::TileLinkConfig;

/// Errors produced by [`HintSession`].
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Board discovered from one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameAnalysis {
    pub board: Board,
}

impl FrameAnalysis {
    pub fn pair_finder(&self) -> PairFinder<'_> {
        PairFinder::new(&self.board)
    }

    /// First removable pair in discovery order.
    pub fn hint(&self) -> Option<(GridCoords, GridCoords)> {
        self.pair_finder().first_pair()
    }
}

/// Discover the board of one frame from a known anchor.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(frame, classifier), fields(width = frame.width, height = frame.height))
)]
pub fn analyze_frame<C: Classifier + ?Sized>(
    frame: FrameView<'_>,
    anchor: Anchor,
    pitch: GridPitch,
    classifier: &C,
) -> FrameAnalysis {
    let mapper = GridMapper::new(frame, anchor, pitch, classifier);
    #[cfg(feature = "rayon")]
    let board = mapper.discover_parallel();
    #[cfg(not(feature = "rayon"))]
    let board = mapper.discover();
    FrameAnalysis { board }
}

/// Calibrate once, then rebuild the board from every processed frame.
///
/// The session keeps only the most recent board; each call to
/// [`HintSession::process`] replaces it.
pub struct HintSession {
    templates: TemplateSet,
    classifier: TemplateClassifier,
    pitch: GridPitch,
    empty_name: String,
    calibration_params: CalibrationParams,
    calibration: Option<Calibration>,
    anchor: Option<Anchor>,
    board: Board,
}

impl HintSession {
    pub fn new(templates: TemplateSet, config: &TileLinkConfig) -> Self {
        let classifier = TemplateClassifier::new(&templates, config.classifier);
        Self {
            templates,
            classifier,
            pitch: config.pitch,
            empty_name: config.templates.empty_name.clone(),
            calibration_params: config.calibration,
            calibration: None,
            anchor: None,
            board: Board::default(),
        }
    }

    /// Load the templates named by `config` and start a session.
    pub fn from_config(config: &TileLinkConfig) -> Result<Self, SessionError> {
        let templates = load_templates(config.templates_dir(), &config.pitch, &config.templates)?;
        Ok(Self::new(templates, config))
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn classifier(&self) -> &TemplateClassifier {
        &self.classifier
    }

    pub fn pitch(&self) -> GridPitch {
        self.pitch
    }

    /// Template name of the empty slot.
    pub fn empty_name(&self) -> &str {
        &self.empty_name
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Result of the last successful calibration, if the anchor came from one.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Locate the anchor cell in `frame` and keep it for later frames.
    pub fn calibrate(&mut self, frame: FrameView<'_>) -> Result<&Calibration, SessionError> {
        let cal = calibrate(&frame, &self.templates, &self.calibration_params)?;
        self.anchor = Some(cal.anchor);
        Ok(self.calibration.insert(cal))
    }

    /// Use a known anchor instead of calibrating.
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = Some(anchor);
        self.calibration = None;
    }

    /// Forget the anchor; the next processed frame calibrates again.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.calibration = None;
        self.board = Board::default();
    }

    /// Rebuild the board from `frame`, calibrating first if no anchor is set.
    pub fn process(&mut self, frame: FrameView<'_>) -> Result<&Board, SessionError> {
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => self.calibrate(frame)?.anchor,
        };
        let analysis = analyze_frame(frame, anchor, self.pitch, &self.classifier);
        debug!("replacing board of {} cells", self.board.len());
        self.board = analysis.board;
        info!(
            "frame {}x{}: {} cells",
            frame.width,
            frame.height,
            self.board.len()
        );
        Ok(&self.board)
    }

    /// Board built from the most recent frame.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pair_finder(&self) -> PairFinder<'_> {
        PairFinder::new(&self.board)
    }

    pub fn hint(&self) -> Option<(GridCoords, GridCoords)> {
        self.pair_finder().first_pair()
    }
}
