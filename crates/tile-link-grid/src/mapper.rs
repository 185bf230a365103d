use std::collections::{HashSet, VecDeque};

use log::{debug, info};
use tile_link_core::{Anchor, Board, Cell, Classifier, FrameView, GridCoords, GridPitch, PixelRect};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Outcome of examining one logical coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The derived rectangle is not fully inside the frame.
    OutOfFrame,
    /// The derived rectangle has zero area.
    Degenerate,
    /// The classifier did not recognize the patch.
    Unknown,
    /// The coordinate is part of the board.
    Accepted(Cell),
}

impl Probe {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Probe::Accepted(_))
    }

    fn reason(&self) -> &'static str {
        match self {
            Probe::OutOfFrame => "out of frame",
            Probe::Degenerate => "degenerate patch",
            Probe::Unknown => "unknown patch",
            Probe::Accepted(_) => "accepted",
        }
    }
}

#[derive(Default)]
struct PruneStats {
    out_of_frame: usize,
    degenerate: usize,
    unknown: usize,
}

impl PruneStats {
    fn record(&mut self, coords: GridCoords, probe: &Probe) {
        debug!("pruned ({}, {}): {}", coords.col, coords.row, probe.reason());
        match probe {
            Probe::OutOfFrame => self.out_of_frame += 1,
            Probe::Degenerate => self.degenerate += 1,
            Probe::Unknown => self.unknown += 1,
            Probe::Accepted(_) => {}
        }
    }
}

/// Breadth-first board discovery over one captured frame.
pub struct GridMapper<'a, C: Classifier + ?Sized> {
    frame: FrameView<'a>,
    anchor: Anchor,
    pitch: GridPitch,
    classifier: &'a C,
}

impl<'a, C: Classifier + ?Sized> GridMapper<'a, C> {
    pub fn new(frame: FrameView<'a>, anchor: Anchor, pitch: GridPitch, classifier: &'a C) -> Self {
        Self {
            frame,
            anchor,
            pitch,
            classifier,
        }
    }

    /// Pixel rectangle of `coords` in this frame.
    pub fn rect_for(&self, coords: GridCoords) -> PixelRect {
        self.anchor.rect_for(coords, &self.pitch)
    }

    /// Examine one coordinate. This is the single gate deciding whether a
    /// coordinate is recorded and expanded; it calls the classifier at most
    /// once and only for in-frame, non-degenerate rectangles.
    pub fn probe(&self, coords: GridCoords) -> Probe {
        let rect = self.rect_for(coords);
        if rect.is_degenerate() {
            return Probe::Degenerate;
        }
        let Some(patch) = self.frame.patch(rect) else {
            return Probe::OutOfFrame;
        };
        match self.classifier.classify(&patch) {
            Some(id) => Probe::Accepted(Cell { id, bounds: rect }),
            None => Probe::Unknown,
        }
    }

    /// Whether `coords` would be recorded and have its neighbors enqueued.
    pub fn should_expand(&self, coords: GridCoords) -> bool {
        self.probe(coords).is_accepted()
    }

    /// Run the BFS from the anchor and return the discovered board.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self), fields(width = self.frame.width, height = self.frame.height))
    )]
    pub fn discover(&self) -> Board {
        let mut frontier = VecDeque::from([GridCoords::ORIGIN]);
        let mut visited = HashSet::from([GridCoords::ORIGIN]);
        let mut cells = Vec::new();
        let mut stats = PruneStats::default();

        while let Some(coords) = frontier.pop_front() {
            match self.probe(coords) {
                Probe::Accepted(cell) => {
                    cells.push((coords, cell));
                    for next in coords.neighbors() {
                        if visited.insert(next) {
                            frontier.push_back(next);
                        }
                    }
                }
                other => stats.record(coords, &other),
            }
        }

        self.finish(cells, &stats)
    }

    /// Same result as [`GridMapper::discover`], classifying each BFS level in
    /// parallel. Levels are committed in frontier order, so both the cell set
    /// and the discovery order match the sequential run.
    #[cfg(feature = "rayon")]
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self), fields(width = self.frame.width, height = self.frame.height))
    )]
    pub fn discover_parallel(&self) -> Board {
        let mut level = vec![GridCoords::ORIGIN];
        let mut visited = HashSet::from([GridCoords::ORIGIN]);
        let mut cells = Vec::new();
        let mut stats = PruneStats::default();

        while !level.is_empty() {
            let probes: Vec<Probe> = level.par_iter().map(|&g| self.probe(g)).collect();
            let mut next_level = Vec::new();
            for (coords, probe) in level.into_iter().zip(probes) {
                match probe {
                    Probe::Accepted(cell) => {
                        cells.push((coords, cell));
                        for next in coords.neighbors() {
                            if visited.insert(next) {
                                next_level.push(next);
                            }
                        }
                    }
                    other => stats.record(coords, &other),
                }
            }
            level = next_level;
        }

        self.finish(cells, &stats)
    }

    fn finish(&self, cells: Vec<(GridCoords, Cell)>, stats: &PruneStats) -> Board {
        let board: Board = cells.into_iter().collect();
        info!(
            "discovered {} cells (pruned: {} out of frame, {} degenerate, {} unknown)",
            board.len(),
            stats.out_of_frame,
            stats.degenerate,
            stats.unknown
        );
        board
    }
}

/// Convenience wrapper around [`GridMapper::discover`].
pub fn discover<C: Classifier + ?Sized>(
    frame: FrameView<'_>,
    anchor: Anchor,
    pitch: GridPitch,
    classifier: &C,
) -> Board {
    GridMapper::new(frame, anchor, pitch, classifier).discover()
}
