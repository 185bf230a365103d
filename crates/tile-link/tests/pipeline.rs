mod common;

use approx::assert_relative_eq;
use common::{template_set, FRAME_SIZE, LAYOUT, ORIGIN, PITCH};
use tile_link::template::CalibrationParams;
use tile_link::{
    analyze_frame, find_link, frame_view, Anchor, GridCoords, HintSession, LinkPath, TileId,
    TileLinkConfig,
};

fn config() -> TileLinkConfig {
    TileLinkConfig {
        pitch: PITCH,
        calibration: CalibrationParams {
            search_stride: 1,
            ..CalibrationParams::default()
        },
        ..TileLinkConfig::default()
    }
}

fn expected_id(col: usize, row: usize) -> TileId {
    LAYOUT[row][col].map_or(TileId::Empty, TileId::named)
}

#[test]
fn discovers_the_rendered_board() {
    let templates = template_set();
    let session = HintSession::new(templates, &config());
    let frame = common::render_frame();
    let anchor = Anchor::at(ORIGIN.0, ORIGIN.1, &PITCH);

    let analysis = analyze_frame(frame_view(&frame), anchor, PITCH, session.classifier());
    let board = &analysis.board;

    assert_eq!(board.len(), 12);
    for (row, line) in LAYOUT.iter().enumerate() {
        for col in 0..line.len() {
            let coords = GridCoords::new(col as i32, row as i32);
            assert_eq!(board.id_at(coords), Some(&expected_id(col, row)), "{coords:?}");
        }
    }
    let bounds = board.bounds().expect("bounds");
    assert_eq!((bounds.cols(), bounds.rows()), (4, 3));
    assert_eq!(board.coords()[0], GridCoords::ORIGIN);

    let pairs: Vec<_> = analysis.pair_finder().pairs().collect();
    assert_eq!(
        pairs,
        vec![
            (GridCoords::new(0, 0), GridCoords::new(2, 0)),
            (GridCoords::new(2, 0), GridCoords::new(0, 2)),
            (GridCoords::new(1, 1), GridCoords::new(3, 1)),
        ]
    );
    assert_eq!(
        find_link(board, GridCoords::new(2, 0), GridCoords::new(0, 2)),
        Some(LinkPath::Bend {
            corner: GridCoords::new(2, 2)
        })
    );
    assert_eq!(analysis.hint(), Some(pairs[0]));
}

#[test]
fn session_uses_manual_anchor_and_replaces_board() {
    let mut session = HintSession::new(template_set(), &config());
    session.set_anchor(Anchor::at(ORIGIN.0, ORIGIN.1, &PITCH));

    let frame = common::render_frame();
    session.process(frame_view(&frame)).expect("process");
    assert_eq!(session.board().len(), 12);
    assert!(session.calibration().is_none());
    assert_eq!(
        session.hint(),
        Some((GridCoords::new(0, 0), GridCoords::new(2, 0)))
    );

    // Clear both bamboo tiles of the hint; the next frame rebuilds from scratch
    // and the emptied top row opens a bend between the circles.
    let mut next = frame.clone();
    let blank = common::template("None");
    image::imageops::replace(&mut next, &blank, ORIGIN.0 as i64, ORIGIN.1 as i64);
    image::imageops::replace(&mut next, &blank, ORIGIN.0 as i64 + 30, ORIGIN.1 as i64);
    session.process(frame_view(&next)).expect("process");

    assert_eq!(session.board().len(), 12);
    assert_eq!(session.board().id_at(GridCoords::ORIGIN), Some(&TileId::Empty));
    assert_eq!(
        session.hint(),
        Some((GridCoords::new(0, 1), GridCoords::new(3, 0)))
    );
}

#[test]
fn session_calibrates_on_a_tile_of_the_board() {
    let mut session = HintSession::new(template_set(), &config());
    let frame = common::render_frame();

    session.process(frame_view(&frame)).expect("process");
    let cal = session.calibration().expect("calibrated").clone();
    assert_relative_eq!(cal.score, 1.0, epsilon = 1e-6);
    assert_relative_eq!(cal.recheck_score, 1.0, epsilon = 1e-6);

    // The anchor lands on some tile of the rendered grid.
    let (dx, dy) = (
        cal.anchor.rect.x() - ORIGIN.0,
        cal.anchor.rect.y() - ORIGIN.1,
    );
    assert_eq!(dx % 15, 0);
    assert_eq!(dy % 15, 0);
    assert!((0..60).contains(&dx) && (0..45).contains(&dy));
    assert_eq!((cal.anchor.rect.width, cal.anchor.rect.height), (12, 12));

    // The board is the same grid, expressed relative to the new anchor.
    assert_eq!(session.board().len(), 12);
    let shift = GridCoords::new(-dx / 15, -dy / 15);
    assert!(session.board().contains(shift));
    assert_eq!(FRAME_SIZE, (frame.width(), frame.height()));
}
