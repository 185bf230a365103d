use image::{imageops, Rgb, RgbImage};
use tile_link_core::{Anchor, GridCoords, GridPitch, TileId};
use tile_link_grid::GridMapper;
use tile_link_template::{
    frame_view, ClassifierParams, TemplateClassifier, TemplateSet, TemplateSetParams,
};

const PITCH: GridPitch = GridPitch {
    cell_width: 10,
    cell_height: 10,
    h_gap: 2,
    v_gap: 2,
};

fn ring() -> RgbImage {
    RgbImage::from_fn(10, 10, |x, y| {
        let d = (x as i32 * 2 - 9).abs().max((y as i32 * 2 - 9).abs());
        if d > 5 {
            Rgb([220, 40, 40])
        } else {
            Rgb([250, 240, 210])
        }
    })
}

fn stripe() -> RgbImage {
    RgbImage::from_fn(10, 10, |_, y| {
        if y % 4 < 2 {
            Rgb([40, 90, 200])
        } else {
            Rgb([230, 230, 230])
        }
    })
}

fn blank() -> RgbImage {
    RgbImage::from_pixel(10, 10, Rgb([128, 128, 128]))
}

fn templates() -> TemplateSet {
    TemplateSet::from_images(
        [
            ("None".to_owned(), blank()),
            ("ring".to_owned(), ring()),
            ("stripe".to_owned(), stripe()),
        ],
        &PITCH,
        &TemplateSetParams::default(),
    )
    .expect("templates")
}

/// A 3x2 board at (2, 2) inside a frame whose dark margin is wide enough to
/// hold further grid cells.
fn frame() -> RgbImage {
    let mut frame = RgbImage::new(60, 40);
    let layout = [[ring(), blank(), ring()], [stripe(), stripe(), blank()]];
    for (row, line) in layout.iter().enumerate() {
        for (col, tile) in line.iter().enumerate() {
            let (x, y) = (2 + col as i64 * 12, 2 + row as i64 * 12);
            imageops::replace(&mut frame, tile, x, y);
        }
    }
    frame
}

#[test]
fn confident_classifier_stops_at_the_board_margin() {
    let set = templates();
    let classifier = TemplateClassifier::new(
        &set,
        // Flat templates cannot correlate, so an exact empty slot scores 1.6.
        ClassifierParams {
            min_confidence: 1.5,
            ..ClassifierParams::default()
        },
    );
    let img = frame();
    let mapper = GridMapper::new(frame_view(&img), Anchor::at(2, 2, &PITCH), PITCH, &classifier);

    // Margin cells are inside the frame but not recognized.
    assert!(!mapper.should_expand(GridCoords::new(3, 0)));
    assert!(!mapper.should_expand(GridCoords::new(0, 2)));

    let board = mapper.discover();
    assert_eq!(board.len(), 6);
    let ring = TileId::named("ring");
    let stripe = TileId::named("stripe");
    assert_eq!(board.id_at(GridCoords::new(0, 0)), Some(&ring));
    assert_eq!(board.id_at(GridCoords::new(1, 0)), Some(&TileId::Empty));
    assert_eq!(board.id_at(GridCoords::new(2, 0)), Some(&ring));
    assert_eq!(board.id_at(GridCoords::new(0, 1)), Some(&stripe));
    assert_eq!(board.id_at(GridCoords::new(1, 1)), Some(&stripe));
    assert_eq!(board.id_at(GridCoords::new(2, 1)), Some(&TileId::Empty));
}
