//! Synthetic puzzle frames rendered from a small template set.

#![allow(dead_code)]

use std::path::Path;

use image::{imageops, Rgb, RgbImage};
use tile_link::template::{CalibrationParams, TemplateSetParams};
use tile_link::{GridPitch, TemplateSet, TileLinkConfig};

pub const PITCH: GridPitch = GridPitch {
    cell_width: 12,
    cell_height: 12,
    h_gap: 3,
    v_gap: 3,
};

/// Pixel origin of cell `(0, 0)`.
pub const ORIGIN: (i32, i32) = (5, 4);

/// Layout by row; `None` is an empty slot. Cells one pitch beyond the last
/// row or column fall outside the frame.
pub const LAYOUT: [[Option<&str>; 4]; 3] = [
    [Some("bamboo"), None, Some("bamboo"), Some("circle")],
    [Some("circle"), Some("dragon"), None, Some("dragon")],
    [Some("bamboo"), None, None, Some("circle")],
];

pub const FRAME_SIZE: (u32, u32) = (70, 55);

pub fn template(name: &str) -> RgbImage {
    match name {
        "bamboo" => RgbImage::from_fn(12, 12, |x, _| {
            if x % 4 < 2 {
                Rgb([30, 160, 60])
            } else {
                Rgb([230, 230, 200])
            }
        }),
        "circle" => RgbImage::from_fn(12, 12, |x, y| {
            let (dx, dy) = (x as i32 * 2 - 11, y as i32 * 2 - 11);
            if dx * dx + dy * dy < 70 {
                Rgb([200, 30, 40])
            } else {
                Rgb([240, 220, 120])
            }
        }),
        "dragon" => RgbImage::from_fn(12, 12, |x, y| {
            if (x + y) % 6 < 3 {
                Rgb([20, 40, 150])
            } else {
                Rgb([250, 250, 250])
            }
        }),
        _ => RgbImage::from_pixel(12, 12, Rgb([128, 128, 128])),
    }
}

pub const TEMPLATE_NAMES: [&str; 4] = ["None", "bamboo", "circle", "dragon"];

pub fn template_set() -> TemplateSet {
    TemplateSet::from_images(
        TEMPLATE_NAMES.map(|name| (name.to_owned(), template(name))),
        &PITCH,
        &TemplateSetParams::default(),
    )
    .expect("templates")
}

pub fn render_frame() -> RgbImage {
    let mut frame = RgbImage::from_pixel(FRAME_SIZE.0, FRAME_SIZE.1, Rgb([15, 15, 25]));
    let step_x = (PITCH.cell_width + PITCH.h_gap) as i64;
    let step_y = (PITCH.cell_height + PITCH.v_gap) as i64;
    for (row, line) in LAYOUT.iter().enumerate() {
        for (col, slot) in line.iter().enumerate() {
            let tile = template(slot.unwrap_or("None"));
            let x = ORIGIN.0 as i64 + col as i64 * step_x;
            let y = ORIGIN.1 as i64 + row as i64 * step_y;
            imageops::replace(&mut frame, &tile, x, y);
        }
    }
    frame
}

/// Write templates, frame and config into `dir`; returns the config path.
pub fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let templates = dir.join("templates");
    std::fs::create_dir_all(&templates).expect("templates dir");
    for name in TEMPLATE_NAMES {
        template(name)
            .save(templates.join(format!("{name}.png")))
            .expect("save template");
    }
    render_frame()
        .save(dir.join("frame.png"))
        .expect("save frame");

    let config = TileLinkConfig {
        templates_dir: templates.to_string_lossy().into_owned(),
        pitch: PITCH,
        calibration: CalibrationParams {
            search_stride: 1,
            ..CalibrationParams::default()
        },
        ..TileLinkConfig::default()
    };
    let path = dir.join("tile-link.json");
    config.write_json(&path).expect("write config");
    path
}
