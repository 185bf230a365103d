use image::{ImageBuffer, RgbImage};
use tile_link_core::{FramePatch, FrameView};

/// Borrow an `image::RgbImage` as a `tile-link-core` frame view.
pub fn frame_view(img: &RgbImage) -> FrameView<'_> {
    FrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy a frame view into an owned `RgbImage`.
///
/// A view whose buffer is shorter than its dimensions yields a black image.
pub fn frame_image(frame: &FrameView<'_>) -> RgbImage {
    let (w, h) = (frame.width as u32, frame.height as u32);
    ImageBuffer::from_raw(w, h, frame.data.to_vec()).unwrap_or_else(|| RgbImage::new(w, h))
}

/// Copy a patch into an owned `RgbImage`.
pub fn patch_image(patch: &FramePatch<'_>) -> RgbImage {
    let (w, h) = (patch.width() as u32, patch.height() as u32);
    ImageBuffer::from_raw(w, h, patch.to_rgb_vec()).unwrap_or_else(|| RgbImage::new(w, h))
}
