use crate::PixelRect;

/// Borrowed RGB8 frame, row-major, 3 bytes per pixel.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // len = w*h*3
}

impl<'a> FrameView<'a> {
    /// Wrap a raw buffer; `None` if its length does not match the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Option<Self> {
        let expected = width.checked_mul(height)?.checked_mul(3)?;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Borrow the region under `rect`.
    ///
    /// Returns `None` when the rectangle is degenerate or not fully inside
    /// the frame.
    pub fn patch(&self, rect: PixelRect) -> Option<FramePatch<'a>> {
        if rect.is_degenerate() || !rect.fits_within(self.width, self.height) {
            return None;
        }
        Some(FramePatch { frame: *self, rect })
    }
}

/// A rectangular region of a frame, addressed in patch-local pixels.
#[derive(Clone, Copy, Debug)]
pub struct FramePatch<'a> {
    frame: FrameView<'a>,
    rect: PixelRect,
}

impl FramePatch<'_> {
    #[inline]
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.rect.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rect.height as usize
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        debug_assert!(x < self.width() && y < self.height());
        self.frame.pixel(
            self.rect.origin.x as usize + x,
            self.rect.origin.y as usize + y,
        )
    }

    /// Copy the patch out as a packed RGB8 buffer.
    pub fn to_rgb_vec(&self) -> Vec<u8> {
        let (w, h) = (self.width(), self.height());
        let x0 = self.rect.origin.x as usize;
        let y0 = self.rect.origin.y as usize;
        let mut out = Vec::with_capacity(w * h * 3);
        for y in y0..y0 + h {
            let start = (y * self.frame.width + x0) * 3;
            out.extend_from_slice(&self.frame.data[start..start + w * 3]);
        }
        out
    }
}
