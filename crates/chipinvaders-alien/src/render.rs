//! Combinational sprite renderer.
//!
//! Maps a scan coordinate to the entity's pixel. No state, no clock: it
//! reads whatever position was committed on the last edge.

use crate::bitmap::SpriteBitmap;

/// Pixel at (`scan_x`, `scan_y`) for a sprite whose top-left corner is at
/// `position`.
///
/// Returns 0 when `alive` is false or the scan lies outside the bounding
/// box `[x, x + width * scale) × [y, y + height * scale)`. Inside, each
/// bitmap cell covers a `scale × scale` block; at scale 1 this is
/// `bitmap[scan_y - y][scan_x - x]`.
#[must_use]
pub fn render(
    scan_x: u16,
    scan_y: u16,
    position: (u16, u16),
    bitmap: &SpriteBitmap,
    scale: u16,
    alive: bool,
) -> u8 {
    if !alive {
        return 0;
    }
    let (x, y) = position;
    if scan_x < x || scan_y < y {
        return 0;
    }

    let scale = usize::from(scale.max(1));
    let dx = usize::from(scan_x - x);
    let dy = usize::from(scan_y - y);
    if dx >= bitmap.width() * scale || dy >= bitmap.height() * scale {
        return 0;
    }

    bitmap.get(dx / scale, dy / scale)
}
