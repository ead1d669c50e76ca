//! Headless capture: PNG screenshots and text dumps of the scanned raster.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::Simulation;

/// Scan a `width × height` raster and save it as an 8-bit greyscale PNG.
/// Ink is white, background black.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_screenshot(
    sim: &Simulation,
    width: u16,
    height: u16,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let frame = sim.render_frame(width, height);

    let file = fs::File::create(path)?;
    let w = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, u32::from(width), u32::from(height));
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let luma: Vec<u8> = frame.iter().map(|&p| if p == 1 { 0xFF } else { 0x00 }).collect();
    writer.write_image_data(&luma)?;
    Ok(())
}

/// Render a raster as `#` (ink) and `.` (background), one line per row.
#[must_use]
pub fn frame_to_text(frame: &[u8], width: u16) -> String {
    let width = usize::from(width).max(1);
    let mut out = String::with_capacity(frame.len() + frame.len() / width);
    for row in frame.chunks(width) {
        out.extend(row.iter().map(|&p| if p == 1 { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_dump_marks_ink() {
        let frame = [0, 1, 1, 0];
        assert_eq!(frame_to_text(&frame, 2), ".#\n#.\n");
    }

    #[test]
    fn screenshot_writes_png_signature() {
        use crate::{FormationConfig, SpriteBitmap};

        let bmp = SpriteBitmap::parse("0").expect("valid bitmap");
        let mut sim = Simulation::new(&FormationConfig::default(), bmp);
        sim.reset();

        let path = std::env::temp_dir().join(format!(
            "chipinvaders-capture-{}.png",
            std::process::id()
        ));
        save_screenshot(&sim, 32, 16, &path).expect("screenshot written");
        let bytes = fs::read(&path).expect("screenshot readable");
        let _ = fs::remove_file(&path);
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
