use crate::bitmap_font;
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use log::{debug, warn};
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

/// Where DejaVu Sans Bold usually lives. The bare file name is tried last,
/// relative to the working directory.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/local/share/fonts/DejaVuSans-Bold.ttf",
    "/Library/Fonts/DejaVuSans-Bold.ttf",
    "DejaVuSans-Bold.ttf",
];

/// Ink bounding box of a string, relative to the origin it is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// The face all text is set in.
pub enum Typeface {
    TrueType(Font<'static>),
    Builtin,
}

impl Typeface {
    /// Picks the preferred bold face, falling back to the built-in bitmap
    /// font when nothing loads. Never fails.
    pub fn resolve(preferred: Option<&Path>) -> Self {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_SEARCH_PATHS.iter().map(PathBuf::from));

        for path in candidates {
            if !path.is_file() {
                debug!("No font at {}", path.display());
                continue;
            }
            match load_font(&path) {
                Ok(font) => {
                    debug!("Using font {}", path.display());
                    return Typeface::TrueType(font);
                }
                Err(err) => warn!("{err:#}"),
            }
        }

        warn!("No TrueType font found, using the built-in bitmap font");
        Typeface::Builtin
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    pub fn measure(&self, text: &str, size: f32) -> TextBox {
        match self {
            Typeface::TrueType(font) => measure_truetype(font, text, size),
            Typeface::Builtin => {
                let (width, height) = bitmap_font::text_size(text, bitmap_font::scale_for(size));
                TextBox {
                    left: 0,
                    top: 0,
                    width,
                    height,
                }
            }
        }
    }

    /// Draws `text` with its origin at `(x, y)`; the ink lands at
    /// `(x + box.left, y + box.top)` for the box `measure` reports.
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        size: f32,
        color: Rgba<u8>,
    ) {
        match self {
            Typeface::TrueType(font) => draw_truetype(canvas, font, text, x, y, size, color),
            Typeface::Builtin => {
                bitmap_font::draw_text(canvas, text, x, y, bitmap_font::scale_for(size), color)
            }
        }
    }
}

fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read font {}", path.display()))?;
    Font::try_from_vec(data).with_context(|| format!("Invalid font file {}", path.display()))
}

fn measure_truetype(font: &Font<'static>, text: &str, size: f32) -> TextBox {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;

    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for glyph in font.layout(text, scale, point(0.0, ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            bounds = Some(match bounds {
                None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                Some((x0, y0, x1, y1)) => (
                    x0.min(bb.min.x),
                    y0.min(bb.min.y),
                    x1.max(bb.max.x),
                    y1.max(bb.max.y),
                ),
            });
        }
    }

    match bounds {
        Some((x0, y0, x1, y1)) => TextBox {
            left: x0,
            top: y0,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        },
        None => TextBox::default(),
    }
}

fn draw_truetype(
    canvas: &mut RgbaImage,
    font: &Font<'static>,
    text: &str,
    x: i32,
    y: i32,
    size: f32,
    color: Rgba<u8>,
) {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;
    let origin = point(x as f32, y as f32 + ascent);

    for glyph in font.layout(text, scale, origin) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px >= canvas.width() as i32 || py >= canvas.height() as i32 {
                return;
            }
            blend(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
        });
    }
}

/// Source-over blend of `color` at `coverage` onto an opaque pixel.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0) * color.0[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let inv = 1.0 - alpha;
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * alpha + dst.0[c] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}
