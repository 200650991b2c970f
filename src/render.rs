use crate::roster::ColorPair;
use crate::typography::{TextBox, Typeface};
use anyhow::{anyhow, Context, Result};
use image::{
    codecs::webp::WebPEncoder, imageops, DynamicImage, ExtendedColorType, ImageEncoder, RgbImage,
    Rgba, RgbaImage,
};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut},
    point::Point,
    rect::Rect,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

pub const POSTER_SIZE: (u32, u32) = (640, 800);
pub const BANNER_SIZE: (u32, u32) = (1200, 480);
pub const IMAGE_EXT: &str = "webp";

const FRAME_OUTLINE: Rgba<u8> = Rgba([225, 29, 72, 90]);
const FRAME_FILL: Rgba<u8> = Rgba([11, 18, 32, 120]);
const ACCENT_LINE: Rgba<u8> = Rgba([14, 165, 233, 120]);
const ACCENT_LINE_WIDTH: f32 = 6.0;
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

pub const TITLE_COLOR: Rgba<u8> = Rgba([230, 234, 242, 255]);
pub const SUBTITLE_COLOR: Rgba<u8> = Rgba([199, 207, 220, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Tall fighter card: tagline on top, name in the middle.
    Poster,
    /// Wide division header: title above the middle, limit below it.
    Banner,
}

impl Layout {
    pub fn canvas_size(self) -> (u32, u32) {
        match self {
            Layout::Poster => POSTER_SIZE,
            Layout::Banner => BANNER_SIZE,
        }
    }

    fn title_size(self) -> f32 {
        match self {
            Layout::Poster => 64.0,
            Layout::Banner => 72.0,
        }
    }

    fn subtitle_size(self) -> f32 {
        match self {
            Layout::Poster => 28.0,
            Layout::Banner => 32.0,
        }
    }
}

/// Everything needed to draw one asset.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub slug: String,
    pub primary: String,
    pub secondary: String,
    pub colors: ColorPair,
    pub size: (u32, u32),
    pub layout: Layout,
}

impl RenderRequest {
    pub fn new(
        slug: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
        colors: ColorPair,
        layout: Layout,
    ) -> Self {
        Self {
            slug: slug.into(),
            primary: primary.into(),
            secondary: secondary.into(),
            colors,
            size: layout.canvas_size(),
            layout,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{IMAGE_EXT}", self.slug)
    }
}

/// Where a string ends up on the canvas. `x`/`y` is the ink's top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub size: f32,
    pub color: Rgba<u8>,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TextPlacement {
    fn new(text: String, size: f32, color: Rgba<u8>, bbox: TextBox, x: i32, y: i32) -> Self {
        Self {
            text,
            size,
            color,
            x,
            y,
            width: bbox.width,
            height: bbox.height,
        }
    }
}

/// Parses a CSS colour string into an opaque pixel.
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let parsed = css_color::Srgb::from_str(color).map_err(|_| anyhow!("Invalid color: {color}"))?;
    Ok(Rgba([
        channel(parsed.red),
        channel(parsed.green),
        channel(parsed.blue),
        255,
    ]))
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Top-to-bottom fade from `start` to `end`. Row `y` mixes `start` with
/// weight `1 - y / height`, so every pixel in a row shares one colour.
pub fn vertical_gradient(width: u32, height: u32, start: Rgba<u8>, end: Rgba<u8>) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for (y, row) in canvas.enumerate_rows_mut() {
        let weight = 1.0 - y as f32 / height as f32;
        let mut color = Rgba([0, 0, 0, 255]);
        for c in 0..3 {
            color.0[c] =
                (start.0[c] as f32 * weight + end.0[c] as f32 * (1.0 - weight)).round() as u8;
        }
        for (_, _, pixel) in row {
            *pixel = color;
        }
    }
    canvas
}

/// Rounded rectangle spanning `(x0, y0)..=(x1, y1)`. Pixels are replaced,
/// not blended, so this is meant for a transparent overlay layer.
fn fill_rounded_rect(
    layer: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    color: Rgba<u8>,
) {
    let width = x1 - x0 + 1;
    let height = y1 - y0 + 1;
    if width <= 0 || height <= 0 {
        return;
    }
    let radius = radius.clamp(0, width.min(height) / 2);

    if width > 2 * radius {
        draw_filled_rect_mut(
            layer,
            Rect::at(x0 + radius, y0).of_size((width - 2 * radius) as u32, height as u32),
            color,
        );
    }
    if height > 2 * radius {
        draw_filled_rect_mut(
            layer,
            Rect::at(x0, y0 + radius).of_size(width as u32, (height - 2 * radius) as u32),
            color,
        );
    }
    if radius > 0 {
        for (cx, cy) in [
            (x0 + radius, y0 + radius),
            (x1 - radius, y0 + radius),
            (x0 + radius, y1 - radius),
            (x1 - radius, y1 - radius),
        ] {
            draw_filled_circle_mut(layer, (cx, cy), radius, color);
        }
    }
}

/// Rounded frame with an `outline` ring of `stroke` pixels around `fill`.
fn draw_frame(
    layer: &mut RgbaImage,
    inset: (i32, i32),
    radius: i32,
    stroke: i32,
    outline: Rgba<u8>,
    fill: Rgba<u8>,
) {
    let (w, h) = (layer.width() as i32, layer.height() as i32);
    let (x0, y0, x1, y1) = (inset.0, inset.1, w - inset.0, h - inset.1);
    fill_rounded_rect(layer, x0, y0, x1, y1, radius, outline);
    fill_rounded_rect(
        layer,
        x0 + stroke,
        y0 + stroke,
        x1 - stroke,
        y1 - stroke,
        radius - stroke,
        fill,
    );
}

/// Straight stroke of `width` pixels, drawn as a quad around the segment.
fn draw_thick_line(
    layer: &mut RgbaImage,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return;
    }
    let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);
    let corner = |x: f32, y: f32| Point::new(x.round() as i32, y.round() as i32);
    let quad = [
        corner(from.0 + nx, from.1 + ny),
        corner(to.0 + nx, to.1 + ny),
        corner(to.0 - nx, to.1 - ny),
        corner(from.0 - nx, from.1 - ny),
    ];
    draw_polygon_mut(layer, &quad, color);
}

/// Frame and accent lines for `layout`, on a transparent layer.
fn decorations(layout: Layout, width: u32, height: u32) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(width, height, TRANSPARENT);
    let (w, h) = (width as f32, height as f32);

    match layout {
        Layout::Poster => {
            draw_frame(&mut layer, (40, 80), 48, 4, FRAME_OUTLINE, TRANSPARENT);
            draw_thick_line(
                &mut layer,
                (60.0, 160.0),
                (w - 60.0, 200.0),
                ACCENT_LINE_WIDTH,
                ACCENT_LINE,
            );
            draw_thick_line(
                &mut layer,
                (60.0, h - 160.0),
                (w - 60.0, h - 200.0),
                ACCENT_LINE_WIDTH,
                ACCENT_LINE,
            );
        }
        Layout::Banner => {
            draw_frame(&mut layer, (30, 30), 60, 6, FRAME_OUTLINE, FRAME_FILL);
            draw_thick_line(
                &mut layer,
                (80.0, h - 120.0),
                (w - 80.0, h - 90.0),
                ACCENT_LINE_WIDTH,
                ACCENT_LINE,
            );
        }
    }

    layer
}

/// Computes where the uppercased primary and secondary strings go.
/// The secondary line comes first for posters (it sits on top) and second
/// for banners.
pub fn text_placements(request: &RenderRequest, typeface: &Typeface) -> Vec<TextPlacement> {
    let (width, height) = (request.size.0 as i32, request.size.1 as i32);
    let layout = request.layout;

    let title = request.primary.to_uppercase();
    let subtitle = request.secondary.to_uppercase();
    let title_box = typeface.measure(&title, layout.title_size());
    let subtitle_box = typeface.measure(&subtitle, layout.subtitle_size());
    let centered_x = |bbox: &TextBox| (width - bbox.width as i32) / 2;

    match layout {
        Layout::Poster => vec![
            TextPlacement::new(
                subtitle,
                layout.subtitle_size(),
                SUBTITLE_COLOR,
                subtitle_box,
                centered_x(&subtitle_box),
                120,
            ),
            TextPlacement::new(
                title,
                layout.title_size(),
                TITLE_COLOR,
                title_box,
                centered_x(&title_box),
                (height - title_box.height as i32) / 2,
            ),
        ],
        Layout::Banner => vec![
            TextPlacement::new(
                title,
                layout.title_size(),
                TITLE_COLOR,
                title_box,
                centered_x(&title_box),
                height / 2 - title_box.height as i32,
            ),
            TextPlacement::new(
                subtitle,
                layout.subtitle_size(),
                SUBTITLE_COLOR,
                subtitle_box,
                centered_x(&subtitle_box),
                height / 2 + 20,
            ),
        ],
    }
}

/// Builds the finished, opaque image for `request` in memory.
pub fn compose(request: &RenderRequest, typeface: &Typeface) -> Result<RgbImage> {
    let (width, height) = request.size;
    if width == 0 || height == 0 {
        anyhow::bail!("Canvas for {} must not be empty ({width}x{height})", request.slug);
    }

    let start = parse_color(request.colors.start)?;
    let end = parse_color(request.colors.end)?;

    let mut canvas = vertical_gradient(width, height, start, end);
    let overlay = decorations(request.layout, width, height);
    imageops::overlay(&mut canvas, &overlay, 0, 0);

    for placement in text_placements(request, typeface) {
        let bbox = typeface.measure(&placement.text, placement.size);
        typeface.draw(
            &mut canvas,
            &placement.text,
            placement.x - bbox.left,
            placement.y - bbox.top,
            placement.size,
            placement.color,
        );
    }

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

/// Composes `request` and writes it to `{out_dir}/{slug}.webp`, replacing
/// any existing file. Returns the written path.
pub fn render(request: &RenderRequest, typeface: &Typeface, out_dir: &Path) -> Result<PathBuf> {
    let image = compose(request, typeface)?;

    create_dir_all(out_dir)
        .with_context(|| format!("Can't create output directory {}", out_dir.display()))?;
    let output_path = out_dir.join(request.file_name());
    save_webp(&image, &output_path)?;

    println!("Created {}", output_path.display());
    Ok(output_path)
}

fn save_webp(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    WebPEncoder::new_lossless(&mut writer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .with_context(|| format!("Failed to encode {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
