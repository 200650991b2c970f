//! Built-in 5x7 bitmap glyphs, used when no TrueType font can be loaded.
//!
//! Each glyph is seven rows of five bits, most significant bit on the left.
//! Glyphs are scaled by an integer factor so the blocky look stays crisp.

use image::{Rgba, RgbaImage};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

type Glyph = [u8; GLYPH_HEIGHT as usize];

// Hollow box for characters the table does not cover.
const MISSING: Glyph = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

fn glyph(c: char) -> Glyph {
    match fold_accent(c) {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '\'' | '’' | '‘' => [0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        _ => MISSING,
    }
}

/// Maps accented Latin capitals onto the base letter the table knows.
fn fold_accent(c: char) -> char {
    match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        _ => c,
    }
}

/// Pixel scale used for a requested point size.
pub fn scale_for(size: f32) -> u32 {
    ((size / 10.0).round() as u32).max(1)
}

/// Width and height of `text` rendered at `scale`, one blank column
/// between glyphs.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let count = text.chars().count() as u32;
    if count == 0 {
        return (0, 0);
    }
    let width = (count * (GLYPH_WIDTH + 1) - 1) * scale;
    (width, GLYPH_HEIGHT * scale)
}

/// Paints `text` with its top-left corner at `(x, y)`. Pixels falling
/// outside the canvas are skipped.
pub fn draw_text(canvas: &mut RgbaImage, text: &str, x: i32, y: i32, scale: u32, color: Rgba<u8>) {
    let step = ((GLYPH_WIDTH + 1) * scale) as i32;
    let scale = scale as i32;

    for (i, c) in text.chars().enumerate() {
        let glyph_x = x + i as i32 * step;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = glyph_x + col as i32 * scale;
                let py = y + row as i32 * scale;
                fill_block(canvas, px, py, scale, color);
            }
        }
    }
}

fn fill_block(canvas: &mut RgbaImage, x: i32, y: i32, size: i32, color: Rgba<u8>) {
    for by in y.max(0)..(y + size).min(canvas.height() as i32) {
        for bx in x.max(0)..(x + size).min(canvas.width() as i32) {
            canvas.put_pixel(bx as u32, by as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_for_sizes() {
        assert_eq!(scale_for(64.0), 6);
        assert_eq!(scale_for(28.0), 3);
        assert_eq!(scale_for(4.0), 1);
        assert_eq!(scale_for(0.0), 1);
    }

    #[test]
    fn test_text_size() {
        assert_eq!(text_size("", 3), (0, 0));
        assert_eq!(text_size("A", 1), (5, 7));
        assert_eq!(text_size("UFC", 2), ((3 * 6 - 1) * 2, 14));
    }

    #[test]
    fn test_accents_fold_to_base_letter() {
        assert_eq!(glyph('Ñ'), glyph('N'));
        assert_eq!(glyph('É'), glyph('E'));
        assert_eq!(glyph('’'), glyph('\''));
        assert_eq!(glyph('Ж'), MISSING);
    }

    #[test]
    fn test_draw_text_paints_and_clips() {
        let mut canvas = RgbaImage::new(20, 20);
        let white = Rgba([255, 255, 255, 255]);
        draw_text(&mut canvas, "I", 0, 0, 2, white);

        // Top bar of the I spans columns 1..4 of the glyph.
        assert_eq!(*canvas.get_pixel(2, 0), white);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 0]));

        // Drawing partly off-canvas must not panic.
        draw_text(&mut canvas, "MM", 15, 15, 3, white);
        draw_text(&mut canvas, "MM", -8, -8, 3, white);
    }
}
