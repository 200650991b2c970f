use image::{Rgb, RgbImage, Rgba};
use roster_art::asset_gen::{banner_request, generate_with, Options};
use roster_art::render::{parse_color, text_placements, TextPlacement, SUBTITLE_COLOR, TITLE_COLOR};
use roster_art::roster::{DIVISIONS, FIGHTERS, PALETTE};
use roster_art::typography::Typeface;
use tempfile::TempDir;

fn options(root: &std::path::Path) -> Options {
    Options {
        output: root.to_path_buf(),
        ..Options::default()
    }
}

fn rgb(color: Rgba<u8>) -> Rgb<u8> {
    Rgb([color.0[0], color.0[1], color.0[2]])
}

fn distance(a: Rgb<u8>, b: Rgb<u8>) -> i32 {
    (0..3).map(|c| (a.0[c] as i32 - b.0[c] as i32).pow(2)).sum()
}

/// Pixels inside `placement`'s box that carry its text colour.
fn ink_pixels(image: &RgbImage, placement: &TextPlacement) -> usize {
    let target = rgb(placement.color);
    let x0 = placement.x.max(0) as u32;
    let y0 = placement.y.max(0) as u32;
    let x1 = ((placement.x + placement.width as i32) as u32).min(image.width());
    let y1 = ((placement.y + placement.height as i32) as u32).min(image.height());

    (y0..y1)
        .flat_map(|y| (x0..x1).map(move |x| (x, y)))
        .filter(|&(x, y)| distance(*image.get_pixel(x, y), target) <= 3 * 8 * 8)
        .count()
}

#[test]
fn test_placeholder_poster_starts_with_first_palette_colour() {
    let temp_dir = TempDir::new().unwrap();
    let written = generate_with(&FIGHTERS[..1], &[], &options(temp_dir.path())).unwrap();

    let path = temp_dir.path().join("fighters").join("placeholder.webp");
    assert_eq!(written, vec![path.clone()]);

    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (640, 800));

    let top_left = *image.get_pixel(0, 0);
    let start = rgb(parse_color("#0ea5e9").unwrap());
    let end = rgb(parse_color("#0b1220").unwrap());
    assert!(distance(top_left, start) < distance(top_left, end));
}

#[test]
fn test_palette_wraps_after_six_entries() {
    let temp_dir = TempDir::new().unwrap();
    let written = generate_with(&FIGHTERS[..8], &[], &options(temp_dir.path())).unwrap();
    assert_eq!(written.len(), 8);

    for (index, path) in written.iter().enumerate() {
        let image = image::open(path).unwrap().to_rgb8();
        // Lossless output, and row 0 is exactly the gradient start.
        let expected = rgb(parse_color(PALETTE[index % 6].start).unwrap());
        assert_eq!(*image.get_pixel(0, 0), expected, "{}", path.display());
    }
}

#[test]
fn test_flyweight_banner_shows_weight_limit() {
    let temp_dir = TempDir::new().unwrap();
    let options = options(temp_dir.path());
    generate_with(&[], &DIVISIONS[..1], &options).unwrap();

    let path = temp_dir.path().join("divisions").join("mens-flyweight.webp");
    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (1200, 480));

    // Same font resolution as the run above.
    let typeface = Typeface::resolve(options.font.as_deref());
    let placements = text_placements(&banner_request(0, &DIVISIONS[0]), &typeface);

    let title = &placements[0];
    assert_eq!(title.text, "MEN’S FLYWEIGHT");
    assert_eq!(title.color, TITLE_COLOR);
    assert!(ink_pixels(&image, title) > 0, "title ink missing");

    let subtitle = &placements[1];
    assert!(subtitle.text.contains("LIMIT: 125 LB"));
    assert_eq!(subtitle.color, SUBTITLE_COLOR);
    assert!(subtitle.y > title.y + title.height as i32);
    assert!(ink_pixels(&image, subtitle) > 0, "subtitle ink missing");

    // Nothing text-coloured outside the two text boxes in the top band.
    let band = TextPlacement {
        y: 0,
        height: 40,
        x: 0,
        width: 1200,
        ..subtitle.clone()
    };
    assert_eq!(ink_pixels(&image, &band), 0);
}
