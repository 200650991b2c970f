use crate::render::{render, Layout, RenderRequest};
use crate::roster::{palette_color, DivisionEntry, FighterEntry, DIVISIONS, FIGHTERS, TAGLINE};
use crate::typography::Typeface;
use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

pub const FIGHTERS_DIR: &str = "fighters";
pub const DIVISIONS_DIR: &str = "divisions";

#[derive(Debug, Clone)]
pub struct Options {
    /// Root that `fighters/` and `divisions/` are created under.
    pub output: PathBuf,
    /// Preferred TrueType font, tried before the system search paths.
    pub font: Option<PathBuf>,
    pub fighters: bool,
    pub divisions: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from("assets/img"),
            font: None,
            fighters: true,
            divisions: true,
        }
    }
}

/// Renders every poster and banner from the built-in tables.
pub fn generate_assets(options: &Options) -> Result<Vec<PathBuf>> {
    generate_with(FIGHTERS, DIVISIONS, options)
}

/// Renders posters for `fighters` and banners for `divisions`, in order.
/// Stops at the first failure; files written before it stay on disk.
pub fn generate_with(
    fighters: &[FighterEntry],
    divisions: &[DivisionEntry],
    options: &Options,
) -> Result<Vec<PathBuf>> {
    let typeface = Typeface::resolve(options.font.as_deref());
    if typeface.is_builtin() {
        info!("Rendering text with the built-in bitmap font");
    }

    let mut written = Vec::new();

    if options.fighters {
        let out_dir = options.output.join(FIGHTERS_DIR);
        info!("Generating {} fighter posters...", fighters.len());
        written.extend(generate_posters(fighters, &typeface, &out_dir)?);
    }

    if options.divisions {
        let out_dir = options.output.join(DIVISIONS_DIR);
        info!("Generating {} division banners...", divisions.len());
        written.extend(generate_banners(divisions, &typeface, &out_dir)?);
    }

    info!("Wrote {} images", written.len());
    Ok(written)
}

fn generate_posters(
    fighters: &[FighterEntry],
    typeface: &Typeface,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fighters
        .iter()
        .enumerate()
        .map(|(index, entry)| render(&poster_request(index, entry), typeface, out_dir))
        .collect()
}

fn generate_banners(
    divisions: &[DivisionEntry],
    typeface: &Typeface,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    divisions
        .iter()
        .enumerate()
        .map(|(index, entry)| render(&banner_request(index, entry), typeface, out_dir))
        .collect()
}

/// Poster for the `index`-th fighter: name in the middle, tagline on top.
pub fn poster_request(index: usize, entry: &FighterEntry) -> RenderRequest {
    RenderRequest::new(
        entry.slug,
        entry.label,
        TAGLINE,
        palette_color(index),
        Layout::Poster,
    )
}

/// Banner for the `index`-th division, with the weight limit underneath.
pub fn banner_request(index: usize, entry: &DivisionEntry) -> RenderRequest {
    RenderRequest::new(
        entry.slug,
        entry.title,
        format!("Limit: {}", entry.weight_limit),
        palette_color(index),
        Layout::Banner,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PALETTE;

    #[test]
    fn test_requests_cycle_palette() {
        for (index, entry) in FIGHTERS.iter().enumerate() {
            let request = poster_request(index, entry);
            assert_eq!(request.colors, PALETTE[index % 6]);
            assert_eq!(request.layout, Layout::Poster);
            assert_eq!(request.size, (640, 800));
        }
        for (index, entry) in DIVISIONS.iter().enumerate() {
            let request = banner_request(index, entry);
            assert_eq!(request.colors, PALETTE[index % 6]);
            assert_eq!(request.size, (1200, 480));
        }
    }

    #[test]
    fn test_banner_subtitle_names_weight() {
        let request = banner_request(0, &DIVISIONS[0]);
        assert_eq!(request.slug, "mens-flyweight");
        assert_eq!(request.secondary, "Limit: 125 lb");
        assert_eq!(request.file_name(), "mens-flyweight.webp");
    }

    #[test]
    fn test_disabled_tables_write_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = Options {
            output: dir.path().to_path_buf(),
            font: None,
            fighters: false,
            divisions: true,
        };

        let written = generate_with(&FIGHTERS[..2], &[], &options).unwrap();
        assert!(written.is_empty());
        assert!(!dir.path().join(FIGHTERS_DIR).exists());
    }
}
