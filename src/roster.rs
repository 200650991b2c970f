//! Static tables the generator walks: fighters, divisions and the
//! background palette.

/// A fighter that gets a poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FighterEntry {
    pub slug: &'static str,
    pub label: &'static str,
}

/// A weight division that gets a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub weight_limit: &'static str,
}

/// Gradient endpoints, `start` at the top and `end` at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub start: &'static str,
    pub end: &'static str,
}

impl ColorPair {
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }
}

pub const TAGLINE: &str = "UFC TWO PER DIVISION";

pub const PALETTE: [ColorPair; 6] = [
    ColorPair::new("#0ea5e9", "#0b1220"),
    ColorPair::new("#e11d48", "#121a2b"),
    ColorPair::new("#9333ea", "#111827"),
    ColorPair::new("#14b8a6", "#0b1220"),
    ColorPair::new("#f97316", "#121a2b"),
    ColorPair::new("#64748b", "#0b1220"),
];

/// Palette entry for the `index`-th row of a table. Wraps around, so every
/// row gets a pair no matter how long the table grows.
pub fn palette_color(index: usize) -> ColorPair {
    PALETTE[index % PALETTE.len()]
}

const fn fighter(slug: &'static str, label: &'static str) -> FighterEntry {
    FighterEntry { slug, label }
}

const fn division(
    slug: &'static str,
    title: &'static str,
    weight_limit: &'static str,
) -> DivisionEntry {
    DivisionEntry {
        slug,
        title,
        weight_limit,
    }
}

pub const FIGHTERS: &[FighterEntry] = &[
    fighter("placeholder", "UFC"),
    fighter("alexandre-pantoja", "Pantoja"),
    fighter("brandon-royval", "Royval"),
    fighter("sean-omalley", "O'Malley"),
    fighter("merab-dvalishvili", "Merab"),
    fighter("ilia-topuria", "Topuria"),
    fighter("max-holloway", "Holloway"),
    fighter("islam-makhachev", "Makhachev"),
    fighter("arman-tsarukyan", "Tsarukyan"),
    fighter("leon-edwards", "Edwards"),
    fighter("belal-muhammad", "Belal"),
    fighter("dricus-du-plessis", "Du Plessis"),
    fighter("israel-adesanya", "Adesanya"),
    fighter("alex-pereira", "Pereira"),
    fighter("magomed-ankalaev", "Ankalaev"),
    fighter("jon-jones", "Jon Jones"),
    fighter("tom-aspinall", "Aspinall"),
    fighter("zhang-weili", "Zhang"),
    fighter("yan-xiaonan", "Yan"),
    fighter("alexa-grasso", "Grasso"),
    fighter("valentina-shevchenko", "Shevchenko"),
    fighter("raquel-pennington", "Pennington"),
    fighter("julianna-pena", "Peña"),
];

pub const DIVISIONS: &[DivisionEntry] = &[
    division("mens-flyweight", "Men’s Flyweight", "125 lb"),
    division("mens-bantamweight", "Men’s Bantamweight", "135 lb"),
    division("mens-featherweight", "Men’s Featherweight", "145 lb"),
    division("mens-lightweight", "Men’s Lightweight", "155 lb"),
    division("mens-welterweight", "Men’s Welterweight", "170 lb"),
    division("mens-middleweight", "Men’s Middleweight", "185 lb"),
    division("mens-light-heavyweight", "Men’s Light Heavyweight", "205 lb"),
    division("mens-heavyweight", "Men’s Heavyweight", "265 lb"),
    division("womens-strawweight", "Women’s Strawweight", "115 lb"),
    division("womens-flyweight", "Women’s Flyweight", "125 lb"),
    division("womens-bantamweight", "Women’s Bantamweight", "135 lb"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_cycles_by_index() {
        assert_eq!(palette_color(0), PALETTE[0]);
        assert_eq!(palette_color(5), PALETTE[5]);
        assert_eq!(palette_color(6), PALETTE[0]);
        assert_eq!(palette_color(22), PALETTE[4]);
        // Far past any table length the cycle still closes.
        assert_eq!(palette_color(6 * 1000 + 3), PALETTE[3]);
    }

    #[test]
    fn test_slugs_are_unique_and_file_safe() {
        let mut seen = HashSet::new();
        for slug in FIGHTERS
            .iter()
            .map(|f| f.slug)
            .chain(DIVISIONS.iter().map(|d| d.slug))
        {
            assert!(!slug.is_empty());
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "slug {slug} should be lowercase ascii with dashes"
            );
            assert!(seen.insert(slug), "duplicate slug {slug}");
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(FIGHTERS.len(), 23);
        assert_eq!(DIVISIONS.len(), 11);
        assert_eq!(FIGHTERS[0], fighter("placeholder", "UFC"));
        assert_eq!(DIVISIONS[0].weight_limit, "125 lb");
    }
}
