pub mod asset_gen;
pub mod bitmap_font;
pub mod render;
pub mod roster;
pub mod typography;
