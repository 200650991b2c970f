use anyhow::Result;
use clap::Parser;
use roster_art::asset_gen::{self, Options};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "roster-art",
    about = "Generate placeholder fighter posters and division banners"
)]
struct Args {
    /// Output root; posters go to `fighters/`, banners to `divisions/`.
    #[clap(short, long, value_name = "DIR", default_value = "assets/img")]
    output: PathBuf,

    /// TrueType font to use instead of searching for DejaVu Sans Bold.
    #[clap(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Generate only fighter posters
    #[clap(long, conflicts_with = "divisions_only")]
    fighters_only: bool,

    /// Generate only division banners
    #[clap(long)]
    divisions_only: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Options {
            output: args.output,
            font: args.font,
            fighters: !args.divisions_only,
            divisions: !args.fighters_only,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    asset_gen::generate_assets(&args.into())?;
    Ok(())
}
