use std::path::PathBuf;

use clap::Parser;
use log::info;

use tilematrix::{Config, ConversionError, ImageConverter};

/// Split a background image into unique tiles and a tile index matrix
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file; command line options override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input image
    input: Option<String>,

    /// Output atlas image
    #[arg(short, long)]
    atlas: Option<String>,

    /// Write the C array literal to this file instead of stdout
    #[arg(short, long)]
    matrix: Option<String>,

    /// Write the full result as JSON
    #[arg(long)]
    json: Option<String>,

    #[arg(long)]
    tile_width: Option<u32>,

    #[arg(long)]
    tile_height: Option<u32>,

    /// Atlas width in pixels
    #[arg(long)]
    strip_width: Option<u32>,

    /// Emit the literal on a single line
    #[arg(long)]
    compact: bool,
}

impl Args {
    fn into_config(self) -> Result<Config, ConversionError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(input) = self.input {
            config.input_file = input;
        }
        if let Some(atlas) = self.atlas {
            config.output_atlas = atlas;
        }
        if self.matrix.is_some() {
            config.output_matrix = self.matrix;
        }
        if self.json.is_some() {
            config.output_json = self.json;
        }
        if let Some(w) = self.tile_width {
            config.tile_width = w;
        }
        if let Some(h) = self.tile_height {
            config.tile_height = h;
        }
        if let Some(w) = self.strip_width {
            config.strip_width = w;
        }
        if self.compact {
            config.pretty = false;
        }

        Ok(config)
    }
}

fn main() -> Result<(), ConversionError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    let data = ImageConverter::new(config).convert()?;
    info!(
        "{} unique tiles, {}x{} matrix",
        data.tiles.len(),
        data.matrix.len(),
        data.matrix.first().map(Vec::len).unwrap_or(0)
    );

    Ok(())
}
