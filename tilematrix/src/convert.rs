//! End-to-end conversion: image file in, atlas image and matrix literal out.

use std::fs::{self, File};

use log::info;
use serde::{Deserialize, Serialize};

use crate::builder::TileAtlasBuilder;
use crate::config::Config;
use crate::error::ConversionError;
use crate::matrix::{prettify, IndexMatrix};

/// Everything produced by one conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilemapData {
    pub config: Config,
    /// Unique tiles as hex RGB bytes, in index order
    pub tiles: Vec<String>,
    pub matrix: Vec<Vec<usize>>,
    /// The C array literal, without cosmetic line breaks
    pub c_array: String,
}

/// Runs the conversion described by a [`Config`]
pub struct ImageConverter {
    config: Config,
}

impl ImageConverter {
    pub fn new(config: Config) -> Self {
        ImageConverter { config }
    }

    /// Main execution function to run the entire conversion process
    pub fn convert(&self) -> Result<TilemapData, ConversionError> {
        let img = image::open(&self.config.input_file)?.to_rgb8();
        info!(
            "Read {} ({}x{})",
            self.config.input_file,
            img.width(),
            img.height()
        );

        let atlas = TileAtlasBuilder::new(&img)
            .populate_unique_sections(self.config.tile_width, self.config.tile_height)?;

        let atlas_img = atlas.generate_atlas_image(self.config.strip_width)?;
        atlas_img.save(&self.config.output_atlas)?;
        info!("Wrote atlas to {}", self.config.output_atlas);

        let matrix = atlas.create_index_matrix()?;
        let mismatched = atlas.verify(&matrix)?;
        if mismatched != 0 {
            return Err(ConversionError::Matrix(format!(
                "{} pixels differ when rebuilding the image from the matrix",
                mismatched
            )));
        }

        let c_array = matrix.to_c_array()?;
        self.write_matrix(&c_array)?;

        let data = TilemapData {
            config: self.config.clone(),
            tiles: atlas
                .unique_tiles()
                .iter()
                .map(|(_, tile)| tile.to_hex())
                .collect(),
            matrix: matrix.to_rows(),
            c_array,
        };

        if let Some(json_path) = &self.config.output_json {
            self.write_json_file(json_path, &data)?;
        }

        Ok(data)
    }

    /// Write the C array to the configured file, or stdout
    fn write_matrix(&self, c_array: &str) -> Result<(), ConversionError> {
        let text = if self.config.pretty {
            prettify(c_array)
        } else {
            c_array.to_string()
        };

        match &self.config.output_matrix {
            Some(path) => {
                fs::write(path, format!("{}\n", text))?;
                info!("Wrote matrix to {}", path);
            }
            None => println!("{}", text),
        }

        Ok(())
    }

    /// Write JSON output file
    fn write_json_file(&self, path: &str, data: &TilemapData) -> Result<(), ConversionError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, data)?;
        info!("Wrote JSON to {}", path);
        Ok(())
    }
}

impl TilemapData {
    /// The index matrix this data was written with
    pub fn index_matrix(&self) -> Result<IndexMatrix, ConversionError> {
        IndexMatrix::from_rows(self.matrix.clone())
    }
}
