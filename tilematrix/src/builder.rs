//! Tile deduplication, atlas layout and index matrix construction.
//!
//! A [`TileAtlasBuilder`] borrows a source image and is consumed by
//! [`TileAtlasBuilder::populate_unique_sections`], which scans the image once
//! and returns a [`TileAtlas`]. The unique tile table is fixed from then on,
//! along with the tile size it was built with.

use image::{imageops, RgbImage};
use itertools::iproduct;
use log::{debug, info};

use crate::error::{check_dimensions, ConversionError, DimensionsError};
use crate::matrix::IndexMatrix;
use crate::tile::{Tile, UniqueTileTable};

/// Top-left corners of every tile, row by row, left to right
fn tile_positions(
    image_width: u32,
    image_height: u32,
    tile_width: u32,
    tile_height: u32,
) -> impl Iterator<Item = (u32, u32)> {
    iproduct!(
        (0..image_height).step_by(tile_height as usize),
        (0..image_width).step_by(tile_width as usize)
    )
    .map(|(y, x)| (x, y))
}

/// Entry point for converting an image: holds the image until it is scanned
#[derive(Debug, Clone, Copy)]
pub struct TileAtlasBuilder<'a> {
    image: &'a RgbImage,
}

impl<'a> TileAtlasBuilder<'a> {
    pub fn new(image: &'a RgbImage) -> Self {
        TileAtlasBuilder { image }
    }

    /// Cut the image into `tile_width` x `tile_height` tiles and collect the
    /// distinct ones, numbered in the order they are first seen.
    pub fn populate_unique_sections(
        self,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<TileAtlas<'a>, ConversionError> {
        let (width, height) = self.image.dimensions();
        check_dimensions(width, height, tile_width, tile_height)?;

        let mut unique_tiles = UniqueTileTable::new();
        let mut scanned = 0usize;
        for (x, y) in tile_positions(width, height, tile_width, tile_height) {
            unique_tiles.insert(Tile::extract(self.image, x, y, tile_width, tile_height));
            scanned += 1;
        }

        if unique_tiles.is_empty() {
            return Err(ConversionError::UniqueSections);
        }

        info!(
            "Found {} unique tiles in {} {}x{} tiles",
            unique_tiles.len(),
            scanned,
            tile_width,
            tile_height
        );

        Ok(TileAtlas {
            image: self.image,
            tile_width,
            tile_height,
            unique_tiles,
        })
    }
}

/// A scanned image together with its unique tile table
#[derive(Debug, Clone)]
pub struct TileAtlas<'a> {
    image: &'a RgbImage,
    tile_width: u32,
    tile_height: u32,
    unique_tiles: UniqueTileTable,
}

impl<'a> TileAtlas<'a> {
    pub fn image(&self) -> &'a RgbImage {
        self.image
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn unique_tiles(&self) -> &UniqueTileTable {
        &self.unique_tiles
    }

    /// Pack the unique tiles into an image `strip_width` pixels wide.
    ///
    /// Tiles are placed in index order, left to right, wrapping to a new row
    /// of tiles when the next one would not fit. Cells past the last tile
    /// are left black.
    pub fn generate_atlas_image(&self, strip_width: u32) -> Result<RgbImage, ConversionError> {
        if strip_width < self.tile_width {
            return Err(DimensionsError::StripTooNarrow(strip_width, self.tile_width).into());
        }

        let tiles_per_row = strip_width / self.tile_width;
        let tile_rows = (self.unique_tiles.len() as u32).div_ceil(tiles_per_row);
        let mut atlas = RgbImage::new(strip_width, tile_rows * self.tile_height);

        for (index, tile) in self.unique_tiles.iter() {
            let (x, y) = self.atlas_position(index, tiles_per_row);
            imageops::replace(&mut atlas, tile.pixels(), x as i64, y as i64);
        }

        debug!(
            "Atlas is {}x{} ({} tiles per row)",
            atlas.width(),
            atlas.height(),
            tiles_per_row
        );

        Ok(atlas)
    }

    fn atlas_position(&self, index: usize, tiles_per_row: u32) -> (u32, u32) {
        let index = index as u32;
        (
            (index % tiles_per_row) * self.tile_width,
            (index / tiles_per_row) * self.tile_height,
        )
    }

    /// Map every tile of the scanned image to its unique tile index
    pub fn create_index_matrix(&self) -> Result<IndexMatrix, ConversionError> {
        self.index_image(self.image)
    }

    /// Map every tile of `image` to the index of the identical unique tile.
    ///
    /// `image` need not be the scanned one, but each of its tiles must be
    /// present in the table; the first tile that is not fails with
    /// [`ConversionError::NoMatch`].
    pub fn index_image(&self, image: &RgbImage) -> Result<IndexMatrix, ConversionError> {
        let (width, height) = image.dimensions();
        check_dimensions(width, height, self.tile_width, self.tile_height)?;

        let rows = (height / self.tile_height) as usize;
        let cols = (width / self.tile_width) as usize;
        let mut matrix = IndexMatrix::new(rows, cols);

        for (x, y) in tile_positions(width, height, self.tile_width, self.tile_height) {
            let row = (y / self.tile_height) as usize;
            let col = (x / self.tile_width) as usize;
            let tile = Tile::extract(image, x, y, self.tile_width, self.tile_height);
            let index = self
                .unique_tiles
                .find(&tile)
                .ok_or(ConversionError::NoMatch { row, col })?;
            matrix.set(row, col, index);
        }

        debug!("Built {}x{} index matrix", rows, cols);
        Ok(matrix)
    }

    /// Draw the image described by `matrix` using the unique tiles
    pub fn reconstruct(&self, matrix: &IndexMatrix) -> Result<RgbImage, ConversionError> {
        let mut out_img = RgbImage::new(
            matrix.cols() as u32 * self.tile_width,
            matrix.rows() as u32 * self.tile_height,
        );

        for (row, indices) in matrix.iter_rows().enumerate() {
            for (col, &index) in indices.iter().enumerate() {
                let tile = self.unique_tiles.get(index).ok_or_else(|| {
                    ConversionError::Matrix(format!(
                        "index {} at row {}, column {} is outside the unique tile table ({} tiles)",
                        index,
                        row,
                        col,
                        self.unique_tiles.len()
                    ))
                })?;
                imageops::replace(
                    &mut out_img,
                    tile.pixels(),
                    col as i64 * self.tile_width as i64,
                    row as i64 * self.tile_height as i64,
                );
            }
        }

        Ok(out_img)
    }

    /// Count the pixels where the reconstruction from `matrix` differs from
    /// the scanned image
    pub fn verify(&self, matrix: &IndexMatrix) -> Result<usize, ConversionError> {
        let rebuilt = self.reconstruct(matrix)?;
        if rebuilt.dimensions() != self.image.dimensions() {
            return Err(ConversionError::Matrix(format!(
                "matrix describes a {}x{} image, expected {}x{}",
                rebuilt.width(),
                rebuilt.height(),
                self.image.width(),
                self.image.height()
            )));
        }

        Ok(rebuilt
            .pixels()
            .zip(self.image.pixels())
            .filter(|(a, b)| a != b)
            .count())
    }
}
