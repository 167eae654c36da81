//! Tile types: fixed-size pixel blocks and the table of unique tiles.

use image::{imageops, RgbImage};

/// A rectangular block of pixels cut from a source image
///
/// Two tiles are equal only if every byte of every pixel is equal.
#[derive(Debug, Clone)]
pub struct Tile {
    pixels: RgbImage,
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.pixels.dimensions() == other.pixels.dimensions()
            && self.pixels.as_raw() == other.pixels.as_raw()
    }
}

impl Eq for Tile {}

impl Tile {
    /// Copy the `width` x `height` block whose top-left corner is at (`x`, `y`)
    pub fn extract(image: &RgbImage, x: u32, y: u32, width: u32, height: u32) -> Self {
        Tile {
            pixels: imageops::crop_imm(image, x, y, width, height).to_image(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Raw RGB bytes of the tile, row-major, as a lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.pixels.as_raw())
    }
}

/// Unique tiles in discovery order; a tile's index is its position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueTileTable {
    tiles: Vec<Tile>,
}

impl UniqueTileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Iterate over `(index, tile)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tile)> {
        self.tiles.iter().enumerate()
    }

    /// Index of the first entry pixel-identical to `tile`
    pub fn find(&self, tile: &Tile) -> Option<usize> {
        self.tiles.iter().position(|t| t == tile)
    }

    /// Add `tile` unless an identical entry exists. Returns the tile's index.
    pub(crate) fn insert(&mut self, tile: Tile) -> usize {
        match self.find(&tile) {
            Some(index) => index,
            None => {
                self.tiles.push(tile);
                self.tiles.len() - 1
            }
        }
    }
}
