//! Error types for tile deduplication and matrix generation.

use std::io;

use thiserror::Error;

/// Tile, image or strip dimensions that cannot be used together
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionsError {
    #[error("Tile dimension of 0 not allowed: tile width {0}, tile height {1}")]
    ZeroTileSize(u32, u32),

    #[error("Image width ({0}) is not divisible by tile width ({1})")]
    WidthNotDivisible(u32, u32),

    #[error("Image height ({0}) is not divisible by tile height ({1})")]
    HeightNotDivisible(u32, u32),

    #[error("Atlas strip width ({0}) cannot hold a tile of width {1}")]
    StripTooNarrow(u32, u32),
}

/// Errors that can occur during tile atlas conversion
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Invalid dimensions: {0}")]
    Dimensions(#[from] DimensionsError),

    #[error("Unique tile table is empty: the image has no tiles to deduplicate")]
    UniqueSections,

    #[error("Matrix error: {0}")]
    Matrix(String),

    #[error("Tile at row {row}, column {col} matches no entry in the unique tile table")]
    NoMatch { row: usize, col: usize },

    #[error("Failed to read image: {0}")]
    ImageReadError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Validate that `tile_width` x `tile_height` tiles cover an image exactly.
///
/// Every operation that walks an image tile by tile goes through this check.
pub fn check_dimensions(
    image_width: u32,
    image_height: u32,
    tile_width: u32,
    tile_height: u32,
) -> Result<(), DimensionsError> {
    if tile_width == 0 || tile_height == 0 {
        return Err(DimensionsError::ZeroTileSize(tile_width, tile_height));
    }
    if image_width % tile_width != 0 {
        return Err(DimensionsError::WidthNotDivisible(image_width, tile_width));
    }
    if image_height % tile_height != 0 {
        return Err(DimensionsError::HeightNotDivisible(
            image_height,
            tile_height,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_tile_dimension_always_fails() {
        assert_eq!(
            check_dimensions(16, 16, 0, 8),
            Err(DimensionsError::ZeroTileSize(0, 8))
        );
        assert_eq!(
            check_dimensions(0, 0, 8, 0),
            Err(DimensionsError::ZeroTileSize(8, 0))
        );
    }

    #[test]
    fn test_indivisible_dimensions() {
        assert_eq!(
            check_dimensions(20, 16, 8, 8),
            Err(DimensionsError::WidthNotDivisible(20, 8))
        );
        assert_eq!(
            check_dimensions(16, 12, 8, 8),
            Err(DimensionsError::HeightNotDivisible(12, 8))
        );
        assert!(check_dimensions(24, 16, 8, 4).is_ok());
    }

    #[test]
    fn test_message_carries_dimensions() {
        let err = ConversionError::from(DimensionsError::WidthNotDivisible(20, 8));
        let message = err.to_string();
        assert!(message.contains("20"));
        assert!(message.contains('8'));
    }
}
