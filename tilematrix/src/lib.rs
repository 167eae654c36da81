//! Convert a background image into a deduplicated tile atlas and a matrix of
//! tile indices, emitted as a C array literal.
//!
//! ```no_run
//! use tilematrix::TileAtlasBuilder;
//!
//! let img = image::open("background.bmp")?.to_rgb8();
//! let atlas = TileAtlasBuilder::new(&img).populate_unique_sections(8, 8)?;
//! atlas.generate_atlas_image(64)?.save("unique_tiles_image.bmp")?;
//! println!("{}", atlas.create_index_matrix()?.to_c_array()?);
//! # Ok::<(), tilematrix::ConversionError>(())
//! ```

pub mod builder;
pub mod config;
pub mod convert;
pub mod error;
pub mod matrix;
pub mod tile;

pub use builder::{TileAtlas, TileAtlasBuilder};
pub use config::Config;
pub use convert::{ImageConverter, TilemapData};
pub use error::{ConversionError, DimensionsError};
pub use matrix::{prettify, serialize_matrix, IndexMatrix};
pub use tile::{Tile, UniqueTileTable};
