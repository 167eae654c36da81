//! Conversion settings, loadable from a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Width of the atlas image expected by the target engine
pub const DEFAULT_STRIP_WIDTH: u32 = 64;

/// Configuration for the image conversion process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input image file path
    pub input_file: String,
    /// Output atlas image path; the format follows the extension
    pub output_atlas: String,
    /// Output file for the C array literal, printed to stdout when unset
    pub output_matrix: Option<String>,
    /// Output JSON file path (optional)
    pub output_json: Option<String>,
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Width of the atlas image in pixels
    pub strip_width: u32,
    /// Whether to line-break the C array literal
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: "test_matrix.bmp".to_string(),
            output_atlas: "unique_tiles_image.bmp".to_string(),
            output_matrix: None,
            output_json: None,
            tile_width: 8,
            tile_height: 8,
            strip_width: DEFAULT_STRIP_WIDTH,
            pretty: true,
        }
    }
}

impl Config {
    /// Read a config from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConversionError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "tile_width": 16, "output_json": "out.json" }"#).unwrap();
        assert_eq!(config.tile_width, 16);
        assert_eq!(config.tile_height, 8);
        assert_eq!(config.strip_width, DEFAULT_STRIP_WIDTH);
        assert_eq!(config.output_json.as_deref(), Some("out.json"));
        assert!(config.pretty);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tilematrix_config_{}.json", std::process::id()));
        let config = Config {
            strip_width: 128,
            pretty: false,
            ..Config::default()
        };
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/tilematrix.json"),
            Err(ConversionError::IoError(_))
        ));
    }
}
