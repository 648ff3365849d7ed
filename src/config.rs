use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Logical grid dimensions passed through the engine as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Smallest accepted board side; anything below cannot host the start
/// snake plus a food cell with room to turn.
pub const MIN_GRID_DIMENSION: u16 = 9;

/// Largest accepted board side.
pub const MAX_GRID_DIMENSION: u16 = 512;

pub const DEFAULT_GRID_WIDTH: u16 = 20;
pub const DEFAULT_GRID_HEIGHT: u16 = 20;
pub const DEFAULT_FOOD_TARGET: u32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 30;

/// Shaded block used for every border cell.
pub const GLYPH_BORDER: char = '\u{2592}';

/// Solid block used for the head and every body segment.
pub const GLYPH_SNAKE: char = '\u{2588}';

/// Filled circle used for food; padded with a blank to fill the cell.
pub const GLYPH_FOOD: char = '\u{25cf}';

pub const GLYPH_BLANK: char = ' ';

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Session parameters for the host program.
///
/// Every field is optional in the JSON file; missing ones fall back to the
/// defaults above. `seed: None` draws a fresh seed per session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    pub food_target: u32,
    pub initial_score: u32,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            food_target: DEFAULT_FOOD_TARGET,
            initial_score: 0,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Tick interval clamped to the supported minimum.
    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS)
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Loads a session config from `path`.
///
/// Returns defaults when the file does not exist. Returns `Err` when the
/// file exists but cannot be read or parsed.
pub fn load_session_config(path: &Path) -> io::Result<SessionConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SessionConfig::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<SessionConfig>(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        load_session_config, GridSize, SessionConfig, DEFAULT_GRID_WIDTH, MIN_TICK_INTERVAL_MS,
    };

    #[test]
    fn total_cells_multiplies_dimensions() {
        let size = GridSize {
            width: 12,
            height: 9,
        };
        assert_eq!(size.total_cells(), 108);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let path = unique_test_path("missing");
        let loaded = load_session_config(&path).expect("missing file should return defaults");
        assert_eq!(loaded, SessionConfig::default());
    }

    #[test]
    fn partial_config_file_keeps_defaults_for_missing_fields() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "height": 15, "food_target": 3, "seed": 9 }"#);

        let loaded = load_session_config(&path).expect("partial file should parse");

        assert_eq!(loaded.width, DEFAULT_GRID_WIDTH);
        assert_eq!(loaded.height, 15);
        assert_eq!(loaded.food_target, 3);
        assert_eq!(loaded.seed, Some(9));
        cleanup_test_path(&path);
    }

    #[test]
    fn serialized_config_loads_back() {
        let path = unique_test_path("round_trip");
        let config = SessionConfig {
            width: 30,
            height: 12,
            food_target: 7,
            initial_score: 3,
            tick_interval_ms: 90,
            seed: Some(1234),
        };
        let json = serde_json::to_string_pretty(&config).expect("config should serialize");
        write_test_file(&path, &json);

        let loaded = load_session_config(&path).expect("written config should parse");

        assert_eq!(loaded, config);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_config_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(
            load_session_config(&path).is_err(),
            "malformed file should return Err"
        );
        cleanup_test_path(&path);
    }

    #[test]
    fn tick_interval_is_clamped() {
        let config = SessionConfig {
            tick_interval_ms: 1,
            ..SessionConfig::default()
        };
        assert_eq!(config.tick_interval_ms(), MIN_TICK_INTERVAL_MS);
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
