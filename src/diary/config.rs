use crate::animation::FlipTimeline;
use crate::error::{DiaryError, Result};
use crate::model::{Bounds, DEFAULT_PAGE_COUNT, NOTE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Largest diary a fresh store is seeded with.
pub const MAX_PAGE_COUNT: usize = 1000;

/// Keys accepted by [`DiaryConfig::get`] and [`DiaryConfig::set`], in display order.
pub const CONFIG_KEYS: [&str; 7] = [
    "page-count",
    "book-width",
    "book-height",
    "flip-delay-ms",
    "flip-duration-ms",
    "new-link",
    "log-level",
];

/// Configuration for the diary, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiaryConfig {
    /// Pages in a brand new diary. Ignored once entries are stored.
    pub page_count: usize,

    /// Size of the book container, in pixels.
    pub book_width: f64,
    pub book_height: f64,

    pub flip_delay_ms: u64,
    pub flip_duration_ms: u64,

    /// Target of the toolbar's "New" link.
    pub new_link: String,

    pub log_level: String,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            page_count: DEFAULT_PAGE_COUNT,
            book_width: 960.0,
            book_height: 600.0,
            flip_delay_ms: 20,
            flip_duration_ms: 900,
            new_link: "https://vercel.com/".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl DiaryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config = Self::read(config_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`DiaryConfig::load`] but keeps out-of-range values, so a broken
    /// file can still be shown and repaired.
    pub fn read<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DiaryError::Io)?;
        serde_json::from_str(&content).map_err(DiaryError::Serialization)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DiaryError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DiaryError::Serialization)?;
        fs::write(config_path, content).map_err(DiaryError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "page-count" => Some(self.page_count.to_string()),
            "book-width" => Some(self.book_width.to_string()),
            "book-height" => Some(self.book_height.to_string()),
            "flip-delay-ms" => Some(self.flip_delay_ms.to_string()),
            "flip-duration-ms" => Some(self.flip_duration_ms.to_string()),
            "new-link" => Some(self.new_link.clone()),
            "log-level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    /// Set `key` from its string form. The config is left unchanged on error.
    ///
    /// Only the new value is checked, so one bad key never blocks fixing another.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "page-count" => next.page_count = parse(key, value)?,
            "book-width" => next.book_width = parse(key, value)?,
            "book-height" => next.book_height = parse(key, value)?,
            "flip-delay-ms" => next.flip_delay_ms = parse(key, value)?,
            "flip-duration-ms" => next.flip_duration_ms = parse(key, value)?,
            "new-link" => next.new_link = value.to_string(),
            "log-level" => next.log_level = value.to_ascii_lowercase(),
            _ => return Err(DiaryError::Config(format!("Unknown config key: {}", key))),
        }
        next.check(key)?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        CONFIG_KEYS.into_iter().try_for_each(|key| self.check(key))
    }

    fn check(&self, key: &str) -> Result<()> {
        match key {
            "page-count"
                if self.page_count < 2
                    || self.page_count > MAX_PAGE_COUNT
                    || self.page_count % 2 != 0 =>
            {
                Err(DiaryError::Config(format!(
                    "page-count must be an even number from 2 to {}, got {}",
                    MAX_PAGE_COUNT, self.page_count
                )))
            }
            "book-width" | "book-height"
                if !(self.book_width >= NOTE_SIZE && self.book_height >= NOTE_SIZE) =>
            {
                Err(DiaryError::Config(format!(
                    "book size must be at least {0}x{0}, got {1}x{2}",
                    NOTE_SIZE, self.book_width, self.book_height
                )))
            }
            "log-level" if !LOG_LEVELS.contains(&self.log_level.as_str()) => {
                Err(DiaryError::Config(format!(
                    "log-level must be one of {}, got {}",
                    LOG_LEVELS.join(", "),
                    self.log_level
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.book_width, self.book_height)
    }

    pub fn timeline(&self) -> FlipTimeline {
        FlipTimeline::new(
            Duration::from_millis(self.flip_delay_ms),
            Duration::from_millis(self.flip_duration_ms),
        )
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DiaryError::Config(format!("Invalid value for {}: {}", key, value)))
}
