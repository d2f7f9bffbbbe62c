#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every field has a default, so hosts can pass partial option objects:
//!
//! ```
//! use treasure_core::PageConfig;
//!
//! let cfg = PageConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
//! assert_eq!(cfg.particle_count, 80);
//! assert_eq!(cfg.seed, Some(7));
//! ```

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::theme::Theme;

/// Default number of particles per field.
pub const DEFAULT_PARTICLE_COUNT: usize = 80;
/// Default maximum distance at which two points are linked.
pub const DEFAULT_LINK_DISTANCE: f64 = 100.0;
/// Default simulated search latency.
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 500;

/// Tunables for one mounted page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Particles generated on every (re)initialization.
    pub particle_count: usize,
    /// Links are drawn for distances strictly below this value.
    pub link_distance: f64,
    /// Delay between a query edit and its results.
    pub search_delay_ms: u64,
    /// Fixed RNG seed; `None` lets the host pick an entropy seed.
    pub seed: Option<u64>,
    /// Theme at mount time.
    pub theme: Theme,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            link_distance: DEFAULT_LINK_DISTANCE,
            search_delay_ms: DEFAULT_SEARCH_DELAY_MS,
            seed: None,
            theme: Theme::Light,
        }
    }
}

impl PageConfig {
    /// Parse a JSON options object and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !self.link_distance.is_finite() || self.link_distance <= 0.0 {
            return Err(ConfigError::LinkDistance(self.link_distance));
        }
        Ok(())
    }

    /// Search delay as a [`Duration`].
    #[must_use]
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Options were not valid JSON for [`PageConfig`].
    Parse(String),
    /// `particleCount` was zero.
    NoParticles,
    /// `linkDistance` was not a positive finite number.
    LinkDistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid page options: {msg}"),
            Self::NoParticles => write!(f, "particle count must be at least 1"),
            Self::LinkDistance(d) => write!(f, "link distance must be positive, got {d}"),
        }
    }
}

impl std::error::Error for ConfigError {}
