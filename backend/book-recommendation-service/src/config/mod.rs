use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub artifacts: ArtifactConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    pub log_level: String,
}

/// Locations of the four precomputed artifacts.
///
/// Each path may point at a file or at a directory; directories are joined
/// with the default artifact file name when the loader resolves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub model_dir: String,
    pub catalog_path: String,
    pub popularity_path: String,
    pub interaction_path: String,
    pub similarity_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub default_recommendations: usize,
    pub max_recommendations: usize,
    pub default_popular_limit: usize,
    pub default_search_limit: usize,
    pub max_search_limit: usize,
    pub symmetry_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_recommendations: 5,
            max_recommendations: 100,
            default_popular_limit: 50,
            default_search_limit: 10,
            max_search_limit: 50,
            symmetry_tolerance: 1e-6,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_recommendations == 0 {
            return Err(AppError::Configuration(
                "MAX_RECOMMENDATIONS must be at least 1".to_string(),
            ));
        }

        if self.default_recommendations == 0
            || self.default_recommendations > self.max_recommendations
        {
            return Err(AppError::Configuration(format!(
                "DEFAULT_RECOMMENDATIONS must be in [1, {}], got {}",
                self.max_recommendations, self.default_recommendations
            )));
        }

        if self.max_search_limit == 0 || self.default_search_limit == 0 {
            return Err(AppError::Configuration(
                "Search limits must be at least 1".to_string(),
            ));
        }

        if !self.symmetry_tolerance.is_finite() || self.symmetry_tolerance < 0.0 {
            return Err(AppError::Configuration(format!(
                "SYMMETRY_TOLERANCE must be a non-negative number, got {}",
                self.symmetry_tolerance
            )));
        }

        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let model_dir = std::env::var("MODEL_DIR").unwrap_or_else(|_| "./models".to_string());
        let artifact_path = |key: &str| std::env::var(key).unwrap_or_else(|_| model_dir.clone());
        let defaults = EngineConfig::default();

        let config = Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: parse_env("APP_PORT", 8000)?,
                log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            artifacts: ArtifactConfig {
                catalog_path: artifact_path("CATALOG_PATH"),
                popularity_path: artifact_path("POPULAR_PATH"),
                interaction_path: artifact_path("INTERACTION_PATH"),
                similarity_path: artifact_path("SIMILARITY_PATH"),
                model_dir: model_dir.clone(),
            },
            engine: EngineConfig {
                default_recommendations: parse_env(
                    "DEFAULT_RECOMMENDATIONS",
                    defaults.default_recommendations,
                )?,
                max_recommendations: parse_env("MAX_RECOMMENDATIONS", defaults.max_recommendations)?,
                default_popular_limit: parse_env(
                    "DEFAULT_POPULAR_LIMIT",
                    defaults.default_popular_limit,
                )?,
                default_search_limit: parse_env(
                    "DEFAULT_SEARCH_LIMIT",
                    defaults.default_search_limit,
                )?,
                max_search_limit: parse_env("MAX_SEARCH_LIMIT", defaults.max_search_limit)?,
                symmetry_tolerance: parse_env("SYMMETRY_TOLERANCE", defaults.symmetry_tolerance)?,
            },
        };

        config.engine.validate()?;
        Ok(config)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|err| {
            AppError::Configuration(format!("{} must be valid ({}): {}", key, raw, err))
        }),
        Err(_) => Ok(default),
    }
}
