use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_AGE_BOUNDARIES;
use crate::census;
use crate::domain::{AdminLevel, StateFips, state_fips};
use crate::error::GeodataError;
use crate::flood::{self, FloodSettings};
use crate::lidar::{self, LidarSettings};

pub const DEFAULT_CONFIG_FILE: &str = "geodata.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub census: CensusSection,
    #[serde(default)]
    pub lidar: LidarSection,
    #[serde(default)]
    pub flood: FloodSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CensusSection {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key_file: Option<String>,
    #[serde(default)]
    pub states: Option<Vec<String>>,
    #[serde(default)]
    pub admin_levels: Option<Vec<String>>,
    #[serde(default)]
    pub age_boundaries: Option<Vec<u32>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LidarSection {
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub utm_zone: Option<u32>,
    #[serde(default)]
    pub x_range: Option<[u32; 2]>,
    #[serde(default)]
    pub y_range: Option<[u32; 2]>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FloodSection {
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub token_file: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub tiles: Option<Vec<[u32; 2]>>,
    #[serde(default)]
    pub datasets: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct CensusSettings {
    pub output_dir: Utf8PathBuf,
    pub endpoint: String,
    pub api_key_file: Utf8PathBuf,
    pub states: Vec<StateFips>,
    pub admin_levels: Vec<AdminLevel>,
    pub age_boundaries: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub census: CensusSettings,
    pub lidar: LidarSettings,
    pub flood: FloodSettings,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, GeodataError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Self::resolve_config(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| GeodataError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| GeodataError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, GeodataError> {
        let output_dir = Utf8PathBuf::from(config.output_dir.as_deref().unwrap_or("output"));

        let census = config.census;
        let states = census
            .states
            .unwrap_or_else(default_states)
            .iter()
            .map(|name| state_fips(name))
            .collect::<Result<Vec<_>, GeodataError>>()?;
        let admin_levels = census
            .admin_levels
            .unwrap_or_else(|| vec!["block group".to_string()])
            .iter()
            .map(|level| level.parse())
            .collect::<Result<Vec<AdminLevel>, GeodataError>>()?;
        let census = CensusSettings {
            output_dir,
            endpoint: census
                .endpoint
                .unwrap_or_else(|| census::DEFAULT_ENDPOINT.to_string()),
            api_key_file: Utf8PathBuf::from(
                census
                    .api_key_file
                    .unwrap_or_else(|| "api_key_US_census.txt".to_string()),
            ),
            states,
            admin_levels,
            age_boundaries: census
                .age_boundaries
                .unwrap_or_else(|| DEFAULT_AGE_BOUNDARIES.to_vec()),
        };

        let section = config.lidar;
        let [x_start, x_end] = section.x_range.unwrap_or([33, 40]);
        let [y_start, y_end] = section.y_range.unwrap_or([299, 304]);
        let lidar = LidarSettings {
            output_dir: Utf8PathBuf::from(
                section
                    .output_dir
                    .unwrap_or_else(|| "output_3DEP_tiles".to_string()),
            ),
            base_url: section
                .base_url
                .unwrap_or_else(|| lidar::DEFAULT_BASE_URL.to_string()),
            project: section
                .project
                .unwrap_or_else(|| lidar::DEFAULT_PROJECT.to_string()),
            utm_zone: section.utm_zone.unwrap_or(17),
            x_range: x_start..x_end,
            y_range: y_start..y_end,
        };

        let section = config.flood;
        let flood = FloodSettings {
            output_dir: Utf8PathBuf::from(
                section
                    .output_dir
                    .unwrap_or_else(|| "MCDWD_downloads".to_string()),
            ),
            token_file: Utf8PathBuf::from(
                section
                    .token_file
                    .unwrap_or_else(|| "earthdata_bearer_token.txt".to_string()),
            ),
            base_url: section
                .base_url
                .unwrap_or_else(|| flood::DEFAULT_BASE_URL.to_string()),
            tiles: section
                .tiles
                .map(|tiles| tiles.into_iter().map(|[h, v]| (h, v)).collect())
                .unwrap_or_else(default_flood_tiles),
            datasets: section.datasets.unwrap_or_else(default_flood_datasets),
        };

        Ok(ResolvedConfig {
            census,
            lidar,
            flood,
        })
    }
}

pub fn default_states() -> Vec<String> {
    vec![
        "Florida".to_string(),
        "Georgia".to_string(),
        "North Carolina".to_string(),
        "Tennessee".to_string(),
    ]
}

pub fn default_flood_tiles() -> Vec<(u32, u32)> {
    vec![(8, 5), (8, 6), (9, 5), (9, 6), (10, 5), (10, 6)]
}

pub fn default_flood_datasets() -> Vec<String> {
    vec![
        "1".to_string(),
        "1C".to_string(),
        "2".to_string(),
        "3".to_string(),
    ]
}
