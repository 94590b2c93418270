use std::fs;
use std::ops::Range;

use camino::Utf8PathBuf;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::GeodataError;
use crate::wget::{WgetRunner, redacted_command};

pub const DEFAULT_BASE_URL: &str =
    "https://prd-tnm.s3.amazonaws.com/StagedProducts/Elevation/1m/Projects";
pub const DEFAULT_PROJECT: &str = "FL_Peninsular_FDEM_2018_D19_DRRA";

#[derive(Debug, Clone)]
pub struct LidarSettings {
    pub output_dir: Utf8PathBuf,
    pub base_url: String,
    pub project: String,
    pub utm_zone: u32,
    pub x_range: Range<u32>,
    pub y_range: Range<u32>,
}

impl LidarSettings {
    pub fn tile_file_name(&self, x: u32, y: u32) -> String {
        format!(
            "USGS_1M_{}_x{x}y{y}_{}.tif",
            self.utm_zone, self.project
        )
    }

    pub fn tile_url(&self, x: u32, y: u32) -> String {
        format!(
            "{}/{}/TIFF/{}",
            self.base_url.trim_end_matches('/'),
            self.project,
            self.tile_file_name(x, y)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TileResult {
    pub tiles: Vec<TileItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileItem {
    pub x: u32,
    pub y: u32,
    pub path: String,
    pub action: String,
}

pub struct LidarDownloader<W: WgetRunner> {
    settings: LidarSettings,
    wget: W,
}

impl<W: WgetRunner> LidarDownloader<W> {
    pub fn new(settings: LidarSettings, wget: W) -> Self {
        Self { settings, wget }
    }

    pub fn run(&self) -> Result<TileResult, GeodataError> {
        fs::create_dir_all(self.settings.output_dir.as_std_path())
            .map_err(|err| GeodataError::Filesystem(err.to_string()))?;

        let mut tiles = Vec::new();
        for x in self.settings.x_range.clone() {
            for y in self.settings.y_range.clone() {
                tiles.push(self.fetch_tile(x, y)?);
            }
        }
        Ok(TileResult { tiles })
    }

    fn fetch_tile(&self, x: u32, y: u32) -> Result<TileItem, GeodataError> {
        let file_name = self.settings.tile_file_name(x, y);
        let path = self.settings.output_dir.join(&file_name);
        let mut item = TileItem {
            x,
            y,
            path: path.to_string(),
            action: "exists".to_string(),
        };

        if path.as_std_path().exists() {
            info!(file = %file_name, "tile already exists, skipping download");
            return Ok(item);
        }

        let url = self.settings.tile_url(x, y);
        let args = vec![
            "-O".to_string(),
            path.to_string(),
            url.clone(),
            "--show-progress".to_string(),
        ];
        info!(file = %file_name, %url, command = %redacted_command(&args), "downloading tile");
        let output = self.wget.run(&args)?;
        if output.success {
            info!(file = %file_name, "downloaded tile");
            item.action = "download".to_string();
        } else {
            warn!(file = %file_name, %url, stderr = %output.stderr, "tile download failed");
            item.action = "failed".to_string();
        }
        Ok(item)
    }
}
