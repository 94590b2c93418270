use std::str::FromStr;

use camino::Utf8PathBuf;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::GeodataError;
use crate::wget::{WgetRunner, redacted_command};

pub const DEFAULT_BASE_URL: &str =
    "https://nrt4.modaps.eosdis.nasa.gov/api/v2/content/archives/allData/61";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelector {
    Today,
    Yesterday,
    On(NaiveDate),
}

impl DateSelector {
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateSelector::Today => today,
            DateSelector::Yesterday => today.checked_sub_days(Days::new(1)).unwrap_or(today),
            DateSelector::On(date) => *date,
        }
    }

    pub fn resolve_local(&self) -> NaiveDate {
        self.resolve(chrono::Local::now().date_naive())
    }
}

impl FromStr for DateSelector {
    type Err = GeodataError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "today" => Ok(DateSelector::Today),
            "yesterday" => Ok(DateSelector::Yesterday),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map(DateSelector::On)
                .map_err(|_| GeodataError::InvalidDate(value.to_string())),
        }
    }
}

pub fn year_and_day_of_year(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.ordinal())
}

#[derive(Debug, Clone)]
pub struct FloodSettings {
    pub output_dir: Utf8PathBuf,
    pub token_file: Utf8PathBuf,
    pub base_url: String,
    // MODIS (h, v) grid tiles.
    pub tiles: Vec<(u32, u32)>,
    pub datasets: Vec<String>,
}

impl FloodSettings {
    pub fn folder_url(&self, dataset: &str, year: i32, day_of_year: u32) -> String {
        format!(
            "{}/MCDWD_L3_F{dataset}_NRT/{year:04}/{day_of_year:03}/",
            self.base_url.trim_end_matches('/')
        )
    }

    pub fn accept_list(&self) -> String {
        self.tiles
            .iter()
            .map(|(h, v)| format!("*h{h:02}v{v:02}*.tif"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn wget_args(&self, folder_url: &str, token: &str) -> Vec<String> {
        vec![
            "-e".to_string(),
            "robots=off".to_string(),
            "-r".to_string(),
            "-np".to_string(),
            "-R".to_string(),
            ".html,.tmp".to_string(),
            "-A".to_string(),
            self.accept_list(),
            "-nH".to_string(),
            "--cut-dirs=6".to_string(),
            folder_url.to_string(),
            "--header".to_string(),
            format!("Authorization: Bearer {token}"),
            "-P".to_string(),
            self.output_dir.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FloodResult {
    pub year: i32,
    pub day_of_year: u32,
    pub datasets: Vec<FloodItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloodItem {
    pub dataset: String,
    pub url: String,
    pub success: bool,
}

pub struct FloodDownloader<W: WgetRunner> {
    settings: FloodSettings,
    token: String,
    wget: W,
}

impl<W: WgetRunner> FloodDownloader<W> {
    pub fn new(settings: FloodSettings, token: String, wget: W) -> Self {
        Self {
            settings,
            token,
            wget,
        }
    }

    pub fn run(&self, date: NaiveDate) -> Result<FloodResult, GeodataError> {
        let (year, day_of_year) = year_and_day_of_year(date);
        info!(%date, year, day_of_year, "fetching flood products");

        let mut datasets = Vec::with_capacity(self.settings.datasets.len());
        for dataset in &self.settings.datasets {
            let url = self.settings.folder_url(dataset, year, day_of_year);
            let args = self.settings.wget_args(&url, &self.token);
            info!(%dataset, command = %redacted_command(&args), "running wget");
            let output = self.wget.run(&args)?;
            if !output.stdout.is_empty() {
                info!(%dataset, stdout = %output.stdout, "wget output");
            }
            if output.success {
                info!(%dataset, stderr = %output.stderr, "wget finished");
            } else {
                warn!(%dataset, stderr = %output.stderr, "wget failed");
            }
            datasets.push(FloodItem {
                dataset: dataset.clone(),
                url,
                success: output.success,
            });
        }

        Ok(FloodResult {
            year,
            day_of_year,
            datasets,
        })
    }
}
