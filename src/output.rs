use std::io::{self, Write};

use serde::Serialize;

use crate::flood::FloodResult;
use crate::lidar::TileResult;
use crate::pipeline::CensusResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Summary,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_census(result: &CensusResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_tiles(result: &TileResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_flood(result: &FloodResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct SummaryOutput;

impl SummaryOutput {
    pub fn print_census(result: &CensusResult) {
        println!("census levels: {}", result.levels.len());
        for item in &result.levels {
            println!(
                "  {} request={} conversion={}",
                item.level, item.request, item.conversion
            );
            println!("    json: {}", item.json_path);
            println!("    csv:  {}", item.csv_path);
            if let Some(error) = &item.error {
                println!("    error: {error}");
            }
        }
    }

    pub fn print_tiles(result: &TileResult) {
        let downloaded = result
            .tiles
            .iter()
            .filter(|tile| tile.action == "download")
            .count();
        let failed = result
            .tiles
            .iter()
            .filter(|tile| tile.action == "failed")
            .count();
        println!(
            "lidar tiles: {} total, {downloaded} downloaded, {failed} failed",
            result.tiles.len()
        );
        for tile in result.tiles.iter().filter(|tile| tile.action == "failed") {
            println!("  failed: {}", tile.path);
        }
    }

    pub fn print_flood(result: &FloodResult) {
        println!(
            "flood products for {:04}/{:03}",
            result.year, result.day_of_year
        );
        for item in &result.datasets {
            let status = if item.success { "ok" } else { "failed" };
            println!("  F{} {status}: {}", item.dataset, item.url);
        }
    }
}
