use camino::Utf8Path;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{Catalog, build_catalog};
use crate::census::{CensusClient, parse_raw_rows};
use crate::domain::{AdminLevel, StateFips};
use crate::error::GeodataError;
use crate::query::{CensusQuery, build_query};
use crate::store::OutputStore;
use crate::transform::transform;

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub overwrite: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CensusResult {
    pub levels: Vec<LevelResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelResult {
    pub level: AdminLevel,
    pub json_path: String,
    pub csv_path: String,
    pub request: String,
    pub conversion: String,
    pub error: Option<String>,
}

pub struct CensusPipeline<C: CensusClient> {
    store: OutputStore,
    client: C,
    api_key: String,
    states: Vec<StateFips>,
    age_boundaries: Vec<u32>,
}

impl<C: CensusClient> CensusPipeline<C> {
    pub fn new(
        store: OutputStore,
        client: C,
        api_key: String,
        states: Vec<StateFips>,
        age_boundaries: Vec<u32>,
    ) -> Self {
        Self {
            store,
            client,
            api_key,
            states,
            age_boundaries,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn run(
        &self,
        levels: &[AdminLevel],
        options: PipelineOptions,
    ) -> Result<CensusResult, GeodataError> {
        let catalog = build_catalog(&self.age_boundaries)?;
        let codes = catalog.codes();
        let queries = levels
            .iter()
            .map(|level| {
                build_query(*level, &self.states, codes.as_slice()).map(|query| (*level, query))
            })
            .collect::<Result<Vec<_>, GeodataError>>()?;

        self.store.ensure_root()?;

        let mut results = Vec::with_capacity(queries.len());
        for (level, query) in queries {
            results.push(self.run_level(level, &query, &catalog, options)?);
        }
        Ok(CensusResult { levels: results })
    }

    fn run_level(
        &self,
        level: AdminLevel,
        query: &CensusQuery,
        catalog: &Catalog,
        options: PipelineOptions,
    ) -> Result<LevelResult, GeodataError> {
        let json_path = self.store.json_path(level);
        let csv_path = self.store.csv_path(level);
        let mut result = LevelResult {
            level,
            json_path: json_path.to_string(),
            csv_path: csv_path.to_string(),
            request: "skip".to_string(),
            conversion: "skip".to_string(),
            error: None,
        };

        if !options.overwrite && self.store.exists(&json_path) {
            info!(%level, path = %json_path, "output file already exists, skipping request");
        } else {
            info!(
                %level,
                for_clause = %query.for_clause,
                in_clause = %query.in_clause,
                "requesting census table"
            );
            let start = std::time::Instant::now();
            let body = self.client.fetch_table(query, &self.api_key)?;
            let latency_ms = start.elapsed().as_millis() as u64;
            info!(%level, latency_ms, "census response received");
            OutputStore::write_bytes_atomic(&json_path, body.as_bytes())?;
            info!(%level, path = %json_path, "wrote raw response");
            result.request = "download".to_string();
        }

        if !options.overwrite && self.store.exists(&csv_path) {
            info!(%level, path = %csv_path, "output file already exists, skipping conversion");
            return Ok(result);
        }

        match self.convert(level, &json_path, &csv_path, catalog) {
            Ok(rows) => {
                info!(%level, path = %csv_path, rows, "wrote csv table");
                result.conversion = "convert".to_string();
            }
            Err(err @ GeodataError::UnsupportedLevel(_)) => {
                warn!(%level, error = %err, "conversion not available for level");
                result.conversion = "failed".to_string();
                result.error = Some(err.to_string());
            }
            Err(err) => return Err(err),
        }
        Ok(result)
    }

    fn convert(
        &self,
        level: AdminLevel,
        json_path: &Utf8Path,
        csv_path: &Utf8Path,
        catalog: &Catalog,
    ) -> Result<usize, GeodataError> {
        let text = OutputStore::read_to_string(json_path)?;
        let raw_rows = parse_raw_rows(&text)?;
        let table = transform(raw_rows, level, catalog)?;
        let bytes = table.to_csv_bytes()?;
        OutputStore::write_bytes_atomic(csv_path, &bytes)?;
        Ok(table.data_rows().len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use camino::Utf8PathBuf;

    use super::*;

    #[derive(Default)]
    struct MockCensus {
        calls: Mutex<usize>,
    }

    impl CensusClient for MockCensus {
        fn fetch_table(
            &self,
            _query: &CensusQuery,
            _api_key: &str,
        ) -> Result<String, GeodataError> {
            *self.calls.lock().unwrap() += 1;
            Ok(r#"[["NAME","state","county","tract"],["Tract 101","12","5","10100"]]"#.to_string())
        }
    }

    #[test]
    fn empty_state_list_fails_before_any_request() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().join("out")).unwrap();
        let pipeline = CensusPipeline::new(
            OutputStore::new(root.clone()),
            MockCensus::default(),
            "key".to_string(),
            Vec::new(),
            vec![0, 99],
        );

        let err = pipeline
            .run(&[AdminLevel::Tract], PipelineOptions::default())
            .unwrap_err();
        assert_matches!(err, GeodataError::EmptyStateList);
        assert_eq!(*pipeline.client.calls.lock().unwrap(), 0);
        assert!(!root.as_std_path().exists());
    }
}
