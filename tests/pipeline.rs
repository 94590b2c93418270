use std::fs;
use std::sync::Mutex;

use camino::Utf8PathBuf;

use geodata_fetch::census::CensusClient;
use geodata_fetch::domain::{AdminLevel, StateFips};
use geodata_fetch::error::GeodataError;
use geodata_fetch::pipeline::{CensusPipeline, PipelineOptions};
use geodata_fetch::query::CensusQuery;
use geodata_fetch::store::OutputStore;

#[derive(Default)]
struct MockCensus {
    queries: Mutex<Vec<CensusQuery>>,
}

impl CensusClient for MockCensus {
    fn fetch_table(&self, query: &CensusQuery, api_key: &str) -> Result<String, GeodataError> {
        assert_eq!(api_key, "test-key");
        self.queries.lock().unwrap().push(query.clone());
        let body = match query.for_clause.as_str() {
            "tract:*" => {
                r#"[["B01001_001E","NAME","state","county","tract"],["2500","Census Tract 2, Alachua County, Florida","12","001","000200"]]"#
            }
            _ => r#"[["B01001_001E","NAME","state","county","tract","block group","block"],["7","Block 1000","12","001","000200","1","1000"]]"#,
        };
        Ok(body.to_string())
    }
}

fn pipeline(root: &Utf8PathBuf) -> CensusPipeline<MockCensus> {
    CensusPipeline::new(
        OutputStore::new(root.clone()),
        MockCensus::default(),
        "test-key".to_string(),
        vec![StateFips::new(12)],
        vec![0, 99],
    )
}

fn recorded_queries(pipeline: &CensusPipeline<MockCensus>) -> Vec<CensusQuery> {
    pipeline.client().queries.lock().unwrap().clone()
}

#[test]
fn second_run_skips_and_keeps_files() {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join("output")).unwrap();
    let store = OutputStore::new(root.clone());

    let first = pipeline(&root)
        .run(&[AdminLevel::Tract], PipelineOptions::default())
        .unwrap();
    assert_eq!(first.levels[0].request, "download");
    assert_eq!(first.levels[0].conversion, "convert");

    let json = fs::read(store.json_path(AdminLevel::Tract).as_std_path()).unwrap();
    let csv = fs::read_to_string(store.csv_path(AdminLevel::Tract).as_std_path()).unwrap();
    assert_eq!(
        csv,
        "state,county,tract,GEOID,B01001_001E,NAME\n\
         state,county,tract,GEOID,p,name\n\
         12,001,000200,12001000200,2500,\"Census Tract 2, Alachua County, Florida\"\n"
    );

    let second_pipeline = pipeline(&root);
    let second = second_pipeline
        .run(&[AdminLevel::Tract], PipelineOptions::default())
        .unwrap();
    assert_eq!(second.levels[0].request, "skip");
    assert_eq!(second.levels[0].conversion, "skip");
    assert!(recorded_queries(&second_pipeline).is_empty());
    assert_eq!(
        fs::read(store.json_path(AdminLevel::Tract).as_std_path()).unwrap(),
        json
    );
    assert_eq!(
        fs::read_to_string(store.csv_path(AdminLevel::Tract).as_std_path()).unwrap(),
        csv
    );
}

#[test]
fn overwrite_refetches() {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join("output")).unwrap();
    pipeline(&root)
        .run(&[AdminLevel::Tract], PipelineOptions::default())
        .unwrap();

    let result = pipeline(&root)
        .run(&[AdminLevel::Tract], PipelineOptions { overwrite: true })
        .unwrap();
    assert_eq!(result.levels[0].request, "download");
    assert_eq!(result.levels[0].conversion, "convert");
}

#[test]
fn unsupported_level_does_not_stop_batch() {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join("output")).unwrap();
    let store = OutputStore::new(root.clone());

    let result = pipeline(&root)
        .run(
            &[AdminLevel::Block, AdminLevel::Tract],
            PipelineOptions::default(),
        )
        .unwrap();

    assert_eq!(result.levels[0].level, AdminLevel::Block);
    assert_eq!(result.levels[0].request, "download");
    assert_eq!(result.levels[0].conversion, "failed");
    assert!(result.levels[0].error.is_some());
    assert!(!store.exists(&store.csv_path(AdminLevel::Block)));

    assert_eq!(result.levels[1].conversion, "convert");
    assert!(store.exists(&store.csv_path(AdminLevel::Tract)));
}

#[test]
fn skips_request_when_json_exists() {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join("output")).unwrap();
    let store = OutputStore::new(root.clone());
    store.ensure_root().unwrap();
    fs::write(
        store.json_path(AdminLevel::Tract).as_std_path(),
        r#"[["NAME","state","county","tract"],["T","12","1","1"]]"#,
    )
    .unwrap();

    let pipeline = pipeline(&root);
    let result = pipeline
        .run(&[AdminLevel::Tract], PipelineOptions::default())
        .unwrap();
    assert_eq!(result.levels[0].request, "skip");
    assert_eq!(result.levels[0].conversion, "convert");
    let csv = fs::read_to_string(store.csv_path(AdminLevel::Tract).as_std_path()).unwrap();
    assert!(csv.ends_with("12,1,1,12001000001,T\n"));
}
