use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::error::GeodataError;
use crate::query::CensusQuery;

pub const DEFAULT_ENDPOINT: &str = "https://api.census.gov/data/2022/acs/acs5";

pub trait CensusClient: Send + Sync {
    fn fetch_table(&self, query: &CensusQuery, api_key: &str) -> Result<String, GeodataError>;
}

#[derive(Clone)]
pub struct CensusHttpClient {
    client: Client,
    endpoint: String,
}

impl CensusHttpClient {
    pub fn new(endpoint: &str) -> Result<Self, GeodataError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("geodata-fetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| GeodataError::CensusHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| GeodataError::CensusHttp(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl CensusClient for CensusHttpClient {
    fn fetch_table(&self, query: &CensusQuery, api_key: &str) -> Result<String, GeodataError> {
        let mut request = self.client.get(&self.endpoint);
        for (name, value) in query.wire_params() {
            request = request.query(&[(name, value.as_str())]);
        }
        request = request.query(&[("key", api_key)]);

        let response = request
            .send()
            .map_err(|err| GeodataError::CensusHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "census request failed".to_string());
            return Err(GeodataError::CensusStatus { status, message });
        }
        response
            .text()
            .map_err(|err| GeodataError::CensusHttp(err.to_string()))
    }
}

pub fn parse_raw_rows(text: &str) -> Result<Vec<Vec<String>>, GeodataError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| GeodataError::ResponseParse(err.to_string()))?;
    let Value::Array(rows) = value else {
        return Err(GeodataError::ResponseParse(
            "expected a JSON array of rows".to_string(),
        ));
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Array(cells) => cells.into_iter().map(cell_to_string).collect(),
            _ => Err(GeodataError::ResponseParse(format!(
                "row {index} is not an array"
            ))),
        })
        .collect()
}

fn cell_to_string(cell: Value) -> Result<String, GeodataError> {
    match cell {
        Value::String(value) => Ok(value),
        Value::Null => Ok(String::new()),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        other => Err(GeodataError::ResponseParse(format!(
            "unexpected nested value: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_rows_with_nulls_and_numbers() {
        let rows = parse_raw_rows(r#"[["NAME","state"],["Dade",null],[12,true]]"#).unwrap();
        assert_eq!(rows[1], vec!["Dade".to_string(), String::new()]);
        assert_eq!(rows[2], vec!["12".to_string(), "true".to_string()]);
    }

    #[test]
    fn parse_rejects_object_body() {
        assert_matches!(
            parse_raw_rows(r#"{"error":"bad key"}"#),
            Err(GeodataError::ResponseParse(_))
        );
        assert_matches!(
            parse_raw_rows(r#"[["a",["b"]]]"#),
            Err(GeodataError::ResponseParse(_))
        );
    }
}
