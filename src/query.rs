use serde::Serialize;

use crate::domain::{AdminLevel, StateFips};
use crate::error::GeodataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CensusQuery {
    pub get_clause: String,
    pub for_clause: String,
    pub in_clause: String,
}

impl CensusQuery {
    // One `in` pair per hierarchy segment; geography names are sent with
    // spaces instead of underscores.
    pub fn wire_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("get", self.get_clause.clone()),
            ("for", geography_wire_name(&self.for_clause)),
        ];
        for segment in self.in_clause.split("&in=") {
            params.push(("in", geography_wire_name(segment)));
        }
        params
    }
}

fn geography_wire_name(predicate: &str) -> String {
    match predicate.split_once(':') {
        Some((name, values)) => format!("{}:{values}", name.replace('_', " ")),
        None => predicate.to_string(),
    }
}

pub fn build_query<S: AsRef<str>>(
    level: AdminLevel,
    states: &[StateFips],
    variable_codes: &[S],
) -> Result<CensusQuery, GeodataError> {
    if states.is_empty() {
        return Err(GeodataError::EmptyStateList);
    }

    let get_clause = variable_codes
        .iter()
        .map(|code| code.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    let for_clause = format!("{}:*", level.as_str());

    let state_list = states
        .iter()
        .map(|state| state.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let mut in_clause = format!("state:{state_list}");
    match level {
        AdminLevel::BlockGroup => in_clause.push_str("&in=county:*&in=tract:*"),
        AdminLevel::Block => in_clause.push_str("&in=county:*&in=tract:*&in=block group:*"),
        AdminLevel::County | AdminLevel::Place | AdminLevel::Tract => {}
    }

    Ok(CensusQuery {
        get_clause,
        for_clause,
        in_clause,
    })
}
