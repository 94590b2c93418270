use std::collections::HashMap;

use crate::error::GeodataError;

pub const NAME_CODE: &str = "NAME";
pub const NAME_HEADER: &str = "name";

const POPULATION_PREFIX: &str = "p";
const GENDERS: [char; 2] = ['M', 'F'];

// ACS table B01001; the last boundary marks "and over".
pub const DEFAULT_AGE_BOUNDARIES: &[u32] = &[
    0, 5, 10, 15, 18, 20, 21, 22, 25, 30, 35, 40, 45, 50, 55, 60, 62, 65, 67, 70, 75, 80, 85, 99,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    pub code: String,
    pub header: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    bindings: Vec<VariableBinding>,
    header_by_code: HashMap<String, usize>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.code.as_str()).collect()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.header.as_str()).collect()
    }

    pub fn header_for(&self, code: &str) -> Option<&str> {
        self.header_by_code
            .get(code)
            .map(|index| self.bindings[*index].header.as_str())
    }
}

pub fn build_catalog(age_boundaries: &[u32]) -> Result<Catalog, GeodataError> {
    if age_boundaries.len() < 2 {
        return Err(GeodataError::InvalidAgeBoundaries(format!(
            "need at least 2 boundaries, got {}",
            age_boundaries.len()
        )));
    }
    if let Some(pair) = age_boundaries.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(GeodataError::InvalidAgeBoundaries(format!(
            "boundaries must be strictly increasing ({} then {})",
            pair[0], pair[1]
        )));
    }

    let bracket_count = age_boundaries.len() - 1;
    let mut headers = vec![POPULATION_PREFIX.to_string()];
    for gender in GENDERS {
        headers.push(format!("{POPULATION_PREFIX}{gender}"));
        for (index, pair) in age_boundaries.windows(2).enumerate() {
            let lo = pair[0];
            if index == bracket_count - 1 {
                headers.push(format!("{POPULATION_PREFIX}{gender}_{lo:02}pls"));
            } else {
                let hi = pair[1] - 1;
                headers.push(format!("{POPULATION_PREFIX}{gender}_{lo:02}_{hi:02}"));
            }
        }
    }

    let mut bindings = headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| VariableBinding {
            code: format!("B01001_{:03}E", index + 1),
            header,
        })
        .collect::<Vec<_>>();
    bindings.push(VariableBinding {
        code: NAME_CODE.to_string(),
        header: NAME_HEADER.to_string(),
    });

    let header_by_code = bindings
        .iter()
        .enumerate()
        .map(|(index, binding)| (binding.code.clone(), index))
        .collect();

    Ok(Catalog {
        bindings,
        header_by_code,
    })
}
