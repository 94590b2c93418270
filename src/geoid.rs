use crate::domain::AdminLevel;
use crate::error::GeodataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeographyField {
    pub name: &'static str,
    pub width: usize,
}

// Fields are listed outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierRule {
    pub column_name: &'static str,
    pub fields: &'static [GeographyField],
}

impl IdentifierRule {
    pub fn geography_width(&self) -> usize {
        self.fields.len()
    }
}

const STATE: GeographyField = GeographyField {
    name: "state",
    width: 2,
};
const COUNTY: GeographyField = GeographyField {
    name: "county",
    width: 3,
};
const PLACE: GeographyField = GeographyField {
    name: "place",
    width: 5,
};
const TRACT: GeographyField = GeographyField {
    name: "tract",
    width: 6,
};
const BLOCK_GROUP: GeographyField = GeographyField {
    name: "block group",
    width: 1,
};

const COUNTY_RULE: IdentifierRule = IdentifierRule {
    column_name: "FIPS",
    fields: &[STATE, COUNTY],
};
const PLACE_RULE: IdentifierRule = IdentifierRule {
    column_name: "FIPS",
    fields: &[STATE, PLACE],
};
const TRACT_RULE: IdentifierRule = IdentifierRule {
    column_name: "GEOID",
    fields: &[STATE, COUNTY, TRACT],
};
const BLOCK_GROUP_RULE: IdentifierRule = IdentifierRule {
    column_name: "GEOID",
    fields: &[STATE, COUNTY, TRACT, BLOCK_GROUP],
};

pub fn identifier_rule(level: AdminLevel) -> Result<IdentifierRule, GeodataError> {
    match level {
        AdminLevel::County => Ok(COUNTY_RULE),
        AdminLevel::Place => Ok(PLACE_RULE),
        AdminLevel::Tract => Ok(TRACT_RULE),
        AdminLevel::BlockGroup => Ok(BLOCK_GROUP_RULE),
        AdminLevel::Block => Err(GeodataError::UnsupportedLevel(level.to_string())),
    }
}

pub fn encode<S: AsRef<str>>(level: AdminLevel, row: &[S]) -> Result<String, GeodataError> {
    let rule = identifier_rule(level)?;
    encode_with_rule(&rule, row)
}

pub fn encode_with_rule<S: AsRef<str>>(
    rule: &IdentifierRule,
    row: &[S],
) -> Result<String, GeodataError> {
    let width = rule.geography_width();
    if row.len() < width {
        return Err(GeodataError::MalformedRow(format!(
            "expected at least {width} geography columns, got {} columns",
            row.len()
        )));
    }

    let trailing = &row[row.len() - width..];
    let mut identifier = String::with_capacity(rule.fields.iter().map(|f| f.width).sum());
    for (field, raw) in rule.fields.iter().zip(trailing) {
        let raw = raw.as_ref().trim();
        let value = raw
            .parse::<u64>()
            .map_err(|_| GeodataError::InvalidGeographyCode {
                field: field.name,
                value: raw.to_string(),
            })?;
        let padded = format!("{value:0width$}", width = field.width);
        if padded.len() > field.width {
            return Err(GeodataError::InvalidGeographyCode {
                field: field.name,
                value: raw.to_string(),
            });
        }
        identifier.push_str(&padded);
    }
    Ok(identifier)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn place_fips_pads_place_code() {
        let row = ["Tampa city, Florida", "12", "71000"];
        assert_eq!(encode(AdminLevel::Place, &row).unwrap(), "1271000");
        let row = ["x", "1", "7"];
        assert_eq!(encode(AdminLevel::Place, &row).unwrap(), "0100007");
    }

    #[test]
    fn block_group_geoid() {
        let row = ["10", "Block Group 2", "13", "121", "1001", "2"];
        assert_eq!(
            encode(AdminLevel::BlockGroup, &row).unwrap(),
            "131210010012"
        );
    }

    #[test]
    fn block_has_no_identifier_rule() {
        let row = ["1", "2", "3", "4", "5"];
        assert_matches!(
            encode(AdminLevel::Block, &row),
            Err(GeodataError::UnsupportedLevel(_))
        );
    }

    #[test]
    fn rejects_non_numeric_code() {
        let row = ["12", "abc"];
        assert_matches!(
            encode(AdminLevel::County, &row),
            Err(GeodataError::InvalidGeographyCode { field: "county", .. })
        );
    }

    #[test]
    fn rejects_code_wider_than_field() {
        let row = ["12", "1005"];
        assert_matches!(
            encode(AdminLevel::County, &row),
            Err(GeodataError::InvalidGeographyCode { field: "county", .. })
        );
    }
}
