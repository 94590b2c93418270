use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeodataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    County,
    Place,
    Tract,
    BlockGroup,
    Block,
}

impl AdminLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminLevel::County => "county",
            AdminLevel::Place => "place",
            AdminLevel::Tract => "tract",
            AdminLevel::BlockGroup => "block_group",
            AdminLevel::Block => "block",
        }
    }

    pub fn request_name(&self) -> String {
        format!("US_pop_by_age_sex__{}", self.as_str()).replace(' ', "_")
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdminLevel {
    type Err = GeodataError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "county" => Ok(AdminLevel::County),
            "place" => Ok(AdminLevel::Place),
            "tract" => Ok(AdminLevel::Tract),
            "block_group" => Ok(AdminLevel::BlockGroup),
            "block" => Ok(AdminLevel::Block),
            _ => Err(GeodataError::InvalidAdminLevel(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateFips(u8);

impl StateFips {
    pub fn new(code: u8) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for StateFips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

const STATE_FIPS: &[(&str, u8)] = &[
    ("Alabama", 1),
    ("Alaska", 2),
    ("Arizona", 4),
    ("Arkansas", 5),
    ("California", 6),
    ("Colorado", 8),
    ("Connecticut", 9),
    ("Delaware", 10),
    ("District of Columbia", 11),
    ("Florida", 12),
    ("Georgia", 13),
    ("Hawaii", 15),
    ("Idaho", 16),
    ("Illinois", 17),
    ("Indiana", 18),
    ("Iowa", 19),
    ("Kansas", 20),
    ("Kentucky", 21),
    ("Louisiana", 22),
    ("Maine", 23),
    ("Maryland", 24),
    ("Massachusetts", 25),
    ("Michigan", 26),
    ("Minnesota", 27),
    ("Mississippi", 28),
    ("Missouri", 29),
    ("Montana", 30),
    ("Nebraska", 31),
    ("Nevada", 32),
    ("New Hampshire", 33),
    ("New Jersey", 34),
    ("New Mexico", 35),
    ("New York", 36),
    ("North Carolina", 37),
    ("North Dakota", 38),
    ("Ohio", 39),
    ("Oklahoma", 40),
    ("Oregon", 41),
    ("Pennsylvania", 42),
    ("Rhode Island", 44),
    ("South Carolina", 45),
    ("South Dakota", 46),
    ("Tennessee", 47),
    ("Texas", 48),
    ("Utah", 49),
    ("Vermont", 50),
    ("Virginia", 51),
    ("Washington", 53),
    ("West Virginia", 54),
    ("Wisconsin", 55),
    ("Wyoming", 56),
];

pub fn state_fips(name: &str) -> Result<StateFips, GeodataError> {
    let trimmed = name.trim();
    STATE_FIPS
        .iter()
        .find(|(state, _)| state.eq_ignore_ascii_case(trimmed))
        .map(|(_, code)| StateFips(*code))
        .ok_or_else(|| GeodataError::UnknownState(name.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_admin_level_with_space() {
        let level: AdminLevel = "block group".parse().unwrap();
        assert_eq!(level, AdminLevel::BlockGroup);
        assert_eq!(level.as_str(), "block_group");
    }

    #[test]
    fn parse_admin_level_invalid() {
        let err = "nation".parse::<AdminLevel>().unwrap_err();
        assert_matches!(err, GeodataError::InvalidAdminLevel(_));
    }

    #[test]
    fn request_name_uses_underscores() {
        assert_eq!(
            AdminLevel::BlockGroup.request_name(),
            "US_pop_by_age_sex__block_group"
        );
    }

    #[test]
    fn state_lookup() {
        assert_eq!(state_fips("Florida").unwrap().to_string(), "12");
        assert_eq!(state_fips("alabama").unwrap().to_string(), "01");
        assert_matches!(state_fips("Atlantis"), Err(GeodataError::UnknownState(_)));
    }
}
