use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GeodataError {
    #[error("invalid age boundaries: {0}")]
    InvalidAgeBoundaries(String),

    #[error("no target states given")]
    EmptyStateList,

    #[error(
        "invalid date format '{0}', use YYYY-MM-DD or 'today' or 'yesterday'"
    )]
    InvalidDate(String),

    #[error("unknown US state: {0}")]
    UnknownState(String),

    #[error("invalid admin level: {0}")]
    InvalidAdminLevel(String),

    #[error("admin level \"{0}\" not implemented")]
    UnsupportedLevel(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("credentials file not found or unreadable: {0}")]
    MissingCredentials(PathBuf),

    #[error("credentials file is empty: {0}")]
    EmptyCredentials(PathBuf),

    #[error("malformed response row: {0}")]
    MalformedRow(String),

    #[error("invalid {field} code '{value}'")]
    InvalidGeographyCode { field: &'static str, value: String },

    #[error("failed to parse census response: {0}")]
    ResponseParse(String),

    #[error("census request failed: {0}")]
    CensusHttp(String),

    #[error("census API returned status {status}: {message}")]
    CensusStatus { status: u16, message: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("required tool not found: {0}")]
    MissingTool(String),
}

impl GeodataError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GeodataError::InvalidAgeBoundaries(_)
                | GeodataError::EmptyStateList
                | GeodataError::InvalidDate(_)
                | GeodataError::UnknownState(_)
                | GeodataError::InvalidAdminLevel(_)
                | GeodataError::ConfigRead(_)
                | GeodataError::ConfigParse(_)
                | GeodataError::MissingCredentials(_)
                | GeodataError::EmptyCredentials(_)
        )
    }
}
