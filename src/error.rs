use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A term's parameters are missing, unordered or overlap the wrong neighbour.
    #[error("invalid configuration for {variable} term {term}: {reason}")]
    InvalidConfiguration { variable: &'static str, term: String, reason: String },

    /// Every output activation is zero, so there is nothing to defuzzify.
    #[error("no applicable rule fired")]
    NoApplicableRule,

    #[error("invalid input {input:?}: {reason}")]
    InvalidInput { input: String, reason: &'static str },

    #[error("failed to read configuration file {}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration")]
    ParseConfig(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn invalid_configuration(
        variable: &'static str,
        term: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfiguration { variable, term: term.into(), reason: reason.into() }
    }
}
