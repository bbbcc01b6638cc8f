use thiserror::Error;

/// Configuration errors, raised before any file is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported country code {0:?} (expected one of GB, ES, IT, DE, FR, NL, EU)")]
    UnsupportedCountry(String),
}
