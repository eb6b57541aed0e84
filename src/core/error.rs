use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LicenseGateError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Discovery error: {0}")]
    DiscoveryError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}
