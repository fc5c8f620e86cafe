// src/server/error.rs
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Probe server requires a checker or a status callback, neither was provided")]
    MissingStatusSource,

    #[error("Failed to bind probe server to {addr}: {source}")]
    Bind { addr: String, source: io::Error },
}
