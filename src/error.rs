use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tessera operations
#[derive(Error, Diagnostic, Debug)]
pub enum TesseraError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tessera::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Failed to decode {path}: {message}")]
    #[diagnostic(code(tessera::decode))]
    Decode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Failed to encode {path}: {message}")]
    #[diagnostic(code(tessera::encode))]
    Encode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Mesh provider failed: {message}")]
    #[diagnostic(code(tessera::mesh::process))]
    MeshProcess {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed mesh in {path}: {message}")]
    #[diagnostic(code(tessera::mesh::format))]
    MeshFormat {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Mesh simplex {simplex} references point {index}, but only {points} points exist")]
    #[diagnostic(code(tessera::mesh::index))]
    MeshIndex {
        simplex: usize,
        index: usize,
        points: usize,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(tessera::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TesseraError>;
