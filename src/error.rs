/// Error type for atom and version parsing
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("could not parse atom {0}")]
    MalformedAtom(String),

    #[error("could not parse version {0}")]
    MalformedVersion(String),

    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Result type for portage-version operations
pub type Result<T> = std::result::Result<T, Error>;
