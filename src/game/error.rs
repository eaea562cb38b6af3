use thiserror::Error;

/// A symbolic enum name that has no entry in its lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} name {name:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// Errors raised while writing or reading a save file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownName(#[from] UnknownName),
    #[error("{field} {value} is outside 0..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
