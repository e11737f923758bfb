use thiserror::Error;

/// Every way a map mutation or load can be refused.
///
/// None of these are fatal: the operation that produced one has not touched
/// any state, so the session carries on as before.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("unknown terrain type `{0}`")]
    InvalidTerrain(String),
    #[error(
        "expansion deltas must be non-negative (north={north}, south={south}, east={east}, west={west})"
    )]
    InvalidExpansion {
        north: i32,
        south: i32,
        east: i32,
        west: i32,
    },
    #[error("malformed map document: {0}")]
    MalformedDocument(String),
    #[error("autosave snapshot is unreadable: {0}")]
    AutosaveCorrupt(String),
}

impl MapError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument(reason.into())
    }
}
