//! Error types for the widgets.
//!
//! A wrong pairing in the mapping game is gameplay, not an error. These types
//! only cover references to ids that do not exist and malformed external input.

/// Interaction referenced an id missing from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("unknown eye shape id `{0}`")]
    UnknownShape(String),

    #[error("unknown mapping style id `{0}`")]
    UnknownStyle(String),
}

/// Content supplied as JSON could not be used as a catalog.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid content json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("eye shape `{shape}` maps to unknown style `{style}`")]
    DanglingMapping { shape: String, style: String },

    #[error("catalog has no eye shapes")]
    Empty,
}

/// Widget configuration was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("visibility threshold must be within [0, 1], got {0}")]
    Threshold(f64),

    #[error("root margin must be a finite, non-negative pixel count, got {0}")]
    RootMargin(f64),
}
