pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate endpoint id: {id}")]
    DuplicateId { id: String },

    #[error("invalid endpoint record ({id}): {message}")]
    InvalidRecord { id: String, message: String },

    #[error("unsupported catalog format: {extension} (expected json, yaml or yml)")]
    UnsupportedFormat { extension: String },

    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
