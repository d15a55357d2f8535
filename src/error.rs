use thiserror::Error;

/// Main error type for initparams operations
#[derive(Debug, Error)]
pub enum InitParamsError {
    #[error("Duplicate export key '{key}': declared by '{first}' and '{second}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("Unsupported value type for '{field}': {kind} values have no string form")]
    UnsupportedValueType { field: String, kind: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid type reference: {0}")]
    InvalidTypeRef(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::ser::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Configuration loading error: {0}")]
    ConfigLoadError(#[from] config::ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl InitParamsError {
    pub fn duplicate_key<K, P>(key: K, first: P, second: P) -> Self
    where
        K: Into<String>,
        P: Into<String>,
    {
        Self::DuplicateKey {
            key: key.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn unsupported_value<S: Into<String>>(field: S, kind: S) -> Self {
        Self::UnsupportedValueType {
            field: field.into(),
            kind: kind.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_type_ref<S: Into<String>>(name: S) -> Self {
        Self::InvalidTypeRef(name.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether this error points at a defect in the schema itself rather
    /// than at the values bound onto it.
    pub fn is_schema_defect(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey { .. } | Self::UnsupportedValueType { .. }
        )
    }
}

/// Result type alias for initparams operations
pub type Result<T> = std::result::Result<T, InitParamsError>;
