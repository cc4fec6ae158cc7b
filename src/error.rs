use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("missing required field: {path}")]
    MissingField { path: String },

    #[error("invalid field {path}: expected {expected}")]
    InvalidField { path: String, expected: &'static str },

    #[error("feature vector shape mismatch: expected {expected}, found {found}")]
    FeatureShapeMismatch { expected: String, found: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid component partition: {0}")]
    InvalidPartition(String),

    #[error("cannot read input {path}: {source}")]
    InputRead {
        path: String,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScorerError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub fn invalid(path: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidField {
            path: path.into(),
            expected,
        }
    }

    /// Errors caused by the caller's description rather than by the scorer.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidField { .. }
                | Self::InputRead { .. }
                | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_path() {
        let err = ScorerError::missing("layout");
        assert_eq!(err.to_string(), "missing required field: layout");
        assert!(err.is_input_error());
    }

    #[test]
    fn shape_mismatch_is_not_an_input_error() {
        let err = ScorerError::FeatureShapeMismatch {
            expected: "30 features".to_string(),
            found: "29 features".to_string(),
        };
        assert!(!err.is_input_error());
    }

    #[test]
    fn unreadable_input_is_an_input_error() {
        let err = ScorerError::InputRead {
            path: "creative.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "cannot read input creative.json: not found");
        assert!(err.is_input_error());
        assert!(!ScorerError::Io(std::io::Error::other("disk")).is_input_error());
    }
}
