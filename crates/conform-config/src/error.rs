//! Configuration and guard errors.

use std::path::PathBuf;

use thiserror::Error;

use conform_core::PathError;
use conform_schema::ValidationError;

/// Error raised while loading, merging or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source file could not be read or parsed.
    #[error("loading configuration from file {} failed with error: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    /// The merged data violates the schema. One line per field error,
    /// formatted `field(humanKeyName): message`.
    #[error("configuration is not valid by schema:\n{}", .details.join("\n"))]
    Validation { details: Vec<String> },

    /// The schema is malformed or a transform failed.
    #[error("schema error: {0}")]
    Schema(ValidationError),

    /// A previous validation failed and discarded the snapshot.
    #[error("configuration data is unavailable after a failed validation")]
    Invalidated,
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Fields(errors) => ConfigError::Validation {
                details: errors.iter().map(ToString::to_string).collect(),
            },
            other => ConfigError::Schema(other),
        }
    }
}

/// Error raised by the write-guarded data view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// The target exposes no setter for this property.
    #[error("property '{path}' is not writable; use Configuration::set")]
    NotWritable { path: String },

    /// The property path could not be parsed.
    #[error(transparent)]
    Path(#[from] PathError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_schema::FieldError;

    #[test]
    fn test_field_errors_flatten_to_detail_strings() {
        let err = ValidationError::Fields(
            vec![
                FieldError::new("db.port", "Must be number")
                    .with_human_key_name(Some("Database port".to_string())),
                FieldError::new("mode", "Missing required field"),
            ]
            .into(),
        );
        match ConfigError::from(err) {
            ConfigError::Validation { details } => assert_eq!(
                details,
                vec!["db.port(Database port): Must be number", "mode: Missing required field"]
            ),
            other => panic!("Expected Validation, got: {other}"),
        }
    }

    #[test]
    fn test_usage_errors_kept_as_schema_errors() {
        let err = ValidationError::Input("Input is not object".to_string());
        assert!(matches!(ConfigError::from(err), ConfigError::Schema(_)));
    }

    #[test]
    fn test_load_error_display() {
        let err = ConfigError::Load {
            path: PathBuf::from("/etc/app.yml"),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "loading configuration from file /etc/app.yml failed with error: No such file or directory"
        );
    }
}
