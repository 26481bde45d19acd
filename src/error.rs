use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for document generation
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    ParseError { file: PathBuf, message: String },
    InvalidArgument(String),
    SerializationError(String),
    /// A tag name was registered twice with different content
    TagConflict { name: String },
    /// Two distinct types were given the same display name
    SchemaNameCollision {
        name: String,
        existing: String,
        requested: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::ParseError { file, message } => {
                write!(f, "Parse error in {}: {}", file.display(), message)
            }
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Error::TagConflict { name } => {
                write!(f, "Tag named {} is already defined with different content", name)
            }
            Error::SchemaNameCollision {
                name,
                existing,
                requested,
            } => write!(
                f,
                "Schema name {} is already used by {}, cannot register {} under the same name",
                name, existing, requested
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON serialization failed: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML serialization failed: {}", err))
    }
}

impl From<syn::Error> for Error {
    fn from(err: syn::Error) -> Self {
        Error::ParseError {
            file: PathBuf::from("<unknown>"),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_conflict_names_the_tag() {
        let err = Error::TagConflict {
            name: "users".to_string(),
        };
        assert!(err.to_string().contains("users"));
    }

    #[test]
    fn test_name_collision_names_both_types() {
        let err = Error::SchemaNameCollision {
            name: "User".to_string(),
            existing: "User".to_string(),
            requested: "User<Admin>".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("User<Admin>"));
        assert!(message.starts_with("Schema name User"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
    }
}
