use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Broadside library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Expected failure modes (unreachable tables, malformed rows, corrupt
/// persisted builds) never surface through this type; they degrade per
/// component contract. `Error` covers the contract-level failures at the
/// external interfaces.
#[derive(Debug, Error)]
pub enum Error {
    /// No suitable project directories could be resolved for build storage.
    #[error("failed to resolve project directories for build storage")]
    ProjectDirsUnavailable,

    /// Raised when a build storage directory could not be created.
    #[error("failed to create storage directory at {path}")]
    StorageDirUnavailable { path: PathBuf },

    /// Raised when a ship name could not be found in the current snapshot.
    #[error("unknown ship name: {name}{}", format_suggestions(.suggestions))]
    UnknownShip {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a build references an archetype outside the fixed set.
    #[error("unknown archetype: {name}")]
    UnknownArchetype { name: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ship_includes_suggestions() {
        let err = Error::UnknownShip {
            name: "Galleonn".to_string(),
            suggestions: vec!["Galleon".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown ship name: Galleonn. Did you mean 'Galleon'?"
        );
    }

    #[test]
    fn unknown_ship_without_suggestions_is_bare() {
        let err = Error::UnknownShip {
            name: "Ghost".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "unknown ship name: Ghost");
    }
}
