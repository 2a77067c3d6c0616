//! Error types for oncode-core.
//!
//! Extraction itself never fails; the only fallible step is turning a raw
//! URL string into a page location.

use thiserror::Error;

/// Result type alias for oncode-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while building a page snapshot.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The page URL could not be parsed.
    #[error("Invalid page URL '{url}': {source}")]
    InvalidUrl {
        /// URL as given by the caller.
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but has no host to resolve a site from.
    #[error("Page URL has no host: {url}")]
    MissingHost {
        /// URL as given by the caller.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::MissingHost {
            url: "data:text/plain,hi".to_string(),
        };
        assert!(err.to_string().contains("data:text/plain,hi"));

        let source = url::Url::parse("not a url").unwrap_err();
        let err = CoreError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().contains("not a url"));
    }
}
