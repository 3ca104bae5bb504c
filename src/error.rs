//! All error types for the msgtrans crate.
//!
//! Every failure is fatal for the run: errors propagate up to a single
//! top-level handler, no component retries or terminates the process itself.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Structural violation in an input catalog (wrong delimiter, non-string
    /// key, duplicate key, trailing tokens, bad escape, ...).
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The translator capability failed, returned an unusable result, or the
    /// target language identifier could not be parsed.
    #[error("translation error: {0}")]
    Translation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any of the above, tagged with the file being processed when it failed.
    #[error("error processing {}: {source}", path.display())]
    Batch {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a new malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedDocument(message.into())
    }

    /// Creates a new translation error.
    pub fn translation(message: impl Into<String>) -> Self {
        Error::Translation(message.into())
    }

    /// Wraps an error with the path of the file being processed.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::Batch {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_malformed_document_display() {
        let error = Error::malformed("expected '}' to close object");
        assert_eq!(
            error.to_string(),
            "malformed document: expected '}' to close object"
        );
    }

    #[test]
    fn test_translation_display() {
        let error = Error::translation("empty response for text: hello");
        assert!(error.to_string().contains("translation error"));
    }

    #[test]
    fn test_io_display() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_in_file_wraps_path_and_cause() {
        let error = Error::malformed("trailing tokens").in_file("locales/en/app.msg");
        let display = error.to_string();
        assert!(display.contains("locales/en/app.msg"));
        assert!(display.contains("trailing tokens"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::translation("test");
        let debug = format!("{:?}", error);
        assert!(debug.contains("Translation"));
        assert!(debug.contains("test"));
    }
}
