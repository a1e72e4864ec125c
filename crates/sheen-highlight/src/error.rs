//! Error type for the highlighting pipeline.

use std::io;

/// Error produced while turning a code block into highlighted HTML.
///
/// The first two variants are recoverable: the decorating renderer absorbs
/// them and falls back to its base renderer for the affected block. Sink
/// failures are not recoverable and abort the whole render pass.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The syntax engine failed while tokenizing the source.
    #[error("tokenizing code block: {0}")]
    Tokenize(#[source] syntect::Error),

    /// The formatter failed while emitting highlighted markup or theme CSS.
    #[error("formatting highlighted HTML: {0}")]
    Format(#[source] syntect::Error),

    /// The output sink failed.
    #[error("writing highlighted output: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = HighlightError::from(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        assert_eq!(
            err.to_string(),
            "writing highlighted output: sink closed"
        );
    }

    #[test]
    fn test_io_variant_from_conversion() {
        let err: HighlightError = io::Error::other("boom").into();
        assert!(matches!(err, HighlightError::Io(_)));
    }
}
