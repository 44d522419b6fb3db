//! Error types for report assembly operations.
//!
//! This module defines the error taxonomy for the whole engine. The guiding
//! rule is that asset-level trouble never becomes an error: a missing file is
//! skipped by the assembler, and an undecodable blob is absorbed by the
//! recovery cascade (its `decode` entry point is infallible by signature, so
//! no `AssetUndecodable` variant exists here). Only output-stream and
//! transient-file I/O failures are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur while assembling or rendering a report.
///
/// # Examples
///
/// ```rust,ignore
/// use informe_core::{ReportError, Result};
/// use informe_report::assemble_to_pdf;
///
/// match assemble_to_pdf(&request, variant, &options) {
///     Ok(pdf) => std::fs::write("out.pdf", pdf)?,
///     Err(ReportError::AssemblyIo(e)) => eprintln!("I/O failure: {e}"),
///     Err(e) => eprintln!("assembly failed: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ReportError {
    /// An asset path does not exist under the asset root.
    ///
    /// The assembler catches this and skips the asset silently (no
    /// placeholder, no caption number consumed). It is distinct from a
    /// malformed-but-present asset, which the recovery cascade always turns
    /// into a displayable image.
    #[error("Asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    /// A collage specification resolved to zero usable member images.
    ///
    /// The compositor refuses to build an empty grid; the caller skips the
    /// collage and its caption.
    #[error("Collage has no usable member images")]
    CollageInputEmpty,

    /// Writing a transient file or the final output failed.
    ///
    /// Fatal: propagated to the caller after ledger cleanup has run.
    #[error("Assembly I/O error: {0}")]
    AssemblyIo(#[from] std::io::Error),

    /// Realizing the page flow as a PDF failed (encoding, object graph).
    ///
    /// Fatal, like [`ReportError::AssemblyIo`].
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// JSON (de)serialization of a report request failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Type alias for [`Result<T, ReportError>`].
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_not_found_display() {
        let error = ReportError::AssetNotFound(PathBuf::from("uploads/foto_1.png"));
        let display = format!("{error}");
        assert_eq!(display, "Asset not found: uploads/foto_1.png");
        assert!(display.contains("foto_1.png"));
    }

    #[test]
    fn test_collage_input_empty_display() {
        let error = ReportError::CollageInputEmpty;
        assert_eq!(format!("{error}"), "Collage has no usable member images");
    }

    #[test]
    fn test_io_error_conversion() {
        // Automatic conversion from std::io::Error
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let report_err: ReportError = io_err.into();

        match report_err {
            ReportError::AssemblyIo(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
                assert!(e.to_string().contains("file not found"));
            }
            _ => panic!("Expected AssemblyIo variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
        let report_err: ReportError = json_err.into();

        match report_err {
            ReportError::JsonError(e) => {
                assert!(!e.to_string().is_empty(), "JSON error message should not be empty");
            }
            _ => panic!("Expected JsonError variant"),
        }
    }

    #[test]
    fn test_rendering_error_display() {
        let error = ReportError::Rendering("JPEG encode failed".to_string());
        let display = format!("{error}");
        assert_eq!(display, "Rendering error: JPEG encode failed");
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(ReportError::CollageInputEmpty)
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        match outer() {
            Err(ReportError::CollageInputEmpty) => {}
            _ => panic!("Expected CollageInputEmpty to propagate"),
        }
    }

    #[test]
    fn test_error_size() {
        // Errors should stay small enough to return by value everywhere
        use std::mem::size_of;
        let size = size_of::<ReportError>();
        assert!(
            size < 256,
            "ReportError size is {size} bytes, consider boxing large variants"
        );
    }
}
