//! Input resolution: turn a stored document's location into bytes.
//!
//! Every extractor works on an in-memory buffer, so a file on disk is read in
//! full here, once, and in-memory sources are borrowed without copying. The
//! file handle is closed before extraction starts, on every exit path.

use crate::document::{SourceDocument, SourceLocation};
use crate::error::StageError;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read the bytes behind a file-backed source. Zero-length content is an error.
pub fn read_source(source: &SourceDocument) -> Result<Cow<'_, [u8]>, StageError> {
    let bytes = match source.location.as_ref() {
        None => return Err(StageError::MissingLocation),
        Some(SourceLocation::Bytes { data, .. }) => Cow::Borrowed(data.as_slice()),
        Some(SourceLocation::Path(path)) => Cow::Owned(read_local(path)?),
    };
    if bytes.is_empty() {
        return Err(StageError::EmptySource);
    }
    Ok(bytes)
}

/// Read a local file, mapping I/O failures onto user-readable causes.
fn read_local(path: &Path) -> Result<Vec<u8>, StageError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(StageError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(StageError::PermissionDenied {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(StageError::ReadFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}

/// Base filename of the source, or `unnamed` for anonymous in-memory bytes.
pub fn display_name(source: &SourceDocument) -> String {
    source
        .location
        .as_ref()
        .and_then(SourceLocation::file_name)
        .unwrap_or_else(|| "unnamed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;
    use std::io::Write;

    #[test]
    fn test_read_missing_file() {
        let src = SourceDocument::from_path(DocumentKind::Pdf, "t", "/definitely/not/here.pdf");
        let err = read_source(&src).unwrap_err();
        assert!(matches!(err, StageError::FileNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn test_read_local_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%PDF-1.4 stub").unwrap();
        let src = SourceDocument::from_path(DocumentKind::Pdf, "t", tmp.path());
        assert_eq!(read_source(&src).unwrap().as_ref(), b"%PDF-1.4 stub");
    }

    #[test]
    fn test_read_bytes_is_borrowed() {
        let src = SourceDocument::from_bytes(DocumentKind::Pdf, "t", b"abc".to_vec(), None);
        let bytes = read_source(&src).unwrap();
        assert!(matches!(bytes, Cow::Borrowed(_)));
        assert_eq!(bytes.as_ref(), b"abc");
    }

    #[test]
    fn test_manual_has_no_location() {
        let src = SourceDocument::manual("t", "body");
        assert_eq!(read_source(&src).unwrap_err(), StageError::MissingLocation);
    }

    #[test]
    fn test_empty_file_rejected() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let src = SourceDocument::from_path(DocumentKind::Excel, "t", tmp.path());
        assert_eq!(read_source(&src).unwrap_err(), StageError::EmptySource);
    }

    #[test]
    fn test_display_name() {
        let src = SourceDocument::from_path(DocumentKind::Image, "t", "/uploads/cat.png");
        assert_eq!(display_name(&src), "cat.png");
        let src = SourceDocument::from_bytes(DocumentKind::Image, "t", vec![], None);
        assert_eq!(display_name(&src), "unnamed");
    }
}
