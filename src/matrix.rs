//! The (source kind, target kind) dispatch table.
//!
//! Every supported pair maps to a [`Route`]: either a byte-for-byte
//! passthrough, or an extractor followed by a builder. Pairs not listed are
//! unsupported and never reach a pipeline stage.

use crate::document::{DocumentKind, TargetKind};
use crate::error::ConvertError;
use crate::pipeline::build::Builder;
use crate::pipeline::extract::Extractor;
use serde::Serialize;

/// How a supported pair is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Source and target agree; return the stored bytes unchanged.
    Passthrough(TargetKind),
    /// Extract, then build.
    Pipeline { extractor: Extractor, builder: Builder },
}

impl Route {
    pub fn target(self) -> TargetKind {
        match self {
            Route::Passthrough(target) => target,
            Route::Pipeline { builder, .. } => builder.target(),
        }
    }
}

const fn pipeline(extractor: Extractor, builder: Builder) -> Route {
    Route::Pipeline { extractor, builder }
}

use DocumentKind as K;
use TargetKind as T;

static MATRIX: &[(DocumentKind, TargetKind, Route)] = &[
    (K::Pdf, T::Pdf, Route::Passthrough(T::Pdf)),
    (K::Pdf, T::Word, pipeline(Extractor::Pdf, Builder::Word)),
    (K::Pdf, T::Excel, pipeline(Extractor::Pdf, Builder::Spreadsheet)),
    (K::Word, T::Pdf, pipeline(Extractor::Word, Builder::Pdf)),
    (K::Word, T::Word, Route::Passthrough(T::Word)),
    (K::Word, T::Excel, pipeline(Extractor::Word, Builder::Spreadsheet)),
    (K::Excel, T::Pdf, pipeline(Extractor::Spreadsheet, Builder::Pdf)),
    (K::Excel, T::Word, pipeline(Extractor::Spreadsheet, Builder::Word)),
    (K::Excel, T::Excel, Route::Passthrough(T::Excel)),
    (K::Image, T::Pdf, pipeline(Extractor::Image, Builder::Pdf)),
    (K::Image, T::Word, pipeline(Extractor::Image, Builder::Word)),
    (K::Image, T::Excel, pipeline(Extractor::Image, Builder::Spreadsheet)),
    (K::Manual, T::Pdf, pipeline(Extractor::Manual, Builder::Pdf)),
    (K::Manual, T::Word, pipeline(Extractor::Manual, Builder::Word)),
    (K::Manual, T::Excel, pipeline(Extractor::Manual, Builder::Spreadsheet)),
];

/// Look up the route for a pair.
///
/// # Errors
/// [`ConvertError::Unsupported`] when the pair is not in the table,
/// including every pair whose target is `image` or `manual`.
pub fn route(from: DocumentKind, to: DocumentKind) -> Result<Route, ConvertError> {
    let unsupported = || ConvertError::Unsupported { from, to };
    let target = to.as_target().ok_or_else(unsupported)?;
    MATRIX
        .iter()
        .find(|(f, t, _)| *f == from && *t == target)
        .map(|(_, _, route)| *route)
        .ok_or_else(unsupported)
}

/// Every supported pair with its route, in table order.
pub fn supported_pairs() -> impl Iterator<Item = (DocumentKind, TargetKind, Route)> {
    MATRIX.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        let all: Vec<_> = supported_pairs().collect();
        assert_eq!(all.len(), 15);
        let passthroughs = all
            .iter()
            .filter(|(_, _, r)| matches!(r, Route::Passthrough(_)))
            .count();
        assert_eq!(passthroughs, 3);
    }

    #[test]
    fn test_pairs_are_unique_and_consistent() {
        let all: Vec<_> = supported_pairs().collect();
        for (i, (f, t, r)) in all.iter().enumerate() {
            assert_eq!(r.target(), *t, "{f} -> {t}");
            assert!(
                !all[i + 1..].iter().any(|(f2, t2, _)| f2 == f && t2 == t),
                "duplicate {f} -> {t}"
            );
        }
    }

    #[test]
    fn test_same_kind_is_passthrough() {
        for target in TargetKind::ALL {
            assert_eq!(
                route(target.as_kind(), target.as_kind()).unwrap(),
                Route::Passthrough(target)
            );
        }
    }

    #[test]
    fn test_pdf_to_excel() {
        assert_eq!(
            route(DocumentKind::Pdf, DocumentKind::Excel).unwrap(),
            Route::Pipeline {
                extractor: Extractor::Pdf,
                builder: Builder::Spreadsheet
            }
        );
    }

    #[test]
    fn test_non_target_kinds_unsupported() {
        for from in DocumentKind::ALL {
            for to in [DocumentKind::Image, DocumentKind::Manual] {
                assert!(matches!(
                    route(from, to),
                    Err(ConvertError::Unsupported { .. })
                ));
            }
        }
    }

    #[test]
    fn test_unsupported_message() {
        let err = route(DocumentKind::Image, DocumentKind::Image).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conversion from image to image is not supported"
        );
    }
}
