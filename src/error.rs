//! Error types and non-fatal diagnostics.

use std::fmt;

use log::warn;

use crate::tag::DisplayTag;

/// Error returned when the decoded font tables are internally inconsistent.
///
/// This aborts model construction; the recoverable conditions are reported
/// as [`Diagnostic`] values instead.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum DecodeError {
    /// A script record references a feature index beyond the feature list.
    FeatureIndexOutOfBounds {
        script_tag: u32,
        feature_index: u16,
        feature_count: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::FeatureIndexOutOfBounds {
                script_tag,
                feature_index,
                feature_count,
            } => write!(
                f,
                "script '{}' references feature index {} but the feature list has {} entries",
                DisplayTag(*script_tag),
                feature_index,
                feature_count
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// A non-fatal condition recovered from during model construction.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Diagnostic {
    /// A cmap entry maps a code point to a glyph name absent from the glyph
    /// order. The mapping is dropped.
    UnmappedCodePoint { code_point: u32, glyph_name: String },
    /// A lookup subtable declares a substitution type that is not decoded.
    /// The subtable contributes no rules.
    UnsupportedLookup { lookup_index: u16, lookup_type: u16 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmappedCodePoint {
                code_point,
                glyph_name,
            } => write!(
                f,
                "U+{:04X} is mapped to non-existent glyph '{}'",
                code_point, glyph_name
            ),
            Diagnostic::UnsupportedLookup {
                lookup_index,
                lookup_type,
            } => write!(
                f,
                "lookup {}: substitution type {} is not supported",
                lookup_index, lookup_type
            ),
        }
    }
}

/// Sink for diagnostics emitted while a model is built.
///
/// Construction code holds a `&mut Diagnostics` rather than printing, so
/// callers can inspect what was skipped. Each diagnostic is also logged.
#[derive(Default, Debug)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
